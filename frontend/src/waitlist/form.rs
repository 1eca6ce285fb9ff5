use crate::error::WaitlistError;

pub const SUCCESS_MESSAGE: &str = "Thanks! You are on the waitlist.";
pub const LOADING_MESSAGE: &str = "Saving your spot...";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl SubmitStatus {
    pub fn from_result(result: &Result<u64, WaitlistError>) -> Self {
        match result {
            Ok(_) => SubmitStatus::Success(SUCCESS_MESSAGE.to_string()),
            Err(err) => SubmitStatus::Error(err.user_message()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitStatus::Idle => None,
            SubmitStatus::Loading => Some(LOADING_MESSAGE),
            SubmitStatus::Success(message) | SubmitStatus::Error(message) => Some(message),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SubmitStatus::Idle => "waitlist-status",
            SubmitStatus::Loading => "waitlist-status loading",
            SubmitStatus::Success(_) => "waitlist-status success",
            SubmitStatus::Error(_) => "waitlist-status error",
        }
    }
}

pub fn toggle_label(open: bool) -> &'static str {
    if open {
        "Hide waitlist form"
    } else {
        "Join the waitlist"
    }
}

pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        "Adding..."
    } else {
        "Get early access"
    }
}
