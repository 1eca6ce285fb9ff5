use thiserror::Error;

use crate::config::{SUPABASE_ANON_KEY_VAR, SUPABASE_TABLE_VAR, SUPABASE_URL_VAR};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitlistError {
    #[error("waitlist store is not configured (missing {})", .missing.join(", "))]
    ConfigurationMissing { missing: Vec<&'static str> },
    #[error("email address is empty")]
    InvalidEmail,
    #[error("failed to fetch waitlist count: {0}")]
    FetchFailed(String),
    #[error("failed to save waitlist entry: {0}")]
    SubmissionFailed(String),
}

impl WaitlistError {
    /// Text shown next to the form. Fetch failures never reach the user.
    pub fn user_message(&self) -> String {
        match self {
            WaitlistError::ConfigurationMissing { .. } => format!(
                "Waitlist submission is disabled because Supabase environment variables are missing. \
                 Please set {}, {}, and {} when building the site.",
                SUPABASE_URL_VAR, SUPABASE_ANON_KEY_VAR, SUPABASE_TABLE_VAR
            ),
            WaitlistError::InvalidEmail => "Please enter a valid email address.".to_string(),
            WaitlistError::FetchFailed(_) | WaitlistError::SubmissionFailed(_) => {
                "Something went wrong while saving your email. Please try again later.".to_string()
            }
        }
    }
}
