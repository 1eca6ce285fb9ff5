use gloo_net::http::{Method, Request, Response};
use serde::{Deserialize, Serialize};

use crate::config::WaitlistSettings;
use crate::error::WaitlistError;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WaitlistSubmission {
    pub email: String,
}

impl WaitlistSubmission {
    pub fn new(email: &str) -> Result<Self, WaitlistError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(WaitlistError::InvalidEmail);
        }
        Ok(Self { email: email.to_string() })
    }
}

/// Hosted table holding one row per signup.
#[allow(async_fn_in_trait)]
pub trait WaitlistStore {
    async fn count_rows(&self) -> Result<u64, WaitlistError>;
    async fn insert_row(&self, submission: &WaitlistSubmission) -> Result<(), WaitlistError>;
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

/// Supabase PostgREST table reached with the public anon key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseStore {
    settings: WaitlistSettings,
}

impl SupabaseStore {
    pub fn new(settings: WaitlistSettings) -> Self {
        Self { settings }
    }

    fn authorized(&self, request: Request) -> Request {
        request
            .header("apikey", &self.settings.anon_key)
            .header("Authorization", &format!("Bearer {}", self.settings.anon_key))
    }
}

impl WaitlistStore for SupabaseStore {
    async fn count_rows(&self) -> Result<u64, WaitlistError> {
        let url = format!("{}?select=*", self.settings.rest_endpoint());
        let response = self
            .authorized(Request::new(&url).method(Method::HEAD))
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| WaitlistError::FetchFailed(e.to_string()))?;

        if !response.ok() {
            return Err(WaitlistError::FetchFailed(format!("status {}", response.status())));
        }

        let range = response
            .headers()
            .get("content-range")
            .ok_or_else(|| WaitlistError::FetchFailed("missing Content-Range header".to_string()))?;
        parse_content_range_total(&range)
    }

    async fn insert_row(&self, submission: &WaitlistSubmission) -> Result<(), WaitlistError> {
        let response = self
            .authorized(Request::post(&self.settings.rest_endpoint()))
            .header("Prefer", "return=minimal")
            .json(submission)
            .map_err(|e| WaitlistError::SubmissionFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| WaitlistError::SubmissionFailed(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(WaitlistError::SubmissionFailed(describe_failure(response).await))
        }
    }
}

async fn describe_failure(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<PostgrestError>(&body) {
        Ok(error) => format!("status {}: {}", status, error.message),
        Err(_) if body.is_empty() => format!("status {}", status),
        Err(_) => format!("status {}: {}", status, body),
    }
}

/// Total from a PostgREST `Content-Range` header, e.g. `0-24/3573` or `*/0`.
pub fn parse_content_range_total(header: &str) -> Result<u64, WaitlistError> {
    header
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse::<u64>().ok())
        .ok_or_else(|| WaitlistError::FetchFailed(format!("unexpected Content-Range {:?}", header)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_range_total_is_parsed() {
        assert_eq!(parse_content_range_total("0-9/10").unwrap(), 10);
        assert_eq!(parse_content_range_total("*/0").unwrap(), 0);
    }

    #[test]
    fn unknown_total_is_a_fetch_failure() {
        assert!(matches!(
            parse_content_range_total("0-9/*"),
            Err(WaitlistError::FetchFailed(_))
        ));
        assert!(parse_content_range_total("garbage").is_err());
    }

    #[test]
    fn submission_trims_and_rejects_blank_email() {
        let submission = WaitlistSubmission::new("  ada@example.com \n").unwrap();
        assert_eq!(
            serde_json::to_string(&submission).unwrap(),
            r#"{"email":"ada@example.com"}"#
        );
        assert_eq!(WaitlistSubmission::new("   "), Err(WaitlistError::InvalidEmail));
    }
}
