//! Domain API: one method per backend endpoint.
//!
//! Every method returns an [`ApiResult`] and never an `Err`: transport,
//! HTTP and decoding failures all become `ApiResult::Failure` with the best
//! message available. Store side effects run only after a call succeeded.

mod auth;
mod news;
mod notifications;
mod rates;
mod signals;

pub use signals::normalize_pair;

use super::{ApiRequest, ApiResult, HttpClient};
use crate::error::{Error, Result};
use crate::preferences::Preferences;
use crate::session::Session;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Typed client for the Predictrix backend.
#[derive(Debug, Clone)]
pub struct PredictrixApi {
    http: HttpClient,
    session: Session,
    preferences: Preferences,
}

impl PredictrixApi {
    /// Wrap a configured HTTP client. Session data lives in the client's store.
    pub fn new(http: HttpClient) -> Self {
        let store = http.store().clone();
        Self {
            session: Session::new(store.clone()),
            preferences: Preferences::new(store),
            http,
        }
    }

    /// Underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Stored session (token, profile, device id).
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Stored theme and alert thresholds.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.http.send_json(&request).await
    }
}

/// Normalize a call outcome, logging failures.
fn finish<T>(operation: &'static str, result: Result<T>) -> ApiResult<T> {
    match &result {
        Ok(_) => tracing::debug!(operation, "API call succeeded"),
        Err(e) => tracing::warn!(operation, error = %e, "API call failed"),
    }
    result.into()
}

/// Reject blank required inputs before touching the network.
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

/// Validate an identifier used as a path segment.
fn path_id(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    require(field, value)?;
    if value.contains(['/', '?', '#']) {
        return Err(Error::invalid_input(format!("{field} is malformed")));
    }
    Ok(value.to_string())
}

/// `{"message": ".."}` acknowledgement bodies.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn or(self, fallback: &str) -> String {
        if self.message.is_empty() {
            fallback.to_string()
        } else {
            self.message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("email", "a@b.c").is_ok());
        let err = require("email", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: email is required");
    }

    #[test]
    fn test_path_id() {
        assert_eq!(path_id("id", " 42 ").unwrap(), "42");
        assert!(path_id("id", "../admin").is_err());
        assert!(path_id("id", "").is_err());
    }

    #[test]
    fn test_message_fallback() {
        assert_eq!(MessageResponse::default().or("Done"), "Done");
        let msg = MessageResponse {
            message: "Code sent".to_string(),
        };
        assert_eq!(msg.or("Done"), "Code sent");
    }
}
