//! Uniform result shape returned by every domain call.

use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Outcome of a domain API call.
///
/// Serializes as `{"success": true, "data": ..}` or
/// `{"success": false, "error": ".."}`; a success never carries an error and
/// a failure never carries data.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success(T),
    Failure(String),
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self::Success(data)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Payload of a successful call.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Message of a failed call.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    /// Consume and return the payload, if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Transform the payload, keeping failures as they are.
    pub fn map<U, F>(self, f: F) -> ApiResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(data) => ApiResult::Success(f(data)),
            Self::Failure(message) => ApiResult::Failure(message),
        }
    }

    /// Convert back into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(message) => Err(Error::application(message)),
        }
    }
}

impl<T> From<Result<T>> for ApiResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Failure(failure_message(&err)),
        }
    }
}

/// Best available human-readable message for an error.
///
/// Response-derived errors already carry the body's message; everything else
/// falls back to the error's display text.
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::Api { message, .. } | Error::Unauthorized(message) => message.clone(),
        other => other.to_string(),
    }
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ApiResult", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let result = ApiResult::success(json!({"token": "abc"}));
        assert!(result.is_success());
        assert!(result.error().is_none());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "data": {"token": "abc"}})
        );
    }

    #[test]
    fn test_failure_shape() {
        let result: ApiResult<()> = ApiResult::failure("Invalid credentials");
        assert!(!result.is_success());
        assert!(result.data().is_none());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "Invalid credentials"})
        );
    }

    #[test]
    fn test_from_result_uses_body_message() {
        let api: ApiResult<u8> = Err(Error::api(400, "Email already registered")).into();
        assert_eq!(api.error(), Some("Email already registered"));

        let network: ApiResult<u8> = Err(Error::network("Request timed out")).into();
        assert_eq!(network.error(), Some("Network error: Request timed out"));

        let ok: ApiResult<u8> = Ok(7).into();
        assert_eq!(ok.into_data(), Some(7));
    }

    #[test]
    fn test_map_and_into_result() {
        let doubled = ApiResult::success(21).map(|n| n * 2);
        assert_eq!(doubled.into_result().unwrap(), 42);

        let failed: ApiResult<i32> = ApiResult::failure("nope");
        let err = failed.map(|n| n * 2).into_result().unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
