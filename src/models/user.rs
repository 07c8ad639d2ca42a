//! Account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the email address was confirmed.
    #[serde(default, alias = "isVerified", skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// Registration time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the account still needs email verification.
    pub fn needs_verification(&self) -> bool {
        self.email_verified == Some(false)
    }
}

/// Credential and profile returned by login and registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Profile of the signed-in user.
    #[serde(default)]
    pub user: User,
}
