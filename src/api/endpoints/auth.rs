//! Authentication endpoints.

use super::{MessageResponse, PredictrixApi, finish, require};
use crate::api::{ApiRequest, ApiResult};
use crate::error::Result;
use crate::models::{AuthPayload, User};
use serde::Deserialize;
use serde_json::json;

/// Profile responses: `{"user": ..}` or `{"data": ..}`, optionally with a
/// fresh token.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(alias = "data")]
    user: User,
    #[serde(default)]
    token: Option<String>,
}

impl PredictrixApi {
    /// Sign in with email and password; stores token and profile on success.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthPayload> {
        let result = self.login_inner(email, password).await;
        if let Ok(auth) = &result {
            self.persist_session(auth).await;
        }
        finish("login", result)
    }

    async fn login_inner(&self, email: &str, password: &str) -> Result<AuthPayload> {
        require("email", email)?;
        require("password", password)?;

        let request = ApiRequest::post("/auth/login").json(&json!({
            "email": email.trim(),
            "password": password,
        }))?;
        self.call(request).await
    }

    /// Create an account; stores token and profile on success.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<AuthPayload> {
        let result = self.register_inner(name, email, password).await;
        if let Ok(auth) = &result {
            self.persist_session(auth).await;
        }
        finish("register", result)
    }

    async fn register_inner(&self, name: &str, email: &str, password: &str) -> Result<AuthPayload> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;

        let request = ApiRequest::post("/auth/register").json(&json!({
            "name": name.trim(),
            "email": email.trim(),
            "password": password,
        }))?;
        self.call(request).await
    }

    /// Confirm an email address with the emailed code.
    #[tracing::instrument(skip(self, code), fields(email = %email))]
    pub async fn verify_email(&self, email: &str, code: &str) -> ApiResult<User> {
        let result = self.verify_email_inner(email, code).await;
        if let Ok(profile) = &result {
            self.persist_profile(profile).await;
        }
        finish("verify_email", result.map(|profile| profile.user))
    }

    async fn verify_email_inner(&self, email: &str, code: &str) -> Result<ProfileResponse> {
        require("email", email)?;
        require("code", code)?;

        let request = ApiRequest::post("/auth/verify-email").json(&json!({
            "email": email.trim(),
            "code": code.trim(),
        }))?;
        self.call(request).await
    }

    /// Send a new verification code.
    pub async fn resend_verification(&self, email: &str) -> ApiResult<String> {
        let result: Result<String> = async {
            require("email", email)?;
            let request = ApiRequest::post("/auth/resend-verification")
                .json(&json!({ "email": email.trim() }))?;
            let response: MessageResponse = self.call(request).await?;
            Ok(response.or("Verification code sent"))
        }
        .await;
        finish("resend_verification", result)
    }

    /// Start a password reset; the backend emails a code.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<String> {
        let result: Result<String> = async {
            require("email", email)?;
            let request = ApiRequest::post("/auth/forgot-password")
                .json(&json!({ "email": email.trim() }))?;
            let response: MessageResponse = self.call(request).await?;
            Ok(response.or("Password reset code sent"))
        }
        .await;
        finish("forgot_password", result)
    }

    /// Set a new password using the emailed reset code.
    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> ApiResult<String> {
        let result: Result<String> = async {
            require("email", email)?;
            require("code", code)?;
            require("new password", new_password)?;
            let request = ApiRequest::post("/auth/reset-password").json(&json!({
                "email": email.trim(),
                "code": code.trim(),
                "newPassword": new_password,
            }))?;
            let response: MessageResponse = self.call(request).await?;
            Ok(response.or("Password updated"))
        }
        .await;
        finish("reset_password", result)
    }

    /// Fetch the signed-in user's profile and refresh the cached copy.
    pub async fn current_user(&self) -> ApiResult<User> {
        let result: Result<ProfileResponse> = self.call(ApiRequest::get("/auth/me")).await;
        if let Ok(profile) = &result {
            self.persist_profile(profile).await;
        }
        finish("current_user", result.map(|profile| profile.user))
    }

    /// Sign out. The backend is told on a best-effort basis; the local
    /// session is always removed.
    pub async fn logout(&self) -> ApiResult<String> {
        if self.session().is_signed_in().await {
            if let Err(e) = self.http().execute(&ApiRequest::post("/auth/logout")).await {
                tracing::info!(error = %e, "Backend logout failed, clearing local session anyway");
            }
        }
        let result = self.session().clear().await;
        finish("logout", result.map(|()| "Signed out".to_string()))
    }

    async fn persist_session(&self, auth: &AuthPayload) {
        if let Err(e) = self.session().save(auth).await {
            tracing::error!(error = %e, "Failed to persist session");
        }
    }

    async fn persist_profile(&self, profile: &ProfileResponse) {
        if let Some(token) = &profile.token {
            let auth = AuthPayload {
                token: token.clone(),
                user: profile.user.clone(),
            };
            self.persist_session(&auth).await;
        } else if let Err(e) = self.session().save_user(&profile.user).await {
            tracing::error!(error = %e, "Failed to persist user profile");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{ScriptedTransport, api};
    use crate::api::transport::TransportError;
    use crate::store::{KeyValueStore, MemoryStore, keys};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_login_stores_session() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            "/auth/login",
            200,
            json!({"success": true, "token": "abc", "user": {"name": "A"}}),
        );
        let store = Arc::new(MemoryStore::new());

        let result = api(&transport, &store).login("user@test.com", "secret").await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "data": {"token": "abc", "user": {"name": "A"}}})
        );
        assert_eq!(store.get(keys::USER_TOKEN).await.unwrap().as_deref(), Some("abc"));
        assert_eq!(
            store.get(keys::USER_DATA).await.unwrap().as_deref(),
            Some(r#"{"name":"A"}"#)
        );

        let sent = transport.requests();
        assert_eq!(
            sent[0].body,
            Some(json!({"email": "user@test.com", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_login_failure_uses_body_error_and_stores_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            "/auth/login",
            400,
            json!({"success": false, "error": "Invalid credentials"}),
        );
        let store = Arc::new(MemoryStore::new());

        let result = api(&transport, &store).login("user@test.com", "wrong").await;

        assert_eq!(result.error(), Some("Invalid credentials"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_login_logical_failure_in_2xx_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            "/auth/login",
            200,
            json!({"success": false, "message": "Please verify your email first"}),
        );
        let store = Arc::new(MemoryStore::new());

        let result = api(&transport, &store).login("user@test.com", "secret").await;
        assert_eq!(result.error(), Some("Please verify your email first"));
        assert!(store.get(keys::USER_TOKEN).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_blank_input_offline() {
        let transport = Arc::new(ScriptedTransport::new());
        let store = Arc::new(MemoryStore::new());

        let result = api(&transport, &store).login("", "secret").await;
        assert_eq!(result.error(), Some("Invalid input: email is required"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_missing_token_is_a_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json("/auth/login", 200, json!({"success": true, "user": {"name": "A"}}));
        let store = Arc::new(MemoryStore::new());

        let result = api(&transport, &store).login("user@test.com", "secret").await;
        assert!(!result.is_success());
        assert!(result.error().unwrap().starts_with("Serialization error"));
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_times_out_after_full_schedule() {
        let transport = Arc::new(ScriptedTransport::new());
        for _ in 0..4 {
            transport.reply("/auth/login", Err(TransportError::Timeout));
        }
        let store = Arc::new(MemoryStore::new());

        let start = tokio::time::Instant::now();
        let result = api(&transport, &store).login("user@test.com", "secret").await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "Network error: Request timed out"})
        );
        assert!(start.elapsed() >= Duration::from_secs(50));
    }

    #[tokio::test]
    async fn test_register_stores_session() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            "/auth/register",
            201,
            json!({"success": true, "token": "new-token", "user": {"name": "Ada", "email": "ada@test.com", "isVerified": false}}),
        );
        let store = Arc::new(MemoryStore::new());
        let api = api(&transport, &store);

        let result = api.register("Ada", "ada@test.com", "pw").await;
        assert!(result.data().unwrap().user.needs_verification());
        assert!(api.session().is_signed_in().await);
    }

    #[tokio::test]
    async fn test_verify_email_refreshes_profile() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            "/auth/verify-email",
            200,
            json!({"success": true, "user": {"name": "Ada", "isVerified": true}}),
        );
        let store = Arc::new(MemoryStore::with_entries([(keys::USER_TOKEN, "abc")]));
        let api = api(&transport, &store);

        let result = api.verify_email("ada@test.com", "123456").await;
        assert_eq!(result.data().unwrap().email_verified, Some(true));
        assert_eq!(api.session().user().await.unwrap().unwrap().email_verified, Some(true));
        assert_eq!(store.get(keys::USER_TOKEN).await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_verify_email_with_token_replaces_session() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            "/auth/verify-email",
            200,
            json!({"success": true, "token": "fresh", "data": {"name": "Ada"}}),
        );
        let store = Arc::new(MemoryStore::with_entries([(keys::USER_TOKEN, "stale")]));

        let result = api(&transport, &store).verify_email("ada@test.com", "123456").await;
        assert!(result.is_success());
        assert_eq!(store.get(keys::USER_TOKEN).await.unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_password_reset_flow_messages() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json("/auth/forgot-password", 200, json!({"success": true}));
        transport.reply_json(
            "/auth/reset-password",
            200,
            json!({"success": true, "message": "Password changed"}),
        );
        transport.reply_json(
            "/auth/resend-verification",
            429,
            json!({"error": "Too many requests"}),
        );
        let store = Arc::new(MemoryStore::new());
        let api = api(&transport, &store);

        assert_eq!(
            api.forgot_password("ada@test.com").await.into_data().as_deref(),
            Some("Password reset code sent")
        );
        assert_eq!(
            api.reset_password("ada@test.com", "999", "n3w").await.into_data().as_deref(),
            Some("Password changed")
        );
        assert_eq!(
            api.resend_verification("ada@test.com").await.error(),
            Some("Too many requests")
        );
        assert_eq!(
            transport.requests()[1].body,
            Some(json!({"email": "ada@test.com", "code": "999", "newPassword": "n3w"}))
        );
    }

    #[tokio::test]
    async fn test_current_user_unauthorized_clears_token() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json("/auth/me", 401, json!({"error": "Invalid token"}));
        let store = Arc::new(MemoryStore::with_entries([(keys::USER_TOKEN, "abc")]));

        let result = api(&transport, &store).current_user().await;
        assert_eq!(result.error(), Some("Invalid token"));
        assert!(store.get(keys::USER_TOKEN).await.unwrap().is_none());
        assert_eq!(transport.calls("/auth/me"), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_if_backend_fails() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json("/auth/logout", 500, json!({"error": "boom"}));
        let store = Arc::new(MemoryStore::with_entries([
            (keys::USER_TOKEN, "abc"),
            (keys::USER_DATA, r#"{"name":"A"}"#),
            (keys::THEME, "dark"),
        ]));

        let result = api(&transport, &store).logout().await;
        assert_eq!(result.data().map(String::as_str), Some("Signed out"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "data": "Signed out"})
        );
        assert!(store.get(keys::USER_TOKEN).await.unwrap().is_none());
        assert!(store.get(keys::USER_DATA).await.unwrap().is_none());
        assert_eq!(store.get(keys::THEME).await.unwrap().as_deref(), Some("dark"));
        assert_eq!(transport.requests()[0].bearer.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_logout_when_signed_out_skips_backend() {
        let transport = Arc::new(ScriptedTransport::new());
        let store = Arc::new(MemoryStore::new());

        assert!(api(&transport, &store).logout().await.is_success());
        assert!(transport.requests().is_empty());
    }
}
