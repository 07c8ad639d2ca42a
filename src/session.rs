//! Session credential and identity persisted on the device.

use crate::error::Result;
use crate::models::{AuthPayload, User};
use crate::store::{KeyValueStore, get_json, keys, set_json};
use std::sync::Arc;

/// Typed view over the session keys of the store.
///
/// At most one token exists per installation: it lives under a single key
/// and every sign-in overwrites it.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Create a session view over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current bearer token.
    pub async fn token(&self) -> Result<Option<String>> {
        self.store.get(keys::USER_TOKEN).await
    }

    /// Cached profile of the signed-in user.
    pub async fn user(&self) -> Result<Option<User>> {
        get_json(self.store.as_ref(), keys::USER_DATA).await
    }

    /// Whether a token is stored.
    pub async fn is_signed_in(&self) -> bool {
        matches!(self.token().await, Ok(Some(token)) if !token.is_empty())
    }

    /// Persist the token and profile from a successful sign-in.
    pub async fn save(&self, auth: &AuthPayload) -> Result<()> {
        self.store
            .set(keys::USER_TOKEN, auth.token.clone())
            .await?;
        self.save_user(&auth.user).await
    }

    /// Replace the cached profile.
    pub async fn save_user(&self, user: &User) -> Result<()> {
        set_json(self.store.as_ref(), keys::USER_DATA, user).await
    }

    /// Remove token and profile.
    ///
    /// Both removals are attempted; the first failure is returned.
    pub async fn clear(&self) -> Result<()> {
        let token = self.store.remove(keys::USER_TOKEN).await;
        let user = self.store.remove(keys::USER_DATA).await;
        token.and(user)
    }

    /// Installation identifier, generated on first use.
    pub async fn device_id(&self) -> Result<String> {
        if let Some(id) = self.store.get(keys::DEVICE_ID).await? {
            if !id.is_empty() {
                return Ok(id);
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.store.set(keys::DEVICE_ID, id.clone()).await?;
        tracing::info!(device_id = %id, "Generated device id");
        Ok(id)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
