//! Device-local preferences.

use crate::error::Result;
use crate::models::{SignalThresholds, Theme};
use crate::store::{KeyValueStore, get_json, keys, set_json};
use std::sync::Arc;

/// Theme and alert thresholds kept in the store.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    /// Create a preferences view over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored theme, `System` when unset or unreadable.
    pub async fn theme(&self) -> Result<Theme> {
        let Some(raw) = self.store.get(keys::THEME).await? else {
            return Ok(Theme::default());
        };
        Ok(raw.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring stored theme");
            Theme::default()
        }))
    }

    /// Persist the chosen theme.
    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set(keys::THEME, theme.to_string()).await
    }

    /// Stored alert thresholds, defaults when unset.
    pub async fn thresholds(&self) -> Result<SignalThresholds> {
        Ok(get_json(self.store.as_ref(), keys::SIGNAL_THRESHOLDS)
            .await?
            .unwrap_or_default())
    }

    /// Persist alert thresholds.
    pub async fn set_thresholds(&self, thresholds: &SignalThresholds) -> Result<()> {
        set_json(self.store.as_ref(), keys::SIGNAL_THRESHOLDS, thresholds).await
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}
