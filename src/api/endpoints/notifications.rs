//! Push registration and notification preference endpoints.

use super::{MessageResponse, PredictrixApi, finish, require};
use crate::api::{ApiRequest, ApiResult};
use crate::error::Result;
use crate::models::{NotificationPreferences, SignalThresholds};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct PreferencesResponse {
    #[serde(default, alias = "data")]
    preferences: Option<NotificationPreferences>,
}

impl PredictrixApi {
    /// Register this installation's push token with the backend.
    #[tracing::instrument(skip(self, push_token))]
    pub async fn register_device(&self, push_token: &str) -> ApiResult<String> {
        let result: Result<String> = async {
            require("push token", push_token)?;
            let device_id = self.session().device_id().await?;
            let request = ApiRequest::post("/notifications/register").json(&json!({
                "deviceId": device_id,
                "pushToken": push_token.trim(),
                "platform": std::env::consts::OS,
            }))?;
            let response: MessageResponse = self.call(request).await?;
            Ok(response.or("Device registered"))
        }
        .await;
        finish("register_device", result)
    }

    /// Current notification preferences; also refreshes the local thresholds.
    pub async fn notification_preferences(&self) -> ApiResult<NotificationPreferences> {
        let result: Result<NotificationPreferences> = async {
            let response: PreferencesResponse = self
                .call(ApiRequest::get("/notifications/preferences"))
                .await?;
            Ok(response.preferences.unwrap_or_default())
        }
        .await;
        if let Ok(prefs) = &result {
            self.persist_thresholds(prefs).await;
        }
        finish("notification_preferences", result)
    }

    /// Replace notification preferences; stores the thresholds locally.
    pub async fn update_notification_preferences(
        &self,
        prefs: &NotificationPreferences,
    ) -> ApiResult<NotificationPreferences> {
        let result: Result<NotificationPreferences> = async {
            prefs.validate()?;
            let request = ApiRequest::put("/notifications/preferences").json(prefs)?;
            let response: PreferencesResponse = self.call(request).await?;
            Ok(response.preferences.unwrap_or_else(|| prefs.clone()))
        }
        .await;
        if let Ok(saved) = &result {
            self.persist_thresholds(saved).await;
        }
        finish("update_notification_preferences", result)
    }

    async fn persist_thresholds(&self, prefs: &NotificationPreferences) {
        let thresholds = SignalThresholds::from(prefs);
        if let Err(e) = self.preferences().set_thresholds(&thresholds).await {
            tracing::error!(error = %e, "Failed to persist signal thresholds");
        }
    }
}
