//! Trading signal endpoints.

use super::{MessageResponse, PredictrixApi, finish, path_id};
use crate::api::{ApiRequest, ApiResult};
use crate::error::{Error, Result};
use crate::models::Signal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SignalResponse {
    #[serde(alias = "data", alias = "prediction")]
    signal: Signal,
}

#[derive(Debug, Deserialize)]
struct SignalListResponse {
    #[serde(default, alias = "data")]
    signals: Vec<Signal>,
}

/// Canonical pair symbol: uppercase, separators removed, six letters.
///
/// Accepts "eur/usd", "EUR-USD", "EURUSD".
pub fn normalize_pair(pair: &str) -> Result<String> {
    let symbol: String = pair
        .chars()
        .filter(|c| !matches!(c, '/' | '-' | '_' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if symbol.len() != 6 || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::invalid_input(format!(
            "'{}' is not a currency pair",
            pair.trim()
        )));
    }
    Ok(symbol)
}

impl PredictrixApi {
    /// Latest signal for one currency pair.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_signal(&self, pair: &str) -> ApiResult<Signal> {
        let result: Result<Signal> = async {
            let pair = normalize_pair(pair)?;
            let response: SignalResponse = self
                .call(ApiRequest::get(format!("/signals/{}", pair)))
                .await?;
            Ok(response.signal)
        }
        .await;
        finish("fetch_signal", result)
    }

    /// Latest signals across all tracked pairs.
    pub async fn fetch_signals(&self) -> ApiResult<Vec<Signal>> {
        let result: Result<SignalListResponse> = self.call(ApiRequest::get("/signals")).await;
        finish("fetch_signals", result.map(|r| r.signals))
    }

    /// Bookmark a signal for the signed-in user.
    pub async fn save_signal(&self, signal_id: &str) -> ApiResult<String> {
        let result: Result<String> = async {
            let id = path_id("signal id", signal_id)?;
            let response: MessageResponse = self
                .call(ApiRequest::post(format!("/signals/{}/save", id)))
                .await?;
            Ok(response.or("Signal saved"))
        }
        .await;
        finish("save_signal", result)
    }

    /// Signals bookmarked by the signed-in user.
    pub async fn saved_signals(&self) -> ApiResult<Vec<Signal>> {
        let result: Result<SignalListResponse> =
            self.call(ApiRequest::get("/signals/saved")).await;
        finish("saved_signals", result.map(|r| r.signals))
    }
}
