//! HTTP client wrapper shared by every endpoint.

use super::retry::RetryPolicy;
use super::transport::{RawResponse, ReqwestTransport, Transport, extract_message};
use super::ApiRequest;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::store::{KeyValueStore, MemoryStore, keys};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Fallback message when a 401 body says nothing useful.
const SESSION_EXPIRED: &str = "Session expired, please sign in again";

/// Builder for creating an HTTP client.
pub struct HttpClientBuilder {
    config: ApiConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    transport: Option<Arc<dyn Transport>>,
    retry: Option<RetryPolicy>,
}

impl HttpClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            store: None,
            transport: None,
            retry: None,
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the key-value store holding the session token.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the network transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the retry policy derived from the configuration.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                self.config.base_url.clone(),
                self.config.timeout(),
            )?),
        };
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let retry = self
            .retry
            .unwrap_or_else(|| RetryPolicy::from_config(&self.config.retry));

        Ok(HttpClient::new(transport, store, retry))
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configured client for the Predictrix backend.
///
/// Attaches the stored bearer token to every attempt, clears it when the
/// backend answers 401, and retries transport failures on a fixed schedule.
/// Construct once and share; clones are cheap.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Create a client from its parts. Prefer [`HttpClient::builder`].
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            store,
            retry,
        }
    }

    /// Start building a client with default transport, store and retry policy.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// The store the session token is read from.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Retry schedule applied to transport failures.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send `request`, returning the first 2xx response.
    ///
    /// Errors:
    /// - `Unauthorized` on 401, after removing the stored token. Never retried.
    /// - `Api` for any other non-2xx status. Never retried.
    /// - `Network` once a transport failure outlives the retry schedule.
    #[tracing::instrument(
        name = "http",
        skip(self, request),
        fields(method = %request.method, path = %request.path)
    )]
    pub async fn execute(&self, request: &ApiRequest) -> Result<RawResponse> {
        let mut retries_made = 0usize;

        loop {
            let attempt = request.with_bearer(self.session_token().await);

            match self.transport.send(&attempt).await {
                Ok(response) if response.status == 401 => {
                    tracing::warn!("Backend rejected session token, clearing it");
                    if let Err(e) = self.store.remove(keys::USER_TOKEN).await {
                        tracing::error!(error = %e, "Failed to clear session token");
                    }
                    let message = response
                        .error_message()
                        .unwrap_or_else(|| SESSION_EXPIRED.to_string());
                    return Err(Error::unauthorized(message));
                }
                Ok(response) if !response.is_success() => {
                    let status = response.status;
                    let message = response
                        .error_message()
                        .unwrap_or_else(|| format!("Request failed with status {}", status));
                    tracing::debug!(status, error = %message, "Request failed");
                    return Err(Error::api(status, message));
                }
                Ok(response) => {
                    tracing::debug!(status = response.status, retries = retries_made, "Request succeeded");
                    return Ok(response);
                }
                Err(err) => {
                    let delay = if err.is_transient() && self.retry.allows(&request.method) {
                        self.retry.next_delay(retries_made)
                    } else {
                        None
                    };

                    let Some(delay) = delay else {
                        tracing::warn!(error = %err, retries = retries_made, "Giving up on request");
                        return Err(Error::network(err.to_string()));
                    };

                    retries_made += 1;
                    tracing::warn!(
                        error = %err,
                        attempt = retries_made,
                        delay_secs = delay.as_secs(),
                        "Transport failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Send `request` and decode the JSON body as `T`.
    ///
    /// A 2xx body with `"success": false` is reported as an `Api` error.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        decode(&response)
    }

    async fn session_token(&self) -> Option<String> {
        match self.store.get(keys::USER_TOKEN).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session token, sending unauthenticated");
                None
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Decode a successful response, honoring a logical `success: false`.
pub fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    let value: serde_json::Value = response.json()?;

    if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let message = extract_message(&value).unwrap_or_else(|| "Request failed".to_string());
        return Err(Error::api(response.status, message));
    }

    Ok(serde_json::from_value(value)?)
}
