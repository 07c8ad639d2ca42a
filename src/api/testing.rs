//! Scripted transport for unit tests.

use super::transport::{RawResponse, Transport, TransportError};
use super::ApiRequest;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Reply = Result<RawResponse, TransportError>;

/// Replays queued replies per path and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next reply for `path`.
    pub fn reply(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON reply for `path`.
    pub fn reply_json(&self, path: &str, status: u16, body: serde_json::Value) {
        self.reply(path, Ok(RawResponse::new(status, body.to_string())));
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Number of requests sent to `path`.
    pub fn calls(&self, path: &str) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(TransportError::Other(format!(
                    "no scripted reply for {}",
                    request.path
                )))
            })
    }
}

/// API wired to a scripted transport and an in-memory store.
pub fn api(
    transport: &std::sync::Arc<ScriptedTransport>,
    store: &std::sync::Arc<crate::store::MemoryStore>,
) -> super::PredictrixApi {
    let http = super::HttpClient::new(transport.clone(), store.clone(), super::RetryPolicy::default());
    super::PredictrixApi::new(http)
}
