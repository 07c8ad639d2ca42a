//! Predictrix backend integration.
//!
//! [`HttpClient`] owns the network-resilience contract: bearer injection,
//! 401 handling and bounded retries. [`PredictrixApi`] exposes one method per
//! backend endpoint and always answers with an [`ApiResult`].

mod client;
mod endpoints;
mod request;
mod result;
mod retry;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpClient, HttpClientBuilder, decode};
pub use endpoints::{PredictrixApi, normalize_pair};
pub use request::ApiRequest;
pub use result::{ApiResult, failure_message};
pub use retry::RetryPolicy;
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
