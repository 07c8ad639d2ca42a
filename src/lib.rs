//! # Predictrix - forex signal client core
//!
//! Client library for the Predictrix backend: authentication, trading
//! signals, live rates, news analysis and notification preferences.
//!
//! ## Architecture
//!
//! - **API**: HTTP client wrapper (bearer injection, 401 handling, bounded
//!   retries) and one typed method per backend endpoint
//! - **Models**: Typed backend schemas
//! - **Store**: Persistent key-value storage for the session and preferences
//! - **Session / Preferences**: Typed views over the store
//! - **Config**: Configuration management
//!
//! Every domain call returns an [`ApiResult`]; failures are data, never `Err`.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod preferences;
pub mod session;
pub mod store;

pub use api::{ApiResult, HttpClient, PredictrixApi, RetryPolicy};
pub use config::Config;
pub use error::{Error, Result};
pub use preferences::Preferences;
pub use session::Session;
pub use store::{FileStore, KeyValueStore, MemoryStore};
