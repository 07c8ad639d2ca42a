//! Typed backend schemas.
//!
//! Optional fields are defaulted at the boundary so downstream code never
//! handles untyped JSON.

mod news;
mod preferences;
mod rate;
mod signal;
mod user;

pub use news::{Impact, NewsAnalysis, NewsItem, Sentiment};
pub use preferences::{NotificationPreferences, SignalThresholds, Theme};
pub use rate::Rate;
pub use signal::{Direction, Signal};
pub use user::{AuthPayload, User};
