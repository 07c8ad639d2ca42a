//! Retry schedule for transport failures.

use crate::config::RetryConfig;
use reqwest::Method;
use std::time::Duration;

/// Fixed, escalating retry schedule.
///
/// Retry *n* (1-based) waits `delays[n - 1]`; the schedule length is the
/// retry limit. Only transport failures are retried; the client decides
/// which failures qualify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
    idempotent_only: bool,
}

impl RetryPolicy {
    /// Default delays in seconds.
    pub const DEFAULT_DELAYS_SECS: [u64; 3] = [5, 15, 30];

    /// Create a policy from an explicit delay table.
    pub fn new(delays: Vec<Duration>) -> Self {
        Self {
            delays,
            idempotent_only: false,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    /// Build a policy from configuration.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config
                .delays_secs
                .iter()
                .copied()
                .map(Duration::from_secs)
                .collect(),
        )
        .with_idempotent_only(config.idempotent_only)
    }

    /// Restrict retries to idempotent methods.
    pub fn with_idempotent_only(mut self, idempotent_only: bool) -> Self {
        self.idempotent_only = idempotent_only;
        self
    }

    /// Maximum number of retries after the first attempt.
    pub fn max_retries(&self) -> usize {
        self.delays.len()
    }

    /// Delay before the next retry, given how many retries were already made.
    ///
    /// Returns `None` once the schedule is exhausted.
    pub fn next_delay(&self, retries_made: usize) -> Option<Duration> {
        self.delays.get(retries_made).copied()
    }

    /// Whether requests with `method` may be retried at all.
    pub fn allows(&self, method: &Method) -> bool {
        !self.idempotent_only || method.is_idempotent()
    }

    /// Sum of every delay in the schedule.
    pub fn total_delay(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DELAYS_SECS
                .iter()
                .copied()
                .map(Duration::from_secs)
                .collect(),
        )
    }
}
