//! Backoff policy for rate-limited auction searches.
//!
//! The search backend throttles aggressively during peak trading hours
//! and usually sends a `Retry-After` hint with its 429 responses. The
//! hint wins when present; otherwise we fall back to doubling waits.

use std::time::Duration;

/// First fallback wait when the backend sends no `Retry-After` hint.
pub(crate) const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

/// Ceiling applied to every wait, hinted or computed.
pub(crate) const DEFAULT_MAX_BACKOFF_SECS: u64 = 30;

/// How many times a throttled request is retried before giving up.
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;

/// Backoff policy for throttled requests.
#[derive(Clone, Debug)]
pub(crate) struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
        }
    }
}

impl RetryConfig {
    /// How long to wait before retry number `attempt`.
    ///
    /// A `Retry-After` value from the backend takes precedence; without
    /// one the wait doubles per attempt starting from `initial_backoff`.
    /// Either way the wait never exceeds `max_backoff`.
    pub fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        let cap = self.max_backoff.as_secs();
        let secs = match retry_after {
            Some(hinted) => hinted,
            None => self.initial_backoff.as_secs().saturating_mul(1 << attempt),
        };
        Duration::from_secs(secs.min(cap))
    }
}
