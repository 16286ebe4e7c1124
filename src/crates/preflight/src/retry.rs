//! Retry policy for the readiness gate
//!
//! Controls how long the gate sleeps between failed probe attempts and
//! whether it ever stops trying. The default is the documented contract:
//! a fixed one second interval and no attempt limit.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::time::Duration;

/// How the delay between failed attempts evolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Same interval after every failure
    Fixed,
    /// Interval grows by the multiplier after each consecutive failure
    Exponential,
}

impl std::str::FromStr for Backoff {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "exponential" => Ok(Self::Exponential),
            other => Err(format!(
                "invalid backoff '{}' (expected 'fixed' or 'exponential')",
                other
            )),
        }
    }
}

impl std::fmt::Display for Backoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Exponential => write!(f, "exponential"),
        }
    }
}

/// Retry strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Base delay between attempts in milliseconds
    pub interval_ms: u64,

    /// Backoff kind (fixed or exponential)
    pub backoff: Backoff,

    /// Multiplier for exponential backoff (typically 2.0)
    pub multiplier: f64,

    /// Maximum delay in milliseconds
    pub max_interval_ms: u64,

    /// Whether to add random jitter to delays
    pub jitter: bool,

    /// Maximum number of probe attempts; `None` means wait forever
    pub max_attempts: Option<NonZeroU64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 1000, // 1 second
            backoff: Backoff::Fixed,
            multiplier: 2.0,
            max_interval_ms: 30_000, // 30 seconds
            jitter: false,
            max_attempts: None, // wait forever
        }
    }
}

impl RetryPolicy {
    /// Create the default policy: fixed 1 s interval, unlimited attempts
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base interval
    pub fn with_interval(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }

    /// Set the backoff kind
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the exponential backoff multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the maximum delay
    pub fn with_max_interval(mut self, ms: u64) -> Self {
        self.max_interval_ms = ms;
        self
    }

    /// Enable or disable jitter
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Bound the number of attempts; `None` restores the wait-forever default
    pub fn with_max_attempts(mut self, max_attempts: Option<NonZeroU64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Calculate the delay to sleep after the given consecutive failure count
    ///
    /// `failures` is 1 after the first failed attempt. Fixed backoff returns
    /// the base interval; exponential grows by the multiplier per failure,
    /// capped at the maximum interval. Jitter adds up to 25% on top.
    pub fn delay_after_failure(&self, failures: u64) -> Duration {
        let exponent = failures.saturating_sub(1).min(i32::MAX as u64) as i32;

        let delay_ms = match self.backoff {
            Backoff::Fixed => self.interval_ms,
            Backoff::Exponential => {
                (self.interval_ms as f64 * self.multiplier.powi(exponent)) as u64
            }
        };

        let delay_ms = delay_ms.min(self.max_interval_ms);

        let delay_ms = if self.jitter {
            // Add up to 25% random jitter
            let jitter_amount = (delay_ms as f64 * 0.25 * rand::random::<f64>()) as u64;
            delay_ms + jitter_amount
        } else {
            delay_ms
        };

        Duration::from_millis(delay_ms)
    }
}
