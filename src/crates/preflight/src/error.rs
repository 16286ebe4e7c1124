//! Error types for the readiness gate
//!
//! Two layers: [`ProbeError`] describes why a single probe attempt failed,
//! [`GateError`] describes why a gate invocation as a whole cannot succeed.
//! Transient probe failures never surface through [`GateError`] on their own;
//! the retry loop consumes them.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for gate operations
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors that end a gate invocation
#[derive(Error, Debug)]
pub enum GateError {
    /// Invalid or malformed configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Database URL scheme this gate cannot probe
    #[error("unsupported database URL scheme '{0}' (expected postgres, postgresql, or sqlite)")]
    UnsupportedScheme(String),

    /// The opt-in attempt limit was exhausted before the database became ready
    #[error("database not ready after {attempts} attempt(s): {source}")]
    AttemptsExhausted {
        /// Total probe attempts performed
        attempts: u64,
        /// The final probe failure
        #[source]
        source: ProbeError,
    },
}

/// Failure of a single probe attempt
///
/// Deliberately unclassified beyond these two shapes: connection refused,
/// DNS failure, and authentication failure all arrive as [`ProbeError::Connect`]
/// and are retried identically. The gate cannot tell "not yet reachable"
/// from "will never be reachable".
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The connection attempt failed
    #[error("connection attempt failed: {0}")]
    Connect(#[from] sqlx::Error),

    /// The connection attempt did not complete within the per-attempt timeout
    #[error("connection attempt timed out after {0:?}")]
    Timeout(Duration),
}
