//! # Preflight - Database Readiness Gate
//!
//! Startup synchronization for the Thrift Yield API service. The readiness
//! gate blocks the calling process until the backing database accepts
//! connections, so that dependent steps (migrations, superuser provisioning,
//! test runs) never execute against an unavailable database.
//!
//! ## Features
//!
//! - **Block-until-ready contract** - By default the gate retries forever;
//!   giving up is the operator's (or orchestrator's) decision, not the gate's
//! - **Probe-per-attempt** - Each attempt opens a fresh connection, pings it,
//!   and closes it; no connection is held once the gate returns
//! - **PostgreSQL and SQLite** - Probe target selected by URL scheme
//! - **Optional bounds** - Attempt limits and exponential backoff are
//!   explicit opt-ins, never hidden defaults
//! - **Environment configuration** - 12-factor settings with `.env` support
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use preflight::{wait_for_database, GateConfig};
//!
//! # async fn example() -> Result<(), preflight::GateError> {
//! let config = GateConfig::from_env()?;
//! let report = wait_for_database(&config).await?;
//! println!("database ready after {} attempt(s)", report.attempts);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod probe;
pub mod retry;

pub use config::GateConfig;
pub use error::{GateError, ProbeError, Result};
pub use gate::{wait_for_database, GateReport, ReadinessGate};
pub use probe::{DatabaseKind, DatabaseProbe, Probe};
pub use retry::{Backoff, RetryPolicy};
