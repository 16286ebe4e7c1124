//! # ty-admin - Thrift Yield administrative CLI
//!
//! Operational commands for the Thrift Yield API service. The central one is
//! `wait-db`, the database readiness gate: it blocks until the backing
//! database accepts connections and exits 0, so dependent steps can be
//! chained safely behind it:
//!
//! ```sh
//! ty-admin wait-db && ./manage migrate && ./manage createsuperuser
//! ```
//!
//! `check-db` is its non-blocking sibling: a single probe attempt reported
//! as text or JSON, exit 0 when the database is reachable and 1 when not.
//!
//! Migrations, superuser provisioning, and the API service itself are
//! external collaborators; this crate only gates them.

pub mod cli;
pub mod report;

pub use cli::{run, Cli};
pub use report::{ProbeReport, ProbeStatus};
