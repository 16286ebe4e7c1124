//! Probe attempts against the backing database
//!
//! A probe is one discrete check of whether the dependency currently accepts
//! connections. [`DatabaseProbe`] opens a fresh single connection, pings it,
//! and closes it again; nothing is held between attempts and no resource is
//! leased to the caller.

use crate::error::{GateError, ProbeError};
use async_trait::async_trait;
use sqlx::{Connection, PgConnection, SqliteConnection};
use std::time::Duration;
use url::Url;

/// One discrete connection attempt against a dependency
///
/// Implementations must return `Ok(())` only when a connection attempt
/// actually succeeded at that moment; success says nothing about the
/// dependency remaining reachable afterwards.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Perform a single probe attempt
    async fn attempt(&self) -> Result<(), ProbeError>;

    /// Display name of the probed target, safe for logs (no credentials)
    fn target(&self) -> &str;
}

/// Database backend selected from the connection URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Sqlite,
}

/// Classify a database URL by scheme
///
/// Fails fast only on what is detectable without contacting the dependency:
/// an unparseable URL or a scheme this gate cannot probe. Everything that
/// parses (wrong host, bad password, absent server) is left for probing,
/// where all failures are treated identically.
pub fn classify_url(database_url: &str) -> Result<DatabaseKind, GateError> {
    let parsed = Url::parse(database_url)
        .map_err(|e| GateError::Config(format!("invalid database URL: {}", e)))?;

    match parsed.scheme() {
        "postgres" | "postgresql" => Ok(DatabaseKind::Postgres),
        "sqlite" => Ok(DatabaseKind::Sqlite),
        other => Err(GateError::UnsupportedScheme(other.to_string())),
    }
}

/// Strip the password from a connection URL for logging
pub fn redact_url(database_url: &str) -> String {
    match Url::parse(database_url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                // set_password only fails for non-authority URLs, which
                // cannot carry a password in the first place
                let _ = parsed.set_password(Some("****"));
            }
            parsed.to_string()
        }
        Err(_) => database_url.to_string(),
    }
}

/// Production probe: one fresh connection per attempt
///
/// Supports PostgreSQL (`postgres://`, `postgresql://`) and SQLite
/// (`sqlite:`) URLs. Each attempt is bounded by a per-attempt connect
/// timeout; an elapsed timeout counts as an ordinary failed attempt.
pub struct DatabaseProbe {
    url: String,
    redacted: String,
    kind: DatabaseKind,
    connect_timeout: Duration,
}

impl DatabaseProbe {
    /// Create a probe for the given connection URL
    ///
    /// # Errors
    /// Returns an error if the URL does not parse or its scheme is not
    /// a supported database backend.
    pub fn new(database_url: &str, connect_timeout: Duration) -> Result<Self, GateError> {
        let kind = classify_url(database_url)?;

        Ok(Self {
            url: database_url.to_string(),
            redacted: redact_url(database_url),
            kind,
            connect_timeout,
        })
    }

    /// Which backend this probe talks to
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    async fn connect_once(&self) -> Result<(), ProbeError> {
        match self.kind {
            DatabaseKind::Postgres => {
                let mut conn = PgConnection::connect(&self.url).await?;
                conn.ping().await?;
                conn.close().await?;
            }
            DatabaseKind::Sqlite => {
                let mut conn = SqliteConnection::connect(&self.url).await?;
                conn.ping().await?;
                conn.close().await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Probe for DatabaseProbe {
    async fn attempt(&self) -> Result<(), ProbeError> {
        match tokio::time::timeout(self.connect_timeout, self.connect_once()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(self.connect_timeout)),
        }
    }

    fn target(&self) -> &str {
        &self.redacted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_postgres_schemes() {
        assert_eq!(
            classify_url("postgres://app:secret@db:5432/thrift_yield").unwrap(),
            DatabaseKind::Postgres
        );
        assert_eq!(
            classify_url("postgresql://localhost/thrift_yield").unwrap(),
            DatabaseKind::Postgres
        );
    }

    #[test]
    fn test_classify_sqlite_schemes() {
        assert_eq!(
            classify_url("sqlite::memory:").unwrap(),
            DatabaseKind::Sqlite
        );
        assert_eq!(
            classify_url("sqlite:/var/lib/thrift/thrift.db").unwrap(),
            DatabaseKind::Sqlite
        );
    }

    #[test]
    fn test_classify_unsupported_scheme() {
        let err = classify_url("mysql://db:3306/thrift_yield").unwrap_err();
        assert!(matches!(err, GateError::UnsupportedScheme(s) if s == "mysql"));
    }

    #[test]
    fn test_classify_invalid_url() {
        assert!(matches!(
            classify_url("not a url"),
            Err(GateError::Config(_))
        ));
    }

    #[test]
    fn test_redact_strips_password() {
        let redacted = redact_url("postgres://app:hunter2@db:5432/thrift_yield");
        assert!(!redacted.contains("hunter2"));
        assert!(redacted.contains("****"));
        assert!(redacted.contains("db:5432"));
    }

    #[test]
    fn test_redact_leaves_passwordless_urls_alone() {
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            redact_url("postgres://db:5432/thrift_yield"),
            "postgres://db:5432/thrift_yield"
        );
    }

    #[test]
    fn test_probe_target_is_redacted() {
        let probe = DatabaseProbe::new(
            "postgres://app:hunter2@db:5432/thrift_yield",
            Duration::from_secs(5),
        )
        .unwrap();

        assert!(!probe.target().contains("hunter2"));
        assert_eq!(probe.kind(), DatabaseKind::Postgres);
    }

    #[tokio::test]
    async fn test_sqlite_memory_probe_succeeds() {
        let probe = DatabaseProbe::new("sqlite::memory:", Duration::from_secs(5)).unwrap();
        assert!(probe.attempt().await.is_ok());
    }

    #[tokio::test]
    async fn test_sqlite_missing_file_probe_fails() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}/does-not-exist.db", dir.path().display());
        let probe = DatabaseProbe::new(&url, Duration::from_secs(5)).unwrap();

        assert!(matches!(
            probe.attempt().await,
            Err(ProbeError::Connect(_))
        ));
    }
}
