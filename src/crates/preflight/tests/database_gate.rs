//! Integration tests for the readiness gate against real SQLite databases
//!
//! SQLite gives a real `sqlx` connect path without a server process: an
//! in-memory URL is always ready, a URL pointing at a missing file is not
//! (sqlx does not create the file), and creating the file while the gate is
//! waiting is a faithful stand-in for a database finishing its startup.

use preflight::{
    wait_for_database, DatabaseProbe, GateConfig, GateError, Probe, ReadinessGate, RetryPolicy,
};
use std::num::NonZeroU64;
use std::time::Duration;
use tempfile::TempDir;

fn sqlite_config(url: &str) -> GateConfig {
    GateConfig {
        database_url: url.to_string(),
        interval_ms: 20,
        ..GateConfig::default()
    }
}

#[tokio::test]
async fn in_memory_database_is_ready_on_first_attempt() {
    let config = sqlite_config("sqlite::memory:");

    let report = wait_for_database(&config).await.unwrap();

    assert_eq!(report.attempts, 1);
}

#[tokio::test]
async fn missing_file_exhausts_a_bounded_gate() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}/absent.db", dir.path().display());

    let mut config = sqlite_config(&url);
    config.max_attempts = NonZeroU64::new(3);

    let err = wait_for_database(&config).await.unwrap_err();

    match err {
        GateError::AttemptsExhausted { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn gate_unblocks_when_the_database_appears() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("late.db");
    let url = format!("sqlite:{}", db_path.display());

    let probe = DatabaseProbe::new(&url, Duration::from_secs(5)).unwrap();
    let policy = RetryPolicy::new().with_interval(20);
    let gate = ReadinessGate::new(probe, policy);

    let creator = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        // an empty file is a valid empty SQLite database
        std::fs::File::create(&db_path).unwrap();
    });

    let report = tokio::time::timeout(Duration::from_secs(10), gate.wait())
        .await
        .expect("gate should unblock once the file exists")
        .unwrap();

    assert!(report.attempts >= 2, "expected at least one failed attempt");
    creator.await.unwrap();
}

#[tokio::test]
async fn unsupported_scheme_fails_before_probing() {
    let config = sqlite_config("redis://cache:6379");

    assert!(matches!(
        wait_for_database(&config).await,
        Err(GateError::UnsupportedScheme(_))
    ));
}

#[tokio::test]
async fn single_probe_attempt_reports_current_state_only() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("now.db");
    let url = format!("sqlite:{}", db_path.display());

    let probe = DatabaseProbe::new(&url, Duration::from_secs(5)).unwrap();

    assert!(probe.attempt().await.is_err());

    std::fs::File::create(&db_path).unwrap();

    assert!(probe.attempt().await.is_ok());
}
