//! Probe result reporting for `check-db`

use serde::{Deserialize, Serialize};

/// Outcome of a single probe attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// The database accepted a connection
    Reachable,
    /// The probe attempt failed
    Unreachable,
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reachable => write!(f, "reachable"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Report of a single database probe attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Probe outcome
    pub status: ProbeStatus,
    /// Probed target with credentials redacted
    pub target: String,
    /// Time the attempt took in milliseconds
    pub latency_ms: u64,
    /// Failure description when unreachable
    pub error: Option<String>,
    /// Unix timestamp of the check
    pub timestamp: i64,
}

impl ProbeReport {
    /// Report a reachable database
    pub fn reachable(target: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            status: ProbeStatus::Reachable,
            target: target.into(),
            latency_ms,
            error: None,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Report an unreachable database
    pub fn unreachable(
        target: impl Into<String>,
        error: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            status: ProbeStatus::Unreachable,
            target: target.into(),
            latency_ms,
            error: Some(error.into()),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachable_report_has_no_error() {
        let report = ProbeReport::reachable("sqlite::memory:", 3);

        assert_eq!(report.status, ProbeStatus::Reachable);
        assert_eq!(report.target, "sqlite::memory:");
        assert_eq!(report.latency_ms, 3);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let report = ProbeReport::unreachable("postgres://db/x", "connection refused", 12);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "unreachable");
        assert_eq!(json["error"], "connection refused");
        assert_eq!(json["latency_ms"], 12);
    }
}
