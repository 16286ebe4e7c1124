//! The readiness gate
//!
//! A single-shot blocking loop over a [`Probe`]: attempt, and on failure
//! sleep the policy delay and attempt again. By default the loop never gives
//! up; deciding when to stop waiting belongs to the operator or the
//! orchestration layer, not to the gate. An attempt limit is available as an
//! explicit opt-in through [`RetryPolicy::with_max_attempts`].
//!
//! The gate reports success only immediately after a probe attempt that
//! itself succeeded, and holds no connection once it returns.

use crate::config::GateConfig;
use crate::error::GateError;
use crate::probe::{DatabaseProbe, Probe};
use crate::retry::RetryPolicy;
use serde::Serialize;
use tracing::{error, info, warn};

/// Outcome of a successful gate invocation
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
    /// Total probe attempts performed, including the successful one
    pub attempts: u64,
    /// Wall time spent waiting, in milliseconds
    pub elapsed_ms: u64,
}

/// Blocks the caller until a probe attempt succeeds
///
/// Each gate is single-shot: [`ReadinessGate::wait`] consumes it, so a later
/// readiness check requires a fresh gate. Cancellation is external process
/// termination; the gate installs no signal handling of its own.
pub struct ReadinessGate<P: Probe> {
    probe: P,
    policy: RetryPolicy,
}

impl<P: Probe> ReadinessGate<P> {
    /// Create a gate over the given probe and retry policy
    pub fn new(probe: P, policy: RetryPolicy) -> Self {
        Self { probe, policy }
    }

    /// Block until a probe attempt succeeds, then return a report
    ///
    /// On each failed attempt the gate logs the failure, sleeps the policy
    /// delay, and retries. With an attempt limit configured, the limit being
    /// reached returns [`GateError::AttemptsExhausted`] carrying the final
    /// probe error, without a trailing sleep.
    pub async fn wait(self) -> Result<GateReport, GateError> {
        let started = tokio::time::Instant::now();
        let mut attempts: u64 = 0;

        info!(target_db = self.probe.target(), "Waiting for database");

        loop {
            attempts += 1;

            match self.probe.attempt().await {
                Ok(()) => {
                    let elapsed_ms = started.elapsed().as_millis() as u64;

                    info!(
                        target_db = self.probe.target(),
                        attempts, elapsed_ms, "Database ready"
                    );

                    return Ok(GateReport {
                        attempts,
                        elapsed_ms,
                    });
                }
                Err(error) => {
                    if self
                        .policy
                        .max_attempts
                        .is_some_and(|max| attempts >= max.get())
                    {
                        error!(
                            target_db = self.probe.target(),
                            attempts,
                            error = %error,
                            "Attempt limit exhausted, giving up"
                        );

                        return Err(GateError::AttemptsExhausted {
                            attempts,
                            source: error,
                        });
                    }

                    let delay = self.policy.delay_after_failure(attempts);

                    warn!(
                        target_db = self.probe.target(),
                        attempt = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Database unavailable, will retry"
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Pre-flight step: block until the configured database accepts connections
///
/// Builds a [`DatabaseProbe`] and a [`ReadinessGate`] from the configuration
/// and waits. Meant to be chained before migrations, superuser provisioning,
/// or test runs, either via the `ty-admin wait-db` command or embedded in
/// application startup code.
pub async fn wait_for_database(config: &GateConfig) -> Result<GateReport, GateError> {
    config.validate()?;

    let probe = DatabaseProbe::new(&config.database_url, config.connect_timeout())?;
    let gate = ReadinessGate::new(probe, config.retry_policy());

    gate.wait().await
}
