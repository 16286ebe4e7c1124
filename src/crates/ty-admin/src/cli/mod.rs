//! Command-line interface for `ty-admin`
//!
//! Both commands work with no arguments: configuration comes from the
//! environment (see [`preflight::config`]), and every flag is an override
//! on top of it.

use crate::report::ProbeReport;
use clap::{Args, Parser, Subcommand};
use preflight::{wait_for_database, Backoff, DatabaseProbe, GateConfig, Probe};
use std::num::NonZeroU64;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ty-admin")]
#[command(about = "Administrative commands for the Thrift Yield API service", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Block until the database accepts connections
    ///
    /// Exits 0 once a connection attempt succeeded. With the default
    /// configuration this waits forever; interrupt it externally to give up.
    /// Chain dependent steps behind it: `ty-admin wait-db && ./manage migrate`
    #[command(alias = "wait-for-db")]
    WaitDb(WaitDbArgs),

    /// Run a single database probe attempt and report the result
    ///
    /// Exits 0 when the database is reachable right now, 1 when it is not.
    /// No retrying.
    CheckDb(CheckDbArgs),
}

#[derive(Args)]
pub struct WaitDbArgs {
    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base delay between probe attempts in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Backoff between attempts: fixed or exponential
    #[arg(long)]
    pub backoff: Option<Backoff>,

    /// Multiplier for exponential backoff
    #[arg(long)]
    pub backoff_multiplier: Option<f64>,

    /// Maximum delay between attempts in milliseconds
    #[arg(long)]
    pub max_interval_ms: Option<u64>,

    /// Add up to 25% random jitter to delays
    #[arg(long)]
    pub jitter: bool,

    /// Maximum probe attempts before giving up (0 = wait forever)
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Per-attempt connect timeout in seconds
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,
}

impl WaitDbArgs {
    /// Apply command-line overrides on top of the environment configuration
    fn apply_to(&self, config: &mut GateConfig) {
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(backoff) = self.backoff {
            config.backoff = backoff;
        }
        if let Some(multiplier) = self.backoff_multiplier {
            config.multiplier = multiplier;
        }
        if let Some(max_interval_ms) = self.max_interval_ms {
            config.max_interval_ms = max_interval_ms;
        }
        if self.jitter {
            config.jitter = true;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = NonZeroU64::new(max_attempts);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
    }
}

#[derive(Args)]
pub struct CheckDbArgs {
    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Output format: text (default), json
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Per-attempt connect timeout in seconds
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::WaitDb(args) => wait_db(args).await,
        Commands::CheckDb(args) => check_db(args).await,
    }
}

async fn wait_db(args: WaitDbArgs) -> anyhow::Result<()> {
    let mut config = GateConfig::from_env()?;
    args.apply_to(&mut config);

    match wait_for_database(&config).await {
        Ok(report) => {
            println!(
                "✓ Database ready after {} attempt(s) ({} ms)",
                report.attempts, report.elapsed_ms
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Database wait failed: {}", e);
            Err(e.into())
        }
    }
}

async fn check_db(args: CheckDbArgs) -> anyhow::Result<()> {
    let mut config = GateConfig::from_env()?;
    if let Some(url) = &args.database_url {
        config.database_url = url.clone();
    }
    if let Some(secs) = args.connect_timeout_secs {
        config.connect_timeout_secs = secs;
    }
    config.validate()?;

    let probe = DatabaseProbe::new(&config.database_url, config.connect_timeout())?;

    let started = Instant::now();
    let outcome = probe.attempt().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let report = match &outcome {
        Ok(()) => ProbeReport::reachable(probe.target(), latency_ms),
        Err(e) => ProbeReport::unreachable(probe.target(), e.to_string(), latency_ms),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let icon = match outcome {
            Ok(()) => "✓",
            Err(_) => "✗",
        };
        println!("{} Database {} ({} ms)", icon, report.status, report.latency_ms);
        println!("  Target: {}", report.target);
        if let Some(error) = &report.error {
            println!("  Error: {}", error);
        }
    }

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("database unreachable: {}", e)),
    }
}
