//! ty-admin - administrative CLI for the Thrift Yield API service
//!
//! Main entry point for the ty-admin command-line tool.

use clap::Parser;
use ty_admin::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing from RUST_LOG, default to info
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(rust_log)
        .init();

    let cli = Cli::parse();
    run(cli).await
}
