//! # ES Publisher CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and validation
//! - One-shot publishing of a metric batch
//! - Graceful shutdown handling

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_policy, run_publish, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(observability_config(&cli))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "ES Publisher CLI starting"
    );

    let result = match &cli.command {
        Commands::Publish(args) => run_publish(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Policy(args) => run_policy(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Map CLI logging options onto the observability setup
fn observability_config(cli: &Cli) -> ObservabilityConfig {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let metrics_port = match &cli.command {
        Commands::Publish(args) if args.metrics_port != 0 => Some(args.metrics_port),
        _ => None,
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port,
        default_log_level: default_log_level.to_string(),
    }
}
