//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ES Publisher - publish metric batches as JSON documents
#[derive(Parser, Debug)]
#[command(
    name = "es-publisher",
    author,
    version,
    about = "Publish metric batches to an Elasticsearch-style document store",
    long_about = "Publishes every metric of a batch as its own JSON document.\n\n\
                  Documents are POSTed concurrently to \n\
                  <protocol>://<address>:<port>/<index>[-YYYY.MM.DD]/<type>."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ES_PUBLISHER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "ES_PUBLISHER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish a batch of metrics
    Publish(PublishArgs),

    /// Validate configuration file without publishing
    Validate(ValidateArgs),

    /// Print the accepted configuration keys and their defaults
    Policy(PolicyArgs),
}

/// Arguments for the `publish` command
#[derive(Parser, Debug, Clone)]
pub struct PublishArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "publisher.toml",
        env = "ES_PUBLISHER_CONFIG"
    )]
    pub config: PathBuf,

    /// Path to a JSON array of metric records
    #[arg(short, long, env = "ES_PUBLISHER_METRICS")]
    pub metrics: PathBuf,

    /// Log documents instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Per-request timeout in seconds (0 = client default)
    #[arg(long, default_value = "0", env = "ES_PUBLISHER_TIMEOUT")]
    pub timeout: u64,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "ES_PUBLISHER_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "publisher.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `policy` command
#[derive(Parser, Debug)]
pub struct PolicyArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish() {
        let cli = Cli::parse_from([
            "es-publisher",
            "-v",
            "publish",
            "--config",
            "p.toml",
            "--metrics",
            "batch.json",
            "--dry-run",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.config, PathBuf::from("p.toml"));
                assert_eq!(args.metrics, PathBuf::from("batch.json"));
                assert!(args.dry_run);
                assert_eq!(args.timeout, 0);
                assert_eq!(args.metrics_port, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["es-publisher", "-q", "-v", "policy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_publish_requires_metrics() {
        let result = Cli::try_parse_from(["es-publisher", "publish", "--config", "p.toml"]);
        assert!(result.is_err());
    }
}
