//! `publish` command implementation.

use anyhow::{Context, Result};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use config_loader::ConfigLoader;
use contracts::{ConfigReader, DocumentTransport, MetricRecord, PluginConfig};
use dispatcher::{HttpTransport, LogTransport, Publisher};

use crate::cli::PublishArgs;

/// Execute the `publish` command
pub async fn run_publish(args: &PublishArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let policy = dispatcher::config_policy();
    let config = ConfigLoader::load_from_path(&args.config, &policy)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    for key in ConfigLoader::unknown_keys(&config, &policy) {
        warn!(key = %key, "Unknown configuration key, ignoring");
    }

    let metrics = load_metrics(&args.metrics)?;
    info!(
        metrics = metrics.len(),
        path = %args.metrics.display(),
        "Metric batch loaded"
    );

    if args.dry_run {
        info!("Dry run mode - documents are logged, not sent");
        publish_with(LogTransport::new("dry_run"), &metrics, &config).await
    } else {
        let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
        let transport = HttpTransport::with_timeout(timeout)
            .context("Failed to create HTTP transport")?;
        publish_with(transport, &metrics, &config).await
    }
}

/// Publish the batch, stopping early on Ctrl+C or SIGTERM
async fn publish_with<T>(transport: T, metrics: &[MetricRecord], config: &PluginConfig) -> Result<()>
where
    T: DocumentTransport + Sync + 'static,
{
    publish_until(transport, metrics, config, setup_shutdown_signal()).await
}

/// Publish the batch unless `shutdown` resolves first; an interrupted batch is an error
async fn publish_until<T, F>(
    transport: T,
    metrics: &[MetricRecord],
    config: &PluginConfig,
    shutdown: F,
) -> Result<()>
where
    T: DocumentTransport + Sync + 'static,
    F: Future<Output = ()>,
{
    let publisher = Publisher::new(transport);

    tokio::select! {
        result = publisher.publish(Some(metrics), Some(config as &dyn ConfigReader)) => {
            println!("{}", publisher.stats());
            result.context("Publishing failed")?;
            info!("Batch published successfully");
            Ok(())
        }
        _ = shutdown => {
            warn!("Received shutdown signal, abandoning batch");
            println!("{}", publisher.stats());
            anyhow::bail!("Publishing interrupted before the batch completed")
        }
    }
}

/// Read a JSON array of metric records
fn load_metrics(path: &Path) -> Result<Vec<MetricRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse metrics from {}", path.display()))
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
