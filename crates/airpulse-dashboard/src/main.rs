//! Main entry point for AirPulse.

use airpulse_common::init_logging;
use airpulse_config::ConfigLoader;
use airpulse_dashboard::Dashboard;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Airline tweet sentiment dashboard.
#[derive(Debug, Parser)]
#[command(name = "airpulse", version, about)]
struct Args {
    /// Configuration file (YAML or TOML). Searched for when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render once and exit even if `dashboard.watch` is set.
    #[arg(long)]
    once: bool,

    /// Log filter overriding `logging.level`, e.g. `debug` or `airpulse_data=trace`.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, path) = match args.config {
        Some(path) => {
            let config = ConfigLoader::load_config(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            (config, Some(path))
        }
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };

    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if args.once {
        config.dashboard.watch = false;
    }

    let _guard = init_logging(&config.logging).context("Failed to initialise logging")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?path,
        "Starting AirPulse"
    );

    Dashboard::new(config, path)?.run().await?;
    Ok(())
}
