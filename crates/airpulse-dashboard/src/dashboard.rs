//! The dashboard runtime: render passes and the reload loop.

use crate::avatar::{load_avatar, HttpImageFetcher, ImageFetcher};
use crate::output::{OutputWriter, RenderSummary};
use crate::render::{render, ChartSpec, FilterSpec};
use crate::watch::ConfigWatcher;
use airpulse_common::Result;
use airpulse_config::{Config, ConfigCache};
use airpulse_data::TableCache;
use airpulse_graphs::GraphManager;
use airpulse_i18n::Localizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Owns the loaded table and renders it whenever the controls change.
pub struct Dashboard {
    config: ConfigCache,
    config_path: Option<PathBuf>,
    table: TableCache,
    fetcher: Box<dyn ImageFetcher>,
    graphs: GraphManager,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("config_path", &self.config_path)
            .field("revision", &self.config.revision())
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Dashboard fetching the avatar over HTTP.
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Result<Self> {
        let fetcher = HttpImageFetcher::new()?;
        Ok(Self::with_fetcher(config, config_path, Box::new(fetcher)))
    }

    /// Dashboard with a custom image fetcher.
    pub fn with_fetcher(
        config: Config,
        config_path: Option<PathBuf>,
        fetcher: Box<dyn ImageFetcher>,
    ) -> Self {
        let table = TableCache::new(config.data.csv_path.clone());
        Self {
            config: ConfigCache::new(config),
            config_path,
            table,
            fetcher,
            graphs: GraphManager::new(),
        }
    }

    /// Configuration of the next pass.
    pub fn config(&self) -> Arc<Config> {
        self.config.get()
    }

    /// Revision of the configuration.
    pub fn revision(&self) -> u64 {
        self.config.revision()
    }

    /// Swaps in a new configuration for the next pass.
    pub fn update_config(&self, config: Config) {
        self.config.update(config);
    }

    /// Re-reads the configuration file. Returns whether it changed.
    pub fn reload(&self, path: &Path) -> Result<bool> {
        let before = self.config.revision();
        self.config.reload(path)?;
        Ok(self.config.revision() != before)
    }

    /// Renders every panel for the current configuration and writes the
    /// output directory.
    ///
    /// The table is read on the first pass and reused until `csv_path`
    /// changes. Failing to load it fails the pass.
    #[instrument(skip(self), fields(revision = self.config.revision()))]
    pub async fn run_pass(&mut self) -> Result<RenderSummary> {
        let config = self.config.get();
        if self.table.path() != config.data.csv_path {
            info!(path = %config.data.csv_path.display(), "Data path changed");
            self.table = TableCache::new(config.data.csv_path.clone());
        }

        let table = self.table.get_or_load()?;
        let localizer = Localizer::new(&config.data.language)?;

        let output = render(
            table,
            &FilterSpec::from_config(&config),
            &ChartSpec::from_config(&config),
            &localizer,
        );
        let avatar = load_avatar(self.fetcher.as_ref(), &config.dashboard.avatar, &localizer).await;

        OutputWriter::new(config.dashboard.output_dir.clone())
            .write(
                &output,
                avatar,
                &self.graphs,
                &config.styling,
                &localizer,
                self.config.revision(),
            )
            .await
    }

    /// Runs one pass, then re-renders on every configuration change until
    /// Ctrl-C when watching is enabled.
    ///
    /// An error in the first pass is returned. Later errors are logged and
    /// the loop keeps waiting for the next change.
    pub async fn run(mut self) -> Result<()> {
        let summary = self.run_pass().await?;
        info!(pass_id = %summary.pass_id, "Initial render complete");

        if !self.config.get().dashboard.watch {
            return Ok(());
        }
        let Some(path) = self.config_path.clone() else {
            warn!("Watching requested without a configuration file, exiting");
            return Ok(());
        };

        let mut watcher = ConfigWatcher::new(&path)?;
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl-C, shutting down");
                    break;
                }
                changed = watcher.changed() => {
                    if changed.is_none() {
                        warn!("Config watcher stopped");
                        break;
                    }
                    self.on_config_change(&path).await;
                }
            }
        }
        Ok(())
    }

    async fn on_config_change(&mut self, path: &Path) {
        match self.reload(path) {
            Ok(false) => info!("Configuration unchanged, skipping render"),
            Ok(true) => match self.run_pass().await {
                Ok(summary) => info!(pass_id = %summary.pass_id, "Re-rendered dashboard"),
                Err(e) => error!(error = %e, "Render pass failed"),
            },
            Err(e) => error!(error = %e, "Invalid configuration, keeping previous one"),
        }
    }
}
