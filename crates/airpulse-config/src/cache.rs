//! Hot-reloadable configuration handle with arc-swap for lock-free reads.

use crate::loader::{ConfigError, ConfigLoader};
use crate::schema::Config;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Holds the configuration of the current render pass.
///
/// Each successful reload bumps the revision; a failed reload leaves the
/// previous configuration in place.
pub struct ConfigCache {
    config: ArcSwap<Config>,
    revision: AtomicU64,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            revision: AtomicU64::new(1),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Revision of the current configuration, starting at 1.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Replaces the configuration atomically.
    pub fn update(&self, config: Config) {
        self.config.store(Arc::new(config));
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    /// Re-reads `path`; on success the new configuration becomes current,
    /// on failure the error is returned and the old configuration is kept.
    pub fn reload(&self, path: &Path) -> Result<Arc<Config>, ConfigError> {
        match ConfigLoader::load_config(path) {
            Ok(config) => {
                if *self.get() == config {
                    return Ok(self.get());
                }
                self.update(config);
                info!(revision = self.revision(), "Configuration reloaded");
                Ok(self.get())
            }
            Err(e) => {
                warn!(error = %e, "Keeping previous configuration");
                Err(e)
            }
        }
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
