//! Watches the configuration file for edits.

use airpulse_common::{DashboardError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Quiet period folding a burst of editor writes into one change.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Sends a unit on every change to one file.
///
/// The parent directory is watched so that editors replacing the file by
/// rename are still seen.
pub struct ConfigWatcher {
    path: PathBuf,
    // Dropping the watcher stops the events.
    _watcher: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<()>,
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ConfigWatcher {
    /// Starts watching `path`.
    pub fn new(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| DashboardError::config(format!("Not a file: {}", path.display())))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, events) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if is_change_to(&event, &file_name) => {
                // The receiver is gone only during shutdown.
                let _ = tx.send(());
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Config watcher error"),
        })
        .map_err(|e| DashboardError::config_with_source("Failed to create config watcher", e))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| {
                DashboardError::config_with_source(format!("Failed to watch {}", dir.display()), e)
            })?;

        info!(path = %path.display(), "Watching configuration for changes");
        Ok(Self {
            path: path.to_path_buf(),
            _watcher: watcher,
            events,
        })
    }

    /// Watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Waits for the next change, then for [`DEBOUNCE`] of quiet.
    ///
    /// Returns `None` once the watcher has stopped.
    pub async fn changed(&mut self) -> Option<()> {
        self.events.recv().await?;
        loop {
            match tokio::time::timeout(DEBOUNCE, self.events.recv()).await {
                Ok(Some(())) => debug!("Folding config change into pending reload"),
                Ok(None) | Err(_) => return Some(()),
            }
        }
    }
}

fn is_change_to(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_only_changes_to_the_file_count() {
        let name = OsString::from("config.yaml");
        assert!(is_change_to(&event(EventKind::Modify(ModifyKind::Any), "/etc/airpulse/config.yaml"), &name));
        assert!(is_change_to(&event(EventKind::Create(CreateKind::File), "config.yaml"), &name));
        assert!(!is_change_to(&event(EventKind::Modify(ModifyKind::Any), "/etc/airpulse/other.yaml"), &name));
        assert!(!is_change_to(&event(EventKind::Access(notify::event::AccessKind::Any), "config.yaml"), &name));
    }

    #[tokio::test]
    async fn test_rejects_path_without_file_name() {
        assert!(ConfigWatcher::new(Path::new("/")).is_err());
    }
}
