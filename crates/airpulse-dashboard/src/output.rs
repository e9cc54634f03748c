//! Writes a render pass to the output directory.
//!
//! Every chart panel becomes a PNG, the CSV export and the raw preview become
//! CSV files, and `render_summary.json` records what each panel ended up
//! showing.

use crate::avatar::AvatarOutcome;
use crate::render::{Panel, PanelContent, PanelId, RenderedOutput};
use airpulse_common::{DashboardError, Result};
use airpulse_config::StylingConfig;
use airpulse_data::{
    preview_to_csv, table_to_csv, DateRange, EXPORT_FILE_NAME, PREVIEW_FILE_NAME,
};
use airpulse_graphs::{GraphConfig, GraphManager};
use airpulse_i18n::{messages, Localizer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Name of the pass summary.
pub const SUMMARY_FILE_NAME: &str = "render_summary.json";

/// Name of the downloaded avatar image.
pub const AVATAR_FILE_NAME: &str = "avatar.png";

/// Final state of one panel after writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelOutcome {
    /// The chart was written to `file`.
    Chart {
        /// File name inside the output directory.
        file: String,
    },
    /// An informational message.
    Notice {
        /// Localised message.
        message: String,
    },
    /// A warning, either from the inputs or from rasterizing.
    Warning {
        /// Localised message.
        message: String,
    },
}

/// Summary line of one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSummary {
    /// Which panel.
    pub id: PanelId,
    /// Localised title.
    pub title: String,
    /// Line under the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// What the panel shows.
    pub outcome: PanelOutcome,
}

/// The avatar section as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarSummary {
    /// Localised section title.
    pub title: String,
    /// Fetch outcome.
    #[serde(flatten)]
    pub outcome: AvatarOutcome,
    /// Image file, when one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Record of one render pass, written as `render_summary.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    /// Unique id of the pass.
    pub pass_id: Uuid,
    /// When the pass finished.
    pub generated_at: DateTime<Utc>,
    /// Configuration revision the pass ran against.
    pub revision: u64,
    /// Locale of every text in the pass.
    pub language: String,
    /// Dashboard heading.
    pub title: String,
    /// Resolved date range.
    pub date_range: Option<DateRange>,
    /// Warning for a malformed date selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_warning: Option<String>,
    /// Rows in the loaded table.
    pub rows_loaded: usize,
    /// Rows inside the date range.
    pub rows_in_range: Option<usize>,
    /// Panels in display order.
    pub panels: Vec<PanelSummary>,
    /// CSV files written in this pass.
    pub exports: Vec<String>,
    /// Rows in the raw preview, when shown.
    pub preview_rows: Option<usize>,
    /// Avatar section.
    pub avatar: AvatarSummary,
}

impl RenderSummary {
    /// Panel summary by id.
    pub fn panel(&self, id: PanelId) -> Option<&PanelSummary> {
        self.panels.iter().find(|p| p.id == id)
    }
}

/// Writes passes into one directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Writer targeting `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Rasterizes every chart panel and writes the pass.
    ///
    /// Files left by the previous pass are removed first, so the directory
    /// only ever holds what this pass produced. A chart that fails to
    /// rasterize turns into a warning on its panel. Failing to write a file
    /// aborts the pass.
    #[instrument(skip_all, fields(dir = %self.dir.display(), revision = revision))]
    pub async fn write(
        &self,
        output: &RenderedOutput,
        avatar: AvatarOutcome,
        graphs: &GraphManager,
        styling: &StylingConfig,
        localizer: &Localizer,
        revision: u64,
    ) -> Result<RenderSummary> {
        tokio::fs::create_dir_all(&self.dir).await?;
        self.remove_stale().await?;

        let mut panels = Vec::with_capacity(output.panels.len());
        for panel in &output.panels {
            let outcome = self.write_panel(panel, graphs, styling, localizer).await?;
            panels.push(PanelSummary {
                id: panel.id,
                title: panel.title.clone(),
                subtitle: panel.subtitle.clone(),
                outcome,
            });
        }

        let mut exports = Vec::new();
        if let Some(table) = &output.export {
            self.write_file(EXPORT_FILE_NAME, &table_to_csv(table)?).await?;
            exports.push(EXPORT_FILE_NAME.to_string());
        }
        if let Some(table) = &output.preview {
            self.write_file(PREVIEW_FILE_NAME, &preview_to_csv(table)?).await?;
            exports.push(PREVIEW_FILE_NAME.to_string());
        }

        let avatar_file = match &avatar {
            AvatarOutcome::Image { bytes, .. } => {
                self.write_file(AVATAR_FILE_NAME, bytes).await?;
                Some(AVATAR_FILE_NAME.to_string())
            }
            _ => None,
        };

        let summary = RenderSummary {
            pass_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            revision,
            language: localizer.locale(),
            title: localizer.text(messages::DASHBOARD_TITLE),
            date_range: output.date_range,
            date_warning: output.date_warning.clone(),
            rows_loaded: output.rows_loaded,
            rows_in_range: output.filtered.as_ref().map(|t| t.len()),
            panels,
            exports,
            preview_rows: output.preview.as_ref().map(|t| t.len()),
            avatar: AvatarSummary {
                title: localizer.text(messages::PANEL_AVATAR),
                outcome: avatar,
                file: avatar_file,
            },
        };

        let json = serde_json::to_vec_pretty(&summary)?;
        self.write_file(SUMMARY_FILE_NAME, &json).await?;

        info!(
            pass_id = %summary.pass_id,
            panels = summary.panels.len(),
            exports = summary.exports.len(),
            "Wrote render pass"
        );
        Ok(summary)
    }

    async fn write_panel(
        &self,
        panel: &Panel,
        graphs: &GraphManager,
        styling: &StylingConfig,
        localizer: &Localizer,
    ) -> Result<PanelOutcome> {
        let chart = match &panel.content {
            PanelContent::Chart { chart } => chart,
            PanelContent::Notice { message } => {
                return Ok(PanelOutcome::Notice {
                    message: message.clone(),
                })
            }
            PanelContent::Warning { message } => {
                return Ok(PanelOutcome::Warning {
                    message: message.clone(),
                })
            }
        };

        let mut config = GraphConfig::from_styling(styling, panel.title.clone());
        if let Some((x, y)) = &panel.axes {
            config = config.with_axes(x.clone(), y.clone());
        }

        match graphs.render(chart, &config) {
            Ok(bytes) => {
                let file = panel.id.file_name(chart);
                self.write_file(&file, &bytes).await?;
                Ok(PanelOutcome::Chart { file })
            }
            Err(e) => {
                warn!(panel = ?panel.id, error = %e, "Panel left as warning");
                Ok(PanelOutcome::Warning {
                    message: localizer.render_warning(&e.to_string()),
                })
            }
        }
    }

    async fn remove_stale(&self) -> Result<()> {
        for name in owned_file_names() {
            let path = self.dir.join(&name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(file = %name, "Removed previous output file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(DashboardError::export_with_source(
                        format!("Failed to remove {}", path.display()),
                        e,
                    ))
                }
            }
        }
        Ok(())
    }

    async fn write_file(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            DashboardError::export_with_source(format!("Failed to write {}", path.display()), e)
        })?;
        debug!(file = name, bytes = bytes.len(), "Wrote output file");
        Ok(())
    }
}

/// Every file a pass may write into the output directory.
fn owned_file_names() -> Vec<String> {
    let mut names: Vec<String> = PanelId::ALL.into_iter().flat_map(PanelId::file_names).collect();
    names.extend(
        [EXPORT_FILE_NAME, PREVIEW_FILE_NAME, AVATAR_FILE_NAME, SUMMARY_FILE_NAME]
            .map(String::from),
    );
    names
}
