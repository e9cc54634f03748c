//! Configuration schema definitions using serde.

use airpulse_common::{ChartKind, LoggingConfig, Palette, Sentiment, TimeBucket};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for AirPulse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source data configuration.
    pub data: DataConfig,
    /// Output and sidebar configuration.
    pub dashboard: DashboardConfig,
    /// Widget selections driving each render pass.
    pub controls: ControlsConfig,
    /// Chart styling.
    pub styling: StylingConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Source data configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the tweet CSV file.
    pub csv_path: PathBuf,
    /// Language code for localization.
    pub language: String,
}

/// Output and sidebar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory receiving rendered panels and exports.
    pub output_dir: PathBuf,
    /// Re-render whenever the configuration file changes.
    pub watch: bool,
    /// Author avatar shown in the sidebar.
    pub avatar: AvatarConfig,
}

/// Author avatar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Whether to fetch the avatar at all.
    pub enabled: bool,
    /// Image URL.
    pub url: String,
    /// Caption displayed under the image.
    pub caption: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Widget selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Selected dates; `None` selects the full span of the dataset.
    ///
    /// Kept as a list so a malformed selection (not exactly two dates) can be
    /// reported by the render pass instead of being rejected at load time.
    pub date_range: Option<Vec<NaiveDate>>,
    /// Inclusive hour-of-day window for the geospatial panel.
    pub hour_range: (u8, u8),
    /// Chart kind of the sentiment distribution panel.
    pub distribution_chart: ChartKind,
    /// Granularity of the sentiment-over-time panel.
    pub time_bucket: TimeBucket,
    /// Airlines compared side by side.
    pub airlines: Vec<String>,
    /// Word cloud settings.
    pub word_cloud: WordCloudControls,
    /// Write the hour-filtered rows as a preview.
    pub show_raw_preview: bool,
    /// Export the date-filtered table as CSV.
    pub export_csv: bool,
}

/// Word cloud settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudControls {
    /// Sentiment class whose tweets feed the cloud.
    pub sentiment: Sentiment,
    /// Maximum number of words drawn.
    pub max_words: usize,
    /// Colour palette.
    pub palette: Palette,
}

/// Chart styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Background colour.
    pub background: String,
    /// Per-sentiment colours.
    pub colors: SentimentColors,
}

/// Per-sentiment colours in `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentColors {
    /// Negative colour.
    pub negative: String,
    /// Neutral colour.
    pub neutral: String,
    /// Positive colour.
    pub positive: String,
}

impl SentimentColors {
    /// Colour configured for a sentiment.
    pub fn for_sentiment(&self, sentiment: Sentiment) -> &str {
        match sentiment {
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Positive => &self.positive,
        }
    }
}
