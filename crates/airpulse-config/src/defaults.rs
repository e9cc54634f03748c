//! Default values for every configuration section.

use crate::schema::*;
use airpulse_common::{ChartKind, Palette, Sentiment, TimeBucket};
use std::path::PathBuf;

/// Default data file, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "Tweets.csv";
/// Default avatar image.
pub const DEFAULT_AVATAR_URL: &str = "https://avatars.githubusercontent.com/u/97449931?v=4";
/// Airlines preselected in the comparison panel.
pub const DEFAULT_AIRLINES: [&str; 3] = ["United", "American", "Delta"];
/// Default hour window of the geospatial panel.
pub const DEFAULT_HOUR_RANGE: (u8, u8) = (9, 17);
/// Smallest selectable word count.
pub const MIN_WORD_CLOUD_WORDS: usize = 50;
/// Largest selectable word count.
pub const MAX_WORD_CLOUD_WORDS: usize = 300;
/// Default word count.
pub const DEFAULT_WORD_CLOUD_WORDS: usize = 150;

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            language: "en-US".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dashboard"),
            watch: false,
            avatar: AvatarConfig::default(),
        }
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_AVATAR_URL.to_string(),
            caption: "Moon Benjee (문벤지)".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            date_range: None,
            hour_range: DEFAULT_HOUR_RANGE,
            distribution_chart: ChartKind::Bar,
            time_bucket: TimeBucket::Hourly,
            airlines: DEFAULT_AIRLINES.iter().map(ToString::to_string).collect(),
            word_cloud: WordCloudControls::default(),
            show_raw_preview: false,
            export_csv: true,
        }
    }
}

impl Default for WordCloudControls {
    fn default() -> Self {
        Self {
            sentiment: Sentiment::Positive,
            max_words: DEFAULT_WORD_CLOUD_WORDS,
            palette: Palette::Viridis,
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: "#ffffff".to_string(),
            colors: SentimentColors::default(),
        }
    }
}

impl Default for SentimentColors {
    fn default() -> Self {
        Self {
            negative: "#d62728".to_string(),
            neutral: "#1f77b4".to_string(),
            positive: "#2ca02c".to_string(),
        }
    }
}
