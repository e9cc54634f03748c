//! Graph configuration shared by all renderers.

use airpulse_config::{SentimentColors, StylingConfig};
use serde::{Deserialize, Serialize};

/// Per-chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 800,
            height: 400,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Configuration sized and coloured from the dashboard styling.
    pub fn from_styling(styling: &StylingConfig, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: styling.width,
            height: styling.height,
            x_label: None,
            y_label: None,
            style: StyleConfig::from(styling),
        }
    }

    /// Sets the axis captions.
    #[must_use]
    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 15,
            right: 20,
            bottom: 45,
            left: 60,
        }
    }
}

/// Colours and fonts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub background: String,
    pub colors: SentimentColors,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::from(&StylingConfig::default())
    }
}

impl From<&StylingConfig> for StyleConfig {
    fn from(styling: &StylingConfig) -> Self {
        Self {
            background: styling.background.clone(),
            colors: styling.colors.clone(),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 22,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}
