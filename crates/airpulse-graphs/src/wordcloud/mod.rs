//! Word clouds of the tweets of one sentiment class.

mod frequency;
mod layout;
mod stopwords;

pub use frequency::{tokenize, word_frequencies, WordFrequency, TOKEN_REGEX};
pub use layout::{estimate_box, layout, PlacedWord, WordCloudLayout, MIN_FONT_SIZE};
pub use stopwords::is_stopword;

use crate::traits::GraphRenderer;
use crate::types::GraphConfig;
use crate::utils::render_bitmap;
use airpulse_common::{Palette, Result, Sentiment};
use airpulse_config::{StylingConfig, WordCloudControls};
use airpulse_data::TweetTable;
use plotters::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

/// Word cloud generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCloudSettings {
    /// Most words kept.
    pub max_words: usize,
    /// Colour palette.
    pub palette: Palette,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Default for WordCloudSettings {
    fn default() -> Self {
        Self {
            max_words: 150,
            palette: Palette::Viridis,
            width: 800,
            height: 400,
        }
    }
}

impl WordCloudSettings {
    /// Settings from the configured controls and canvas size.
    pub const fn from_config(controls: &WordCloudControls, styling: &StylingConfig) -> Self {
        Self {
            max_words: controls.max_words,
            palette: controls.palette,
            width: styling.width,
            height: styling.height,
        }
    }
}

/// A laid-out word cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCloudChart {
    /// Sentiment class the words come from.
    pub sentiment: Sentiment,
    /// Palette the colours were drawn from.
    pub palette: Palette,
    /// Word positions.
    pub layout: WordCloudLayout,
}

impl WordCloudChart {
    /// Counts the words of every `sentiment` tweet in `table` and lays them
    /// out.
    #[instrument(skip(table), fields(rows = table.len()))]
    pub fn generate(sentiment: Sentiment, table: &TweetTable, settings: &WordCloudSettings) -> Self {
        let texts = table
            .iter()
            .filter(|t| t.sentiment == sentiment)
            .map(|t| t.text.as_str());
        let frequencies = word_frequencies(texts, settings.max_words);
        let layout = layout(&frequencies, settings.width, settings.height, settings.palette);
        debug!(
            counted = frequencies.len(),
            placed = layout.words.len(),
            "Generated word cloud"
        );
        Self {
            sentiment,
            palette: settings.palette,
            layout,
        }
    }

    /// Whether the cloud has no words.
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }
}

/// File name of the standalone word cloud image for `sentiment`.
pub fn wordcloud_file_name(sentiment: Sentiment) -> String {
    format!("{sentiment}_wordcloud.png")
}

/// Word cloud renderer
///
/// Draws every placed word at its position without axes. The canvas size
/// comes from the layout.
#[derive(Debug, Default)]
pub struct WordCloudGraph;

impl WordCloudGraph {
    pub const fn new() -> Self {
        Self
    }
}

impl GraphRenderer for WordCloudGraph {
    type Data = WordCloudChart;

    fn render(&self, data: &WordCloudChart, config: &GraphConfig) -> Result<Vec<u8>> {
        debug!(words = data.layout.words.len(), "Rendering word cloud");
        let family = config.style.axis_font.family.as_str();
        render_bitmap(data.layout.width, data.layout.height, |root| {
            root.fill(&self.background_color(config))?;
            for word in &data.layout.words {
                let (r, g, b) = word.color;
                let color = RGBColor(r, g, b);
                let style = TextStyle::from((family, word.font_size)).color(&color);
                root.draw(&Text::new(word.text.as_str(), (word.x, word.y), style))?;
            }
            Ok(())
        })
    }

    fn name(&self) -> &'static str {
        "word_cloud"
    }

    fn description(&self) -> &'static str {
        "Most frequent words in the tweets of one sentiment"
    }
}
