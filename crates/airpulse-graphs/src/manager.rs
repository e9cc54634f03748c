//! Graph manager dispatching chart descriptions to their renderers.

use crate::airline_comparison::AirlineComparisonGraph;
use crate::charts::Chart;
use crate::geo_scatter::GeoScatterGraph;
use crate::sentiment_distribution::SentimentDistributionGraph;
use crate::sentiment_over_time::SentimentOverTimeGraph;
use crate::traits::GraphRenderer;
use crate::types::GraphConfig;
use crate::wordcloud::WordCloudGraph;
use airpulse_common::Result;
use tracing::{info, warn};

/// Owns one renderer per chart type.
#[derive(Debug, Default)]
pub struct GraphManager {
    distribution: SentimentDistributionGraph,
    over_time: SentimentOverTimeGraph,
    comparison: AirlineComparisonGraph,
    geo_scatter: GeoScatterGraph,
    word_cloud: WordCloudGraph,
}

impl GraphManager {
    /// Creates a new graph manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `chart` to PNG bytes.
    pub fn render(&self, chart: &Chart, config: &GraphConfig) -> Result<Vec<u8>> {
        let (name, result) = match chart {
            Chart::Distribution(data) => (self.distribution.name(), self.distribution.render(data, config)),
            Chart::TimeSeries(data) => (self.over_time.name(), self.over_time.render(data, config)),
            Chart::Comparison(data) => (self.comparison.name(), self.comparison.render(data, config)),
            Chart::GeoScatter(data) => (self.geo_scatter.name(), self.geo_scatter.render(data, config)),
            Chart::WordCloud(data) => (self.word_cloud.name(), self.word_cloud.render(data, config)),
        };

        match &result {
            Ok(bytes) => info!(graph = name, bytes = bytes.len(), "Rendered graph"),
            Err(e) => warn!(graph = name, error = %e, "Failed to render graph"),
        }
        result
    }

    /// Names and descriptions of every renderer.
    pub fn renderers(&self) -> [(&'static str, &'static str); 5] {
        [
            (self.distribution.name(), self.distribution.description()),
            (self.over_time.name(), self.over_time.description()),
            (self.comparison.name(), self.comparison.description()),
            (self.geo_scatter.name(), self.geo_scatter.description()),
            (self.word_cloud.name(), self.word_cloud.description()),
        ]
    }
}
