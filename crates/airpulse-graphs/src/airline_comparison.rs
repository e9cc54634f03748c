//! Small multiples comparing sentiment across airlines.

use crate::charts::ComparisonChart;
use crate::sentiment_distribution::draw_sentiment_bars;
use crate::traits::GraphRenderer;
use crate::types::GraphConfig;
use crate::utils::{font, render_bitmap};
use airpulse_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Airline comparison renderer
///
/// One sub-panel per airline in a single row. Every sub-panel shows the
/// negative, neutral and positive bars in that order with the count printed
/// above each bar.
#[derive(Debug, Default)]
pub struct AirlineComparisonGraph;

impl AirlineComparisonGraph {
    pub const fn new() -> Self {
        Self
    }

    /// Draws the chart on any backend.
    pub fn draw<DB>(
        &self,
        chart: &ComparisonChart,
        config: &GraphConfig,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.background_color(config))?;
        let body = root.titled(&config.title, font(&config.style.title_font))?;

        let panels = body.split_evenly((1, chart.panels.len().max(1)));
        let mut sub_config = config.clone();
        sub_config.style.title_font.size = (config.style.title_font.size * 3 / 4).max(10);

        for (area, breakdown) in panels.iter().zip(&chart.panels) {
            draw_sentiment_bars(area, &breakdown.airline, &breakdown.counts, &sub_config, true)?;
        }
        Ok(())
    }
}

impl GraphRenderer for AirlineComparisonGraph {
    type Data = ComparisonChart;

    fn render(&self, data: &ComparisonChart, config: &GraphConfig) -> Result<Vec<u8>> {
        debug!(airlines = data.panels.len(), "Rendering airline comparison");
        render_bitmap(config.width, config.height, |root| self.draw(data, config, root))
    }

    fn name(&self) -> &'static str {
        "airline_comparison"
    }

    fn description(&self) -> &'static str {
        "Sentiment counts side by side for the selected airlines"
    }
}
