//! Scatter plot of tweet locations.

use crate::charts::GeoScatterChart;
use crate::traits::GraphRenderer;
use crate::types::GraphConfig;
use crate::utils::{font, render_bitmap, sentiment_color};
use airpulse_common::{Result, Sentiment};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Geo scatter renderer
#[derive(Debug, Default)]
pub struct GeoScatterGraph;

impl GeoScatterGraph {
    pub const fn new() -> Self {
        Self
    }

    /// Draws the chart on any backend.
    pub fn draw<DB>(
        &self,
        chart: &GeoScatterChart,
        config: &GraphConfig,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.background_color(config))?;
        let (longitudes, latitudes) = chart.bounds();
        let margins = config.style.margins;

        let mut ctx = ChartBuilder::on(root)
            .caption(&config.title, font(&config.style.title_font))
            .margin(margins.top)
            .x_label_area_size(margins.bottom)
            .y_label_area_size(margins.left)
            .build_cartesian_2d(longitudes, latitudes)?;

        ctx.configure_mesh()
            .label_style(font(&config.style.axis_font))
            .x_desc(config.x_label.as_deref().unwrap_or("longitude"))
            .y_desc(config.y_label.as_deref().unwrap_or("latitude"))
            .x_label_formatter(&|v| format!("{v:.1}"))
            .y_label_formatter(&|v| format!("{v:.1}"))
            .draw()?;

        for sentiment in Sentiment::ALL {
            let color = sentiment_color(config, sentiment);
            let markers = chart
                .markers
                .iter()
                .filter(|m| m.sentiment == sentiment)
                .map(|m| Circle::new((m.point.longitude, m.point.latitude), 4, color.mix(0.75).filled()));
            ctx.draw_series(markers)?
                .label(sentiment.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font(font(&config.style.axis_font))
            .draw()?;
        Ok(())
    }
}

impl GraphRenderer for GeoScatterGraph {
    type Data = GeoScatterChart;

    fn render(&self, data: &GeoScatterChart, config: &GraphConfig) -> Result<Vec<u8>> {
        debug!(
            found = data.found,
            located = data.markers.len(),
            "Rendering tweet locations"
        );
        render_bitmap(config.width, config.height, |root| self.draw(data, config, root))
    }

    fn name(&self) -> &'static str {
        "geo_scatter"
    }

    fn description(&self) -> &'static str {
        "Locations of tweets posted within the hour window"
    }
}
