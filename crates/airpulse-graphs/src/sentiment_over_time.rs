//! Multi-series line chart of sentiment counts per time bucket.

use crate::charts::TimeSeriesChart;
use crate::traits::GraphRenderer;
use crate::types::GraphConfig;
use crate::utils::{count_axis_max, font, render_bitmap, sentiment_color};
use airpulse_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Most x-axis labels drawn before labels are thinned out.
const MAX_X_LABELS: usize = 12;

/// Sentiment over time renderer
#[derive(Debug, Default)]
pub struct SentimentOverTimeGraph;

impl SentimentOverTimeGraph {
    pub const fn new() -> Self {
        Self
    }

    /// Draws the chart on any backend.
    pub fn draw<DB>(
        &self,
        chart: &TimeSeriesChart,
        config: &GraphConfig,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.background_color(config))?;

        // A single bucket still needs a non-empty x range.
        let x_max = i32::try_from(chart.labels.len().saturating_sub(1).max(1)).unwrap_or(i32::MAX);
        let y_max = count_axis_max([chart.max_value()]);
        let margins = config.style.margins;

        let mut ctx = ChartBuilder::on(root)
            .caption(&config.title, font(&config.style.title_font))
            .margin(margins.top)
            .x_label_area_size(margins.bottom)
            .y_label_area_size(margins.left)
            .build_cartesian_2d(0..x_max, 0u64..y_max)?;

        let labels = &chart.labels;
        ctx.configure_mesh()
            .x_labels(labels.len().clamp(2, MAX_X_LABELS))
            .label_style(font(&config.style.axis_font))
            .x_label_formatter(&|x| {
                usize::try_from(*x)
                    .ok()
                    .and_then(|i| labels.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""))
            .draw()?;

        for line in &chart.series {
            let color = sentiment_color(config, line.sentiment);
            let points: Vec<(i32, u64)> = (0..).zip(line.values.iter().copied()).collect();

            ctx.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
                .label(line.sentiment.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2)));
            ctx.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font(font(&config.style.axis_font))
            .draw()?;
        Ok(())
    }
}

impl GraphRenderer for SentimentOverTimeGraph {
    type Data = TimeSeriesChart;

    fn render(&self, data: &TimeSeriesChart, config: &GraphConfig) -> Result<Vec<u8>> {
        debug!(
            buckets = data.labels.len(),
            series = data.series.len(),
            "Rendering sentiment over time"
        );
        render_bitmap(config.width, config.height, |root| self.draw(data, config, root))
    }

    fn name(&self) -> &'static str {
        "sentiment_over_time"
    }

    fn description(&self) -> &'static str {
        "Tweet count per sentiment across time buckets"
    }
}
