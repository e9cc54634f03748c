//! Sentiment distribution as a bar chart or a pie chart.

use crate::charts::DistributionChart;
use crate::traits::GraphRenderer;
use crate::types::GraphConfig;
use crate::utils::{count_axis_max, font, render_bitmap, sentiment_color};
use airpulse_common::{ChartKind, Result, Sentiment};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

/// Sentiment distribution renderer
#[derive(Debug, Default)]
pub struct SentimentDistributionGraph;

impl SentimentDistributionGraph {
    pub const fn new() -> Self {
        Self
    }

    /// Draws the chart on any backend.
    pub fn draw<DB>(
        &self,
        chart: &DistributionChart,
        config: &GraphConfig,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.background_color(config))?;
        match chart.kind {
            ChartKind::Bar => draw_sentiment_bars(root, &config.title, &chart.slices, config, false),
            ChartKind::Pie => draw_pie(root, chart, config),
        }
    }
}

impl GraphRenderer for SentimentDistributionGraph {
    type Data = DistributionChart;

    fn render(&self, data: &DistributionChart, config: &GraphConfig) -> Result<Vec<u8>> {
        debug!(kind = ?data.kind, total = data.total(), "Rendering sentiment distribution");
        render_bitmap(config.width, config.height, |root| self.draw(data, config, root))
    }

    fn name(&self) -> &'static str {
        "sentiment_distribution"
    }

    fn description(&self) -> &'static str {
        "Tweet count per sentiment"
    }
}

/// Vertical bars, one per sentiment, coloured by sentiment.
///
/// Shared with the airline comparison, which also prints the count above
/// every bar.
pub(crate) fn draw_sentiment_bars<DB>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    bars: &[(Sentiment, u64)],
    config: &GraphConfig,
    show_values: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let segments = i32::try_from(bars.len().max(1)).unwrap_or(i32::MAX);
    let y_max = count_axis_max(bars.iter().map(|(_, c)| *c));
    let margins = config.style.margins;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, font(&config.style.title_font))
        .margin(margins.top)
        .x_label_area_size(margins.bottom)
        .y_label_area_size(margins.left)
        .build_cartesian_2d((0..segments).into_segmented(), 0u64..y_max)?;

    let names: Vec<&str> = bars.iter().map(|(s, _)| s.as_str()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .label_style(font(&config.style.axis_font))
        .x_desc(config.x_label.as_deref().unwrap_or(""))
        .y_desc(config.y_label.as_deref().unwrap_or(""))
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| names.get(i))
                .map_or_else(String::new, |name| (*name).to_string()),
            _ => String::new(),
        })
        .draw()?;

    for (i, (sentiment, count)) in (0..).zip(bars) {
        let color = sentiment_color(config, *sentiment);
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), *count)],
            color.filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        chart.draw_series(std::iter::once(bar))?;

        if show_values {
            let style = TextStyle::from(font(&config.style.axis_font))
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart.draw_series(std::iter::once(Text::new(
                count.to_string(),
                (SegmentValue::CenterOf(i), *count),
                style,
            )))?;
        }
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_pie<DB>(root: &DrawingArea<DB, Shift>, chart: &DistributionChart, config: &GraphConfig) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root.titled(&config.title, font(&config.style.title_font))?;
    let (width, height) = area.dim_in_pixel();
    let center = (
        i32::try_from(width / 2).unwrap_or(0),
        i32::try_from(height / 2).unwrap_or(0),
    );
    let radius = f64::from(width.min(height)) * 0.38;

    let sizes: Vec<f64> = chart.slices.iter().map(|(_, c)| *c as f64).collect();
    let colors: Vec<RGBColor> = chart
        .slices
        .iter()
        .map(|(s, _)| sentiment_color(config, *s))
        .collect();
    let labels: Vec<&str> = chart.slices.iter().map(|(s, _)| s.as_str()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(font(&config.style.axis_font));
    pie.percentages(TextStyle::from(font(&config.style.axis_font)).color(&WHITE));
    area.draw(&pie)?;
    Ok(())
}
