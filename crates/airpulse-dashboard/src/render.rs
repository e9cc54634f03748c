//! The render pass: one evaluation of every panel for the current controls.
//!
//! [`render`] is a pure function of the loaded table and the selections. It
//! builds chart descriptions, notices and warnings; rasterizing and writing
//! files happen later in [`crate::output`].

use airpulse_common::{ChartKind, DashboardError, Sentiment, TimeBucket};
use airpulse_config::Config;
use airpulse_data::{
    apply_filters, sentiment_counts, AirlineBreakdownAggregator, DataAggregator, DateRange,
    DateSelection, HourRange, TimeSeriesAggregator, TweetFilter, TweetTable,
};
use airpulse_graphs::{
    wordcloud_file_name, Chart, ComparisonChart, DistributionChart, GeoScatterChart,
    TimeSeriesChart, WordCloudChart, WordCloudSettings,
};
use airpulse_i18n::{messages, Localizer};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Row predicates chosen in the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Date picker state.
    pub dates: DateSelection,
    /// Hour window of the geospatial panel.
    pub hours: HourRange,
    /// Airlines of the comparison panel, in selection order.
    pub airlines: Vec<String>,
}

impl FilterSpec {
    /// Filters from the configured controls.
    pub fn from_config(config: &Config) -> Self {
        let controls = &config.controls;
        Self {
            dates: controls.date_range.clone().into(),
            hours: controls.hour_range.into(),
            airlines: controls.airlines.clone(),
        }
    }
}

/// Chart choices made in the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    /// Bar or pie for the distribution panel.
    pub distribution: ChartKind,
    /// Granularity of the time series.
    pub time_bucket: TimeBucket,
    /// Sentiment class of the word cloud.
    pub word_cloud_sentiment: Sentiment,
    /// Word cloud size, palette and canvas.
    pub word_cloud: WordCloudSettings,
    /// Keep the hour-filtered rows for the preview.
    pub show_raw_preview: bool,
    /// Keep the date-filtered rows for the CSV export.
    pub export_csv: bool,
}

impl ChartSpec {
    /// Chart choices from the configured controls.
    pub fn from_config(config: &Config) -> Self {
        let controls = &config.controls;
        Self {
            distribution: controls.distribution_chart,
            time_bucket: controls.time_bucket,
            word_cloud_sentiment: controls.word_cloud.sentiment,
            word_cloud: WordCloudSettings::from_config(&controls.word_cloud, &config.styling),
            show_raw_preview: controls.show_raw_preview,
            export_csv: controls.export_csv,
        }
    }
}

/// The panels of the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    /// Sentiment distribution.
    Distribution,
    /// Sentiment over time.
    OverTime,
    /// Airline comparison.
    Comparison,
    /// Tweet locations.
    Geo,
    /// Word cloud.
    WordCloud,
}

impl PanelId {
    /// Every panel, in display order.
    pub const ALL: [Self; 5] = [
        Self::Distribution,
        Self::OverTime,
        Self::Comparison,
        Self::Geo,
        Self::WordCloud,
    ];

    /// File name of the panel image.
    pub fn file_name(self, chart: &Chart) -> String {
        match (self, chart) {
            (Self::WordCloud, Chart::WordCloud(cloud)) => wordcloud_file_name(cloud.sentiment),
            _ => self.base_file_name().to_string(),
        }
    }

    /// Every file name the panel can write, whatever the chart.
    pub fn file_names(self) -> Vec<String> {
        let mut names = vec![self.base_file_name().to_string()];
        if self == Self::WordCloud {
            names.extend(Sentiment::ALL.into_iter().map(wordcloud_file_name));
        }
        names
    }

    const fn base_file_name(self) -> &'static str {
        match self {
            Self::Distribution => "sentiment_distribution.png",
            Self::OverTime => "sentiment_over_time.png",
            Self::Comparison => "airline_comparison.png",
            Self::Geo => "tweet_locations.png",
            Self::WordCloud => "wordcloud.png",
        }
    }
}

/// What a panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelContent {
    /// A chart to draw.
    Chart {
        /// Description handed to the renderer.
        chart: Chart,
    },
    /// Nothing to draw; an informational message instead.
    Notice {
        /// Localised message.
        message: String,
    },
    /// The panel's input is invalid or its output failed.
    Warning {
        /// Localised message.
        message: String,
    },
}

/// One panel of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Which panel.
    pub id: PanelId,
    /// Localised title.
    pub title: String,
    /// Line under the title, such as the geo panel's tweet count.
    pub subtitle: Option<String>,
    /// Localised axis labels.
    pub axes: Option<(String, String)>,
    /// Chart, notice or warning.
    pub content: PanelContent,
}

impl Panel {
    fn new(id: PanelId, title: String, content: PanelContent) -> Self {
        Self {
            id,
            title,
            subtitle: None,
            axes: None,
            content,
        }
    }

    fn with_axes(mut self, x: String, y: String) -> Self {
        self.axes = Some((x, y));
        self
    }

    /// The chart, when the panel has one.
    pub const fn chart(&self) -> Option<&Chart> {
        match &self.content {
            PanelContent::Chart { chart } => Some(chart),
            _ => None,
        }
    }
}

/// Everything a render pass produced, before rasterizing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOutput {
    /// Rows in the loaded table.
    pub rows_loaded: usize,
    /// The resolved date range, `None` when invalid or the table is empty.
    pub date_range: Option<DateRange>,
    /// Warning shown for a malformed date selection.
    pub date_warning: Option<String>,
    /// Date-filtered rows, `None` when the date selection is invalid.
    pub filtered: Option<TweetTable>,
    /// Panels in display order.
    pub panels: Vec<Panel>,
    /// Date-filtered rows to export, when enabled.
    pub export: Option<TweetTable>,
    /// Hour-filtered rows to preview, when enabled.
    pub preview: Option<TweetTable>,
}

impl RenderedOutput {
    /// Panel by id.
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}

/// Evaluates every panel for `filters` and `charts` over `table`.
///
/// A malformed date selection puts a warning on every panel, because all of
/// them are fed by the date-filtered table. No rows are substituted.
#[instrument(skip_all, fields(rows = table.len()))]
pub fn render(
    table: &TweetTable,
    filters: &FilterSpec,
    charts: &ChartSpec,
    localizer: &Localizer,
) -> RenderedOutput {
    let range = match filters.dates.resolve(table) {
        Ok(range) => range,
        Err(e) => {
            warn!(error = %e, "Date selection is invalid");
            let message = localizer.date_range_warning(&validation_reason(&e));
            let panels = PanelId::ALL
                .iter()
                .map(|id| {
                    Panel::new(
                        *id,
                        panel_title(*id, filters, charts, localizer),
                        PanelContent::Warning {
                            message: message.clone(),
                        },
                    )
                })
                .collect();
            return RenderedOutput {
                rows_loaded: table.len(),
                date_range: None,
                date_warning: Some(message),
                filtered: None,
                panels,
                export: None,
                preview: None,
            };
        }
    };

    let filtered = match range {
        Some(range) => apply_filters(table, &[TweetFilter::Date(range)]),
        None => TweetTable::default(),
    };
    let in_hours = apply_filters(&filtered, &[TweetFilter::Hour(filters.hours)]);

    let panels = vec![
        distribution_panel(&filtered, filters, charts, localizer),
        over_time_panel(&filtered, filters, charts, localizer),
        comparison_panel(&filtered, filters, charts, localizer),
        geo_panel(&in_hours, filters, charts, localizer),
        word_cloud_panel(&filtered, filters, charts, localizer),
    ];

    info!(
        in_range = filtered.len(),
        in_hours = in_hours.len(),
        charts = panels.iter().filter(|p| p.chart().is_some()).count(),
        "Render pass evaluated"
    );

    RenderedOutput {
        rows_loaded: table.len(),
        date_range: range,
        date_warning: None,
        export: charts.export_csv.then(|| filtered.clone()),
        preview: charts.show_raw_preview.then_some(in_hours),
        filtered: Some(filtered),
        panels,
    }
}

fn validation_reason(error: &DashboardError) -> String {
    match error {
        DashboardError::Validation { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn panel_title(id: PanelId, filters: &FilterSpec, charts: &ChartSpec, localizer: &Localizer) -> String {
    match id {
        PanelId::Distribution => localizer.text(messages::PANEL_DISTRIBUTION),
        PanelId::OverTime => localizer.text(messages::PANEL_OVER_TIME),
        PanelId::Comparison => localizer.text(messages::PANEL_COMPARISON),
        PanelId::Geo => localizer.geo_title(filters.hours.start(), filters.hours.end()),
        PanelId::WordCloud => localizer.wordcloud_title(charts.word_cloud_sentiment),
    }
}

fn notice(localizer: &Localizer, key: &str) -> PanelContent {
    PanelContent::Notice {
        message: localizer.text(key),
    }
}

fn distribution_panel(
    table: &TweetTable,
    filters: &FilterSpec,
    charts: &ChartSpec,
    localizer: &Localizer,
) -> Panel {
    let id = PanelId::Distribution;
    let content = DistributionChart::new(charts.distribution, sentiment_counts(table)).map_or_else(
        || notice(localizer, messages::NOTICE_NO_DATA),
        |chart| PanelContent::Chart {
            chart: Chart::Distribution(chart),
        },
    );
    Panel::new(id, panel_title(id, filters, charts, localizer), content).with_axes(
        localizer.text(messages::AXIS_SENTIMENT),
        localizer.text(messages::AXIS_TWEETS),
    )
}

fn over_time_panel(
    table: &TweetTable,
    filters: &FilterSpec,
    charts: &ChartSpec,
    localizer: &Localizer,
) -> Panel {
    let id = PanelId::OverTime;
    let points = TimeSeriesAggregator::new(charts.time_bucket).aggregate(table);
    let content = TimeSeriesChart::from_points(charts.time_bucket, &points).map_or_else(
        || notice(localizer, messages::NOTICE_NO_DATA),
        |chart| PanelContent::Chart {
            chart: Chart::TimeSeries(chart),
        },
    );
    Panel::new(id, panel_title(id, filters, charts, localizer), content).with_axes(
        localizer.time_axis(charts.time_bucket),
        localizer.text(messages::AXIS_TWEETS),
    )
}

fn comparison_panel(
    table: &TweetTable,
    filters: &FilterSpec,
    charts: &ChartSpec,
    localizer: &Localizer,
) -> Panel {
    let id = PanelId::Comparison;
    let content = if filters.airlines.is_empty() {
        notice(localizer, messages::NOTICE_NO_AIRLINES)
    } else if table.is_empty() {
        notice(localizer, messages::NOTICE_NO_DATA)
    } else {
        let breakdowns =
            AirlineBreakdownAggregator::new(filters.airlines.iter().cloned()).aggregate(table);
        ComparisonChart::new(breakdowns).map_or_else(
            || notice(localizer, messages::NOTICE_NO_AIRLINES),
            |chart| PanelContent::Chart {
                chart: Chart::Comparison(chart),
            },
        )
    };
    Panel::new(id, panel_title(id, filters, charts, localizer), content).with_axes(
        localizer.text(messages::AXIS_SENTIMENT),
        localizer.text(messages::AXIS_TWEETS),
    )
}

fn geo_panel(
    in_hours: &TweetTable,
    filters: &FilterSpec,
    charts: &ChartSpec,
    localizer: &Localizer,
) -> Panel {
    let id = PanelId::Geo;
    let chart = GeoScatterChart::from_table(in_hours, filters.hours);
    let subtitle = localizer.tweets_found(chart.found);
    let content = if chart.found == 0 {
        notice(localizer, messages::NOTICE_NO_DATA)
    } else if chart.markers.is_empty() {
        notice(localizer, messages::NOTICE_NO_LOCATIONS)
    } else {
        PanelContent::Chart {
            chart: Chart::GeoScatter(chart),
        }
    };
    let mut panel = Panel::new(id, panel_title(id, filters, charts, localizer), content);
    panel.subtitle = Some(subtitle);
    panel
}

fn word_cloud_panel(
    table: &TweetTable,
    filters: &FilterSpec,
    charts: &ChartSpec,
    localizer: &Localizer,
) -> Panel {
    let id = PanelId::WordCloud;
    let cloud = WordCloudChart::generate(charts.word_cloud_sentiment, table, &charts.word_cloud);
    let content = if cloud.is_empty() {
        notice(localizer, messages::NOTICE_NO_WORDS)
    } else {
        PanelContent::Chart {
            chart: Chart::WordCloud(cloud),
        }
    };
    Panel::new(id, panel_title(id, filters, charts, localizer), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airpulse_common::test_utils::{create_temp_dir, tweet_fixtures};
    use airpulse_data::TableCache;
    use chrono::NaiveDate;

    fn sample_table() -> TweetTable {
        let dir = create_temp_dir();
        let path = tweet_fixtures::write_csv(dir.path(), tweet_fixtures::sample_csv());
        TableCache::new(path).get_or_load().unwrap().clone()
    }

    fn specs() -> (FilterSpec, ChartSpec) {
        let config = Config::default();
        (FilterSpec::from_config(&config), ChartSpec::from_config(&config))
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 2, day).unwrap()
    }

    #[test]
    fn test_default_controls_draw_every_panel() {
        let (filters, charts) = specs();
        let output = render(&sample_table(), &filters, &charts, &Localizer::default());

        assert_eq!(output.rows_loaded, 10);
        assert_eq!(output.date_range.unwrap().to_string(), "2015-02-20 to 2015-02-22");
        assert_eq!(output.panels.len(), 5);
        assert!(output.panels.iter().all(|p| p.chart().is_some()));
        assert_eq!(output.export.as_ref().map(TweetTable::len), Some(10));
        assert!(output.preview.is_none());

        let geo = output.panel(PanelId::Geo).unwrap();
        assert_eq!(geo.title, "Tweet Locations (9:00 - 17:00)");
        assert_eq!(geo.subtitle.as_deref(), Some("5 tweets found"));
    }

    #[test]
    fn test_malformed_date_range_warns_every_panel() {
        let (mut filters, charts) = specs();
        filters.dates = DateSelection::Picked(vec![date(22), date(20)]);
        let output = render(&sample_table(), &filters, &charts, &Localizer::default());

        let warning = output.date_warning.clone().unwrap();
        assert!(warning.starts_with("Please select a date range"));
        assert!(warning.contains("after end date"));
        assert!(output.filtered.is_none() && output.export.is_none());
        for panel in &output.panels {
            assert_eq!(panel.content, PanelContent::Warning { message: warning.clone() });
        }
    }

    #[test]
    fn test_single_picked_date_is_rejected() {
        let (mut filters, charts) = specs();
        filters.dates = DateSelection::Picked(vec![date(20)]);
        let output = render(&sample_table(), &filters, &charts, &Localizer::default());
        assert!(output.date_warning.unwrap().contains("got 1 date(s)"));
    }

    #[test]
    fn test_no_airlines_selected() {
        let (mut filters, charts) = specs();
        filters.airlines.clear();
        let output = render(&sample_table(), &filters, &charts, &Localizer::default());
        assert_eq!(
            output.panel(PanelId::Comparison).unwrap().content,
            PanelContent::Notice {
                message: "Please select at least one airline".to_string()
            }
        );
    }

    #[test]
    fn test_narrow_range_and_preview() {
        let (mut filters, mut charts) = specs();
        filters.dates = DateSelection::Picked(vec![date(22), date(22)]);
        charts.show_raw_preview = true;
        charts.export_csv = false;
        let output = render(&sample_table(), &filters, &charts, &Localizer::default());

        assert_eq!(output.filtered.as_ref().map(TweetTable::len), Some(3));
        assert!(output.export.is_none());
        // Only the 12:10 tweet on the 22nd falls inside 9..=17.
        assert_eq!(output.preview.as_ref().map(TweetTable::len), Some(1));
        assert_eq!(
            output.panel(PanelId::Geo).unwrap().content,
            PanelContent::Notice {
                message: "None of the tweets in this window carry a location.".to_string()
            }
        );
    }

    #[test]
    fn test_empty_table_gives_notices() {
        let (filters, charts) = specs();
        let output = render(&TweetTable::default(), &filters, &charts, &Localizer::default());

        assert!(output.date_range.is_none());
        assert!(output.date_warning.is_none());
        for id in [PanelId::Distribution, PanelId::OverTime, PanelId::Geo, PanelId::WordCloud] {
            assert!(matches!(
                output.panel(id).unwrap().content,
                PanelContent::Notice { .. }
            ));
        }
        assert_eq!(
            output.panel(PanelId::Comparison).unwrap().content,
            PanelContent::Notice {
                message: "No tweets match the current filters.".to_string()
            }
        );
    }

    #[test]
    fn test_file_names() {
        let (filters, charts) = specs();
        let output = render(&sample_table(), &filters, &charts, &Localizer::default());
        let names: Vec<String> = output
            .panels
            .iter()
            .map(|p| p.id.file_name(p.chart().unwrap()))
            .collect();
        assert_eq!(
            names,
            vec![
                "sentiment_distribution.png",
                "sentiment_over_time.png",
                "airline_comparison.png",
                "tweet_locations.png",
                "positive_wordcloud.png",
            ]
        );
        for panel in &output.panels {
            let name = panel.id.file_name(panel.chart().unwrap());
            assert!(panel.id.file_names().contains(&name), "{name} not owned by {:?}", panel.id);
        }
        assert_eq!(PanelId::WordCloud.file_names().len(), 4);
    }
}
