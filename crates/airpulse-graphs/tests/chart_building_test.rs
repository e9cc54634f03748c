//! Building chart descriptions from the sample dataset.
//!
//! These tests stop short of rasterizing text, which needs system fonts.

use airpulse_common::test_utils::{create_temp_dir, tweet_fixtures};
use airpulse_common::{ChartKind, Palette, Sentiment, TimeBucket};
use airpulse_data::{
    apply_filters, sentiment_counts, AirlineBreakdownAggregator, DataAggregator, HourRange,
    TableCache, TimeSeriesAggregator, TweetFilter, TweetTable,
};
use airpulse_graphs::{
    spread, Chart, ComparisonChart, DistributionChart, GeoScatterChart, GraphManager, GraphConfig,
    TimeSeriesChart, WordCloudChart, WordCloudSettings,
};

fn sample_table() -> TweetTable {
    let dir = create_temp_dir();
    let path = tweet_fixtures::write_csv(dir.path(), tweet_fixtures::sample_csv());
    TableCache::new(path).get_or_load().unwrap().clone()
}

#[test]
fn test_distribution_from_sample() {
    let chart = DistributionChart::new(ChartKind::Pie, sentiment_counts(&sample_table())).unwrap();
    assert_eq!(chart.total(), tweet_fixtures::SAMPLE_ROWS as u64);
    assert_eq!(chart.slices[0], (Sentiment::Positive, tweet_fixtures::SAMPLE_POSITIVE));
}

#[test]
fn test_daily_time_series_from_sample() {
    let points = TimeSeriesAggregator::new(TimeBucket::Daily).aggregate(&sample_table());
    let chart = TimeSeriesChart::from_points(TimeBucket::Daily, &points).unwrap();

    assert_eq!(chart.labels, vec!["2015-02-20", "2015-02-21", "2015-02-22"]);
    let lines: Vec<(Sentiment, Vec<u64>)> = chart
        .series
        .iter()
        .map(|s| (s.sentiment, s.values.clone()))
        .collect();
    assert_eq!(
        lines,
        vec![
            (Sentiment::Negative, vec![1, 1, 1]),
            (Sentiment::Neutral, vec![0, 1, 0]),
            (Sentiment::Positive, vec![2, 2, 2]),
        ]
    );
}

#[test]
fn test_comparison_keeps_selection_order() {
    let breakdowns =
        AirlineBreakdownAggregator::new(["United", "American", "Delta"]).aggregate(&sample_table());
    let chart = ComparisonChart::new(breakdowns).unwrap();

    let totals: Vec<(&str, u64)> = chart
        .panels
        .iter()
        .map(|p| (p.airline.as_str(), p.total()))
        .collect();
    assert_eq!(totals, vec![("United", 3), ("American", 2), ("Delta", 2)]);
    assert!(chart
        .panels
        .iter()
        .all(|p| p.counts.map(|(s, _)| s) == Sentiment::ALL));
}

#[test]
fn test_geo_scatter_counts_unlocated_rows() {
    let hours = HourRange::default();
    let filtered = apply_filters(&sample_table(), &[TweetFilter::Hour(hours)]);
    let chart = GeoScatterChart::from_table(&filtered, hours);

    assert_eq!(chart.found, 5);
    assert_eq!(chart.markers.len(), 2);
    let (lon, lat) = chart.bounds();
    for marker in &chart.markers {
        assert!(lon.contains(&marker.point.longitude));
        assert!(lat.contains(&marker.point.latitude));
    }
}

#[test]
fn test_positive_word_cloud_from_sample() {
    let settings = WordCloudSettings {
        palette: Palette::Inferno,
        ..WordCloudSettings::default()
    };
    let chart = WordCloudChart::generate(Sentiment::Positive, &sample_table(), &settings);

    let words: Vec<&str> = chart.layout.words.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(words[0], "great");
    assert!(words.contains(&"thanks"));
    assert!(!words.iter().any(|w| w.eq_ignore_ascii_case("the")));
    assert!(!words.contains(&"delayed"));

    let colors: Vec<(u8, u8, u8)> = chart.layout.words.iter().map(|w| w.color).collect();
    assert_eq!(colors, spread(Palette::Inferno, words.len()));
}

#[test]
fn test_manager_renders_empty_word_cloud() {
    // Rendering with axis labels needs fonts, so only the cheapest path runs.
    let chart = Chart::WordCloud(WordCloudChart::generate(
        Sentiment::Neutral,
        &TweetTable::default(),
        &WordCloudSettings {
            width: 120,
            height: 60,
            ..WordCloudSettings::default()
        },
    ));
    let png = GraphManager::new().render(&chart, &GraphConfig::default()).unwrap();
    assert_eq!(&png[..4], b"\x89PNG");
}
