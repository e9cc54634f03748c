//! Chart descriptions.
//!
//! A description holds exactly what a renderer draws. Builders return `None`
//! when there is nothing to draw so the caller can show a notice instead.

use crate::wordcloud::WordCloudChart;
use airpulse_common::{ChartKind, GeoPoint, Sentiment, TimeBucket};
use airpulse_data::{AirlineBreakdown, BucketLabel, HourRange, TimeSeriesPoint, TweetTable};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Range;

/// Sentiment distribution as bars or pie slices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionChart {
    /// Bar or pie.
    pub kind: ChartKind,
    /// Counts in value-count order.
    pub slices: Vec<(Sentiment, u64)>,
}

impl DistributionChart {
    /// Builds the chart, `None` when every count is zero.
    pub fn new(kind: ChartKind, counts: Vec<(Sentiment, u64)>) -> Option<Self> {
        let chart = Self {
            kind,
            slices: counts,
        };
        (chart.total() > 0).then_some(chart)
    }

    /// Sum of all slices.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|(_, c)| c).sum()
    }
}

/// One line of the time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesLine {
    /// Sentiment drawn by this line.
    pub sentiment: Sentiment,
    /// One value per bucket label, zeros included.
    pub values: Vec<u64>,
}

/// Tweet counts over time, one line per sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesChart {
    /// Granularity of the x axis.
    pub bucket: TimeBucket,
    /// Bucket labels in chronological order.
    pub labels: Vec<String>,
    /// Lines in sentiment display order.
    pub series: Vec<SeriesLine>,
}

impl TimeSeriesChart {
    /// Builds the chart from `(bucket, sentiment)` counts.
    ///
    /// Every sentiment that occurs gets a line spanning all buckets, with
    /// zero where it has no tweets.
    pub fn from_points(bucket: TimeBucket, points: &[TimeSeriesPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let buckets: Vec<BucketLabel> = points
            .iter()
            .map(|p| p.bucket)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let present: BTreeSet<Sentiment> = points.iter().map(|p| p.sentiment).collect();

        let series = present
            .into_iter()
            .map(|sentiment| SeriesLine {
                sentiment,
                values: buckets
                    .iter()
                    .map(|b| {
                        points
                            .iter()
                            .find(|p| p.bucket == *b && p.sentiment == sentiment)
                            .map_or(0, |p| p.count)
                    })
                    .collect(),
            })
            .collect();

        Some(Self {
            bucket,
            labels: buckets.iter().map(ToString::to_string).collect(),
            series,
        })
    }

    /// Largest value on any line.
    pub fn max_value(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Side-by-side sentiment bars, one sub-panel per airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonChart {
    /// Sub-panels in selection order.
    pub panels: Vec<AirlineBreakdown>,
}

impl ComparisonChart {
    /// Builds the chart, `None` when no airline is selected.
    pub fn new(panels: Vec<AirlineBreakdown>) -> Option<Self> {
        (!panels.is_empty()).then_some(Self { panels })
    }
}

/// A located tweet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoMarker {
    /// Position.
    pub point: GeoPoint,
    /// Colour key.
    pub sentiment: Sentiment,
}

/// Tweet locations within an hour window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoScatterChart {
    /// Hour window the tweets were filtered by.
    pub hours: HourRange,
    /// Tweets in the window, with or without a location.
    pub found: usize,
    /// Tweets in the window that carry a location.
    pub markers: Vec<GeoMarker>,
}

/// Shown when no tweet in the window has a location.
const CONTINENTAL_US: (Range<f64>, Range<f64>) = (-125.0..-66.0, 24.0..50.0);

impl GeoScatterChart {
    /// Builds the chart from an hour-filtered table. Rows without a location
    /// are left out of the markers but still counted in `found`.
    pub fn from_table(table: &TweetTable, hours: HourRange) -> Self {
        let markers = table
            .iter()
            .filter_map(|t| {
                t.location.map(|point| GeoMarker {
                    point,
                    sentiment: t.sentiment,
                })
            })
            .collect();
        Self {
            hours,
            found: table.len(),
            markers,
        }
    }

    /// Longitude and latitude ranges covering every marker with a margin.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        if self.markers.is_empty() {
            return CONTINENTAL_US;
        }
        let fold = |f: fn(&GeoPoint) -> f64| {
            self.markers
                .iter()
                .map(|m| f(&m.point))
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                })
        };
        let pad = |(lo, hi): (f64, f64)| {
            let margin = ((hi - lo) * 0.1).max(1.0);
            (lo - margin)..(hi + margin)
        };
        (pad(fold(|p| p.longitude)), pad(fold(|p| p.latitude)))
    }
}

/// Any chart the dashboard can draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chart {
    /// Sentiment distribution.
    Distribution(DistributionChart),
    /// Sentiment over time.
    TimeSeries(TimeSeriesChart),
    /// Airline comparison.
    Comparison(ComparisonChart),
    /// Tweet locations.
    GeoScatter(GeoScatterChart),
    /// Word cloud.
    WordCloud(WordCloudChart),
}

impl Chart {
    /// Short name of the chart type.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Distribution(_) => "distribution",
            Self::TimeSeries(_) => "time_series",
            Self::Comparison(_) => "comparison",
            Self::GeoScatter(_) => "geo_scatter",
            Self::WordCloud(_) => "word_cloud",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(hour: u8, sentiment: Sentiment, count: u64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            bucket: BucketLabel::Hour(hour),
            sentiment,
            count,
        }
    }

    #[test]
    fn test_distribution_requires_data() {
        assert!(DistributionChart::new(ChartKind::Bar, vec![]).is_none());
        assert!(DistributionChart::new(ChartKind::Pie, vec![(Sentiment::Neutral, 0)]).is_none());

        let chart =
            DistributionChart::new(ChartKind::Pie, vec![(Sentiment::Positive, 6), (Sentiment::Negative, 3)])
                .unwrap();
        assert_eq!(chart.total(), 9);
    }

    #[test]
    fn test_time_series_zero_fills() {
        let points = vec![
            point(8, Sentiment::Negative, 2),
            point(8, Sentiment::Positive, 1),
            point(14, Sentiment::Positive, 4),
        ];
        let chart = TimeSeriesChart::from_points(TimeBucket::Hourly, &points).unwrap();

        assert_eq!(chart.labels, vec!["08", "14"]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].sentiment, Sentiment::Negative);
        assert_eq!(chart.series[0].values, vec![2, 0]);
        assert_eq!(chart.series[1].values, vec![1, 4]);
        assert_eq!(chart.max_value(), 4);

        assert!(TimeSeriesChart::from_points(TimeBucket::Daily, &[]).is_none());
    }

    #[test]
    fn test_comparison_requires_airlines() {
        assert!(ComparisonChart::new(Vec::new()).is_none());
    }

    #[test]
    fn test_geo_bounds() {
        let empty = GeoScatterChart {
            hours: HourRange::default(),
            found: 3,
            markers: Vec::new(),
        };
        assert_eq!(empty.bounds(), CONTINENTAL_US);

        let chart = GeoScatterChart {
            hours: HourRange::default(),
            found: 1,
            markers: vec![GeoMarker {
                point: GeoPoint::new(40.0, -73.0).unwrap(),
                sentiment: Sentiment::Positive,
            }],
        };
        let (lon, lat) = chart.bounds();
        assert!(lon.contains(&-73.0) && lat.contains(&40.0));
        assert!(lon.end - lon.start >= 2.0);
    }
}
