//! Group-by and count over the tweet table.

use crate::bucket::BucketLabel;
use crate::table::{Tweet, TweetTable};
use airpulse_common::{Sentiment, TimeBucket};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument};

/// Trait for turning a table into ordered aggregate points.
pub trait DataAggregator {
    /// One output row.
    type Point;

    /// Aggregates `table`. An empty table yields an empty result.
    fn aggregate(&self, table: &TweetTable) -> Vec<Self::Point>;
}

/// Categorical column to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    /// Sentiment label.
    Sentiment,
    /// Airline name.
    Airline,
}

/// A value of a [`GroupKey`] column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    /// A sentiment label.
    Sentiment(Sentiment),
    /// An airline name.
    Airline(String),
}

impl GroupKey {
    /// The value of this column for `tweet`.
    pub fn value_of(self, tweet: &Tweet) -> GroupValue {
        match self {
            Self::Sentiment => GroupValue::Sentiment(tweet.sentiment),
            Self::Airline => GroupValue::Airline(tweet.airline.clone()),
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentiment(sentiment) => write!(f, "{sentiment}"),
            Self::Airline(name) => f.write_str(name),
        }
    }
}

/// Count for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    /// Group value.
    pub key: GroupValue,
    /// Number of rows.
    pub count: u64,
}

/// Count for one pair of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCount {
    /// First and second group values.
    pub keys: (GroupValue, GroupValue),
    /// Number of rows.
    pub count: u64,
}

/// Count of one sentiment within one time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
    /// Time bucket.
    pub bucket: BucketLabel,
    /// Sentiment label.
    pub sentiment: Sentiment,
    /// Number of rows.
    pub count: u64,
}

/// Sentiment counts for one airline, always in display order with zeros kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirlineBreakdown {
    /// Airline name.
    pub airline: String,
    /// Negative, neutral and positive counts.
    pub counts: [(Sentiment, u64); 3],
}

impl AirlineBreakdown {
    /// Total rows for the airline.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

fn tally<K, F>(table: &TweetTable, key_of: F) -> HashMap<K, u64>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Tweet) -> K,
{
    let mut counts = HashMap::new();
    for tweet in table {
        *counts.entry(key_of(tweet)).or_insert(0) += 1;
    }
    counts
}

/// Counts rows per value of one column, largest group first.
#[derive(Debug, Clone, Copy)]
pub struct GroupCounter {
    key: GroupKey,
}

impl GroupCounter {
    pub const fn new(key: GroupKey) -> Self {
        Self { key }
    }
}

impl DataAggregator for GroupCounter {
    type Point = GroupCount;

    #[instrument(skip(self, table), fields(key = ?self.key, rows = table.len()))]
    fn aggregate(&self, table: &TweetTable) -> Vec<GroupCount> {
        let mut result: Vec<GroupCount> = tally(table, |t| self.key.value_of(t))
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect();

        // Count descending, ties by key
        result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

        debug!("Aggregated {} groups", result.len());
        result
    }
}

/// Counts rows per pair of column values, ordered by the pair.
#[derive(Debug, Clone, Copy)]
pub struct PairCounter {
    first: GroupKey,
    second: GroupKey,
}

impl PairCounter {
    pub const fn new(first: GroupKey, second: GroupKey) -> Self {
        Self { first, second }
    }
}

impl DataAggregator for PairCounter {
    type Point = PairCount;

    #[instrument(skip(self, table), fields(rows = table.len()))]
    fn aggregate(&self, table: &TweetTable) -> Vec<PairCount> {
        let mut result: Vec<PairCount> =
            tally(table, |t| (self.first.value_of(t), self.second.value_of(t)))
                .into_iter()
                .map(|(keys, count)| PairCount { keys, count })
                .collect();
        result.sort_by(|a, b| a.keys.cmp(&b.keys));

        debug!("Aggregated {} group pairs", result.len());
        result
    }
}

/// Counts rows per (time bucket, sentiment), chronologically.
///
/// Only combinations that occur are returned.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesAggregator {
    bucket: TimeBucket,
}

impl TimeSeriesAggregator {
    pub const fn new(bucket: TimeBucket) -> Self {
        Self { bucket }
    }
}

impl DataAggregator for TimeSeriesAggregator {
    type Point = TimeSeriesPoint;

    #[instrument(skip(self, table), fields(bucket = ?self.bucket, rows = table.len()))]
    fn aggregate(&self, table: &TweetTable) -> Vec<TimeSeriesPoint> {
        let mut result: Vec<TimeSeriesPoint> =
            tally(table, |t| (BucketLabel::of(t, self.bucket), t.sentiment))
                .into_iter()
                .map(|((bucket, sentiment), count)| TimeSeriesPoint {
                    bucket,
                    sentiment,
                    count,
                })
                .collect();
        result.sort_by_key(|p| (p.bucket, p.sentiment));

        debug!("Aggregated {} time series points", result.len());
        result
    }
}

/// Sentiment breakdown for a chosen list of airlines, in the order given.
#[derive(Debug, Clone)]
pub struct AirlineBreakdownAggregator {
    airlines: Vec<String>,
}

impl AirlineBreakdownAggregator {
    pub fn new(airlines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            airlines: airlines.into_iter().map(Into::into).collect(),
        }
    }
}

impl DataAggregator for AirlineBreakdownAggregator {
    type Point = AirlineBreakdown;

    #[instrument(skip(self, table), fields(airlines = self.airlines.len(), rows = table.len()))]
    fn aggregate(&self, table: &TweetTable) -> Vec<AirlineBreakdown> {
        let counts = tally(table, |t| (t.airline.as_str().to_owned(), t.sentiment));
        self.airlines
            .iter()
            .map(|airline| AirlineBreakdown {
                airline: airline.clone(),
                counts: Sentiment::ALL.map(|s| {
                    (s, counts.get(&(airline.clone(), s)).copied().unwrap_or(0))
                }),
            })
            .collect()
    }
}

/// Sentiment counts in value-count order.
pub fn sentiment_counts(table: &TweetTable) -> Vec<(Sentiment, u64)> {
    GroupCounter::new(GroupKey::Sentiment)
        .aggregate(table)
        .into_iter()
        .filter_map(|g| match g.key {
            GroupValue::Sentiment(s) => Some((s, g.count)),
            GroupValue::Airline(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::tweet;

    fn mixed() -> TweetTable {
        let mut rows = Vec::new();
        for (i, sentiment) in [
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Positive,
            Sentiment::Neutral,
            Sentiment::Negative,
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Positive,
        ]
        .into_iter()
        .enumerate()
        {
            let airline = if i % 2 == 0 { "United" } else { "Delta" };
            let day = 20 + (i as u32 % 3);
            rows.push(tweet(i as u32, sentiment, airline, (2015, 2, day, 8 + i as u32)));
        }
        TweetTable::new(rows)
    }

    #[test]
    fn test_sentiment_counts_value_count_order() {
        assert_eq!(
            sentiment_counts(&mixed()),
            vec![
                (Sentiment::Positive, 6),
                (Sentiment::Negative, 3),
                (Sentiment::Neutral, 1),
            ]
        );
    }

    #[test]
    fn test_ties_break_by_key() {
        let table = TweetTable::new(vec![
            tweet(1, Sentiment::Positive, "United", (2015, 2, 20, 8)),
            tweet(2, Sentiment::Negative, "Delta", (2015, 2, 20, 8)),
        ]);
        let airlines: Vec<String> = GroupCounter::new(GroupKey::Airline)
            .aggregate(&table)
            .into_iter()
            .map(|g| g.key.to_string())
            .collect();
        assert_eq!(airlines, vec!["Delta", "United"]);
    }

    #[test]
    fn test_pair_counts_sum_and_order() {
        let table = mixed();
        let pairs = PairCounter::new(GroupKey::Airline, GroupKey::Sentiment).aggregate(&table);
        assert_eq!(pairs.iter().map(|p| p.count).sum::<u64>(), table.len() as u64);
        let keys: Vec<_> = pairs.iter().map(|p| p.keys.clone()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_time_series_is_chronological() {
        let points = TimeSeriesAggregator::new(TimeBucket::Daily).aggregate(&mixed());
        let order: Vec<_> = points.iter().map(|p| (p.bucket, p.sentiment)).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        assert_eq!(points.iter().map(|p| p.count).sum::<u64>(), 10);
    }

    #[test]
    fn test_airline_breakdown_keeps_zero_counts() {
        let breakdown =
            AirlineBreakdownAggregator::new(["Delta", "Oceanic"]).aggregate(&mixed());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].airline, "Delta");
        assert_eq!(breakdown[0].counts.map(|(s, _)| s), Sentiment::ALL);
        assert_eq!(breakdown[0].total(), 5);
        assert_eq!(breakdown[1].total(), 0);
    }

    #[test]
    fn test_empty_table_aggregates_to_nothing() {
        let empty = TweetTable::default();
        assert!(GroupCounter::new(GroupKey::Sentiment).aggregate(&empty).is_empty());
        assert!(TimeSeriesAggregator::new(TimeBucket::Hourly).aggregate(&empty).is_empty());
        assert!(sentiment_counts(&empty).is_empty());
    }
}
