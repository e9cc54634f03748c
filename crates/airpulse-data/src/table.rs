//! In-memory tweet table.

use airpulse_common::{GeoPoint, Sentiment, TweetId};
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::Serialize;
use std::collections::HashSet;

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tweet {
    /// Source identifier.
    pub id: TweetId,
    /// Sentiment label.
    pub sentiment: Sentiment,
    /// Airline the tweet is about.
    pub airline: String,
    /// Tweet text.
    pub text: String,
    /// Creation time in the offset recorded by the source.
    pub created: DateTime<FixedOffset>,
    /// Location, when the source carried a usable one.
    pub location: Option<GeoPoint>,
}

impl Tweet {
    /// Calendar date of the creation time, in its own offset.
    pub fn date(&self) -> NaiveDate {
        self.created.date_naive()
    }

    /// Hour of day of the creation time, in its own offset.
    #[allow(clippy::cast_possible_truncation)]
    pub fn hour(&self) -> u8 {
        self.created.hour() as u8
    }
}

/// An immutable, ordered collection of tweets.
///
/// Filters produce new tables; row order is always the source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweetTable {
    rows: Vec<Tweet>,
}

impl TweetTable {
    /// Wraps rows in their given order.
    pub fn new(rows: Vec<Tweet>) -> Self {
        Self { rows }
    }

    /// All rows.
    pub fn rows(&self) -> &[Tweet] {
        &self.rows
    }

    /// Iterates over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Tweet> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest tweet dates, `None` for an empty table.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().map(Tweet::date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Distinct airline names in order of first appearance.
    pub fn airlines(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|t| seen.insert(t.airline.as_str()))
            .map(|t| t.airline.clone())
            .collect()
    }

    /// Rows satisfying `predicate`, order preserved.
    pub fn select<P>(&self, predicate: P) -> Self
    where
        P: Fn(&Tweet) -> bool,
    {
        self.rows.iter().filter(|t| predicate(t)).cloned().collect()
    }
}

impl FromIterator<Tweet> for TweetTable {
    fn from_iter<I: IntoIterator<Item = Tweet>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TweetTable {
    type Item = &'a Tweet;
    type IntoIter = std::slice::Iter<'a, Tweet>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use airpulse_common::test_utils::mock_timestamp;

    /// A tweet with the given label, airline and local creation time.
    pub fn tweet(
        id: u32,
        sentiment: Sentiment,
        airline: &str,
        (year, month, day, hour): (i32, u32, u32, u32),
    ) -> Tweet {
        Tweet {
            id: TweetId(id.to_string()),
            sentiment,
            airline: airline.to_string(),
            text: format!("tweet number {id}"),
            created: mock_timestamp(year, month, day, hour, 0, -8),
            location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::tweet;
    use super::*;

    #[test]
    fn test_derived_date_uses_local_offset() {
        // 23:00 at -0800 is already the next day in UTC.
        let t = tweet(1, Sentiment::Neutral, "United", (2015, 2, 20, 23));
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2015, 2, 20).unwrap());
        assert_eq!(t.hour(), 23);
    }

    #[test]
    fn test_date_span_and_airlines() {
        let table = TweetTable::new(vec![
            tweet(1, Sentiment::Positive, "Delta", (2015, 2, 21, 8)),
            tweet(2, Sentiment::Negative, "United", (2015, 2, 19, 8)),
            tweet(3, Sentiment::Negative, "Delta", (2015, 2, 23, 8)),
        ]);

        assert_eq!(
            table.date_span(),
            Some((
                NaiveDate::from_ymd_opt(2015, 2, 19).unwrap(),
                NaiveDate::from_ymd_opt(2015, 2, 23).unwrap()
            ))
        );
        assert_eq!(table.airlines(), vec!["Delta", "United"]);
        assert_eq!(TweetTable::default().date_span(), None);
    }

    #[test]
    fn test_select_preserves_order() {
        let table = TweetTable::new(vec![
            tweet(1, Sentiment::Positive, "Delta", (2015, 2, 21, 8)),
            tweet(2, Sentiment::Negative, "United", (2015, 2, 19, 8)),
            tweet(3, Sentiment::Positive, "Delta", (2015, 2, 23, 8)),
        ]);
        let positive = table.select(|t| t.sentiment == Sentiment::Positive);
        let ids: Vec<&str> = positive.iter().map(|t| t.id.0.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(table.len(), 3);
    }
}
