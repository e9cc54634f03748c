//! Time bucketing of tweet timestamps.

use crate::table::Tweet;
use airpulse_common::TimeBucket;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// The bucket a tweet falls into.
///
/// The derived ordering is chronological within one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BucketLabel {
    /// Hour of day, 0 to 23.
    Hour(u8),
    /// Calendar date.
    Day(NaiveDate),
    /// ISO week of an ISO year.
    Week {
        /// ISO year, which may differ from the calendar year near January 1st.
        year: i32,
        /// ISO week number, 1 to 53.
        week: u32,
    },
}

impl BucketLabel {
    /// Bucket of `tweet` at the given granularity.
    pub fn of(tweet: &Tweet, bucket: TimeBucket) -> Self {
        match bucket {
            TimeBucket::Hourly => Self::Hour(tweet.hour()),
            TimeBucket::Daily => Self::Day(tweet.date()),
            TimeBucket::Weekly => {
                let iso = tweet.date().iso_week();
                Self::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
        }
    }
}

/// Labels sort the same way as strings and as values.
impl fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hour(hour) => write!(f, "{hour:02}"),
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Week { year, week } => write!(f, "{year:04}-W{week:02}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::tweet;
    use airpulse_common::Sentiment;

    #[test]
    fn test_labels() {
        let t = tweet(1, Sentiment::Positive, "United", (2015, 2, 24, 7));
        assert_eq!(BucketLabel::of(&t, TimeBucket::Hourly).to_string(), "07");
        assert_eq!(BucketLabel::of(&t, TimeBucket::Daily).to_string(), "2015-02-24");
        assert_eq!(BucketLabel::of(&t, TimeBucket::Weekly).to_string(), "2015-W09");
    }

    #[test]
    fn test_iso_week_crosses_calendar_year() {
        // 2015-01-01 is a Thursday, so it belongs to 2015-W01; 2016-01-01 is
        // a Friday and belongs to the last week of 2015.
        let t = tweet(1, Sentiment::Positive, "United", (2016, 1, 1, 12));
        assert_eq!(BucketLabel::of(&t, TimeBucket::Weekly).to_string(), "2015-W53");
    }

    #[test]
    fn test_value_and_string_order_agree() {
        let mut labels = vec![
            BucketLabel::Week { year: 2015, week: 10 },
            BucketLabel::Week { year: 2014, week: 52 },
            BucketLabel::Week { year: 2015, week: 9 },
        ];
        labels.sort();
        let strings: Vec<String> = labels.iter().map(ToString::to_string).collect();
        let mut sorted = strings.clone();
        sorted.sort();
        assert_eq!(strings, sorted);
        assert_eq!(strings[0], "2014-W52");
    }
}
