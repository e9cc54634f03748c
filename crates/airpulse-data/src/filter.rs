//! Row predicates over the tweet table.
//!
//! Every filter is a pure `TweetTable -> TweetTable` step that keeps row order.

use crate::table::{Tweet, TweetTable};
use airpulse_common::{DashboardError, Result, Sentiment};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Inclusive date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::validation_field(
                format!("start date {start} is after end date {end}"),
                "date_range",
            ));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from a picker selection, which must hold exactly two dates.
    pub fn from_selection(selection: &[NaiveDate]) -> Result<Self> {
        match selection {
            [start, end] => Self::new(*start, *end),
            other => Err(DashboardError::validation_field(
                format!("expected a start and an end date, got {} date(s)", other.len()),
                "date_range",
            )),
        }
    }

    /// First day included.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day included.
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Inclusive hour-of-day window.
///
/// Bounds are checked where the window is configured; this type only orders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourRange {
    start: u8,
    end: u8,
}

impl HourRange {
    /// Window from `start` to `end`, both included.
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// First hour included.
    pub const fn start(&self) -> u8 {
        self.start
    }

    /// Last hour included.
    pub const fn end(&self) -> u8 {
        self.end
    }

    /// Whether `hour` lies within the window.
    pub const fn contains(&self, hour: u8) -> bool {
        self.start <= hour && hour <= self.end
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self::new(9, 17)
    }
}

impl From<(u8, u8)> for HourRange {
    fn from((start, end): (u8, u8)) -> Self {
        Self::new(start, end)
    }
}

/// The date picker's state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSelection {
    /// Nothing chosen: the table's whole date span.
    #[default]
    FullSpan,
    /// Dates picked explicitly, not yet checked.
    Picked(Vec<NaiveDate>),
}

impl DateSelection {
    /// Resolves the selection against `table`.
    ///
    /// Returns `Ok(None)` for the full span of an empty table. A picked
    /// selection that is not a valid range is a validation error.
    pub fn resolve(&self, table: &TweetTable) -> Result<Option<DateRange>> {
        match self {
            Self::FullSpan => table
                .date_span()
                .map(|(start, end)| DateRange::new(start, end))
                .transpose(),
            Self::Picked(dates) => DateRange::from_selection(dates).map(Some),
        }
    }
}

impl From<Option<Vec<NaiveDate>>> for DateSelection {
    fn from(value: Option<Vec<NaiveDate>>) -> Self {
        value.map_or(Self::FullSpan, Self::Picked)
    }
}

/// A single row predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweetFilter {
    /// Tweet date within the range.
    Date(DateRange),
    /// Tweet hour within the window.
    Hour(HourRange),
    /// Exact airline name.
    Airline(String),
    /// One sentiment label.
    Sentiment(Sentiment),
}

impl TweetFilter {
    /// Whether `tweet` passes this predicate.
    pub fn matches(&self, tweet: &Tweet) -> bool {
        match self {
            Self::Date(range) => range.contains(tweet.date()),
            Self::Hour(range) => range.contains(tweet.hour()),
            Self::Airline(name) => tweet.airline == *name,
            Self::Sentiment(sentiment) => tweet.sentiment == *sentiment,
        }
    }

    /// Rows of `table` passing this predicate.
    pub fn apply(&self, table: &TweetTable) -> TweetTable {
        table.select(|t| self.matches(t))
    }
}

/// Applies every filter in turn.
#[instrument(skip(table), fields(input_rows = table.len()))]
pub fn apply_filters(table: &TweetTable, filters: &[TweetFilter]) -> TweetTable {
    let filtered = table.select(|t| filters.iter().all(|f| f.matches(t)));
    debug!(output_rows = filtered.len(), "Filters applied");
    filtered
}
