//! CSV loading and the process-wide table handle.

use crate::table::{Tweet, TweetTable};
use airpulse_common::{DataLoadError, GeoPoint, Sentiment, TweetId, TWEET_TIMESTAMP_FORMAT};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "tweet_id",
    "airline_sentiment",
    "airline",
    "text",
    "tweet_created",
];

/// One CSV record as it appears on disk. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawTweet {
    tweet_id: String,
    airline_sentiment: String,
    airline: String,
    text: String,
    tweet_created: String,
    #[serde(default)]
    tweet_coord: Option<String>,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
}

/// Loads the whole dataset at `path`.
///
/// Either every row is parsed or the load fails; a bad timestamp or sentiment
/// label anywhere rejects the file.
#[instrument(fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<TweetTable, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| DataLoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| malformed(path, 0, e))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<RawTweet>().enumerate() {
        let row = index as u64 + 1;
        let raw = record.map_err(|e| malformed(path, row, e))?;
        rows.push(into_tweet(raw, row)?);
    }

    info!(rows = rows.len(), "Loaded tweet table");
    Ok(TweetTable::new(rows))
}

fn malformed(path: &Path, row: u64, error: csv::Error) -> DataLoadError {
    DataLoadError::Malformed {
        path: path.to_path_buf(),
        row,
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

fn into_tweet(raw: RawTweet, row: u64) -> Result<Tweet, DataLoadError> {
    let sentiment = raw
        .airline_sentiment
        .parse::<Sentiment>()
        .map_err(|_| DataLoadError::InvalidSentiment {
            row,
            value: raw.airline_sentiment.clone(),
        })?;
    let created =
        parse_timestamp(&raw.tweet_created).ok_or_else(|| DataLoadError::InvalidTimestamp {
            row,
            value: raw.tweet_created.clone(),
        })?;
    let location = parse_location(
        raw.latitude.as_deref(),
        raw.longitude.as_deref(),
        raw.tweet_coord.as_deref(),
    );

    Ok(Tweet {
        id: TweetId(raw.tweet_id.trim().to_string()),
        sentiment,
        airline: raw.airline.trim().to_string(),
        text: raw.text,
        created,
        location,
    })
}

/// Parses a creation timestamp.
///
/// Accepts the dataset's `2015-02-24 11:35:52 -0800` form, RFC 3339, and an
/// offset-less `2015-02-24 11:35:52`, which is taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_str(value, TWEET_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive).into())
        })
}

/// Resolves a location from explicit latitude/longitude columns, falling back
/// to a `[lat, lon]` coordinate string.
pub fn parse_location(
    latitude: Option<&str>,
    longitude: Option<&str>,
    coord: Option<&str>,
) -> Option<GeoPoint> {
    if let (Some(lat), Some(lon)) = (latitude, longitude) {
        return GeoPoint::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?);
    }
    let inner = coord?.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (lat, lon) = inner.split_once(',')?;
    GeoPoint::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?)
}

/// Lazily loaded, read-only handle to the dataset.
///
/// The first successful [`TableCache::get_or_load`] stores the table for the
/// lifetime of the handle. A failed load stores nothing.
#[derive(Debug)]
pub struct TableCache {
    path: PathBuf,
    table: OnceCell<TweetTable>,
}

impl TableCache {
    /// Handle for the dataset at `path`; nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    /// File this handle loads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the table has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Returns the table, loading it on first use.
    pub fn get_or_load(&self) -> Result<&TweetTable, DataLoadError> {
        if let Some(table) = self.table.get() {
            debug!(path = %self.path.display(), "Tweet table served from cache");
            return Ok(table);
        }
        self.table.get_or_try_init(|| load_table(&self.path))
    }
}
