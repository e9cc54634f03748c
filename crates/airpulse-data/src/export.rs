//! CSV serialization of tweet tables.

use crate::table::{Tweet, TweetTable};
use airpulse_common::{format_tweet_timestamp, DashboardError, Result};
use tracing::{debug, instrument};

/// File name of the dataset export.
pub const EXPORT_FILE_NAME: &str = "airline_tweets.csv";

/// File name of the raw-data preview.
pub const PREVIEW_FILE_NAME: &str = "preview.csv";

/// Columns of the dataset export, in order.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "tweet_id",
    "airline_sentiment",
    "airline",
    "text",
    "tweet_created",
    "latitude",
    "longitude",
    "date",
];

/// Columns of the raw-data preview, in order.
pub const PREVIEW_COLUMNS: [&str; 4] = ["text", "airline", "airline_sentiment", "tweet_created"];

fn export_record(tweet: &Tweet) -> [String; 8] {
    let (latitude, longitude) = tweet.location.map_or_else(
        || (String::new(), String::new()),
        |p| (p.latitude.to_string(), p.longitude.to_string()),
    );
    [
        tweet.id.to_string(),
        tweet.sentiment.to_string(),
        tweet.airline.clone(),
        tweet.text.clone(),
        format_tweet_timestamp(&tweet.created),
        latitude,
        longitude,
        tweet.date().to_string(),
    ]
}

fn preview_record(tweet: &Tweet) -> [String; 4] {
    [
        tweet.text.clone(),
        tweet.airline.clone(),
        tweet.sentiment.to_string(),
        format_tweet_timestamp(&tweet.created),
    ]
}

fn write_csv<const N: usize>(
    table: &TweetTable,
    header: [&str; N],
    record: fn(&Tweet) -> [String; N],
) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(header)
        .map_err(|e| DashboardError::export_with_source("failed to write CSV header", e))?;
    for tweet in table {
        writer
            .write_record(record(tweet))
            .map_err(|e| DashboardError::export_with_source("failed to write CSV row", e))?;
    }
    writer
        .into_inner()
        .map_err(|e| DashboardError::export_with_source("failed to flush CSV", e.into_error()))
}

/// Serializes `table` as UTF-8 CSV with a header row, also when it is empty.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn table_to_csv(table: &TweetTable) -> Result<Vec<u8>> {
    let bytes = write_csv(table, EXPORT_COLUMNS, export_record)?;
    debug!(bytes = bytes.len(), "Serialized dataset export");
    Ok(bytes)
}

/// Serializes the preview columns of `table`.
pub fn preview_to_csv(table: &TweetTable) -> Result<Vec<u8>> {
    write_csv(table, PREVIEW_COLUMNS, preview_record)
}
