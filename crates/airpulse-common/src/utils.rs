//! Shared utility functions.

use chrono::{DateTime, FixedOffset};

/// Timestamp layout used by the source dataset, e.g. `2015-02-24 11:35:52 -0800`.
pub const TWEET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Formats a tweet timestamp in the dataset's native layout.
pub fn format_tweet_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(TWEET_TIMESTAMP_FORMAT).to_string()
}

/// Parses a `#rrggbb` colour string into its components.
pub fn parse_hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_tweet_timestamp() {
        let offset = FixedOffset::west_opt(8 * 3600).unwrap();
        let timestamp = offset.with_ymd_and_hms(2015, 2, 24, 11, 35, 52).unwrap();
        assert_eq!(format_tweet_timestamp(&timestamp), "2015-02-24 11:35:52 -0800");
    }

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex_rgb("#1f77b4"), Some((31, 119, 180)));
        assert_eq!(parse_hex_rgb("1f77b4"), None);
        assert_eq!(parse_hex_rgb("#ZZ0000"), None);
        assert_eq!(parse_hex_rgb("#fff"), None);
    }
}
