//! Fixtures shared by the unit and integration tests of every AirPulse crate.
//!
//! Enabled with the `testing` feature.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Routes `tracing` output to the test harness. Later calls do nothing.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a timestamp with a fixed UTC offset in hours.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    offset_hours: i32,
) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(year, month, day, hour, min, 0)
        .unwrap()
}

/// Temporary directory removed on drop.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Tweet dataset fixtures shaped like the public airline sentiment export.
pub mod tweet_fixtures {
    use super::*;

    /// Rows in [`sample_csv`].
    pub const SAMPLE_ROWS: usize = 10;
    /// Positive rows in [`sample_csv`].
    pub const SAMPLE_POSITIVE: u64 = 6;
    /// Negative rows in [`sample_csv`].
    pub const SAMPLE_NEGATIVE: u64 = 3;
    /// Neutral rows in [`sample_csv`].
    pub const SAMPLE_NEUTRAL: u64 = 1;
    /// Rows in [`sample_csv`] carrying usable coordinates.
    pub const SAMPLE_WITH_COORDINATES: usize = 4;

    /// Ten tweets spread over 2015-02-20 to 2015-02-22, with extra columns
    /// the loader is expected to ignore.
    pub fn sample_csv() -> &'static str {
        concat!(
            "tweet_id,airline_sentiment,airline_sentiment_confidence,negativereason,airline,name,retweet_count,text,tweet_coord,tweet_created,tweet_location,user_timezone\n",
            "570300000000000001,positive,1.0,,Virgin America,jnardino,0,\"@VirginAmerica thanks for the great flight! http://t.co/abc\",\"[40.64656067, -73.78334045]\",2015-02-20 09:15:00 -0800,NYC,Eastern Time (US & Canada)\n",
            "570300000000000002,positive,0.9,,United,cairdin,0,\"@united great crew, thanks\",,2015-02-20 13:40:00 -0800,,Pacific Time (US & Canada)\n",
            "570300000000000003,negative,1.0,Late Flight,United,jonnyo,2,\"@united my flight is delayed again. RT if you agree\",\"[0.0, 0.0]\",2015-02-20 18:05:00 -0800,Chicago,Central Time (US & Canada)\n",
            "570300000000000004,positive,0.8,,Delta,sara,0,@Delta love the new seats,\"[33.6407, -84.4277]\",2015-02-21 07:30:00 -0500,Atlanta,Eastern Time (US & Canada)\n",
            "570300000000000005,neutral,0.7,,American,mike,0,@AmericanAir what time does the lounge open?,,2015-02-21 10:00:00 -0600,,\n",
            "570300000000000006,negative,1.0,Lost Luggage,American,kate,1,\"@AmericanAir lost my bag. Terrible service https://t.co/xyz\",\"[32.8998, -97.0403]\",2015-02-21 16:45:00 -0600,Dallas,Central Time (US & Canada)\n",
            "570300000000000007,positive,1.0,,Southwest,lee,0,@SouthwestAir thanks for the upgrade,,2015-02-21 21:20:00 -0800,,\n",
            "570300000000000008,positive,0.6,,United,ana,0,@united thanks for getting me home,\"[41.9742, -87.9073]\",2015-02-22 08:00:00 -0600,Chicago,\n",
            "570300000000000009,negative,0.9,Late Flight,Delta,tom,0,@Delta flight delayed three hours,,2015-02-22 12:10:00 -0500,,\n",
            "570300000000000010,positive,1.0,,Virgin America,zoe,0,\"@VirginAmerica great flight, great crew\",,2015-02-22 23:59:00 -0800,,\n",
        )
    }

    /// Header-only dataset.
    pub fn empty_csv() -> &'static str {
        "tweet_id,airline_sentiment,airline,text,tweet_created\n"
    }

    /// Writes `contents` to `Tweets.csv` inside `dir` and returns the path.
    pub fn write_csv(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("Tweets.csv");
        std::fs::write(&path, contents).expect("Failed to write fixture CSV");
        path
    }
}

/// Configuration files in YAML.
pub mod config_fixtures {
    /// Only the data section set.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
data:
  csv_path: "Tweets.csv"
  language: "en-US"
"#
    }

    /// Every section set to non-default values.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "data:\n",
            "  csv_path: \"data/Tweets.csv\"\n",
            "  language: \"en-US\"\n",
            "\n",
            "dashboard:\n",
            "  output_dir: \"out\"\n",
            "  watch: false\n",
            "  avatar:\n",
            "    url: \"https://avatars.githubusercontent.com/u/97449931?v=4\"\n",
            "    caption: \"Moon Benjee\"\n",
            "    timeout_seconds: 5\n",
            "\n",
            "controls:\n",
            "  date_range: [\"2015-02-20\", \"2015-02-21\"]\n",
            "  hour_range: [6, 20]\n",
            "  distribution_chart: pie\n",
            "  time_bucket: weekly\n",
            "  airlines: [\"United\", \"Delta\"]\n",
            "  word_cloud:\n",
            "    sentiment: negative\n",
            "    max_words: 200\n",
            "    palette: magma\n",
            "  show_raw_preview: true\n",
            "  export_csv: true\n",
            "\n",
            "styling:\n",
            "  width: 1000\n",
            "  height: 500\n",
            "  background: \"#ffffff\"\n",
            "  colors:\n",
            "    negative: \"#d62728\"\n",
            "    neutral: \"#7f7f7f\"\n",
            "    positive: \"#2ca02c\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: compact\n",
        )
    }
}

/// proptest strategies for the dashboard domain.
pub mod property_testing {
    use crate::Sentiment;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Strategy for generating sentiment labels.
    pub fn sentiment_strategy() -> impl Strategy<Value = Sentiment> {
        prop_oneof![
            Just(Sentiment::Negative),
            Just(Sentiment::Neutral),
            Just(Sentiment::Positive),
        ]
    }

    /// Strategy for generating dates in February and March 2015.
    pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..40).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2015, 2, 1).unwrap() + chrono::Duration::days(offset)
        })
    }

    /// Strategy for generating ordered inclusive hour ranges within a day.
    pub fn hour_range_strategy() -> impl Strategy<Value = (u8, u8)> {
        (0u8..24, 0u8..24).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
    }
}
