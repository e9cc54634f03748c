//! Tests for the shared domain types in airpulse-common.
//!
//! This test suite covers:
//! - Serde representation of labels and selectors as they appear in configuration
//! - Trait behaviour expected by the aggregation pipeline (Hash, Ord)
//! - Coordinate validation rules

use airpulse_common::types::*;
use std::collections::HashMap;

#[test]
fn test_sentiment_serialization() {
    let serialized = serde_json::to_string(&Sentiment::Negative).unwrap();
    assert_eq!(serialized, "\"negative\"");

    let deserialized: Sentiment = serde_json::from_str("\"positive\"").unwrap();
    assert_eq!(deserialized, Sentiment::Positive);

    assert!(serde_json::from_str::<Sentiment>("\"angry\"").is_err());
}

#[test]
fn test_sentiment_usable_as_map_key() {
    let mut counts = HashMap::new();
    *counts.entry(Sentiment::Neutral).or_insert(0) += 1;
    *counts.entry(Sentiment::Neutral).or_insert(0) += 1;
    assert_eq!(counts.get(&Sentiment::Neutral), Some(&2));
    assert_eq!(counts.get(&Sentiment::Positive), None);
}

#[test]
fn test_sentiment_display_round_trips_through_parse() {
    for sentiment in Sentiment::ALL {
        let parsed: Sentiment = sentiment.to_string().parse().unwrap();
        assert_eq!(parsed, sentiment);
    }
}

#[test]
fn test_selector_defaults() {
    assert_eq!(ChartKind::default(), ChartKind::Bar);
    assert_eq!(TimeBucket::default(), TimeBucket::Hourly);
    assert_eq!(Palette::default(), Palette::Viridis);
}

#[test]
fn test_selectors_deserialize_lowercase() {
    let kind: ChartKind = serde_json::from_str("\"pie\"").unwrap();
    assert_eq!(kind, ChartKind::Pie);

    let bucket: TimeBucket = serde_json::from_str("\"weekly\"").unwrap();
    assert_eq!(bucket, TimeBucket::Weekly);

    let palette: Palette = serde_json::from_str("\"cividis\"").unwrap();
    assert_eq!(palette, Palette::Cividis);
    assert_eq!(palette.to_string(), "cividis");
}

#[test]
fn test_all_palettes_have_distinct_names() {
    let mut names: Vec<&str> = Palette::ALL.iter().map(|p| p.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Palette::ALL.len());
}

#[test]
fn test_tweet_id_is_transparent() {
    let id = TweetId("570306133677760513".to_string());
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"570306133677760513\"");
    assert_eq!(id.to_string(), "570306133677760513");
}

#[test]
fn test_geo_point_boundaries() {
    assert!(GeoPoint::new(90.0, 180.0).is_some());
    assert!(GeoPoint::new(-90.0, -180.0).is_some());
    assert!(GeoPoint::new(0.0, 12.5).is_some());
    assert!(GeoPoint::new(0.0, 0.0).is_none());
    assert!(GeoPoint::new(45.0, f64::INFINITY).is_none());
}
