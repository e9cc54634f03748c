//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tweet identifier as it appears in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(pub String);

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sentiment label attached to every tweet.
///
/// The declaration order is the fixed display order used by every chart:
/// negative, neutral, positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Negative sentiment.
    Negative,
    /// Neutral sentiment.
    Neutral,
    /// Positive sentiment.
    Positive,
}

impl Sentiment {
    /// All labels in display order.
    pub const ALL: [Self; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// The label as written in the dataset.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            other => Err(DashboardError::validation_field(
                format!("unknown sentiment label `{other}`"),
                "sentiment",
            )),
        }
    }
}

/// Chart kind for the sentiment distribution panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bar chart.
    #[default]
    Bar,
    /// Pie chart.
    Pie,
}

/// Granularity used to bucket tweets over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    /// Hour of day, 0 to 23.
    #[default]
    Hourly,
    /// Calendar date.
    Daily,
    /// ISO week.
    Weekly,
}

/// Colour palettes available to the word cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Perceptually uniform blue to yellow.
    #[default]
    Viridis,
    /// Blue through magenta to yellow.
    Plasma,
    /// Black through red to pale yellow.
    Inferno,
    /// Black through purple to pale peach.
    Magma,
    /// Colour-vision-deficiency friendly blue to yellow.
    Cividis,
}

impl Palette {
    /// All palettes.
    pub const ALL: [Self; 5] = [
        Self::Viridis,
        Self::Plasma,
        Self::Inferno,
        Self::Magma,
        Self::Cividis,
    ];

    /// Palette name as used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Cividis => "cividis",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Builds a point, rejecting non-finite or out-of-range values and the
    /// `(0, 0)` placeholder the dataset uses for unknown locations.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        if latitude == 0.0 && longitude == 0.0 {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_parse() {
        assert_eq!("positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!(" neutral ".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
        assert!("Positive".parse::<Sentiment>().is_err());
        assert!("mixed".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_sentiment_order_is_display_order() {
        let mut labels = vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];
        labels.sort();
        assert_eq!(labels, Sentiment::ALL.to_vec());
    }

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(40.64, -73.78).is_some());
        assert!(GeoPoint::new(0.0, 0.0).is_none());
        assert!(GeoPoint::new(91.0, 10.0).is_none());
        assert!(GeoPoint::new(10.0, -181.0).is_none());
        assert!(GeoPoint::new(f64::NAN, 10.0).is_none());
    }
}
