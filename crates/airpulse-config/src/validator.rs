//! Runtime validation of a loaded configuration.
//!
//! The validator is the input surface for the widget constraints: hour bounds,
//! word-count limits and colour strings are rejected here so the pipelines can
//! assume them. The date selection is deliberately left to the render pass.

use crate::defaults::{MAX_WORD_CLOUD_WORDS, MIN_WORD_CLOUD_WORDS};
use crate::schema::Config;
use airpulse_common::parse_hex_rgb;
use std::fmt;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human readable description.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks every rule and returns all violations found.
    pub fn validate(config: &Config) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut push = |field: &str, message: String| {
            issues.push(ValidationIssue {
                field: field.to_string(),
                message,
            });
        };

        if config.data.csv_path.as_os_str().is_empty() {
            push("data.csv_path", "must not be empty".to_string());
        }
        if config.data.language.trim().is_empty() {
            push("data.language", "must not be empty".to_string());
        }

        let (lo, hi) = config.controls.hour_range;
        if lo > 23 || hi > 23 {
            push(
                "controls.hour_range",
                format!("hours must lie in 0..=23, got ({lo}, {hi})"),
            );
        } else if lo > hi {
            push(
                "controls.hour_range",
                format!("start hour {lo} is after end hour {hi}"),
            );
        }

        let max_words = config.controls.word_cloud.max_words;
        if !(MIN_WORD_CLOUD_WORDS..=MAX_WORD_CLOUD_WORDS).contains(&max_words) {
            push(
                "controls.word_cloud.max_words",
                format!(
                    "must lie in {MIN_WORD_CLOUD_WORDS}..={MAX_WORD_CLOUD_WORDS}, got {max_words}"
                ),
            );
        }

        let styling = &config.styling;
        for (field, value) in [("styling.width", styling.width), ("styling.height", styling.height)] {
            if !(200..=4000).contains(&value) {
                push(field, format!("must lie in 200..=4000 pixels, got {value}"));
            }
        }
        for (field, color) in [
            ("styling.background", &styling.background),
            ("styling.colors.negative", &styling.colors.negative),
            ("styling.colors.neutral", &styling.colors.neutral),
            ("styling.colors.positive", &styling.colors.positive),
        ] {
            if parse_hex_rgb(color).is_none() {
                push(field, format!("`{color}` is not a #rrggbb colour"));
            }
        }

        let avatar = &config.dashboard.avatar;
        if avatar.enabled {
            if let Err(e) = url::Url::parse(&avatar.url) {
                push("dashboard.avatar.url", format!("`{}` is not a valid URL: {e}", avatar.url));
            }
            if avatar.timeout_seconds == 0 {
                push("dashboard.avatar.timeout_seconds", "must be positive".to_string());
            }
        }

        issues
    }
}

impl Config {
    /// Validates the configuration, returning every violation on failure.
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let issues = ConfigValidator::validate(self);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_hour_range_rules() {
        let mut config = Config::default();
        config.controls.hour_range = (18, 9);
        let issues = config.validate().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "controls.hour_range");

        config.controls.hour_range = (0, 24);
        assert!(config.validate().is_err());

        config.controls.hour_range = (23, 23);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_word_count_bounds() {
        let mut config = Config::default();
        config.controls.word_cloud.max_words = 49;
        assert!(config.validate().is_err());
        config.controls.word_cloud.max_words = 300;
        assert!(config.validate().is_ok());
        config.controls.word_cloud.max_words = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_collects_every_issue() {
        let mut config = Config::default();
        config.styling.background = "white".to_string();
        config.styling.width = 10;
        config.dashboard.avatar.url = "not a url".to_string();
        let issues = config.validate().unwrap_err();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"styling.background"));
        assert!(fields.contains(&"styling.width"));
        assert!(fields.contains(&"dashboard.avatar.url"));
    }

    #[test]
    fn test_disabled_avatar_skips_url_check() {
        let mut config = Config::default();
        config.dashboard.avatar.enabled = false;
        config.dashboard.avatar.url = String::new();
        assert!(config.validate().is_ok());
    }
}
