//! Localizer with fallback to the default locale.

use crate::bundle::{fluent_args, Bundle};
use crate::error::{I18nError, I18nResult};
use crate::locale::{bundled_resource, default_locale, parse_language, DEFAULT_LOCALE};
use crate::messages;
use airpulse_common::{Sentiment, TimeBucket};
use fluent_bundle::{FluentArgs, FluentValue};
use tracing::{info, warn};

/// Resolves dashboard text for one language.
///
/// Messages missing from the requested locale come from `en-US`. A message
/// missing from both is shown as its identifier.
#[derive(Debug)]
pub struct Localizer {
    primary: Bundle,
    fallback: Option<Bundle>,
}

impl Localizer {
    /// Localizer for a bundled language.
    ///
    /// Unparsable or unbundled tags fall back to `en-US` with a warning.
    pub fn new(language: &str) -> I18nResult<Self> {
        let resolved = parse_language(language)
            .ok()
            .and_then(|id| bundled_resource(&id));

        let (locale, source) = match resolved {
            Some(found) => found,
            None => {
                warn!(requested = language, fallback = DEFAULT_LOCALE, "Language not bundled, falling back");
                bundled_resource(&default_locale())
                    .ok_or_else(|| I18nError::InvalidLanguageId(DEFAULT_LOCALE.to_string()))?
            }
        };

        info!(locale = %locale, "Loaded localisation");
        Ok(Self {
            primary: Bundle::parse(locale, source)?,
            fallback: None,
        })
    }

    /// Localizer for `language` built from `source`, with the bundled
    /// `en-US` messages as fallback.
    pub fn with_resource(language: &str, source: &str) -> I18nResult<Self> {
        let locale = parse_language(language)?;
        let fallback = match bundled_resource(&default_locale()) {
            Some((id, default_source)) if id != locale => Some(Bundle::parse(id, default_source)?),
            _ => None,
        };
        Ok(Self {
            primary: Bundle::parse(locale, source)?,
            fallback,
        })
    }

    /// Tag of the locale in use.
    pub fn locale(&self) -> String {
        self.primary.locale().to_string()
    }

    /// Formats `key`, consulting the fallback when the locale lacks it.
    pub fn message(&self, key: &str, args: Option<&FluentArgs<'_>>) -> I18nResult<String> {
        if self.primary.has_message(key) {
            return self.primary.format(key, args);
        }
        match &self.fallback {
            Some(fallback) if fallback.has_message(key) => {
                warn!(
                    key,
                    locale = %self.primary.locale(),
                    "Message missing from locale, using fallback"
                );
                fallback.format(key, args)
            }
            _ => Err(I18nError::MessageNotFound { key: key.to_string() }),
        }
    }

    /// Text for `key`, or the key itself when it cannot be formatted.
    pub fn text(&self, key: &str) -> String {
        self.text_with(key, &[])
    }

    /// Text for `key` with arguments, or the key itself when it cannot be
    /// formatted.
    pub fn text_with(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let args = (!args.is_empty()).then(|| fluent_args(args));
        self.message(key, args.as_ref()).unwrap_or_else(|e| {
            warn!(key, error = %e, "Using message identifier as text");
            key.to_string()
        })
    }

    /// Geo panel title for an hour window.
    pub fn geo_title(&self, start: u8, end: u8) -> String {
        self.text_with(
            messages::PANEL_GEO,
            &[("start", start.into()), ("end", end.into())],
        )
    }

    /// `N tweets found`.
    pub fn tweets_found(&self, count: usize) -> String {
        self.text_with(messages::NOTICE_TWEETS_FOUND, &[("count", count.into())])
    }

    /// Word cloud panel title.
    pub fn wordcloud_title(&self, sentiment: Sentiment) -> String {
        self.text_with(messages::PANEL_WORDCLOUD, &[("sentiment", sentiment.as_str().into())])
    }

    /// Label of the time axis for a bucket granularity.
    pub fn time_axis(&self, bucket: TimeBucket) -> String {
        let name = match bucket {
            TimeBucket::Hourly => "hourly",
            TimeBucket::Daily => "daily",
            TimeBucket::Weekly => "weekly",
        };
        self.text_with(messages::AXIS_TIME, &[("bucket", name.into())])
    }

    /// Warning shown for a malformed date selection.
    pub fn date_range_warning(&self, reason: &str) -> String {
        self.text_with(messages::WARNING_DATE_RANGE, &[("reason", reason.into())])
    }

    /// Warning shown when the avatar cannot be loaded.
    pub fn image_warning(&self, cause: &str) -> String {
        self.text_with(messages::WARNING_IMAGE, &[("cause", cause.into())])
    }

    /// Warning shown when a chart cannot be rasterized.
    pub fn render_warning(&self, cause: &str) -> String {
        self.text_with(messages::WARNING_RENDER, &[("cause", cause.into())])
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE).expect("Invalid bundled en-US resource")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_resolves_in_default_locale() {
        let localizer = Localizer::default();
        let args = fluent_args(&[
            ("start", 9.into()),
            ("end", 17.into()),
            ("sentiment", "positive".into()),
            ("bucket", "daily".into()),
            ("count", 3.into()),
            ("reason", "r".into()),
            ("cause", "c".into()),
        ]);
        for key in messages::ALL {
            assert!(localizer.message(key, Some(&args)).is_ok(), "{key} does not resolve");
        }
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let localizer = Localizer::new("ko-KR").unwrap();
        assert_eq!(localizer.locale(), "en-US");
        let localizer = Localizer::new("???").unwrap();
        assert_eq!(localizer.locale(), "en-US");
    }

    #[test]
    fn test_formatted_helpers() {
        let localizer = Localizer::default();
        assert_eq!(localizer.geo_title(9, 17), "Tweet Locations (9:00 - 17:00)");
        assert_eq!(localizer.tweets_found(1), "1 tweet found");
        assert_eq!(localizer.tweets_found(12), "12 tweets found");
        assert_eq!(localizer.time_axis(TimeBucket::Weekly), "Week");
        assert_eq!(
            localizer.image_warning("connection refused"),
            "Error loading image: connection refused"
        );
    }

    #[test]
    fn test_missing_key_shows_identifier() {
        assert_eq!(Localizer::default().text("no-such-key"), "no-such-key");
    }

    #[test]
    fn test_partial_translation_uses_fallback() {
        let localizer =
            Localizer::with_resource("de-DE", "panel-over-time = Stimmung im Zeitverlauf\n").unwrap();
        assert_eq!(localizer.locale(), "de-DE");
        assert_eq!(localizer.text(messages::PANEL_OVER_TIME), "Stimmung im Zeitverlauf");
        assert_eq!(localizer.text(messages::PANEL_DISTRIBUTION), "Tweet Sentiment Distribution");
    }
}
