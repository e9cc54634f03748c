//! Bundled locales and language tag resolution.

use crate::error::{I18nError, I18nResult};
use unic_langid::{langid, LanguageIdentifier};

/// Tag of the locale every lookup falls back to.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Locales compiled into the binary, as `(tag, Fluent source)`.
const BUNDLED: &[(&str, &str)] = &[("en-US", include_str!("../locales/en-US/main.ftl"))];

/// The fallback locale identifier.
pub fn default_locale() -> LanguageIdentifier {
    langid!("en-US")
}

/// Parses a BCP 47 language tag such as `en-US`.
pub fn parse_language(tag: &str) -> I18nResult<LanguageIdentifier> {
    tag.trim()
        .parse()
        .map_err(|_| I18nError::InvalidLanguageId(tag.to_string()))
}

/// Finds the bundled resource for `requested`.
///
/// An exact match wins; otherwise the first bundled locale with the same
/// language subtag is used, so `en` and `en-GB` resolve to `en-US`.
pub fn bundled_resource(requested: &LanguageIdentifier) -> Option<(LanguageIdentifier, &'static str)> {
    let parsed = || {
        BUNDLED
            .iter()
            .filter_map(|(tag, source)| tag.parse::<LanguageIdentifier>().ok().map(|id| (id, *source)))
    };
    parsed()
        .find(|(id, _)| id == requested)
        .or_else(|| parsed().find(|(id, _)| id.language == requested.language))
}

/// Tags of every bundled locale.
pub fn bundled_locales() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|(tag, _)| *tag)
}
