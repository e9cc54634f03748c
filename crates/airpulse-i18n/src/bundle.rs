//! Fluent bundle wrapper and message formatting.

use crate::error::{I18nError, I18nResult};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use tracing::{debug, error, warn};
use unic_langid::LanguageIdentifier;

/// One locale's messages.
pub struct Bundle {
    locale: LanguageIdentifier,
    bundle: FluentBundle<FluentResource>,
}

impl std::fmt::Debug for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundle")
            .field("locale", &self.locale.to_string())
            .finish_non_exhaustive()
    }
}

impl Bundle {
    /// Parses `source` into a bundle for `locale`.
    pub fn parse(locale: LanguageIdentifier, source: &str) -> I18nResult<Self> {
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            let errors: Vec<String> = errors.into_iter().map(|e| format!("{e:?}")).collect();
            error!(locale = %locale, ?errors, "Failed to parse Fluent resource");
            I18nError::FluentParseError {
                locale: locale.to_string(),
                errors,
            }
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Output lands in PNG titles and files; no bidi isolation marks.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| I18nError::BundleCreationError {
            locale: locale.to_string(),
            errors: errors.into_iter().map(|e| format!("{e:?}")).collect(),
        })?;

        debug!(locale = %locale, "Built Fluent bundle");
        Ok(Self { locale, bundle })
    }

    /// Locale of the bundle.
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Whether the bundle defines `key` with a value.
    pub fn has_message(&self, key: &str) -> bool {
        self.bundle
            .get_message(key)
            .is_some_and(|message| message.value().is_some())
    }

    /// Formats `key` with optional arguments.
    pub fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> I18nResult<String> {
        let pattern = self
            .bundle
            .get_message(key)
            .and_then(|message| message.value())
            .ok_or_else(|| I18nError::MessageNotFound { key: key.to_string() })?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            let errors: Vec<String> = errors.into_iter().map(|e| format!("{e:?}")).collect();
            warn!(key, ?errors, "Formatting errors in message");
            return Err(I18nError::MessageFormatError {
                key: key.to_string(),
                errors,
            });
        }
        Ok(formatted.into_owned())
    }
}

/// Builds [`FluentArgs`] from key-value pairs.
pub fn fluent_args<'a>(args: &[(&'a str, FluentValue<'a>)]) -> FluentArgs<'a> {
    let mut fluent_args = FluentArgs::new();
    for (key, value) in args {
        fluent_args.set(*key, value.clone());
    }
    fluent_args
}
