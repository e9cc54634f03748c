//! Error types for localisation.

use airpulse_common::DashboardError;
use thiserror::Error;

/// Errors raised while building bundles or formatting messages.
#[derive(Error, Debug)]
pub enum I18nError {
    /// The language tag does not parse.
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// A Fluent resource has syntax errors.
    #[error("Failed to parse Fluent resource for {locale}: {errors:?}")]
    FluentParseError { locale: String, errors: Vec<String> },

    /// A resource redefines messages already in the bundle.
    #[error("Failed to add resource to the {locale} bundle: {errors:?}")]
    BundleCreationError { locale: String, errors: Vec<String> },

    /// Neither the locale nor the fallback defines the message.
    #[error("Message not found: {key}")]
    MessageNotFound { key: String },

    /// Formatting reported errors, usually a missing argument.
    #[error("Failed to format message '{key}': {errors:?}")]
    MessageFormatError { key: String, errors: Vec<String> },
}

/// Result type for localisation.
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for DashboardError {
    fn from(err: I18nError) -> Self {
        let locale = match &err {
            I18nError::InvalidLanguageId(tag) => tag.clone(),
            I18nError::FluentParseError { locale, .. } | I18nError::BundleCreationError { locale, .. } => {
                locale.clone()
            }
            I18nError::MessageNotFound { .. } | I18nError::MessageFormatError { .. } => String::new(),
        };
        Self::localization_with_locale(err.to_string(), locale)
    }
}
