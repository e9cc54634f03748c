//! # AirPulse I18n
//!
//! Fluent localisation for the AirPulse dashboard.
//!
//! Panel titles, notices and warnings are looked up by message identifier
//! (see [`messages`]). The `en-US` resource is compiled in and serves as the
//! fallback for every other locale.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod error;
pub mod locale;
pub mod localizer;
pub mod messages;

pub use bundle::{fluent_args, Bundle};
pub use error::{I18nError, I18nResult};
pub use locale::{bundled_locales, default_locale, parse_language, DEFAULT_LOCALE};
pub use localizer::Localizer;

// Re-export for callers building their own arguments.
pub use fluent_bundle::{FluentArgs, FluentValue};
