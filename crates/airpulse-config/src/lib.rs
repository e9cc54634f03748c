//! # AirPulse Config
//!
//! Type-safe configuration management with hot-reloading for the AirPulse dashboard.
//!
//! This crate provides configuration loading, validation, and caching
//! with support for hot-reloading and atomic updates. The `controls` section
//! stands in for the dashboard widgets: every render pass reads its filter and
//! chart selections from it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
