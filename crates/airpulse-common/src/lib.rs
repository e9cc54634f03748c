//! # AirPulse Common
//!
//! Shared types, errors, logging and utilities for the AirPulse dashboard.
//!
//! This crate provides the foundational types used across all other crates
//! in the AirPulse workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{DashboardError, DataLoadError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingGuard};
pub use types::*;
pub use utils::*;
