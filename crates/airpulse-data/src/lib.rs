//! # AirPulse Data
//!
//! The data side of the dashboard: loading the tweet table once, filtering it,
//! bucketing timestamps, counting groups and exporting rows as CSV.
//!
//! Every stage is a pure function from a table (or its rows) to a new value;
//! nothing here mutates the loaded table.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod bucket;
pub mod export;
pub mod filter;
pub mod loader;
pub mod table;

pub use aggregate::*;
pub use bucket::*;
pub use export::*;
pub use filter::*;
pub use loader::*;
pub use table::*;
