//! # AirPulse Graphs
//!
//! Chart descriptions and their rendering for the AirPulse dashboard.
//!
//! Building a chart description is a pure function of aggregated data; the
//! renderers in this crate turn a description into PNG bytes using plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod airline_comparison;
pub mod charts;
pub mod geo_scatter;
pub mod manager;
pub mod palette;
pub mod png;
pub mod sentiment_distribution;
pub mod sentiment_over_time;
pub mod traits;
pub mod types;
pub mod utils;
pub mod wordcloud;

pub use airline_comparison::AirlineComparisonGraph;
pub use charts::*;
pub use geo_scatter::GeoScatterGraph;
pub use manager::GraphManager;
pub use palette::*;
pub use png::{encode_rgb_png, reencode_as_png};
pub use sentiment_distribution::SentimentDistributionGraph;
pub use sentiment_over_time::SentimentOverTimeGraph;
pub use traits::GraphRenderer;
pub use types::*;
pub use wordcloud::{
    wordcloud_file_name, PlacedWord, WordCloudChart, WordCloudGraph, WordCloudLayout,
    WordCloudSettings,
};
