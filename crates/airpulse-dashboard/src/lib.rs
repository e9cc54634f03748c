//! # AirPulse Dashboard
//!
//! The runtime of the airline tweet sentiment dashboard.
//!
//! A render pass reads the tweet table once, evaluates every panel for the
//! selections in the `controls` section of the configuration and writes the
//! panel images, CSV exports and a JSON summary to the output directory.
//! With `dashboard.watch` enabled, editing the configuration file triggers a
//! new pass.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod avatar;
pub mod dashboard;
pub mod output;
pub mod render;
pub mod watch;

pub use avatar::{load_avatar, AvatarOutcome, HttpImageFetcher, ImageFetcher};
pub use dashboard::Dashboard;
pub use output::{
    OutputWriter, PanelOutcome, PanelSummary, RenderSummary, AVATAR_FILE_NAME, SUMMARY_FILE_NAME,
};
pub use render::{render, ChartSpec, FilterSpec, Panel, PanelContent, PanelId, RenderedOutput};
pub use watch::ConfigWatcher;
