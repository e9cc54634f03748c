//! Graph renderer trait definitions for polymorphic graph types.

use crate::types::GraphConfig;
use crate::utils;
use airpulse_common::Result;
use plotters::prelude::*;

/// Trait for graph renderers that turn a chart description into an image.
pub trait GraphRenderer {
    /// The chart description this renderer draws.
    type Data;

    /// Renders `data` to PNG bytes at the configured size.
    fn render(&self, data: &Self::Data, config: &GraphConfig) -> Result<Vec<u8>>;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;

    /// Background colour from the style, white when unparsable.
    fn background_color(&self, config: &GraphConfig) -> RGBColor {
        utils::parse_color(&config.style.background).unwrap_or(WHITE)
    }
}
