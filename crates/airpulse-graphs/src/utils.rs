//! Graph utility functions and helpers.

use crate::png::encode_rgb_png;
use crate::types::{FontConfig, GraphConfig};
use airpulse_common::{parse_hex_rgb, Result, Sentiment};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Parses a `#rrggbb` string.
pub fn parse_color(color: &str) -> Option<RGBColor> {
    parse_hex_rgb(color).map(|(r, g, b)| RGBColor(r, g, b))
}

/// Colour of a sentiment, falling back to grey for an unparsable setting.
pub fn sentiment_color(config: &GraphConfig, sentiment: Sentiment) -> RGBColor {
    parse_color(config.style.colors.for_sentiment(sentiment)).unwrap_or(RGBColor(127, 127, 127))
}

/// Upper bound of a count axis with headroom for value labels.
pub fn count_axis_max(counts: impl IntoIterator<Item = u64>) -> u64 {
    let max = counts.into_iter().max().unwrap_or(0);
    (max + max / 8).max(max + 1)
}

/// Font tuple accepted by plotters.
pub fn font(config: &FontConfig) -> (&str, u32) {
    (config.family.as_str(), config.size)
}

/// Draws into an in-memory RGB canvas and returns it PNG-encoded.
pub fn render_bitmap<F>(width: u32, height: u32, draw: F) -> Result<Vec<u8>>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(&root)?;
        root.present()?;
    }
    encode_rgb_png(&buffer, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#d62728"), Some(RGBColor(214, 39, 40)));
        assert_eq!(parse_color("red"), None);
    }

    #[test]
    fn test_sentiment_color_fallback() {
        let mut config = GraphConfig::default();
        assert_eq!(sentiment_color(&config, Sentiment::Positive), RGBColor(44, 160, 44));
        config.style.colors.positive = "green".to_string();
        assert_eq!(sentiment_color(&config, Sentiment::Positive), RGBColor(127, 127, 127));
    }

    #[test]
    fn test_count_axis_max() {
        assert_eq!(count_axis_max([]), 1);
        assert_eq!(count_axis_max([3, 1]), 4);
        assert_eq!(count_axis_max([80, 10]), 90);
    }

    #[test]
    fn test_render_bitmap_without_text() {
        let png = render_bitmap(40, 20, |root| {
            root.fill(&WHITE)?;
            root.draw(&Rectangle::new([(5, 5), (15, 15)], RED.filled()))?;
            Ok(())
        })
        .unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
