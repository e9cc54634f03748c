//! PNG encoding of raw canvases.

use airpulse_common::{DashboardError, Result};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};

/// Encodes a tightly packed RGB8 buffer as PNG.
pub fn encode_rgb_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if buffer.len() != expected {
        return Err(DashboardError::render(format!(
            "canvas holds {} bytes, expected {expected} for {width}x{height}",
            buffer.len()
        )));
    }
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(buffer, width, height, ColorType::Rgb8)
        .map_err(|e| DashboardError::render_with_source("PNG encoding failed", e))?;
    Ok(out)
}

/// Decodes an image in any enabled format and re-encodes it as PNG.
pub fn reencode_as_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| DashboardError::render_with_source("Unsupported image data", e))?;
    let rgba = decoded.to_rgba8();
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(rgba.as_raw(), rgba.width(), rgba.height(), ColorType::Rgba8)
        .map_err(|e| DashboardError::render_with_source("PNG encoding failed", e))?;
    Ok(out)
}
