//! Sequential colour maps for the word cloud.
//!
//! Each map is stored as ten evenly spaced anchor colours and sampled by
//! linear interpolation between neighbouring anchors.

use airpulse_common::Palette;

type Rgb = (u8, u8, u8);

const VIRIDIS: [Rgb; 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

const PLASMA: [Rgb; 10] = [
    (0x0d, 0x08, 0x87),
    (0x46, 0x03, 0x9f),
    (0x72, 0x01, 0xa8),
    (0x9c, 0x17, 0x9e),
    (0xbd, 0x37, 0x86),
    (0xd8, 0x57, 0x6b),
    (0xed, 0x79, 0x53),
    (0xfb, 0x9f, 0x3a),
    (0xfd, 0xca, 0x26),
    (0xf0, 0xf9, 0x21),
];

const INFERNO: [Rgb; 10] = [
    (0x00, 0x00, 0x04),
    (0x1b, 0x0c, 0x41),
    (0x4a, 0x0c, 0x6b),
    (0x78, 0x1c, 0x6d),
    (0xa5, 0x2c, 0x60),
    (0xcf, 0x44, 0x46),
    (0xed, 0x69, 0x25),
    (0xfb, 0x9b, 0x06),
    (0xf7, 0xd1, 0x3d),
    (0xfc, 0xff, 0xa4),
];

const MAGMA: [Rgb; 10] = [
    (0x00, 0x00, 0x04),
    (0x18, 0x0f, 0x3d),
    (0x44, 0x0f, 0x76),
    (0x72, 0x1f, 0x81),
    (0x9e, 0x2f, 0x7f),
    (0xcd, 0x40, 0x71),
    (0xf1, 0x60, 0x5d),
    (0xfd, 0x96, 0x68),
    (0xfe, 0xca, 0x8d),
    (0xfc, 0xfd, 0xbf),
];

const CIVIDIS: [Rgb; 10] = [
    (0x00, 0x22, 0x4e),
    (0x12, 0x35, 0x70),
    (0x3b, 0x49, 0x6c),
    (0x57, 0x5d, 0x6d),
    (0x70, 0x71, 0x73),
    (0x8a, 0x86, 0x78),
    (0xa5, 0x9c, 0x74),
    (0xc3, 0xb3, 0x69),
    (0xe1, 0xcc, 0x55),
    (0xfe, 0xe8, 0x38),
];

/// Anchor colours of a palette, darkest first.
pub const fn anchors(palette: Palette) -> &'static [Rgb; 10] {
    match palette {
        Palette::Viridis => &VIRIDIS,
        Palette::Plasma => &PLASMA,
        Palette::Inferno => &INFERNO,
        Palette::Magma => &MAGMA,
        Palette::Cividis => &CIVIDIS,
    }
}

/// Colour at position `t` in `[0, 1]`; values outside are clamped.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn sample(palette: Palette, t: f64) -> Rgb {
    let stops = anchors(palette);
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (stops.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - index as f64;

    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    let (from, to) = (stops[index], stops[index + 1]);
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// `count` colours spread over the dark 85% of the palette.
///
/// The brightest end of some maps is close to white, which would vanish on
/// the word cloud's white background.
#[allow(clippy::cast_precision_loss)]
pub fn spread(palette: Palette, count: usize) -> Vec<Rgb> {
    const USABLE: f64 = 0.85;
    match count {
        0 => Vec::new(),
        1 => vec![sample(palette, 0.0)],
        n => (0..n)
            .map(|i| sample(palette, USABLE * i as f64 / (n - 1) as f64))
            .collect(),
    }
}
