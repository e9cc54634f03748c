//! Deterministic spiral placement of words on a canvas.
//!
//! The canvas is divided into square cells. A word occupies the cells under
//! its estimated bounding box, and free space is tested in constant time
//! with a summed-area table over the occupied cells.

use super::frequency::WordFrequency;
use crate::palette::spread;
use airpulse_common::Palette;
use serde::Serialize;

/// Side of an occupancy cell in pixels.
const CELL: u32 = 4;
/// Words that no longer fit at this size end the layout.
pub const MIN_FONT_SIZE: u32 = 4;
/// How much of the frequency ratio carries into the next font size.
const RELATIVE_SCALING: f64 = 0.5;
/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH: f64 = 0.6;
/// Font size of the first word as a fraction of the canvas height.
const MAX_FONT_RATIO: f64 = 0.35;
/// Shrink factor applied when a word does not fit.
const SHRINK: f64 = 0.9;

/// A word at its final position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedWord {
    /// Text drawn.
    pub text: String,
    /// Font size in pixels.
    pub font_size: u32,
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Estimated box width in pixels.
    pub width: u32,
    /// Estimated box height in pixels.
    pub height: u32,
    /// Fill colour.
    pub color: (u8, u8, u8),
}

/// Words placed on a canvas of the given size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCloudLayout {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Placed words, largest first.
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    /// Whether no word could be placed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Bounding box of `text` at `font_size`, from an average glyph width.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn estimate_box(text: &str, font_size: u32) -> (u32, u32) {
    let chars = text.chars().count().max(1) as f64;
    let width = (chars * f64::from(font_size) * CHAR_WIDTH).ceil() as u32;
    let height = font_size + font_size / 5;
    (width.max(1), height.max(1))
}

/// Lays out `frequencies`, most frequent first, on a `width` x `height`
/// canvas.
///
/// Each word starts at a size derived from the previous one and its
/// frequency ratio, then shrinks until a free spot is found along a spiral
/// from the centre. The layout stops at the first word that does not fit at
/// [`MIN_FONT_SIZE`]. Colours follow placement rank through `palette`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn layout(frequencies: &[WordFrequency], width: u32, height: u32, palette: Palette) -> WordCloudLayout {
    let mut grid = Occupancy::new((width / CELL) as usize, (height / CELL) as usize);
    let offsets = spiral(grid.cols, grid.rows);

    let mut placed: Vec<(String, u32, Slot)> = Vec::new();
    let mut size = f64::from(height) * MAX_FONT_RATIO;
    let mut previous_weight: Option<f64> = None;

    'words: for freq in frequencies {
        if let Some(previous) = previous_weight.filter(|p| *p > 0.0) {
            let ratio = (freq.weight / previous).min(1.0);
            size *= RELATIVE_SCALING.mul_add(ratio, 1.0 - RELATIVE_SCALING);
        }
        previous_weight = Some(freq.weight);

        loop {
            let font_size = size.round() as u32;
            if font_size < MIN_FONT_SIZE {
                break 'words;
            }
            if let Some(slot) = grid.find_slot(&offsets, estimate_box(&freq.word, font_size)) {
                grid.fill(&slot);
                placed.push((freq.word.clone(), font_size, slot));
                break;
            }
            size *= SHRINK;
        }
    }

    let colors = spread(palette, placed.len());
    let words = placed
        .into_iter()
        .zip(colors)
        .map(|((text, font_size, slot), color)| PlacedWord {
            text,
            font_size,
            x: (slot.col as u32 * CELL) as i32,
            y: (slot.row as u32 * CELL) as i32,
            width: slot.width,
            height: slot.height,
            color,
        })
        .collect();

    WordCloudLayout {
        width,
        height,
        words,
    }
}

/// Cells claimed by one word.
#[derive(Debug, Clone, Copy)]
struct Slot {
    col: usize,
    row: usize,
    cols: usize,
    rows: usize,
    width: u32,
    height: u32,
}

struct Occupancy {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
    /// `(cols + 1) x (rows + 1)` prefix sums of `cells`.
    sums: Vec<u32>,
}

impl Occupancy {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
            sums: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    fn sum_at(&self, col: usize, row: usize) -> u32 {
        self.sums[row * (self.cols + 1) + col]
    }

    fn is_free(&self, col: i64, row: i64, cols: usize, rows: usize) -> bool {
        let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
            return false;
        };
        if col + cols > self.cols || row + rows > self.rows {
            return false;
        }
        let (right, bottom) = (col + cols, row + rows);
        self.sum_at(right, bottom) + self.sum_at(col, row)
            == self.sum_at(col, bottom) + self.sum_at(right, row)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn find_slot(&self, offsets: &[(i64, i64)], (width, height): (u32, u32)) -> Option<Slot> {
        let cols = width.div_ceil(CELL) as usize;
        let rows = height.div_ceil(CELL) as usize;
        if cols > self.cols || rows > self.rows {
            return None;
        }
        let origin_col = (self.cols / 2) as i64 - (cols / 2) as i64;
        let origin_row = (self.rows / 2) as i64 - (rows / 2) as i64;

        offsets
            .iter()
            .map(|(dx, dy)| (origin_col + dx, origin_row + dy))
            .find(|&(col, row)| self.is_free(col, row, cols, rows))
            .and_then(|(col, row)| {
                Some(Slot {
                    col: usize::try_from(col).ok()?,
                    row: usize::try_from(row).ok()?,
                    cols,
                    rows,
                    width,
                    height,
                })
            })
    }

    fn fill(&mut self, slot: &Slot) {
        for row in slot.row..slot.row + slot.rows {
            let start = row * self.cols + slot.col;
            self.cells[start..start + slot.cols].fill(true);
        }
        // Rows above the slot are unchanged.
        let stride = self.cols + 1;
        for row in slot.row..self.rows {
            let mut running = 0;
            for col in 0..self.cols {
                running += u32::from(self.cells[row * self.cols + col]);
                self.sums[(row + 1) * stride + col + 1] = self.sums[row * stride + col + 1] + running;
            }
        }
    }
}

/// Cell offsets from the centre ordered along an elliptical spiral that
/// matches the canvas aspect ratio.
#[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
fn spiral(cols: usize, rows: usize) -> Vec<(i64, i64)> {
    let (half_cols, half_rows) = (cols as i64 / 2 + 1, rows as i64 / 2 + 1);
    let (scale_x, scale_y) = (rows.max(1) as i64, cols.max(1) as i64);

    let mut keyed: Vec<(i64, f64, (i64, i64))> = (-half_rows..=half_rows)
        .flat_map(|dy| (-half_cols..=half_cols).map(move |dx| (dx, dy)))
        .map(|(dx, dy)| {
            let distance = (dx * scale_x).pow(2) + (dy * scale_y).pow(2);
            let angle = (dy as f64).atan2(dx as f64);
            (distance, angle, (dx, dy))
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));
    keyed.into_iter().map(|(_, _, offset)| offset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frequencies(count: usize) -> Vec<WordFrequency> {
        (0..count)
            .map(|i| WordFrequency {
                word: format!("word{i}"),
                count: (count - i) as u64,
                weight: (count - i) as f64 / count as f64,
            })
            .collect()
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        let (aw, ah) = (a.width as i32, a.height as i32);
        let (bw, bh) = (b.width as i32, b.height as i32);
        a.x < b.x + bw && b.x < a.x + aw && a.y < b.y + bh && b.y < a.y + ah
    }

    #[test]
    fn test_estimate_box() {
        assert_eq!(estimate_box("delay", 10), (30, 12));
        assert_eq!(estimate_box("", 10), (6, 12));
    }

    #[test]
    fn test_first_word_gets_largest_size() {
        let cloud = layout(&frequencies(5), 800, 400, Palette::Viridis);
        assert_eq!(cloud.words[0].font_size, 140);
        assert_eq!(cloud.words[0].color, crate::palette::sample(Palette::Viridis, 0.0));
    }

    #[test]
    fn test_words_do_not_overlap_and_stay_inside() {
        let cloud = layout(&frequencies(60), 800, 400, Palette::Plasma);
        assert!(!cloud.is_empty());

        for (i, a) in cloud.words.iter().enumerate() {
            assert!(a.x >= 0 && a.y >= 0);
            assert!(a.x as u32 + a.width <= 800);
            assert!(a.y as u32 + a.height <= 400);
            for b in &cloud.words[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn test_sizes_never_increase() {
        let cloud = layout(&frequencies(80), 800, 400, Palette::Magma);
        assert!(cloud
            .words
            .windows(2)
            .all(|pair| pair[0].font_size >= pair[1].font_size));
        assert!(cloud.words.iter().all(|w| w.font_size >= MIN_FONT_SIZE));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let freqs = frequencies(40);
        assert_eq!(
            layout(&freqs, 640, 320, Palette::Cividis),
            layout(&freqs, 640, 320, Palette::Cividis)
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(layout(&[], 800, 400, Palette::Viridis).is_empty());
        assert!(layout(&frequencies(3), 2, 2, Palette::Viridis).is_empty());
    }
}
