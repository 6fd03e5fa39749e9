// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word sprites: batch rasterization into a shared atlas and bitmask extraction.

use alloc::vec::Vec;

use kurbo::Affine;
use vizir_text::{GlyphOutliner, TextStyle};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::float::trunc_i32;
use crate::raster::GlyphCanvas;
use crate::word::Word;

/// Atlas width in pixels (64 words of 32 bits).
pub const ATLAS_WIDTH: u32 = 64 << 5;
/// Atlas height in pixels.
pub const ATLAS_HEIGHT: u32 = 1 << 11;

/// A cropped, row-packed bitmask of a word's covered pixels.
///
/// Each row holds `words_per_row` 32-bit words, MSB-first: pixel `i` of a row is
/// bit `31 - i % 32` of word `i / 32`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    words_per_row: usize,
    bits: Vec<u32>,
}

impl Sprite {
    /// Builds a sprite from packed rows.
    ///
    /// A trailing partial row is dropped.
    pub fn from_rows(words_per_row: usize, mut bits: Vec<u32>) -> Self {
        let rows = bits.len().checked_div(words_per_row).unwrap_or(0);
        bits.truncate(rows * words_per_row);
        Self {
            words_per_row,
            bits,
        }
    }

    /// Returns the number of 32-bit words per row.
    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.bits.len().checked_div(self.words_per_row).unwrap_or(0)
    }

    /// Returns row `j`.
    ///
    /// Panics if `j` is out of range.
    pub fn row(&self, j: usize) -> &[u32] {
        let start = j * self.words_per_row;
        &self.bits[start..start + self.words_per_row]
    }

    /// Returns `true` if pixel `(x, y)` is covered.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        if x >= self.words_per_row * 32 || y >= self.rows() {
            return false;
        }
        self.row(y)[x >> 5] & (1 << (31 - (x & 31))) != 0
    }

    /// Returns the number of covered pixels.
    pub fn count_ones(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }
}

/// The shared off-screen surface words are painted into, several at a time.
///
/// Words are packed left to right into rows of the atlas; a row wraps when the
/// next word would reach the right edge and the batch ends when a word would
/// reach the bottom edge.
#[derive(Clone, Debug)]
pub struct SpriteAtlas {
    canvas: GlyphCanvas,
}

impl Default for SpriteAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteAtlas {
    /// Creates an atlas of [`ATLAS_WIDTH`] × [`ATLAS_HEIGHT`] pixels.
    pub fn new() -> Self {
        Self::with_size(ATLAS_WIDTH, ATLAS_HEIGHT)
    }

    /// Creates an atlas of the given size.
    ///
    /// Small atlases are mainly useful to exercise batching.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            canvas: GlyphCanvas::new(width, height),
        }
    }

    /// Returns the surface of the most recent batch.
    pub fn canvas(&self) -> &GlyphCanvas {
        &self.canvas
    }

    /// Rasterizes `words[start..]` into the atlas until it is full, then extracts
    /// a sprite for every painted word.
    ///
    /// Each word's font size is its layout size; `padding` strokes the glyph
    /// outlines with a line of width `2 * padding`. Returns the index of the
    /// first word that did not fit, or `words.len()`. A word whose glyphs leave
    /// no covered pixels ends up with `has_text == false`.
    pub fn rasterize_batch(
        &mut self,
        outliner: &dyn GlyphOutliner,
        words: &mut [Word],
        start: usize,
        padding: f64,
    ) -> usize {
        self.canvas.clear();
        let atlas_w = i64::from(self.canvas.width());
        let atlas_h = i64::from(self.canvas.height());
        let total = words.len();
        let (mut x, mut y, mut max_h) = (0_i64, 0_i64, 0_i64);
        let mut end = start;

        for word in words.iter_mut().skip(start) {
            word.sprite = None;
            word.has_text = false;
            let size = word.font.font_size;
            if !(size.is_finite() && size > 0.0) {
                end += 1;
                continue;
            }

            let style = raster_style(&word.font);
            let advance = outliner.measure(&word.text, &style).advance_width;
            let (w, h) = sprite_box(advance, size, word.rotate);

            if h > max_h {
                max_h = h;
            }
            if x + w >= atlas_w {
                x = 0;
                y += max_h;
                max_h = h;
            }
            if y + h >= atlas_h {
                log::debug!(
                    "sprite atlas full after {} of {} words",
                    end - start,
                    total - start
                );
                break;
            }

            let rotate = if word.rotate.is_finite() {
                word.rotate
            } else {
                0.0
            };
            let paint = Affine::translate(((x + (w >> 1)) as f64, (y + (h >> 1)) as f64))
                * Affine::rotate(rotate.to_radians())
                * Affine::translate((-advance / 2.0, 0.0));
            let outline = outliner.outline(&word.text, &style);
            self.canvas.fill_path(&outline, paint);
            if padding > 0.0 {
                self.canvas.stroke_path(&outline, paint, 2.0 * padding);
            }

            word.set_box(to_i32(w), to_i32(h), to_i32(x), to_i32(y));
            word.has_text = true;
            x += w;
            end += 1;
        }

        self.canvas.render();
        for word in &mut words[start..end] {
            if word.has_text {
                self.extract(word);
            }
        }
        end
    }

    /// Reads the word's atlas box back into a sprite, trimming empty rows from the top.
    ///
    /// Once a covered row is found every following row is kept; the stored mask
    /// ends one row before the bottom of the box.
    fn extract(&self, word: &mut Word) {
        let w = usize::try_from(word.width).unwrap_or(0);
        let w32 = w >> 5;
        let x = u32::try_from(word.xoff).unwrap_or(0);
        let mut y = u32::try_from(word.yoff).unwrap_or(0);
        let mut h = word.y1 - word.y0;

        let mut bits: Vec<u32> = Vec::with_capacity(usize::try_from(h).unwrap_or(0) * w32);
        let mut seen = false;
        let mut seen_row = -1_i32;
        let mut j = 0_i32;
        while j < h {
            let row = self.canvas.alpha_row(y + j.unsigned_abs());
            let start = bits.len();
            bits.resize(start + w32, 0);
            let mut any = false;
            for (i, alpha) in row.skip(x as usize).take(w).enumerate() {
                if alpha != 0 {
                    bits[start + (i >> 5)] |= 1 << (31 - (i & 31));
                    any = true;
                }
            }
            if seen || any {
                seen = true;
                seen_row = j;
                j += 1;
            } else {
                bits.truncate(start);
                word.y0 += 1;
                h -= 1;
                y += 1;
            }
        }

        if !seen {
            word.has_text = false;
            return;
        }
        word.y1 = word.y0 + seen_row;
        bits.truncate(seen_row.unsigned_abs() as usize * w32);
        word.sprite = Some(Sprite::from_rows(w32, bits));
    }
}

/// The style words are painted with: one pixel larger than the layout size,
/// truncated to whole pixels.
fn raster_style(font: &TextStyle) -> TextStyle {
    let size = f64::from(trunc_i32(font.font_size + 1.0));
    font.clone().with_font_size(size)
}

/// Computes the atlas box `(width, height)` of a word.
///
/// The unrotated box is the advance by twice the (whole-pixel) font size. A
/// rotated box is the bounding box of the rotated one. Widths are padded to a
/// multiple of 32 after dropping the fractional pixel.
pub(crate) fn sprite_box(advance: f64, size: f64, rotate: f64) -> (i64, i64) {
    let h = i64::from(trunc_i32(size)) << 1;
    if rotate != 0.0 && rotate.is_finite() {
        let (sr, cr) = (rotate.to_radians().sin(), rotate.to_radians().cos());
        let hf = h as f64;
        let (wcr, wsr, hcr, hsr) = (advance * cr, advance * sr, hf * cr, hf * sr);
        let w = (wcr + hsr).abs().max((wcr - hsr).abs());
        let h = (wsr + hcr).abs().max((wsr - hcr).abs());
        (pad32(w), i64::from(trunc_i32(h)))
    } else {
        (pad32(advance), h)
    }
}

fn pad32(w: f64) -> i64 {
    (i64::from(trunc_i32(w + 31.0)) >> 5) << 5
}

fn to_i32(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
