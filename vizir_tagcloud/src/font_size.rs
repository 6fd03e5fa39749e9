// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font size bounds for a layout pass.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect};
use vizir_text::{TextMeasurer, TextStyle};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::float::trunc_i32;

/// The pixel font sizes that value ratios `0..=1` map onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizeRange {
    /// Size of the smallest value.
    pub min: f64,
    /// Size of the largest value.
    pub max: f64,
}

impl FontSizeRange {
    /// Maps a value ratio to a whole-pixel size: `round(min + ratio · (max - min))`.
    ///
    /// The ratio is clamped to `0..=1`; a non-finite ratio counts as 0.
    pub fn size_for_ratio(&self, ratio: f64) -> f64 {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        (self.min + ratio * (self.max - self.min)).round()
    }
}

/// How a candidate size's rotated text box compares with the target box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fit {
    /// Larger than the target in some dimension.
    TooBig,
    /// Touches the target in some dimension.
    Exact,
    /// Strictly smaller than the target.
    Fits,
}

/// Picks the largest font size at which the top word fits a third of the canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct FontSizer;

impl FontSizer {
    /// Computes the size range for a `width` × `height` canvas.
    ///
    /// `min` is `height / 50`. Candidates for `max` are the whole sizes from
    /// `ceil(min)` to `floor(height / 3)`; the largest candidate whose rotated text
    /// box stays within `width / 3` × `height / 3` wins. With no candidates `max`
    /// equals `min`.
    pub fn compute(
        measurer: &dyn TextMeasurer,
        text: &str,
        style: &TextStyle,
        rotate: f64,
        width: f64,
        height: f64,
    ) -> FontSizeRange {
        let min = height / 50.0;
        let target_w = width / 3.0;
        let target_h = height / 3.0;

        let lo = trunc_i32(min.ceil());
        let hi = trunc_i32((height / 3.0).floor());
        let candidates: Vec<f64> = (lo..=hi).map(f64::from).collect();
        if candidates.is_empty() {
            return FontSizeRange { min, max: min };
        }

        let theta = if rotate.is_finite() {
            rotate.to_radians()
        } else {
            0.0
        };
        let evaluate = |size: f64| {
            let metrics = measurer.measure(text, &style.clone().with_font_size(size));
            let bounds = Rect::new(0.0, 0.0, metrics.advance_width, metrics.line_height());
            let center = Point::new(bounds.width() / 2.0, bounds.height() / 2.0);
            let rotated = Affine::rotate_about(theta, center).transform_rect_bbox(bounds);
            let (w, h) = (rotated.width(), rotated.height());
            if w > target_w || h > target_h {
                Fit::TooBig
            } else if w == target_w || h == target_h {
                Fit::Exact
            } else {
                Fit::Fits
            }
        };

        let index = match binary_select(&candidates, |s| evaluate(*s)) {
            Ok(i) => i,
            Err(insert) => insert.saturating_sub(1),
        };
        let max = candidates[index.min(candidates.len() - 1)];
        FontSizeRange { min, max }
    }
}

/// Binary search driven by an evaluator.
///
/// Moves right while the evaluator says the candidate fits strictly and left
/// otherwise. Returns `Ok(i)` when the final left step was an exact fit,
/// otherwise `Err(i)` with the insertion point.
fn binary_select<T>(items: &[T], mut eval: impl FnMut(&T) -> Fit) -> Result<usize, usize> {
    let (mut left, mut right) = (0, items.len());
    let mut found = false;
    while left < right {
        let mid = left + (right - left) / 2;
        match eval(&items[mid]) {
            Fit::Fits => left = mid + 1,
            fit => {
                right = mid;
                found = fit == Fit::Exact;
            }
        }
    }
    if found { Ok(left) } else { Err(left) }
}
