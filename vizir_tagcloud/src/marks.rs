// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-ready word output.

use alloc::string::String;

use kurbo::{Affine, Point};
use peniko::Brush;
use vizir_text::TextStyle;

/// One drawn word, in viewport coordinates.
///
/// The text is centered horizontally on `position` with its baseline through
/// it, then rotated about `position` by `rotate` degrees. `font.font_size` is the
/// unscaled size; multiply it by `scale` for the on-screen size.
#[derive(Clone, Debug)]
pub struct TagMark {
    /// Source row index.
    pub row_index: usize,
    /// Display text.
    pub text: String,
    /// Anchor in viewport coordinates.
    pub position: Point,
    /// Rotation in degrees.
    pub rotate: f64,
    /// The cloud-wide scale factor.
    pub scale: f64,
    /// Resolved font for the word's interaction state.
    pub font: TextStyle,
    /// Resolved fill for the word's interaction state.
    pub fill: Brush,
}

impl TagMark {
    /// The affine that maps text space (origin at the horizontal center of the
    /// baseline) into the viewport.
    pub fn text_transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::scale(self.scale)
            * Affine::rotate(self.rotate.to_radians())
    }
}
