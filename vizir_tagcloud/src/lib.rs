// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag cloud (word cloud) charts for `VizIR`.
//!
//! Words are weighted by a numeric value and packed around the center of the
//! viewport without overlap:
//!
//! - Each word is rasterized into a shared [`SpriteAtlas`] and reduced to a
//!   1-bit [`Sprite`] whose rows are packed into 32-bit words.
//! - A [`Placer`] walks an Archimedean or rectangular [`SpiralPath`] outward
//!   from the canvas center and tests the sprite against a [`BitBoard`] of
//!   occupied pixels with shifted bitwise AND.
//! - [`LayoutDriver`] runs one full pass and fits the resulting cloud into the
//!   viewport with a single [`CloudTransform`].
//!
//! [`TagCloud`] is the chart on top: it owns the data rows, the value and color
//! scales, per-state styles and interaction states, and recomputes only what
//! its dirty [`ConsistencyState`]s call for. Rendering is up to the caller:
//! [`TagCloud::marks`] yields positioned, styled text.
//!
//! Glyph outlines come from a [`vizir_text::GlyphOutliner`]; the
//! [`vizir_text::HeuristicTextMeasurer`] gives a dependency-free block rendition
//! that is good enough for tests and previews; `vizir_text_parley` outlines
//! real fonts.
//!
//! ```
//! use kurbo::Rect;
//! use vizir_tagcloud::{TagCloud, TagRow};
//! use vizir_text::HeuristicTextMeasurer;
//!
//! let mut cloud = TagCloud::new(vec![
//!     TagRow::new("Rust", 10.0),
//!     TagRow::new("wasm", 4.0),
//! ]);
//! cloud.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 400.0, 300.0));
//! assert_eq!(cloud.marks().len(), 2);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod angles;
mod bit_row;
mod board;
mod chart;
mod color;
mod float;
mod font_size;
mod layout;
mod marks;
mod place;
mod raster;
mod scale;
#[cfg(test)]
mod scenario_tests;
mod spiral;
mod sprite;
mod style;
mod word;

pub use angles::{Angles, angle_for, calculate_angles, zero_index};
pub use board::BitBoard;
pub use chart::{TagCloud, TagCloudSettings, TagCloudStatistics};
pub use color::{ColorScale, DEFAULT_PALETTE, LinearColorScale, OrdinalColorScale, Palette};
pub use font_size::{FontSizeRange, FontSizer};
pub use layout::{CloudLayout, CloudTransform, LayoutDriver};
pub use marks::TagMark;
pub use place::{CloudBounds, Placer};
pub use raster::GlyphCanvas;
pub use scale::{ValueScale, ValueScaleKind};
pub use spiral::{SpiralPath, TagCloudMode};
pub use sprite::{ATLAS_HEIGHT, ATLAS_WIDTH, Sprite, SpriteAtlas};
pub use style::{FontSize, StateStyle, StyleContext, StyleValue};
pub use vizir_core::{ConsistencyState, PointState};
pub use word::{DataError, TagRow, Word};
