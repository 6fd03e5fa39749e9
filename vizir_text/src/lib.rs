// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement and glyph outline hooks.
//!
//! `VizIR` charts need text metrics to lay out labels, and the tag cloud needs
//! actual glyph coverage to pack words tightly. Shaping and font loading stay
//! downstream, so chart code depends on two tiny interfaces:
//!
//! - [`TextMeasurer`] reports advance and line metrics for a single line.
//! - [`GlyphOutliner`] additionally returns the filled outline of a line as a
//!   [`kurbo::BezPath`], which callers can rasterize however they like.
//!
//! This crate is `no_std`-friendly (it uses `alloc` for owned font family names)
//! and renderer-agnostic. [`HeuristicTextMeasurer`] implements both traits with
//! a deterministic block-glyph approximation that is good enough for demos and
//! tests.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

use kurbo::{Affine, BezPath, Point};

/// A minimal text measurement interface.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine, or
/// - backed by web platform text measurement (e.g. HTML canvas).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// A text measurer that can also produce glyph outlines.
///
/// The outline of `text` is returned in a coordinate system whose origin is the
/// left end of the baseline, with `y` pointing down (so ascenders have negative
/// `y`). The outline must be consistent with [`TextMeasurer::measure`]: it spans
/// horizontally within `0..advance_width` (italic slant aside) and vertically
/// within `-ascent..descent`.
pub trait GlyphOutliner: TextMeasurer {
    /// Returns the filled (nonzero winding) outline of a single line of text.
    fn outline(&self, text: &str, style: &TextStyle) -> BezPath;
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: it’s just enough to make chart layout
/// consistent. More detailed typography (attributed text, shaping options,
/// fallback, etc.) belongs in a higher-level text system.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart’s coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
    /// Font variant (normal/small caps).
    pub font_variant: FontVariant,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            font_variant: FontVariant::Normal,
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    /// Sets the font variant.
    #[must_use]
    pub fn with_variant(mut self, variant: FontVariant) -> Self {
        self.font_variant = variant;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

impl FontStyle {
    /// Returns the CSS keyword for this style.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

/// CSS-style font variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontVariant {
    /// Normal glyphs.
    Normal,
    /// Lowercase letters drawn as reduced capitals.
    SmallCaps,
}

impl FontVariant {
    /// Returns the CSS keyword for this variant.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::SmallCaps => "small-caps",
        }
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A tiny heuristic text measurer suitable for demos, early layout and tests.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
/// Outlines are one block per visible character: cap height 0.7em, descenders
/// reaching 0.2em below the baseline, bold blocks a little wider, italic
/// blocks slanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

const ADVANCE_EM: f64 = 0.6;
const CAP_HEIGHT_EM: f64 = 0.7;
const SMALL_CAP_HEIGHT_EM: f64 = 0.56;
const DESCENDER_EM: f64 = 0.2;
const ITALIC_SLANT: f64 = 0.2;

fn has_descender(c: char) -> bool {
    matches!(c, 'g' | 'j' | 'p' | 'q' | 'y' | ',' | ';')
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let advance_width = ADVANCE_EM * style.font_size * text.chars().count() as f64;
        let ascent = 0.8 * style.font_size;
        let descent = 0.2 * style.font_size;
        TextMetrics {
            advance_width,
            ascent,
            descent,
            leading: 0.0,
        }
    }
}

impl GlyphOutliner for HeuristicTextMeasurer {
    fn outline(&self, text: &str, style: &TextStyle) -> BezPath {
        let size = style.font_size;
        let mut path = BezPath::new();
        if !(size.is_finite() && size > 0.0) {
            return path;
        }
        let advance = ADVANCE_EM * size;
        let inset = if style.font_weight >= FontWeight::BOLD {
            0.04 * advance
        } else {
            0.08 * advance
        };

        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let x0 = i as f64 * advance + inset;
            let x1 = (i + 1) as f64 * advance - inset;
            let small = style.font_variant == FontVariant::SmallCaps && c.is_lowercase();
            let top = if small {
                -SMALL_CAP_HEIGHT_EM * size
            } else {
                -CAP_HEIGHT_EM * size
            };
            let bottom = if !small && has_descender(c) {
                DESCENDER_EM * size
            } else {
                0.0
            };
            path.move_to(Point::new(x0, top));
            path.line_to(Point::new(x1, top));
            path.line_to(Point::new(x1, bottom));
            path.line_to(Point::new(x0, bottom));
            path.close_path();
        }

        if style.font_style != FontStyle::Normal {
            path.apply_affine(Affine::skew(-ITALIC_SLANT, 0.0));
        }
        path
    }
}
