// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement and glyph outlines.
//!
//! [`ParleyTextMeasurer`] implements [`vizir_text::TextMeasurer`] with Parley's
//! shaping and [`vizir_text::GlyphOutliner`] by drawing the shaped glyphs
//! through Skrifa, so word layouts pack real letter shapes.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::BezPath;
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{
    Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight,
    PositionedLayoutItem,
};
use skrifa::instance::{LocationRef, NormalizedCoord, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};
use vizir_text::{
    FontFamily, FontStyle, GlyphOutliner, TextMeasurer, TextMetrics, TextStyle,
};

/// A [`TextMeasurer`] and [`GlyphOutliner`] backed by Parley.
///
/// Only the first line of the text is laid out.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<parley::LayoutContext<()>>,
    display_scale: f32,
    quantize: bool,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .field("quantize", &self.quantize)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer over Parley's default system font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(parley::LayoutContext::new()),
            display_scale: 1.0,
            quantize: true,
        }
    }

    /// Sets the display scale passed to Parley.
    ///
    /// Metrics and outlines are scaled back into logical coordinates.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    /// Sets whether Parley should quantize layout coordinates to pixel boundaries.
    #[must_use]
    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    fn scale(&self) -> f32 {
        self.display_scale.max(1.0e-6)
    }

    /// Shapes the first line of `text`, or returns `None` when it is empty.
    fn layout(&self, text: &str, style: &TextStyle) -> Option<parley::Layout<()>> {
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return None;
        }

        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, self.scale(), self.quantize);
        builder.push_default(StyleProperty::FontSize(font_size_f32(style.font_size)));
        builder.push_default(StyleProperty::FontStack(parley_font_stack(&style.font_family)));
        builder.push_default(StyleProperty::FontStyle(parley_font_style(style.font_style)));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());
        Some(layout)
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let empty = TextMetrics {
            advance_width: 0.0,
            ascent: 0.0,
            descent: 0.0,
            leading: 0.0,
        };
        let Some(layout) = self.layout(text, style) else {
            return empty;
        };
        let Some(line) = layout.lines().next() else {
            return empty;
        };

        let scale = f64::from(self.scale());
        let m = line.metrics();
        TextMetrics {
            advance_width: f64::from(m.advance) / scale,
            ascent: f64::from(m.ascent) / scale,
            descent: f64::from(m.descent) / scale,
            leading: f64::from(m.leading) / scale,
        }
    }
}

impl GlyphOutliner for ParleyTextMeasurer {
    fn outline(&self, text: &str, style: &TextStyle) -> BezPath {
        let mut path = BezPath::new();
        let Some(layout) = self.layout(text, style) else {
            return path;
        };
        let Some(line) = layout.lines().next() else {
            return path;
        };

        let scale = f64::from(self.scale());
        let mut coords: Vec<NormalizedCoord> = Vec::new();
        for item in line.items() {
            let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let run = glyph_run.run();
            let font = run.font();
            let Ok(font_ref) = FontRef::from_index(font.data.as_ref(), font.index) else {
                continue;
            };
            let outlines = font_ref.outline_glyphs();
            coords.clear();
            coords.extend(
                run.normalized_coords()
                    .iter()
                    .map(|c| NormalizedCoord::from_bits(*c)),
            );
            let size = Size::new(run.font_size());

            let mut run_x = glyph_run.offset();
            for glyph in glyph_run.glyphs() {
                let glyph_x = run_x + glyph.x;
                run_x += glyph.advance;
                let Some(outline) = outlines.get(GlyphId::new(glyph.id)) else {
                    continue;
                };
                let mut pen = PathPen {
                    path: &mut path,
                    x: f64::from(glyph_x),
                    y: -f64::from(glyph.y),
                    scale,
                };
                let settings = DrawSettings::unhinted(size, LocationRef::new(&coords));
                // A glyph that fails to draw leaves the rest of the run intact.
                let _ = outline.draw(settings, &mut pen);
            }
        }
        path
    }
}

/// Appends font-unit outlines (y up) at a glyph origin, flipped to y down and
/// scaled back to logical units.
struct PathPen<'a> {
    path: &'a mut BezPath,
    x: f64,
    y: f64,
    scale: f64,
}

impl PathPen<'_> {
    fn point(&self, x: f32, y: f32) -> (f64, f64) {
        (
            (self.x + f64::from(x)) / self.scale,
            (self.y - f64::from(y)) / self.scale,
        )
    }
}

impl OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let (c, p) = (self.point(cx0, cy0), self.point(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (c0, c1, p) = (self.point(cx0, cy0), self.point(cx1, cy1), self.point(x, y));
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

fn parley_font_stack(family: &FontFamily) -> FontStack<'_> {
    let family = match family {
        FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
        FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
        FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
        FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
    };
    FontStack::from(family)
}

fn parley_font_style(style: FontStyle) -> ParleyFontStyle {
    match style {
        FontStyle::Normal => ParleyFontStyle::Normal,
        FontStyle::Italic => ParleyFontStyle::Italic,
        FontStyle::Oblique => ParleyFontStyle::Oblique(None),
    }
}

fn font_size_f32(font_size: f64) -> f32 {
    if !font_size.is_finite() {
        return 0.0;
    }
    let font_size = font_size.max(0.0);
    if font_size >= f64::from(f32::MAX) {
        f32::MAX
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Value is clamped to f32::MAX above"
        )]
        {
            font_size as f32
        }
    }
}
