// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The off-screen glyph surface, rendered with `vello_cpu`.

use kurbo::{Affine, BezPath, PathEl};
use peniko::color::palette::css;
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath as CpuBezPath, Stroke as CpuStroke};
use vello_cpu::{Pixmap, RenderContext};

/// An anti-aliased CPU surface glyph outlines are painted into.
///
/// Drawing is recorded by [`fill_path`](Self::fill_path) and
/// [`stroke_path`](Self::stroke_path) and lands in the pixmap on
/// [`render`](Self::render). Coverage is read back as alpha; any pixel an
/// outline touches, even partially, ends up non-zero.
pub struct GlyphCanvas {
    width: u16,
    height: u16,
    ctx: RenderContext,
    pixmap: Pixmap,
}

impl core::fmt::Debug for GlyphCanvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Clone for GlyphCanvas {
    /// Clones the rendered pixels; pending drawing commands are not carried over.
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            ctx: RenderContext::new(self.width, self.height),
            pixmap: self.pixmap.clone(),
        }
    }
}

impl GlyphCanvas {
    /// Creates a transparent canvas.
    ///
    /// Sizes are clamped to `u16::MAX`.
    pub fn new(width: u32, height: u32) -> Self {
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(height).unwrap_or(u16::MAX);
        let mut ctx = RenderContext::new(width, height);
        ctx.set_paint(css::BLACK);
        Self {
            width,
            height,
            ctx,
            pixmap: Pixmap::new(width, height),
        }
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Drops every recorded drawing command.
    ///
    /// The pixmap keeps its pixels until the next [`render`](Self::render).
    pub fn clear(&mut self) {
        self.ctx.reset();
        self.ctx.set_paint(css::BLACK);
    }

    /// Fills `path`, mapped through `transform`, with the nonzero rule.
    pub fn fill_path(&mut self, path: &BezPath, transform: Affine) {
        self.ctx.set_transform(to_cpu_affine(transform));
        self.ctx.fill_path(&to_cpu_path(path));
    }

    /// Strokes `path`, mapped through `transform`, with a line of `width` pixels.
    pub fn stroke_path(&mut self, path: &BezPath, transform: Affine, width: f64) {
        self.ctx.set_transform(to_cpu_affine(transform));
        self.ctx.set_stroke(CpuStroke::new(width));
        self.ctx.stroke_path(&to_cpu_path(path));
    }

    /// Rasterizes everything recorded since the last [`clear`](Self::clear),
    /// replacing the pixmap contents.
    pub fn render(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Returns the coverage at `(x, y)`, or 0 outside the canvas.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width() || y >= self.height() {
            return 0;
        }
        let i = y as usize * usize::from(self.width) + x as usize;
        self.pixmap.data().get(i).map_or(0, |p| p.a)
    }

    /// Returns the coverage of row `y`, left to right (empty outside the canvas).
    pub fn alpha_row(&self, y: u32) -> impl Iterator<Item = u8> + '_ {
        let w = usize::from(self.width);
        let row = if y < self.height() {
            let start = y as usize * w;
            self.pixmap.data().get(start..start + w).unwrap_or(&[])
        } else {
            &[]
        };
        row.iter().map(|p| p.a)
    }
}

fn to_cpu_affine(transform: Affine) -> CpuAffine {
    CpuAffine::new(transform.as_coeffs())
}

fn to_cpu_path(path: &BezPath) -> CpuBezPath {
    let mut out = CpuBezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to((p.x, p.y)),
            PathEl::LineTo(p) => out.line_to((p.x, p.y)),
            PathEl::QuadTo(a, p) => out.quad_to((a.x, a.y), (p.x, p.y)),
            PathEl::CurveTo(a, b, p) => out.curve_to((a.x, a.y), (b.x, b.y), (p.x, p.y)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
