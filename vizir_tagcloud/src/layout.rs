// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One full layout pass: size, rasterize, place, fit.

use kurbo::{Affine, Point, Rect, Vec2};
use vizir_text::GlyphOutliner;

use crate::board::BitBoard;
use crate::float::trunc_i32;
use crate::font_size::{FontSizeRange, FontSizer};
use crate::place::{CloudBounds, Placer};
use crate::spiral::TagCloudMode;
use crate::sprite::SpriteAtlas;
use crate::word::Word;

/// The uniform scale and offset from cloud coordinates (relative to the canvas
/// center) to viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Viewport position of the cloud origin.
    pub translate: Vec2,
}

impl Default for CloudTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl CloudTransform {
    /// Returns `translate · scale`.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Maps a cloud point into the viewport.
    pub fn apply(&self, p: Point) -> Point {
        self.to_affine() * p
    }

    /// Maps a cloud rectangle into the viewport.
    pub fn apply_rect(&self, r: Rect) -> Rect {
        self.to_affine().transform_rect_bbox(r)
    }
}

/// The result of a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudLayout {
    /// The viewport the cloud was fitted into.
    pub viewport: Rect,
    /// Canvas width in whole pixels.
    pub width: i32,
    /// Canvas height in whole pixels.
    pub height: i32,
    /// The font size range derived from the top word.
    pub font_range: FontSizeRange,
    /// Union of the placed word boxes in canvas pixels; `None` if nothing was placed.
    pub bounds: Option<CloudBounds>,
    /// The cloud → viewport transform.
    pub transform: CloudTransform,
    /// Number of placed words.
    pub placed: usize,
    /// Number of words that were not placed.
    pub failed: usize,
}

impl Default for CloudLayout {
    fn default() -> Self {
        Self {
            viewport: Rect::ZERO,
            width: 0,
            height: 0,
            font_range: FontSizeRange { min: 0.0, max: 0.0 },
            bounds: None,
            transform: CloudTransform::default(),
            placed: 0,
            failed: 0,
        }
    }
}

/// Owns the sprite atlas and the occupancy board between passes.
#[derive(Clone, Debug, Default)]
pub struct LayoutDriver {
    atlas: SpriteAtlas,
    board: BitBoard,
}

impl LayoutDriver {
    /// Creates a driver with a full-size atlas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver using `atlas`.
    pub fn with_atlas(atlas: SpriteAtlas) -> Self {
        Self {
            atlas,
            board: BitBoard::default(),
        }
    }

    /// Returns the occupancy board of the last pass.
    pub fn board(&self) -> &BitBoard {
        &self.board
    }

    /// Lays out `words`, which must already be in placement order.
    ///
    /// The font range is measured on `words[0]`; `size_for` then picks every
    /// word's layout size from it. Each word is rasterized (in atlas batches)
    /// and placed by a spiral search from the canvas center. Placed words end
    /// up with `(x, y)` relative to the center and `placed == true`; `drawn` is
    /// set for placed words whose transformed box lies inside `viewport`.
    pub fn run(
        &mut self,
        outliner: &dyn GlyphOutliner,
        words: &mut [Word],
        viewport: Rect,
        mode: TagCloudMode,
        padding: f64,
        mut size_for: impl FnMut(&Word, &FontSizeRange) -> f64,
    ) -> CloudLayout {
        let w = trunc_i32(viewport.width()).max(0);
        let h = trunc_i32(viewport.height()).max(0);
        let (cx, cy) = (w >> 1, h >> 1);
        self.board.reset(w.unsigned_abs(), h.unsigned_abs());

        let mut layout = CloudLayout {
            viewport,
            width: w,
            height: h,
            ..CloudLayout::default()
        };
        layout.transform.translate = Vec2::new(viewport.x0 + f64::from(cx), viewport.y0 + f64::from(cy));
        let Some(top) = words.first() else {
            return layout;
        };

        layout.font_range = FontSizer::compute(
            outliner,
            &top.text,
            &top.font,
            top.rotate,
            f64::from(w),
            f64::from(h),
        );
        for word in words.iter_mut() {
            word.font.font_size = size_for(word, &layout.font_range);
            word.sprite = None;
            word.has_text = false;
            word.placed = false;
            word.drawn = false;
        }

        let placer = Placer::new(mode, w, h);
        let mut bounds: Option<CloudBounds> = None;
        let mut batch_end = 0;
        for i in 0..words.len() {
            if i >= batch_end {
                batch_end = self.atlas.rasterize_batch(outliner, words, i, padding);
                if batch_end == i {
                    log::debug!("word {:?} does not fit an empty sprite atlas", words[i].text);
                    batch_end = i + 1;
                }
            }

            let word = &mut words[i];
            word.x = cx;
            word.y = cy;
            if word.has_text && placer.place(&mut self.board, word, bounds.as_ref()) {
                match bounds.as_mut() {
                    Some(b) => b.include(word),
                    None => bounds = Some(CloudBounds::from_word(word)),
                }
                word.x -= cx;
                word.y -= cy;
                word.placed = true;
                layout.placed += 1;
            } else {
                word.sprite = None;
                layout.failed += 1;
            }
        }

        layout.bounds = bounds;
        layout.transform.scale = final_scale(bounds.as_ref(), w, h);
        let tolerance = 0.5 * layout.transform.scale.max(1.0) + 1e-6;
        let visible = viewport.inflate(tolerance, tolerance);
        for word in words.iter_mut().filter(|word| word.placed) {
            let local = Rect::new(
                f64::from(word.x + word.x0),
                f64::from(word.y + word.y0),
                f64::from(word.x + word.x1),
                f64::from(word.y + word.y1),
            );
            let screen = layout.transform.apply_rect(local);
            word.drawn = screen.x0 >= visible.x0
                && screen.y0 >= visible.y0
                && screen.x1 <= visible.x1
                && screen.y1 <= visible.y1;
        }

        log::debug!(
            "tag cloud layout: {} placed, {} failed, font {:.1}..{:.1}px, scale {:.3}",
            layout.placed,
            layout.failed,
            layout.font_range.min,
            layout.font_range.max,
            layout.transform.scale
        );
        layout
    }
}

/// The largest scale (halved) at which the cloud, centered on the canvas
/// center, still fits the canvas; `1` without bounds or for degenerate results.
fn final_scale(bounds: Option<&CloudBounds>, width: i32, height: i32) -> f64 {
    let Some(b) = bounds else {
        return 1.0;
    };
    let (w, h) = (f64::from(width), f64::from(height));
    let s = (w / (f64::from(b.x1) - w / 2.0).abs())
        .min(w / (f64::from(b.x0) - w / 2.0).abs())
        .min(h / (f64::from(b.y1) - h / 2.0).abs())
        .min(h / (f64::from(b.y0) - h / 2.0).abs())
        / 2.0;
    if s.is_finite() && s > 0.0 {
        s
    } else {
        log::warn!("tag cloud scale {s} is degenerate; using 1");
        1.0
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec::Vec;
    use vizir_text::{HeuristicTextMeasurer, TextStyle};

    fn words(texts: &[(&str, f64)]) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(i, (t, v))| {
                let mut w = Word::new(i, t, *v, None);
                w.font = TextStyle::new(12.0);
                w
            })
            .collect()
    }

    fn by_value(max: f64) -> impl FnMut(&Word, &FontSizeRange) -> f64 {
        move |w, r| r.size_for_ratio(w.value / max)
    }

    #[test]
    fn transform_is_scale_then_translate() {
        let t = CloudTransform {
            scale: 0.5,
            translate: Vec2::new(100.0, 50.0),
        };
        assert_eq!(t.apply(Point::new(10.0, -10.0)), Point::new(105.0, 45.0));
        assert_eq!(
            t.apply_rect(Rect::new(-2.0, -2.0, 2.0, 2.0)),
            Rect::new(99.0, 49.0, 101.0, 51.0)
        );
    }

    #[test]
    fn final_scale_fits_the_farthest_edge() {
        let b = CloudBounds {
            x0: 20,
            y0: 40,
            x1: 80,
            y1: 60,
        };
        // Horizontal half-extent 30 of a 100px canvas: 100 / 30 / 2.
        assert!((final_scale(Some(&b), 100, 100) - 100.0 / 30.0 / 2.0).abs() < 1e-12);
        assert_eq!(final_scale(None, 100, 100), 1.0);
        assert_eq!(final_scale(Some(&b), 0, 0), 1.0, "degenerate canvases fall back to 1");
    }

    #[test]
    fn empty_input_keeps_identity_scale() {
        let mut driver = LayoutDriver::new();
        let viewport = Rect::new(10.0, 20.0, 110.0, 220.0);
        let layout = driver.run(
            &HeuristicTextMeasurer,
            &mut [],
            viewport,
            TagCloudMode::Spiral,
            0.0,
            by_value(1.0),
        );
        assert_eq!(layout.bounds, None);
        assert_eq!(layout.transform.scale, 1.0);
        assert_eq!(layout.transform.translate, Vec2::new(60.0, 120.0));
    }

    #[test]
    fn top_word_lands_on_the_center() {
        let mut ws = words(&[("rust", 10.0), ("go", 5.0), ("zig", 1.0)]);
        let mut driver = LayoutDriver::new();
        let layout = driver.run(
            &HeuristicTextMeasurer,
            &mut ws,
            Rect::new(0.0, 0.0, 400.0, 300.0),
            TagCloudMode::Spiral,
            1.0,
            by_value(10.0),
        );
        assert_eq!((ws[0].x, ws[0].y), (0, 0));
        assert_eq!(ws[0].size(), layout.font_range.max);
        assert!(ws[2].size() < ws[0].size());
        assert_eq!(layout.placed + layout.failed, 3);
        assert!(layout.transform.scale > 0.0 && layout.transform.scale.is_finite());
        for w in ws.iter().filter(|w| w.placed) {
            assert!(w.sprite.is_none());
            assert!(w.drawn, "{} should be visible", w.text);
            assert_eq!(w.width % 32, 0);
        }
        assert!(driver.board().count_ones() > 0);
    }

    #[test]
    fn small_atlases_rasterize_in_several_batches() {
        let texts: Vec<(&str, f64)> = ["alpha", "beta", "gamma", "delta", "omega"]
            .iter()
            .map(|t| (*t, 1.0))
            .collect();
        let mut ws = words(&texts);
        let mut driver = LayoutDriver::with_atlas(SpriteAtlas::with_size(256, 40));
        let layout = driver.run(
            &HeuristicTextMeasurer,
            &mut ws,
            Rect::new(0.0, 0.0, 600.0, 600.0),
            TagCloudMode::Rect,
            0.0,
            |_, _| 14.0,
        );
        assert!(
            ws.iter().all(|w| w.has_text),
            "every word gets a sprite in some batch"
        );
        assert!(layout.placed >= 1);
    }

    #[test]
    fn words_too_big_for_the_atlas_are_skipped() {
        let mut ws = words(&[("huge", 1.0), ("tiny", 1.0)]);
        let mut driver = LayoutDriver::with_atlas(SpriteAtlas::with_size(256, 40));
        let mut first = true;
        let layout = driver.run(
            &HeuristicTextMeasurer,
            &mut ws,
            Rect::new(0.0, 0.0, 300.0, 300.0),
            TagCloudMode::Spiral,
            0.0,
            |_, _| {
                let size = if first { 40.0 } else { 8.0 };
                first = false;
                size
            },
        );
        assert!(!ws[0].has_text && !ws[0].placed);
        assert!(ws[1].has_text && ws[1].placed);
        assert_eq!((layout.placed, layout.failed), (1, 1));
    }
}
