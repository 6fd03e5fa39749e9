// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spiral search placement against the occupancy board.

use kurbo::Rect;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::board::BitBoard;
use crate::spiral::{SpiralPath, TagCloudMode};
use crate::word::Word;

/// The union of the boxes of every word placed so far, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloudBounds {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge.
    pub x1: i32,
    /// Bottom edge.
    pub y1: i32,
}

impl CloudBounds {
    /// The box of a single placed word.
    pub fn from_word(word: &Word) -> Self {
        Self {
            x0: word.x + word.x0,
            y0: word.y + word.y0,
            x1: word.x + word.x1,
            y1: word.y + word.y1,
        }
    }

    /// Grows the bounds to cover `word`.
    pub fn include(&mut self, word: &Word) {
        let b = Self::from_word(word);
        self.x0 = self.x0.min(b.x0);
        self.y0 = self.y0.min(b.y0);
        self.x1 = self.x1.max(b.x1);
        self.y1 = self.y1.max(b.y1);
    }

    /// Returns `true` if the box of `word` overlaps the bounds with positive area.
    pub fn intersects(&self, word: &Word) -> bool {
        word.x + word.x1 > self.x0
            && word.x + word.x0 < self.x1
            && word.y + word.y1 > self.y0
            && word.y + word.y0 < self.y1
    }

    /// Converts to a [`Rect`].
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

/// Greedy spiral placement on a fixed-size canvas.
#[derive(Clone, Copy, Debug)]
pub struct Placer {
    mode: TagCloudMode,
    width: i32,
    height: i32,
    max_delta: f64,
}

impl Placer {
    /// Creates a placer for a `width` × `height` canvas.
    ///
    /// The search gives up once the spiral has moved further than the canvas
    /// diagonal along both axes.
    pub fn new(mode: TagCloudMode, width: i32, height: i32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            mode,
            width,
            height,
            max_delta: (w * w + h * h).sqrt(),
        }
    }

    /// Returns the search cutoff distance.
    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }

    /// Searches for a spot for `word`, starting from its current `(x, y)`.
    ///
    /// A candidate is skipped when the word box leaves the canvas. With no
    /// `bounds` (the first word) the first in-canvas candidate wins. Otherwise a
    /// candidate must not collide with the board *and* must overlap `bounds`;
    /// a collision-free candidate that misses the cloud is passed over.
    ///
    /// On success the sprite is merged into `board` and dropped, and `(x, y)`
    /// holds the chosen center. On failure the sprite is kept and `(x, y)` is
    /// the last candidate tried.
    pub fn place(&self, board: &mut BitBoard, word: &mut Word, bounds: Option<&CloudBounds>) -> bool {
        let Some(sprite) = word.sprite.as_ref() else {
            return false;
        };
        let (start_x, start_y) = (word.x, word.y);
        let spiral = SpiralPath::new(
            self.mode,
            f64::from(self.width),
            f64::from(self.height),
        );

        for (dx, dy) in spiral {
            if f64::from(dx.unsigned_abs().min(dy.unsigned_abs())) >= self.max_delta {
                break;
            }
            word.x = start_x.saturating_add(dx);
            word.y = start_y.saturating_add(dy);
            if word.x + word.x0 < 0
                || word.y + word.y0 < 0
                || word.x + word.x1 > self.width
                || word.y + word.y1 > self.height
            {
                continue;
            }
            let Some(bounds) = bounds else {
                board.merge(sprite, word.x + word.x0, word.y + word.y0);
                word.sprite = None;
                return true;
            };
            if !board.collides(sprite, word.x + word.x0, word.y + word.y0)
                && bounds.intersects(word)
            {
                board.merge(sprite, word.x + word.x0, word.y + word.y0);
                word.sprite = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::sprite::Sprite;
    use alloc::vec;

    /// A 32 × 4 box whose sprite inks the leftmost `ink` columns of every row.
    fn bar(ink: u32, x: i32, y: i32) -> Word {
        let mut w = Word::new(0, "w", 1.0, None);
        let row = if ink >= 32 { u32::MAX } else { !(u32::MAX >> ink) };
        w.set_box(32, 4, 0, 0);
        w.sprite = Some(Sprite::from_rows(1, vec![row; 4]));
        w.has_text = true;
        w.x = x;
        w.y = y;
        w
    }

    #[test]
    fn bounds_intersection_is_strict() {
        let a = bar(32, 32, 32);
        let bounds = CloudBounds::from_word(&a);
        assert_eq!(bounds.to_rect(), Rect::new(16.0, 30.0, 48.0, 34.0));
        assert!(bounds.intersects(&bar(32, 40, 33)));
        assert!(!bounds.intersects(&bar(32, 32, 36)), "touching edges do not count");
        assert!(!bounds.intersects(&bar(32, 64, 32)));
    }

    #[test]
    fn bounds_grow_to_cover_words() {
        let mut bounds = CloudBounds::from_word(&bar(32, 32, 32));
        bounds.include(&bar(32, 10, 50));
        assert_eq!(
            bounds,
            CloudBounds {
                x0: -6,
                y0: 30,
                x1: 48,
                y1: 52
            }
        );
    }

    #[test]
    fn first_word_lands_on_the_first_in_canvas_candidate() {
        let mut board = BitBoard::new(64, 64);
        let placer = Placer::new(TagCloudMode::Spiral, 64, 64);
        let mut w = bar(8, 32, 32);
        assert!(placer.place(&mut board, &mut w, None));
        assert_eq!((w.x, w.y), (32, 32));
        assert!(w.sprite.is_none(), "merged sprites are dropped");
        assert_eq!(board.count_ones(), 32);
        assert!(board.is_set(16, 30) && !board.is_set(24, 30));
    }

    #[test]
    fn rectangular_search_never_tries_the_start_point() {
        let mut board = BitBoard::new(64, 64);
        let placer = Placer::new(TagCloudMode::Rect, 64, 64);
        let mut w = bar(8, 32, 32);
        assert!(placer.place(&mut board, &mut w, None));
        assert_eq!((w.x, w.y), (36, 32));
    }

    #[test]
    fn later_words_avoid_ink_and_touch_the_cloud() {
        let mut board = BitBoard::new(64, 64);
        let placer = Placer::new(TagCloudMode::Spiral, 64, 64);
        let mut first = bar(8, 32, 32);
        assert!(placer.place(&mut board, &mut first, None));
        let bounds = CloudBounds::from_word(&first);

        let mut second = bar(8, 32, 32);
        assert!(placer.place(&mut board, &mut second, Some(&bounds)));
        assert_eq!(board.count_ones(), 64, "the two sprites do not overlap");
        assert!(bounds.intersects(&second));
        assert_ne!((second.x, second.y), (32, 32));
    }

    #[test]
    fn fully_inked_boxes_cannot_join_the_cloud() {
        // Collision-free positions of a fully inked box never overlap the
        // cloud box, so the compactness check rejects every one of them.
        let mut board = BitBoard::new(64, 64);
        let placer = Placer::new(TagCloudMode::Spiral, 64, 64);
        let mut first = bar(32, 32, 32);
        assert!(placer.place(&mut board, &mut first, None));
        let bounds = CloudBounds::from_word(&first);

        let mut second = bar(32, 32, 32);
        assert!(!placer.place(&mut board, &mut second, Some(&bounds)));
        assert!(second.sprite.is_some(), "failed words keep their sprite");
        assert_eq!(board.count_ones(), 128);
    }

    #[test]
    fn oversized_words_fail() {
        let mut board = BitBoard::new(24, 24);
        let placer = Placer::new(TagCloudMode::Spiral, 24, 24);
        let mut w = bar(8, 12, 12);
        assert!(!placer.place(&mut board, &mut w, None));
        assert_eq!(board.count_ones(), 0);
    }

    #[test]
    fn words_without_sprites_are_not_placed() {
        let mut board = BitBoard::new(64, 64);
        let placer = Placer::new(TagCloudMode::Spiral, 64, 64);
        let mut w = bar(8, 32, 32);
        w.sprite = None;
        assert!(!placer.place(&mut board, &mut w, None));
    }

    #[test]
    fn cutoff_is_the_canvas_diagonal() {
        let placer = Placer::new(TagCloudMode::Spiral, 30, 40);
        assert!((placer.max_delta() - 50.0).abs() < 1e-9);
    }
}
