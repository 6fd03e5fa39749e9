// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canvas occupancy bitmap.

use alloc::vec::Vec;

use crate::bit_row::{shift_and_or, shift_and_test};
use crate::sprite::Sprite;

/// A 1-bit-per-pixel occupancy grid, packed MSB-first into 32-bit words.
///
/// Each row holds `ceil(width / 32)` words; bits past `width` are never set by
/// in-canvas sprites. The board only grows between [`BitBoard::reset`] calls.
#[derive(Clone, Debug, Default)]
pub struct BitBoard {
    width: u32,
    height: u32,
    words_per_row: usize,
    words: Vec<u32>,
}

impl BitBoard {
    /// Creates an empty board.
    pub fn new(width: u32, height: u32) -> Self {
        let mut board = Self::default();
        board.reset(width, height);
        board
    }

    /// Resizes the board and clears every bit, reusing the allocation.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.words_per_row = width.div_ceil(32) as usize;
        self.words.clear();
        self.words.resize(self.words_per_row * height as usize, 0);
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of 32-bit words per row.
    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    /// Returns the packed words, row by row.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Returns `true` if pixel `(x, y)` is occupied.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = y as usize * self.words_per_row + (x >> 5) as usize;
        self.words[i] & (1 << (31 - (x & 31))) != 0
    }

    /// Returns the number of occupied pixels.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    fn row(&self, y: i64) -> Option<&[u32]> {
        let y = usize::try_from(y).ok()?;
        self.words
            .get(y * self.words_per_row..(y + 1) * self.words_per_row)
    }

    fn row_mut(&mut self, y: i64) -> Option<&mut [u32]> {
        let y = usize::try_from(y).ok()?;
        let wpr = self.words_per_row;
        self.words.get_mut(y * wpr..(y + 1) * wpr)
    }

    /// Returns `true` if `sprite`, with its top-left pixel at `(left, top)`,
    /// overlaps an occupied pixel.
    ///
    /// Sprite rows above or below the board count as a collision when they
    /// carry any pixel; columns outside the board are ignored.
    pub fn collides(&self, sprite: &Sprite, left: i32, top: i32) -> bool {
        (0..sprite.rows()).any(|j| {
            let src = sprite.row(j);
            match self.row(i64::from(top) + j as i64) {
                Some(row) => shift_and_test(src, row, i64::from(left)),
                None => src.iter().any(|w| *w != 0),
            }
        })
    }

    /// ORs `sprite` into the board with its top-left pixel at `(left, top)`.
    ///
    /// Parts outside the board are dropped.
    pub fn merge(&mut self, sprite: &Sprite, left: i32, top: i32) {
        for j in 0..sprite.rows() {
            if let Some(row) = self.row_mut(i64::from(top) + j as i64) {
                shift_and_or(sprite.row(j), row, i64::from(left));
            }
        }
    }
}
