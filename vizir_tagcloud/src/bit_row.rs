// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sub-word shifting of packed bit rows.
//!
//! Sprites and the board store pixels MSB-first: bit `31 - (x % 32)` of word
//! `x / 32` is pixel `x`. Placing a sprite row at a board column that is not a
//! multiple of 32 means every sprite word straddles two board words. The
//! helpers here produce the realigned words (one more than the source has) and
//! combine them with a board row.

/// Realigns a packed row so that it starts `shift` bits into its first word.
///
/// Yields `words.len() + 1` words: word `i` carries the low bits of source word
/// `i - 1` followed by the high bits of source word `i`. With `shift == 0` the
/// carry is empty and the final word is zero.
#[derive(Clone, Debug)]
pub(crate) struct ShiftedRow<'a> {
    words: &'a [u32],
    shift: u32,
    index: usize,
    carry: u32,
}

impl<'a> ShiftedRow<'a> {
    pub(crate) fn new(words: &'a [u32], shift: u32) -> Self {
        debug_assert!(shift < 32, "shift must be below the word size");
        Self {
            words,
            shift,
            index: 0,
            carry: 0,
        }
    }
}

impl Iterator for ShiftedRow<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.index > self.words.len() {
            return None;
        }
        let current = self.words.get(self.index).copied().unwrap_or(0);
        let out = if self.shift == 0 {
            current
        } else {
            (self.carry << (32 - self.shift)) | (current >> self.shift)
        };
        self.carry = current;
        self.index += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.words.len() + 1 - self.index.min(self.words.len() + 1);
        (n, Some(n))
    }
}

/// Splits a bit offset into the first board word and the shift within it.
fn align(bit_offset: i64) -> (usize, usize, u32) {
    let col = bit_offset.div_euclid(32);
    #[allow(clippy::cast_possible_truncation, reason = "rem_euclid(32) is in 0..32")]
    let shift = bit_offset.rem_euclid(32) as u32;
    // Realigned words left of the row start are skipped.
    let skip = usize::try_from(-col).unwrap_or(0);
    let start = usize::try_from(col).unwrap_or(0);
    (skip, start, shift)
}

/// ORs `src` into `row` so that source pixel 0 lands on row pixel `bit_offset`.
///
/// Bits that fall outside the row are dropped.
pub(crate) fn shift_and_or(src: &[u32], row: &mut [u32], bit_offset: i64) {
    let (skip, start, shift) = align(bit_offset);
    let Some(dst) = row.get_mut(start..) else {
        return;
    };
    for (d, m) in dst.iter_mut().zip(ShiftedRow::new(src, shift).skip(skip)) {
        *d |= m;
    }
}

/// Returns `true` if `src`, placed at row pixel `bit_offset`, shares a set bit with `row`.
///
/// Bits that fall outside the row are not tested.
pub(crate) fn shift_and_test(src: &[u32], row: &[u32], bit_offset: i64) -> bool {
    let (skip, start, shift) = align(bit_offset);
    let Some(dst) = row.get(start..) else {
        return false;
    };
    dst.iter()
        .zip(ShiftedRow::new(src, shift).skip(skip))
        .any(|(d, m)| d & m != 0)
}
