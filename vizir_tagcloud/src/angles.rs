// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The discrete set of word rotations.

use smallvec::SmallVec;

/// An inline list of rotation angles in degrees.
pub type Angles = SmallVec<[f64; 4]>;

/// Returns `count` angles evenly spaced from `from` to `to`, both ends included.
///
/// A single angle is `from`; a count of zero gives an empty set.
pub fn calculate_angles(from: f64, to: f64, count: usize) -> Angles {
    let range = to - from;
    let steps = if count == 1 { 1.0 } else { count as f64 - 1.0 };
    let step = range / steps;
    (0..count).map(|i| from + step * i as f64).collect()
}

/// Returns the position of `0` in `angles`, or `0` when there is none.
///
/// Rotations are handed out starting from this position so that the most
/// important word stays horizontal whenever the set allows it.
pub fn zero_index(angles: &[f64]) -> usize {
    angles.iter().position(|a| *a == 0.0).unwrap_or(0)
}

/// Returns the rotation for the word at sorted position `k`.
pub fn angle_for(angles: &[f64], zero_index: usize, k: usize) -> f64 {
    if angles.is_empty() {
        return 0.0;
    }
    angles[(k + zero_index) % angles.len()]
}
