// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spiral search paths.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::float::trunc_i32;

/// How the placement search walks away from the canvas center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TagCloudMode {
    /// An Archimedean spiral stretched by the canvas aspect ratio.
    #[default]
    Spiral,
    /// A rectangular spiral of axis-aligned steps.
    Rect,
}

/// An infinite sequence of integer `(dx, dy)` offsets from the start point.
///
/// Both variants are pure functions of the step counter (the rectangular one
/// keeps a running position), so constructing a new path restarts the walk.
#[derive(Clone, Debug)]
pub struct SpiralPath {
    kind: Kind,
    /// Width over height of the canvas.
    aspect: f64,
    t: u64,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Archimedean,
    Rectangular { x: f64, y: f64 },
}

/// Vertical step of the rectangular spiral.
const RECT_STEP: f64 = 4.0;

impl SpiralPath {
    /// Creates the path for `mode` on a `width` × `height` canvas.
    pub fn new(mode: TagCloudMode, width: f64, height: f64) -> Self {
        match mode {
            TagCloudMode::Spiral => Self::archimedean(width, height),
            TagCloudMode::Rect => Self::rectangular(width, height),
        }
    }

    /// `f(t) = (aspect · s · cos s, s · sin s)` with `s = t / 10`.
    pub fn archimedean(width: f64, height: f64) -> Self {
        Self {
            kind: Kind::Archimedean,
            aspect: aspect(width, height),
            t: 0,
        }
    }

    /// Rings of steps `4 · aspect` wide and `4` tall, turning right, down,
    /// left, up at triangular-number step counts.
    pub fn rectangular(width: f64, height: f64) -> Self {
        Self {
            kind: Kind::Rectangular { x: 0.0, y: 0.0 },
            aspect: aspect(width, height),
            t: 0,
        }
    }
}

fn aspect(width: f64, height: f64) -> f64 {
    let a = width / height;
    if a.is_finite() && a > 0.0 { a } else { 1.0 }
}

impl Iterator for SpiralPath {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        let t = self.t as f64;
        self.t += 1;
        let (x, y) = match &mut self.kind {
            Kind::Archimedean => {
                let s = t * 0.1;
                (self.aspect * s * s.cos(), s * s.sin())
            }
            Kind::Rectangular { x, y } => {
                let dx = RECT_STEP * self.aspect;
                let side = trunc_i32((1.0 + 4.0 * t).sqrt() - 1.0) & 3;
                match side {
                    0 => *x += dx,
                    1 => *y += RECT_STEP,
                    2 => *x -= dx,
                    _ => *y -= RECT_STEP,
                }
                (*x, *y)
            }
        };
        Some((trunc_i32(x), trunc_i32(y)))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn archimedean_starts_at_center_and_grows() {
        let steps: Vec<(i32, i32)> = SpiralPath::archimedean(100.0, 100.0).take(400).collect();
        assert_eq!(steps[0], (0, 0));
        let r = |(x, y): (i32, i32)| f64::from(x).hypot(f64::from(y));
        assert!(r(steps[399]) > r(steps[100]));
    }

    #[test]
    fn archimedean_is_stretched_by_aspect() {
        // At s = 2π the point is (2π · aspect, 0).
        let n = (20.0 * core::f64::consts::PI).round() as usize;
        let wide = SpiralPath::archimedean(300.0, 100.0).nth(n).unwrap();
        let square = SpiralPath::archimedean(100.0, 100.0).nth(n).unwrap();
        assert!(wide.0 > 2 * square.0, "{wide:?} vs {square:?}");
    }

    #[test]
    fn rectangular_walks_right_down_left_up() {
        let steps: Vec<(i32, i32)> = SpiralPath::rectangular(100.0, 100.0).take(7).collect();
        // The side advances whenever 1 + 4t passes a perfect square.
        assert_eq!(
            steps,
            [(4, 0), (4, 4), (0, 4), (-4, 4), (-4, 0), (-4, -4), (0, -4)]
        );
    }

    #[test]
    fn rectangular_paths_restart_identically() {
        let a: Vec<(i32, i32)> = SpiralPath::new(TagCloudMode::Rect, 640.0, 480.0)
            .take(500)
            .collect();
        let b: Vec<(i32, i32)> = SpiralPath::new(TagCloudMode::Rect, 640.0, 480.0)
            .take(500)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_canvas_uses_unit_aspect() {
        let mut p = SpiralPath::rectangular(100.0, 0.0);
        assert_eq!(p.next(), Some((4, 0)));
    }
}
