// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal incremental runtime core for `VizIR` charts.
//!
//! Charts in `VizIR` recompute derived data lazily. Setters only *invalidate*
//! coarse-grained consistency states, and the next draw pass walks its stages
//! in a fixed order, recomputing whatever is dirty and clearing it:
//!
//! - [`ConsistencyState`] names the stale categories (data, scales, bounds, ...).
//! - [`Consistency`] is the dirty-state tracker shared by every chart.
//! - [`PointState`] and [`InteractivityState`] record which data points are hovered
//!   or selected, so that style resolution can pick the matching state settings.
//!
//! A stage may dirty further states while the pass is running. Later stages test
//! the tracker freshly, so those states are honored within the same pass.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod consistency;
mod interactivity;

pub use consistency::{Consistency, ConsistencyState};
pub use interactivity::{InteractivityState, PointState};
