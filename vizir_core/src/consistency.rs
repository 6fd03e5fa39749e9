// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consistency states and the dirty-state tracker.

bitflags::bitflags! {
    /// Coarse-grained categories of derived data that may be stale.
    ///
    /// Each chart declares which states it supports; invalidating an unsupported
    /// state is a no-op. The tag cloud states mirror the stages of its draw pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ConsistencyState: u32 {
        /// Visual appearance (fills) of already placed elements.
        const APPEARANCE = 1 << 0;
        /// Element bounds; for the tag cloud this means a full layout pass.
        const BOUNDS = 1 << 1;
        /// The tag cloud input rows changed.
        const DATA = 1 << 12;
        /// The tag cloud rotation angle range changed.
        const ANGLES = 1 << 13;
        /// Per-tag fonts, fills and rotations must be re-resolved.
        const TAGS = 1 << 14;
        /// The external color range must be refreshed.
        const COLOR_RANGE = 1 << 15;
        /// The color scale (or palette) changed.
        const COLOR_SCALE = 1 << 16;
        /// The value scale driving font sizes changed.
        const SCALE = 1 << 17;
    }
}

impl ConsistencyState {
    /// Every state a tag cloud understands.
    pub const TAG_CLOUD: Self = Self::APPEARANCE
        .union(Self::BOUNDS)
        .union(Self::DATA)
        .union(Self::ANGLES)
        .union(Self::TAGS)
        .union(Self::COLOR_RANGE)
        .union(Self::COLOR_SCALE)
        .union(Self::SCALE);
}

/// Tracks which [`ConsistencyState`]s are dirty for one chart.
///
/// A freshly created tracker starts with every supported state dirty, so the
/// first draw pass computes everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Consistency {
    supported: ConsistencyState,
    dirty: ConsistencyState,
}

impl Consistency {
    /// Creates a tracker for the given supported states, all initially dirty.
    #[must_use]
    pub fn new(supported: ConsistencyState) -> Self {
        Self {
            supported,
            dirty: supported,
        }
    }

    /// Returns the states this tracker accepts.
    #[must_use]
    pub fn supported(&self) -> ConsistencyState {
        self.supported
    }

    /// Marks `states` dirty.
    ///
    /// Unsupported states are ignored. Returns the states that were consistent
    /// before and are dirty now.
    pub fn invalidate(&mut self, states: ConsistencyState) -> ConsistencyState {
        let effective = states & self.supported;
        let newly_dirty = effective - self.dirty;
        self.dirty |= effective;
        newly_dirty
    }

    /// Returns `true` if any of `states` is dirty.
    #[must_use]
    pub fn has_state(&self, states: ConsistencyState) -> bool {
        self.dirty.intersects(states)
    }

    /// Clears `states`.
    pub fn mark_consistent(&mut self, states: ConsistencyState) {
        self.dirty.remove(states);
    }

    /// Returns `true` if nothing is dirty.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Returns the currently dirty states.
    #[must_use]
    pub fn dirty(&self) -> ConsistencyState {
        self.dirty
    }
}

impl Default for Consistency {
    fn default() -> Self {
        Self::new(ConsistencyState::TAG_CLOUD)
    }
}
