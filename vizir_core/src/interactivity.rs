// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-point interaction state (hover / select).

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Interaction state of a single data point.
    ///
    /// A point can be hovered and selected at the same time; use
    /// [`PointState::clarify`] to pick the state whose style settings apply.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointState: u8 {
        /// The pointer is over the point.
        const HOVER = 1 << 0;
        /// The point is selected.
        const SELECT = 1 << 1;
    }
}

impl PointState {
    /// No interaction.
    pub const NORMAL: Self = Self::empty();

    /// Reduces a combined state to the one whose settings win: select, then hover.
    #[must_use]
    pub fn clarify(self) -> Self {
        if self.contains(Self::SELECT) {
            Self::SELECT
        } else if self.contains(Self::HOVER) {
            Self::HOVER
        } else {
            Self::NORMAL
        }
    }
}

/// Interaction states keyed by data row index.
///
/// Rows without an entry are in [`PointState::NORMAL`].
#[derive(Clone, Debug, Default)]
pub struct InteractivityState {
    points: HashMap<usize, PointState>,
}

impl InteractivityState {
    /// Creates an empty state map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw (possibly combined) state of `row`.
    #[must_use]
    pub fn point_state(&self, row: usize) -> PointState {
        self.points.get(&row).copied().unwrap_or(PointState::NORMAL)
    }

    /// Returns the clarified state of `row`.
    #[must_use]
    pub fn clarified(&self, row: usize) -> PointState {
        self.point_state(row).clarify()
    }

    /// Adds `state` to every row in `rows`.
    pub fn add_point_state(&mut self, state: PointState, rows: &[usize]) {
        for &row in rows {
            *self.points.entry(row).or_default() |= state;
        }
    }

    /// Removes `state` from the given rows, or from every row when `rows` is `None`.
    pub fn remove_point_state(&mut self, state: PointState, rows: Option<&[usize]>) {
        match rows {
            Some(rows) => {
                for row in rows {
                    if let Some(s) = self.points.get_mut(row) {
                        s.remove(state);
                    }
                }
            }
            None => {
                for s in self.points.values_mut() {
                    s.remove(state);
                }
            }
        }
        self.points.retain(|_, s| !s.is_empty());
    }

    /// Makes `rows` the only points carrying `state`.
    ///
    /// Points that lose `state` get `fallback` added instead (e.g. a point that
    /// is no longer selected stays hovered), unless `fallback` is empty.
    pub fn set_point_state(&mut self, state: PointState, rows: &[usize], fallback: PointState) {
        let previous: SmallVec<[usize; 8]> = self
            .points
            .iter()
            .filter(|(row, s)| s.intersects(state) && !rows.contains(*row))
            .map(|(row, _)| *row)
            .collect();
        self.remove_point_state(state, Some(previous.as_slice()));
        if !fallback.is_empty() {
            self.add_point_state(fallback, &previous);
        }
        self.add_point_state(state, rows);
    }

    /// Returns `true` if any point carries `state`.
    #[must_use]
    pub fn has_point_state(&self, state: PointState) -> bool {
        self.points.values().any(|s| s.intersects(state))
    }

    /// Returns the rows carrying `state`, sorted ascending.
    #[must_use]
    pub fn rows_with(&self, state: PointState) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .points
            .iter()
            .filter(|(_, s)| s.intersects(state))
            .map(|(row, _)| *row)
            .collect();
        rows.sort_unstable();
        rows
    }

    /// Forgets every point state.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn select_outranks_hover() {
        let s = PointState::HOVER | PointState::SELECT;
        assert_eq!(s.clarify(), PointState::SELECT);
        assert_eq!(PointState::HOVER.clarify(), PointState::HOVER);
        assert_eq!(PointState::NORMAL.clarify(), PointState::NORMAL);
    }

    #[test]
    fn add_and_remove_states() {
        let mut st = InteractivityState::new();
        st.add_point_state(PointState::HOVER, &[3, 5]);
        assert_eq!(st.clarified(3), PointState::HOVER);
        assert_eq!(st.rows_with(PointState::HOVER), alloc::vec![3, 5]);

        st.remove_point_state(PointState::HOVER, Some(&[3][..]));
        assert_eq!(st.clarified(3), PointState::NORMAL);
        assert!(st.has_point_state(PointState::HOVER), "row 5 is still hovered");

        st.remove_point_state(PointState::HOVER, None);
        assert!(!st.has_point_state(PointState::HOVER), "all hover removed");
    }

    #[test]
    fn set_point_state_replaces_and_applies_fallback() {
        let mut st = InteractivityState::new();
        st.set_point_state(PointState::SELECT, &[1, 2], PointState::NORMAL);
        st.set_point_state(PointState::SELECT, &[2, 4], PointState::HOVER);

        assert_eq!(st.rows_with(PointState::SELECT), alloc::vec![2, 4]);
        assert_eq!(st.point_state(1), PointState::HOVER);
    }
}
