// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value scales: normalize word values into `0..=1` ratios.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// The mapping used by a [`ValueScale`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValueScaleKind {
    /// `(v - min) / (max - min)`.
    #[default]
    Linear,
    /// `(ln v - ln min) / (ln max - ln min)` over positive values.
    Log,
}

/// A continuous value → ratio scale with optional auto-calculated domain.
///
/// Without an explicit domain the scale learns one from the data through
/// [`ValueScale::start_auto_calc`], [`ValueScale::extend_data_range`] and
/// [`ValueScale::finish_auto_calc`]. Non-finite values (and non-positive ones for
/// [`ValueScaleKind::Log`]) are ignored while learning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueScale {
    kind: ValueScaleKind,
    explicit: Option<(f64, f64)>,
    auto: Option<(f64, f64)>,
    pending: Option<(f64, f64)>,
}

impl ValueScale {
    /// Creates a linear scale.
    pub fn linear() -> Self {
        Self::default()
    }

    /// Creates a log scale.
    pub fn log() -> Self {
        Self {
            kind: ValueScaleKind::Log,
            ..Self::default()
        }
    }

    /// Fixes the domain instead of learning it from the data.
    #[must_use]
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.explicit = Some((min, max));
        self
    }

    /// Returns the scale kind.
    pub fn kind(&self) -> ValueScaleKind {
        self.kind
    }

    /// Returns the effective domain: the explicit one, else the learned one.
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.explicit.or(self.auto)
    }

    /// Starts learning a domain, forgetting the previous one.
    pub fn start_auto_calc(&mut self) {
        self.pending = None;
    }

    /// Feeds one data value.
    pub fn extend_data_range(&mut self, v: f64) {
        if !v.is_finite() || (self.kind == ValueScaleKind::Log && v <= 0.0) {
            return;
        }
        self.pending = Some(match self.pending {
            Some((min, max)) => (min.min(v), max.max(v)),
            None => (v, v),
        });
    }

    /// Commits the learned domain.
    pub fn finish_auto_calc(&mut self) {
        self.auto = self.pending.take();
        if self.explicit.is_none() {
            match self.auto {
                Some((min, max)) if min == max => {
                    log::debug!("value scale domain collapsed at {min}; ratios fall back to 0.5");
                }
                None => log::debug!("value scale saw no usable values"),
                _ => {}
            }
        }
    }

    /// Maps `v` to a ratio; `0..=1` inside the domain.
    ///
    /// A collapsed (or missing) domain maps every value to `0.5`. Log scales map
    /// non-positive values to `0`.
    pub fn transform(&self, v: f64) -> f64 {
        let Some((d0, d1)) = self.domain() else {
            return 0.5;
        };
        match self.kind {
            ValueScaleKind::Linear => {
                let denom = d1 - d0;
                if denom == 0.0 {
                    return 0.5;
                }
                (v - d0) / denom
            }
            ValueScaleKind::Log => {
                if v <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
                    return 0.0;
                }
                let (l0, l1) = (d0.ln(), d1.ln());
                let denom = l1 - l0;
                if denom == 0.0 {
                    return 0.5;
                }
                (v.ln() - l0) / denom
            }
        }
    }
}
