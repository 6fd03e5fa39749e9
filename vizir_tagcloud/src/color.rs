// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palettes and color scales.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::float::trunc_i32;
use crate::scale::ValueScale;

/// The default series colors.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::from_rgb8(0x64, 0xb5, 0xf6),
    Color::from_rgb8(0x19, 0x76, 0xd2),
    Color::from_rgb8(0xef, 0x6c, 0x00),
    Color::from_rgb8(0xff, 0xd5, 0x4f),
    Color::from_rgb8(0x45, 0x5a, 0x64),
    Color::from_rgb8(0x96, 0xa6, 0xa6),
    Color::from_rgb8(0xdd, 0x2c, 0x00),
    Color::from_rgb8(0x00, 0x83, 0x8f),
    Color::from_rgb8(0x00, 0xbf, 0xa5),
    Color::from_rgb8(0xff, 0xa0, 0x00),
];

/// A list of distinct colors handed out by row index, wrapping around.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: SmallVec<[Color; 10]>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}

impl Palette {
    /// Creates a palette from `colors`.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    /// Returns the color for `index`; an empty palette yields black.
    pub fn item_at(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        self.colors[index % self.colors.len()]
    }

    /// Returns the number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if the palette has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Maps categories to colors by first-seen position.
#[derive(Clone, Debug, Default)]
pub struct OrdinalColorScale {
    categories: Vec<String>,
    index: HashMap<String, usize>,
    colors: SmallVec<[Color; 10]>,
    auto_colors: SmallVec<[Color; 10]>,
    fixed_categories: bool,
}

impl OrdinalColorScale {
    /// Creates a scale that learns its categories from the data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the colors categories cycle through.
    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Fixes the category list; data no longer adds categories.
    #[must_use]
    pub fn with_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories.clear();
        self.index.clear();
        for c in categories {
            self.push_category(c.into());
        }
        self.fixed_categories = true;
        self
    }

    fn push_category(&mut self, category: String) {
        if !self.index.contains_key(&category) {
            self.index.insert(category.clone(), self.categories.len());
            self.categories.push(category);
        }
    }

    /// Returns the categories in order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the effective colors: the configured ones, else the automatic ones,
    /// else the default palette.
    pub fn colors(&self) -> &[Color] {
        if !self.colors.is_empty() {
            &self.colors
        } else if !self.auto_colors.is_empty() {
            &self.auto_colors
        } else {
            &DEFAULT_PALETTE
        }
    }

    /// Sets the colors used when none are configured.
    pub fn set_auto_colors(&mut self, colors: impl IntoIterator<Item = Color>) {
        self.auto_colors = colors.into_iter().collect();
    }

    /// Starts learning categories.
    pub fn start_auto_calc(&mut self) {
        if !self.fixed_categories {
            self.categories.clear();
            self.index.clear();
        }
    }

    /// Feeds one category.
    pub fn extend_data_range(&mut self, category: &str) {
        if !self.fixed_categories && !self.index.contains_key(category) {
            self.push_category(String::from(category));
        }
    }

    /// Returns the color of `category`, or `None` for unknown categories.
    pub fn value_to_color(&self, category: &str) -> Option<Color> {
        let i = *self.index.get(category)?;
        let colors = self.colors();
        Some(colors[i % colors.len()])
    }
}

/// Interpolates evenly spaced color stops over a value domain.
#[derive(Clone, Debug)]
pub struct LinearColorScale {
    colors: SmallVec<[Color; 4]>,
    scale: ValueScale,
}

impl LinearColorScale {
    /// Creates a scale through `colors`; the domain is learned from the data.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
            scale: ValueScale::linear(),
        }
    }

    /// Fixes the value domain.
    #[must_use]
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.scale = self.scale.with_domain(min, max);
        self
    }

    /// Returns the color stops.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Returns the underlying value scale.
    pub fn scale(&self) -> &ValueScale {
        &self.scale
    }

    /// Starts learning the domain.
    pub fn start_auto_calc(&mut self) {
        self.scale.start_auto_calc();
    }

    /// Feeds one value.
    pub fn extend_data_range(&mut self, value: f64) {
        self.scale.extend_data_range(value);
    }

    /// Commits the learned domain.
    pub fn finish_auto_calc(&mut self) {
        self.scale.finish_auto_calc();
    }

    /// Returns the interpolated color of `value`, clamped to the end stops.
    pub fn value_to_color(&self, value: f64) -> Option<Color> {
        let (first, last) = (self.colors.first()?, self.colors.last()?);
        if !value.is_finite() {
            return None;
        }
        let ratio = self.scale.transform(value);
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let segments = self.colors.len() - 1;
        if segments == 0 || ratio == 0.0 {
            return Some(*first);
        }
        if ratio == 1.0 {
            return Some(*last);
        }
        let pos = ratio * segments as f64;
        let i = usize::try_from(trunc_i32(pos.floor())).unwrap_or(0).min(segments - 1);
        Some(lerp(self.colors[i], self.colors[i + 1], pos - i as f64))
    }
}

fn lerp(a: Color, b: Color, t: f64) -> Color {
    let mut out = [0.0_f32; 4];
    for (o, (x, y)) in out.iter_mut().zip(a.components.iter().zip(b.components)) {
        let v = f64::from(*x) + (f64::from(y) - f64::from(*x)) * t;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "color components are stored as f32"
        )]
        {
            *o = v as f32;
        }
    }
    Color::new(out)
}

/// A word color scale: ordinal scales key on category, linear ones on value.
#[derive(Clone, Debug)]
pub enum ColorScale {
    /// Category keyed.
    Ordinal(OrdinalColorScale),
    /// Value keyed.
    Linear(LinearColorScale),
}

impl From<OrdinalColorScale> for ColorScale {
    fn from(value: OrdinalColorScale) -> Self {
        Self::Ordinal(value)
    }
}

impl From<LinearColorScale> for ColorScale {
    fn from(value: LinearColorScale) -> Self {
        Self::Linear(value)
    }
}

impl ColorScale {
    /// Starts a learning pass.
    pub fn start_auto_calc(&mut self) {
        match self {
            Self::Ordinal(s) => s.start_auto_calc(),
            Self::Linear(s) => s.start_auto_calc(),
        }
    }

    /// Feeds one row.
    pub fn extend_data_range(&mut self, value: f64, category: Option<&str>) {
        match self {
            Self::Ordinal(s) => {
                if let Some(c) = category {
                    s.extend_data_range(c);
                }
            }
            Self::Linear(s) => s.extend_data_range(value),
        }
    }

    /// Ends a learning pass.
    pub fn finish_auto_calc(&mut self) {
        if let Self::Linear(s) = self {
            s.finish_auto_calc();
        }
    }

    /// Returns the color of a row.
    pub fn value_to_color(&self, value: f64, category: Option<&str>) -> Option<Color> {
        match self {
            Self::Ordinal(s) => s.value_to_color(category?),
            Self::Linear(s) => s.value_to_color(value),
        }
    }
}
