// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tag cloud chart: data, styling and interactivity on top of the layout.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use smallvec::SmallVec;
use vizir_core::{Consistency, ConsistencyState, InteractivityState, PointState};
use vizir_text::{GlyphOutliner, TextStyle};

use crate::angles::{Angles, angle_for, calculate_angles, zero_index};
use crate::color::{ColorScale, OrdinalColorScale, Palette};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::font_size::FontSizeRange;
use crate::layout::{CloudLayout, LayoutDriver};
use crate::marks::TagMark;
use crate::scale::ValueScale;
use crate::spiral::TagCloudMode;
use crate::style::{
    FontSize, StateStyle, StyleContext, StyleValue, resolve_fill, resolve_font_size,
    resolve_property,
};
use crate::word::{TagRow, Word};

/// Layout options of a [`TagCloud`].
#[derive(Clone, Debug, PartialEq)]
pub struct TagCloudSettings {
    /// The placement search path.
    pub mode: TagCloudMode,
    /// First calculated angle, in degrees.
    pub from_angle: f64,
    /// Last calculated angle, in degrees.
    pub to_angle: f64,
    /// Number of calculated angles.
    pub angles_count: usize,
    /// Extra space around glyphs, in pixels.
    pub text_spacing: f64,
    /// An explicit angle set replacing the calculated one.
    pub angles: Option<Angles>,
}

impl Default for TagCloudSettings {
    fn default() -> Self {
        Self {
            mode: TagCloudMode::Spiral,
            from_angle: 0.0,
            to_angle: 90.0,
            angles_count: 2,
            text_spacing: 1.0,
            angles: None,
        }
    }
}

impl TagCloudSettings {
    /// Sets the placement mode.
    #[must_use]
    pub fn with_mode(mut self, mode: TagCloudMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the calculated angle range and count.
    #[must_use]
    pub fn with_angle_range(mut self, from: f64, to: f64, count: usize) -> Self {
        self.from_angle = from;
        self.to_angle = to;
        self.angles_count = count;
        self
    }

    /// Sets the glyph spacing.
    #[must_use]
    pub fn with_text_spacing(mut self, spacing: f64) -> Self {
        self.text_spacing = spacing;
        self
    }

    /// Uses an explicit angle set.
    #[must_use]
    pub fn with_angles(mut self, angles: impl IntoIterator<Item = f64>) -> Self {
        self.angles = Some(angles.into_iter().collect());
        self
    }
}

/// Summary statistics over the words, in placement order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TagCloudStatistics {
    /// Sum of the finite values.
    pub sum: f64,
    /// Largest value (the first word); NaN without data.
    pub max: f64,
    /// Smallest finite value (the last finite word); NaN without data.
    pub min: f64,
    /// `sum / count`.
    pub average: f64,
    /// Number of words.
    pub count: usize,
}

impl Default for TagCloudStatistics {
    fn default() -> Self {
        Self {
            sum: 0.0,
            max: f64::NAN,
            min: f64::NAN,
            average: f64::NAN,
            count: 0,
        }
    }
}

/// Everything style resolution reads.
#[derive(Clone, Debug, Default)]
struct Appearance {
    normal: StateStyle,
    hovered: StateStyle,
    selected: StateStyle,
    palette: Palette,
    color_scale: Option<ColorScale>,
    auto_color_scale: OrdinalColorScale,
}

impl Appearance {
    fn state_style(&self, state: PointState) -> Option<&StateStyle> {
        if state == PointState::SELECT {
            Some(&self.selected)
        } else if state == PointState::HOVER {
            Some(&self.hovered)
        } else {
            None
        }
    }

    fn scaled_color(&self, word: &Word) -> Option<Color> {
        match &self.color_scale {
            Some(scale) => scale.value_to_color(word.value, word.category.as_deref()),
            None => self
                .auto_color_scale
                .value_to_color(word.category.as_deref()?),
        }
    }

    fn context<'w, T>(&self, word: &'w Word) -> StyleContext<'w, T> {
        StyleContext::new(
            word.row_index,
            word.value,
            word.category.as_deref(),
            self.palette.item_at(word.row_index),
            self.scaled_color(word),
        )
    }

    fn fill(&self, word: &Word, state: PointState) -> Brush {
        let state = self.state_style(state);
        resolve_fill(
            self.normal.fill.as_ref(),
            state.and_then(|s| s.fill.as_ref()),
            &self.context(word),
        )
    }

    fn font(&self, word: &Word, state: PointState, size: f64) -> TextStyle {
        let state = self.state_style(state);
        let base = TextStyle::new(size);
        let family = resolve_property(
            self.normal.font_family.as_ref(),
            state.and_then(|s| s.font_family.as_ref()),
            &self.context(word),
            || base.font_family.clone(),
        );
        let style = resolve_property(
            self.normal.font_style.as_ref(),
            state.and_then(|s| s.font_style.as_ref()),
            &self.context(word),
            || base.font_style,
        );
        let variant = resolve_property(
            self.normal.font_variant.as_ref(),
            state.and_then(|s| s.font_variant.as_ref()),
            &self.context(word),
            || base.font_variant,
        );
        let weight = resolve_property(
            self.normal.font_weight.as_ref(),
            state.and_then(|s| s.font_weight.as_ref()),
            &self.context(word),
            || base.font_weight,
        );
        base.with_family(family)
            .with_style(style)
            .with_variant(variant)
            .with_weight(weight)
    }

    fn font_size(&self, word: &Word, state: PointState, auto: f64) -> f64 {
        let state = self.state_style(state);
        resolve_font_size(
            self.normal.font_size.as_ref(),
            state.and_then(|s| s.font_size.as_ref()),
            &self.context(word),
            auto,
        )
    }
}

/// A tag cloud chart.
///
/// Setters only invalidate [`ConsistencyState`]s; [`TagCloud::draw`] runs the
/// dirty stages in dependency order:
///
/// 1. `ANGLES`: the calculated rotation set.
/// 2. `DATA`: words from rows, scales, placement order.
/// 3. `COLOR_SCALE | SCALE`: scale domains.
/// 4. `TAGS`: fonts, fills, rotations and statistics.
/// 5. `BOUNDS`: the layout pass.
/// 6. `COLOR_RANGE`: acknowledged for an external color range.
/// 7. `APPEARANCE`: fills for the current interaction states.
#[derive(Clone, Debug)]
pub struct TagCloud {
    settings: TagCloudSettings,
    rows: Vec<TagRow>,
    /// Words in placement order.
    words: Vec<Word>,
    /// Row index → position in `words`.
    positions: Vec<usize>,
    consistency: Consistency,
    interactivity: InteractivityState,
    appearance: Appearance,
    value_scale: ValueScale,
    calculated_angles: Angles,
    statistics: TagCloudStatistics,
    layout: CloudLayout,
    driver: LayoutDriver,
    last_bounds: Option<Rect>,
}

impl TagCloud {
    /// Creates a chart over `rows` with default settings.
    pub fn new(rows: Vec<TagRow>) -> Self {
        Self {
            settings: TagCloudSettings::default(),
            rows,
            words: Vec::new(),
            positions: Vec::new(),
            consistency: Consistency::new(ConsistencyState::TAG_CLOUD),
            interactivity: InteractivityState::new(),
            appearance: Appearance::default(),
            value_scale: ValueScale::linear(),
            calculated_angles: Angles::new(),
            statistics: TagCloudStatistics::default(),
            layout: CloudLayout::default(),
            driver: LayoutDriver::new(),
            last_bounds: None,
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: TagCloudSettings) -> Self {
        self.set_settings(settings);
        self
    }

    /// Uses `driver` for layout passes.
    #[must_use]
    pub fn with_driver(mut self, driver: LayoutDriver) -> Self {
        self.driver = driver;
        self.consistency.invalidate(ConsistencyState::BOUNDS);
        self
    }

    /// Returns the settings.
    pub fn settings(&self) -> &TagCloudSettings {
        &self.settings
    }

    /// Replaces the settings, invalidating what changed.
    pub fn set_settings(&mut self, settings: TagCloudSettings) {
        let old = core::mem::replace(&mut self.settings, settings);
        let new = &self.settings;
        let mut states = ConsistencyState::empty();
        if old.mode != new.mode || old.text_spacing != new.text_spacing {
            states |= ConsistencyState::BOUNDS;
        }
        if old.from_angle != new.from_angle
            || old.to_angle != new.to_angle
            || old.angles_count != new.angles_count
        {
            states |= ConsistencyState::ANGLES;
        }
        if old.angles != new.angles {
            states |= ConsistencyState::TAGS | ConsistencyState::BOUNDS;
        }
        self.consistency.invalidate(states);
    }

    /// Replaces the data.
    pub fn set_data(&mut self, rows: Vec<TagRow>) {
        self.rows = rows;
        self.consistency.invalidate(ConsistencyState::DATA);
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[TagRow] {
        &self.rows
    }

    /// Replaces the normal state style.
    pub fn set_normal(&mut self, style: StateStyle) {
        let old = core::mem::replace(&mut self.appearance.normal, style);
        let new = &self.appearance.normal;
        let mut states = ConsistencyState::empty();
        if old.fill.is_some() || new.fill.is_some() {
            states |= ConsistencyState::APPEARANCE;
        }
        if has_font(&old) || has_font(new) {
            states |= ConsistencyState::TAGS | ConsistencyState::BOUNDS;
        }
        self.consistency.invalidate(states);
    }

    /// Sets the normal fill.
    pub fn set_fill(&mut self, fill: impl Into<StyleValue<Brush>>) {
        self.appearance.normal.fill = Some(fill.into());
        self.consistency.invalidate(ConsistencyState::APPEARANCE);
    }

    /// Sets the normal font size.
    pub fn set_font_size(&mut self, size: impl Into<StyleValue<FontSize>>) {
        self.appearance.normal.font_size = Some(size.into());
        self.consistency
            .invalidate(ConsistencyState::TAGS | ConsistencyState::BOUNDS);
    }

    /// Replaces the hovered state style.
    pub fn set_hovered(&mut self, style: StateStyle) {
        self.appearance.hovered = style;
        self.consistency.invalidate(ConsistencyState::APPEARANCE);
    }

    /// Replaces the selected state style.
    pub fn set_selected(&mut self, style: StateStyle) {
        self.appearance.selected = style;
        self.consistency.invalidate(ConsistencyState::APPEARANCE);
    }

    /// Returns the style of a state; `NORMAL` gives the normal style.
    pub fn style(&self, state: PointState) -> &StateStyle {
        self.appearance
            .state_style(state.clarify())
            .unwrap_or(&self.appearance.normal)
    }

    /// Replaces the value scale.
    pub fn set_value_scale(&mut self, scale: ValueScale) {
        self.value_scale = scale;
        self.consistency.invalidate(ConsistencyState::SCALE);
    }

    /// Returns the value scale.
    pub fn value_scale(&self) -> &ValueScale {
        &self.value_scale
    }

    /// Sets or clears the user color scale.
    pub fn set_color_scale(&mut self, scale: Option<ColorScale>) {
        self.appearance.color_scale = scale;
        self.consistency.invalidate(ConsistencyState::COLOR_SCALE);
    }

    /// Returns the user color scale.
    pub fn color_scale(&self) -> Option<&ColorScale> {
        self.appearance.color_scale.as_ref()
    }

    /// Returns the automatic color scale used without a user scale.
    pub fn auto_color_scale(&self) -> &OrdinalColorScale {
        &self.appearance.auto_color_scale
    }

    /// Replaces the palette.
    pub fn set_palette(&mut self, palette: Palette) {
        self.appearance.palette = palette;
        self.consistency.invalidate(ConsistencyState::COLOR_SCALE);
    }

    /// Returns the dirty states.
    pub fn dirty(&self) -> ConsistencyState {
        self.consistency.dirty()
    }

    /// Marks `states` dirty.
    pub fn invalidate(&mut self, states: ConsistencyState) -> ConsistencyState {
        self.consistency.invalidate(states)
    }

    // --- interactivity ---

    /// Hovers a single row, unhovering every other.
    pub fn hover(&mut self, row: usize) {
        self.hover_many(&[row]);
    }

    /// Hovers exactly `rows`.
    pub fn hover_many(&mut self, rows: &[usize]) {
        self.interactivity
            .set_point_state(PointState::HOVER, rows, PointState::NORMAL);
        self.consistency.invalidate(ConsistencyState::APPEARANCE);
    }

    /// Clears the hover state.
    pub fn unhover(&mut self) {
        self.interactivity.remove_point_state(PointState::HOVER, None);
        self.consistency.invalidate(ConsistencyState::APPEARANCE);
    }

    /// Selects `rows`, adding to the selection when `additive`.
    pub fn select(&mut self, rows: &[usize], additive: bool) {
        if additive {
            self.interactivity.add_point_state(PointState::SELECT, rows);
        } else {
            self.interactivity
                .set_point_state(PointState::SELECT, rows, PointState::NORMAL);
        }
        self.consistency.invalidate(ConsistencyState::APPEARANCE);
    }

    /// Unselects `rows`, or everything.
    pub fn unselect(&mut self, rows: Option<&[usize]>) {
        self.interactivity.remove_point_state(PointState::SELECT, rows);
        self.consistency.invalidate(ConsistencyState::APPEARANCE);
    }

    /// Returns the interaction state of every row.
    pub fn interactivity(&self) -> &InteractivityState {
        &self.interactivity
    }

    // --- drawing ---

    /// Brings everything up to date for `bounds` and returns the stages that ran.
    ///
    /// A call with nothing dirty and unchanged bounds does nothing.
    pub fn draw(&mut self, outliner: &dyn GlyphOutliner, bounds: Rect) -> ConsistencyState {
        if self.last_bounds != Some(bounds) {
            self.consistency.invalidate(ConsistencyState::BOUNDS);
            self.last_bounds = Some(bounds);
        }
        let mut ran = ConsistencyState::empty();
        self.calculate(&mut ran);

        if self.consistency.has_state(ConsistencyState::BOUNDS) {
            self.layout_words(outliner, bounds);
            ran |= ConsistencyState::BOUNDS | ConsistencyState::APPEARANCE;
            self.consistency
                .mark_consistent(ConsistencyState::BOUNDS | ConsistencyState::APPEARANCE);
        }

        if self.consistency.has_state(ConsistencyState::COLOR_RANGE) {
            ran |= ConsistencyState::COLOR_RANGE;
            self.consistency
                .mark_consistent(ConsistencyState::COLOR_RANGE);
        }

        if self.consistency.has_state(ConsistencyState::APPEARANCE) {
            self.apply_fills();
            ran |= ConsistencyState::APPEARANCE;
            self.consistency
                .mark_consistent(ConsistencyState::APPEARANCE);
        }
        ran
    }

    fn calculate(&mut self, ran: &mut ConsistencyState) {
        if self.consistency.has_state(ConsistencyState::ANGLES) {
            let s = &self.settings;
            self.calculated_angles = calculate_angles(s.from_angle, s.to_angle, s.angles_count);
            if s.angles.is_none() {
                self.consistency
                    .invalidate(ConsistencyState::TAGS | ConsistencyState::BOUNDS);
            }
            *ran |= ConsistencyState::ANGLES;
            self.consistency.mark_consistent(ConsistencyState::ANGLES);
        }

        if self.consistency.has_state(ConsistencyState::DATA) {
            self.rebuild_words();
            self.calculate_scales();
            self.words
                .sort_by(|a, b| descending_value(a.value, b.value));
            self.positions.clear();
            self.positions.resize(self.words.len(), 0);
            for (i, w) in self.words.iter().enumerate() {
                self.positions[w.row_index] = i;
            }
            self.consistency
                .invalidate(ConsistencyState::TAGS | ConsistencyState::BOUNDS);
            *ran |= ConsistencyState::DATA;
            self.consistency.mark_consistent(
                ConsistencyState::DATA | ConsistencyState::COLOR_SCALE | ConsistencyState::SCALE,
            );
        }

        let scales = ConsistencyState::COLOR_SCALE | ConsistencyState::SCALE;
        if self.consistency.has_state(scales) {
            self.calculate_scales();
            if self.consistency.has_state(ConsistencyState::COLOR_SCALE) {
                self.consistency.invalidate(
                    ConsistencyState::APPEARANCE
                        | ConsistencyState::TAGS
                        | ConsistencyState::COLOR_RANGE,
                );
            }
            if self.consistency.has_state(ConsistencyState::SCALE) {
                self.consistency.invalidate(
                    ConsistencyState::TAGS
                        | ConsistencyState::COLOR_RANGE
                        | ConsistencyState::BOUNDS,
                );
            }
            *ran |= self.consistency.dirty() & scales;
            self.consistency.mark_consistent(scales);
        }

        if self.consistency.has_state(ConsistencyState::TAGS) {
            self.resolve_tags();
            *ran |= ConsistencyState::TAGS;
            self.consistency.mark_consistent(ConsistencyState::TAGS);
        }
    }

    /// Rebuilds the words from the rows, reusing the record of every row index
    /// that existed before.
    fn rebuild_words(&mut self) {
        let n = self.rows.len();
        let mut pool: Vec<Option<Word>> = (0..n).map(|_| None).collect();
        for w in self.words.drain(..) {
            if let Some(slot) = pool.get_mut(w.row_index) {
                *slot = Some(w);
            }
        }
        for (i, (row, slot)) in self.rows.iter().zip(pool.iter_mut()).enumerate() {
            let word = match slot.take() {
                Some(mut w) => {
                    w.reuse(i, &row.x, row.value, row.category.as_deref());
                    w
                }
                None => Word::new(i, &row.x, row.value, row.category.as_deref()),
            };
            self.words.push(word);
        }
    }

    /// Re-learns the value scale and color scale domains.
    ///
    /// Without a user color scale every row feeds the automatic ordinal scale:
    /// its category, or else the key of its normal fill color. The automatic
    /// colors are the distinct normal fill colors in row order.
    fn calculate_scales(&mut self) {
        self.value_scale.start_auto_calc();
        let appearance = &mut self.appearance;
        let user_scale = appearance.color_scale.is_some();
        if let Some(scale) = appearance.color_scale.as_mut() {
            scale.start_auto_calc();
        } else {
            appearance.auto_color_scale.start_auto_calc();
        }

        let mut auto_colors: SmallVec<[Color; 10]> = SmallVec::new();
        for (i, row) in self.rows.iter().enumerate() {
            self.value_scale.extend_data_range(row.value);
            if let Some(scale) = appearance.color_scale.as_mut() {
                scale.extend_data_range(row.value, row.category.as_deref());
                continue;
            }
            let ctx = StyleContext::new(
                i,
                row.value,
                row.category.as_deref(),
                appearance.palette.item_at(i),
                None,
            );
            let color = match resolve_fill(appearance.normal.fill.as_ref(), None, &ctx) {
                Brush::Solid(c) => Some(c),
                _ => None,
            };
            if let Some(c) = color {
                auto_colors.push(c);
            }
            match (row.category.as_deref(), color) {
                (Some(category), _) => appearance.auto_color_scale.extend_data_range(category),
                (None, Some(c)) => appearance.auto_color_scale.extend_data_range(&color_key(c)),
                (None, None) => {}
            }
        }

        self.value_scale.finish_auto_calc();
        if let Some(scale) = appearance.color_scale.as_mut() {
            scale.finish_auto_calc();
        }
        if !user_scale {
            let mut distinct: SmallVec<[Color; 10]> = SmallVec::new();
            for c in auto_colors {
                if !distinct.iter().any(|d| d.to_rgba8() == c.to_rgba8()) {
                    distinct.push(c);
                }
            }
            appearance.auto_color_scale.set_auto_colors(distinct);
        }
    }

    /// Resolves fonts, fills and rotations, and recomputes the statistics.
    fn resolve_tags(&mut self) {
        let angles: &[f64] = self
            .settings
            .angles
            .as_deref()
            .unwrap_or(&self.calculated_angles);
        let zero = zero_index(angles);
        let mut sum = 0.0;
        for (k, word) in self.words.iter_mut().enumerate() {
            let state = self.interactivity.clarified(word.row_index);
            let size = word.font.font_size;
            word.font = self.appearance.font(word, state, size);
            word.fill = self.appearance.fill(word, state);
            word.rotate = angle_for(angles, zero, k);
            if word.value.is_finite() {
                sum += word.value;
            }
        }

        let count = self.words.len();
        let finite = |w: &&Word| w.value.is_finite();
        self.statistics = TagCloudStatistics {
            sum,
            max: self.words.iter().find(finite).map_or(f64::NAN, |w| w.value),
            min: self.words.iter().rev().find(finite).map_or(f64::NAN, |w| w.value),
            average: sum / count as f64,
            count,
        };
    }

    fn layout_words(&mut self, outliner: &dyn GlyphOutliner, bounds: Rect) {
        let appearance = &self.appearance;
        let interactivity = &self.interactivity;
        let value_scale = &self.value_scale;
        self.layout = self.driver.run(
            outliner,
            &mut self.words,
            bounds,
            self.settings.mode,
            self.settings.text_spacing,
            |word, range| {
                let auto = range.size_for_ratio(value_scale.transform(word.value));
                let state = interactivity.clarified(word.row_index);
                appearance.font_size(word, state, auto)
            },
        );
        self.apply_fills();
    }

    fn apply_fills(&mut self) {
        for word in &mut self.words {
            let state = self.interactivity.clarified(word.row_index);
            word.fill = self.appearance.fill(word, state);
        }
    }

    // --- output ---

    /// Returns the words in placement order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Returns the word of a data row.
    pub fn word(&self, row: usize) -> Option<&Word> {
        self.words.get(*self.positions.get(row)?)
    }

    /// Returns the result of the last layout pass.
    pub fn layout(&self) -> &CloudLayout {
        &self.layout
    }

    /// Returns the statistics of the last tags pass.
    pub fn statistics(&self) -> &TagCloudStatistics {
        &self.statistics
    }

    /// Returns the value of `row` as a percentage of the total, to two decimals.
    pub fn percent_of_total(&self, row: usize) -> Option<f64> {
        let value = self.word(row)?.value;
        Some((value / self.statistics.sum * 100.0 * 100.0).round() / 100.0)
    }

    /// Returns the viewport anchor of a placed word, e.g. for tooltips.
    pub fn position_of(&self, row: usize) -> Option<Point> {
        let word = self.word(row).filter(|w| w.placed)?;
        Some(
            self.layout
                .transform
                .apply(Point::new(f64::from(word.x), f64::from(word.y))),
        )
    }

    /// Returns one mark per drawn word, styled for its current interaction state.
    pub fn marks(&self) -> Vec<TagMark> {
        let range = self.layout.font_range;
        self.words
            .iter()
            .filter(|w| w.drawn)
            .map(|word| self.mark(word, &range))
            .collect()
    }

    fn mark(&self, word: &Word, range: &FontSizeRange) -> TagMark {
        let state = self.interactivity.clarified(word.row_index);
        let auto = range.size_for_ratio(self.value_scale.transform(word.value));
        let size = self.appearance.font_size(word, state, auto);
        TagMark {
            row_index: word.row_index,
            text: word.text.clone(),
            position: self
                .layout
                .transform
                .apply(Point::new(f64::from(word.x), f64::from(word.y))),
            rotate: word.rotate,
            scale: self.layout.transform.scale,
            font: self.appearance.font(word, state, size),
            fill: self.appearance.fill(word, state),
        }
    }
}

fn has_font(style: &StateStyle) -> bool {
    style.font_family.is_some()
        || style.font_style.is_some()
        || style.font_variant.is_some()
        || style.font_weight.is_some()
        || style.font_size.is_some()
}

/// Descending order with NaN last.
fn descending_value(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

fn color_key(c: Color) -> String {
    let c = c.to_rgba8();
    format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;
    use peniko::color::palette::css;
    use vizir_text::{FontWeight, HeuristicTextMeasurer};

    const VIEW: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    fn cloud(rows: &[(&str, f64)]) -> TagCloud {
        TagCloud::new(rows.iter().map(|(x, v)| TagRow::new(*x, *v)).collect())
    }

    fn solid(b: &Brush) -> (u8, u8, u8, u8) {
        match b {
            Brush::Solid(c) => {
                let c = c.to_rgba8();
                (c.r, c.g, c.b, c.a)
            }
            _ => panic!("expected a solid brush"),
        }
    }

    #[test]
    fn first_draw_runs_every_stage_and_second_runs_none() {
        let mut c = cloud(&[("Apple", 3.0), ("pear", 5.0)]);
        let ran = c.draw(&HeuristicTextMeasurer, VIEW);
        assert!(ran.contains(
            ConsistencyState::ANGLES
                | ConsistencyState::DATA
                | ConsistencyState::TAGS
                | ConsistencyState::BOUNDS
                | ConsistencyState::APPEARANCE
                | ConsistencyState::COLOR_RANGE
        ));
        assert!(c.dirty().is_empty());
        assert!(c.draw(&HeuristicTextMeasurer, VIEW).is_empty());
        assert_eq!(c.words()[0].text, "pear");
        assert_eq!(c.word(0).map(|w| w.text.as_str()), Some("apple"));
    }

    #[test]
    fn new_bounds_rerun_only_the_layout() {
        let mut c = cloud(&[("a", 1.0)]);
        c.draw(&HeuristicTextMeasurer, VIEW);
        let ran = c.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(ran, ConsistencyState::BOUNDS | ConsistencyState::APPEARANCE);
    }

    #[test]
    fn hover_only_touches_appearance() {
        let mut c = cloud(&[("a", 1.0), ("b", 2.0)]);
        c.set_hovered(StateStyle::default().with_fill(css::RED));
        c.draw(&HeuristicTextMeasurer, VIEW);

        c.hover(0);
        assert_eq!(c.dirty(), ConsistencyState::APPEARANCE);
        assert_eq!(c.draw(&HeuristicTextMeasurer, VIEW), ConsistencyState::APPEARANCE);
        let red = css::RED.to_rgba8();
        assert_eq!(solid(&c.word(0).unwrap().fill), (red.r, red.g, red.b, red.a));
        assert_ne!(solid(&c.word(1).unwrap().fill), (red.r, red.g, red.b, red.a));

        c.unhover();
        c.draw(&HeuristicTextMeasurer, VIEW);
        assert_ne!(solid(&c.word(0).unwrap().fill), (red.r, red.g, red.b, red.a));
    }

    #[test]
    fn selection_outranks_hover_in_marks() {
        let mut c = cloud(&[("a", 1.0)]);
        c.set_hovered(StateStyle::default().with_font_weight(FontWeight(500)));
        c.set_selected(StateStyle::default().with_font_weight(FontWeight::BOLD));
        c.draw(&HeuristicTextMeasurer, VIEW);
        c.hover(0);
        c.select(&[0], false);
        let marks = c.marks();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].font.font_weight, FontWeight::BOLD);
        c.unselect(None);
        assert_eq!(c.marks()[0].font.font_weight, FontWeight(500));
    }

    #[test]
    fn default_fills_come_from_the_palette() {
        let mut c = cloud(&[("a", 1.0), ("b", 2.0)]);
        c.set_palette(Palette::new([css::RED, css::BLUE]));
        c.draw(&HeuristicTextMeasurer, VIEW);
        let blue = css::BLUE.to_rgba8();
        assert_eq!(solid(&c.word(1).unwrap().fill), (blue.r, blue.g, blue.b, blue.a));
        assert_eq!(c.auto_color_scale().colors().len(), 2);
    }

    #[test]
    fn categories_share_colors() {
        let rows = vec![
            TagRow::new("a", 3.0).with_category("x"),
            TagRow::new("b", 2.0).with_category("y"),
            TagRow::new("c", 1.0).with_category("x"),
        ];
        let mut c = TagCloud::new(rows);
        c.draw(&HeuristicTextMeasurer, VIEW);
        let a = solid(&c.word(0).unwrap().fill);
        let b = solid(&c.word(1).unwrap().fill);
        let cc = solid(&c.word(2).unwrap().fill);
        assert_eq!(a, cc, "same category, same color");
        assert_ne!(a, b);
        assert_eq!(c.auto_color_scale().categories(), ["x", "y"]);
    }

    #[test]
    fn value_scale_change_reruns_sizing_and_layout() {
        let mut c = cloud(&[("a", 1.0), ("b", 10.0), ("c", 100.0)]);
        c.draw(&HeuristicTextMeasurer, VIEW);
        let linear_size = c.word(1).unwrap().size();

        c.set_value_scale(ValueScale::log());
        assert_eq!(c.dirty(), ConsistencyState::SCALE);
        let ran = c.draw(&HeuristicTextMeasurer, VIEW);
        assert!(ran.contains(
            ConsistencyState::SCALE
                | ConsistencyState::TAGS
                | ConsistencyState::COLOR_RANGE
                | ConsistencyState::BOUNDS
        ));
        assert!(!ran.intersects(ConsistencyState::DATA | ConsistencyState::COLOR_SCALE));
        assert!(c.dirty().is_empty());
        assert_eq!(c.value_scale().kind(), crate::ValueScaleKind::Log);
        assert!(
            c.word(1).unwrap().size() > linear_size,
            "10 sits halfway on a log scale over 1..100"
        );
    }

    #[test]
    fn color_scale_change_recolors_without_relayout() {
        let rows = vec![
            TagRow::new("a", 3.0).with_category("x"),
            TagRow::new("b", 2.0).with_category("y"),
            TagRow::new("c", 1.0).with_category("x"),
        ];
        let mut c = TagCloud::new(rows);
        c.draw(&HeuristicTextMeasurer, VIEW);
        let before: Vec<(i32, i32)> = c.words().iter().map(|w| (w.x, w.y)).collect();

        c.set_color_scale(Some(
            OrdinalColorScale::new()
                .with_colors([css::RED, css::BLUE])
                .into(),
        ));
        assert_eq!(c.dirty(), ConsistencyState::COLOR_SCALE);
        let ran = c.draw(&HeuristicTextMeasurer, VIEW);
        assert!(ran.contains(
            ConsistencyState::COLOR_SCALE
                | ConsistencyState::APPEARANCE
                | ConsistencyState::TAGS
                | ConsistencyState::COLOR_RANGE
        ));
        assert!(!ran.contains(ConsistencyState::BOUNDS));
        let after: Vec<(i32, i32)> = c.words().iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn ordinal_color_scale_colors_by_category() {
        let rows = vec![
            TagRow::new("a", 3.0).with_category("x"),
            TagRow::new("b", 2.0).with_category("y"),
            TagRow::new("c", 1.0).with_category("x"),
        ];
        let mut c = TagCloud::new(rows);
        c.set_color_scale(Some(
            OrdinalColorScale::new()
                .with_colors([css::RED, css::BLUE])
                .into(),
        ));
        c.draw(&HeuristicTextMeasurer, VIEW);
        let (red, blue) = (css::RED.to_rgba8(), css::BLUE.to_rgba8());
        let red = (red.r, red.g, red.b, red.a);
        let blue = (blue.r, blue.g, blue.b, blue.a);
        assert_eq!(solid(&c.word(0).unwrap().fill), red);
        assert_eq!(solid(&c.word(1).unwrap().fill), blue);
        assert_eq!(solid(&c.word(2).unwrap().fill), red, "same category, same color");
        assert!(c.color_scale().is_some());
    }

    #[test]
    fn linear_color_scale_colors_by_value() {
        let mut c = cloud(&[("low", 1.0), ("mid", 5.0), ("high", 9.0)]);
        c.set_color_scale(Some(
            crate::LinearColorScale::new([css::RED, css::BLUE]).into(),
        ));
        c.draw(&HeuristicTextMeasurer, VIEW);
        let (red, blue) = (css::RED.to_rgba8(), css::BLUE.to_rgba8());
        let red = (red.r, red.g, red.b, red.a);
        let blue = (blue.r, blue.g, blue.b, blue.a);
        let low = solid(&c.word(0).unwrap().fill);
        let mid = solid(&c.word(1).unwrap().fill);
        assert_eq!(low, red, "the domain minimum takes the first stop");
        assert_eq!(solid(&c.word(2).unwrap().fill), blue, "the maximum takes the last");
        assert_ne!(mid, red);
        assert_ne!(mid, blue);
    }

    #[test]
    fn statistics_and_percentages() {
        let mut c = cloud(&[("a", 1.0), ("b", 3.0), ("c", f64::NAN), ("d", 2.0)]);
        c.draw(&HeuristicTextMeasurer, VIEW);
        let s = *c.statistics();
        assert_eq!((s.sum, s.max, s.min, s.count), (6.0, 3.0, 1.0, 4));
        assert_eq!(s.average, 1.5);
        assert_eq!(c.percent_of_total(1), Some(50.0));
        assert_eq!(c.percent_of_total(0), Some(16.67));
        assert_eq!(c.words().last().map(|w| w.text.as_str()), Some("c"), "NaN sorts last");
        assert_eq!(c.percent_of_total(9), None);
    }

    #[test]
    fn words_are_pooled_across_data_changes() {
        let mut c = cloud(&[("a", 1.0), ("b", 2.0)]);
        c.draw(&HeuristicTextMeasurer, VIEW);
        c.set_data(vec![TagRow::new("Z", 5.0)]);
        let ran = c.draw(&HeuristicTextMeasurer, VIEW);
        assert!(ran.contains(ConsistencyState::DATA | ConsistencyState::BOUNDS));
        assert_eq!(c.words().len(), 1);
        assert_eq!(c.word(0).unwrap().text, "z");
        assert!(c.word(1).is_none());
    }

    #[test]
    fn explicit_angles_override_the_calculated_set() {
        let mut c = cloud(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);
        c.set_settings(TagCloudSettings::default().with_angles([45.0, -45.0]));
        c.draw(&HeuristicTextMeasurer, VIEW);
        let rot: Vec<f64> = c.words().iter().map(|w| w.rotate).collect();
        assert_eq!(rot, [45.0, -45.0, 45.0]);

        c.set_settings(TagCloudSettings::default().with_angle_range(0.0, 10.0, 3));
        assert!(c.dirty().contains(ConsistencyState::ANGLES | ConsistencyState::TAGS));
        c.draw(&HeuristicTextMeasurer, VIEW);
        let rot: Vec<f64> = c.words().iter().map(|w| w.rotate).collect();
        assert_eq!(rot, [0.0, 5.0, 10.0]);
    }

    #[test]
    fn font_size_override_applies_to_layout() {
        let mut c = cloud(&[("a", 3.0), ("b", 1.0)]);
        c.set_font_size(FontSize::Pixels(17.0));
        c.draw(&HeuristicTextMeasurer, VIEW);
        assert!(c.words().iter().all(|w| w.size() == 17.0));
    }

    #[test]
    fn positions_follow_the_cloud_transform() {
        let mut c = cloud(&[("solo", 1.0)]);
        c.draw(&HeuristicTextMeasurer, Rect::new(10.0, 10.0, 410.0, 310.0));
        assert_eq!(c.position_of(0), Some(Point::new(210.0, 160.0)));
        assert_eq!(c.marks()[0].position, Point::new(210.0, 160.0));
    }
}
