// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-state word styling.
//!
//! Every word property is looked up in up to two [`StateStyle`]s: the `normal`
//! one and, for a hovered or selected word, the one of that state. Values are
//! either constants or callbacks evaluated with a [`StyleContext`] describing
//! the word.

use alloc::sync::Arc;
use core::fmt;

use peniko::{Brush, Color};
use vizir_text::{FontFamily, FontStyle, FontVariant, FontWeight};

/// What a computed style callback knows about the word it styles.
#[derive(Debug)]
pub struct StyleContext<'a, T> {
    /// Source row index.
    pub row: usize,
    /// Data value.
    pub value: f64,
    /// Data category.
    pub category: Option<&'a str>,
    /// The palette color of the row, or the normal fill for hover/selected fills.
    pub source_color: Color,
    /// The color-scale color of the row, when the row is color-scaled.
    pub scaled_color: Option<Color>,
    /// The normal-state value, for hover/selected callbacks.
    pub source: Option<&'a T>,
}

impl<'a, T> StyleContext<'a, T> {
    /// Creates a context without a `source` value.
    pub fn new(
        row: usize,
        value: f64,
        category: Option<&'a str>,
        source_color: Color,
        scaled_color: Option<Color>,
    ) -> Self {
        Self {
            row,
            value,
            category,
            source_color,
            scaled_color,
            source: None,
        }
    }

    fn with_source<'b>(&self, source: &'b T, source_color: Color) -> StyleContext<'b, T>
    where
        'a: 'b,
    {
        StyleContext {
            row: self.row,
            value: self.value,
            category: self.category,
            source_color,
            scaled_color: self.scaled_color,
            source: Some(source),
        }
    }
}

type StyleFn<T> = Arc<dyn Fn(&StyleContext<'_, T>) -> T + Send + Sync>;

/// A style property value: a constant or a callback.
pub enum StyleValue<T> {
    /// A fixed value.
    Constant(T),
    /// A value computed per word.
    Computed(StyleFn<T>),
}

impl<T> StyleValue<T> {
    /// Wraps a callback.
    pub fn computed(f: impl Fn(&StyleContext<'_, T>) -> T + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }
}

impl<T: Clone> StyleValue<T> {
    /// Evaluates the value for one word.
    pub fn resolve(&self, ctx: &StyleContext<'_, T>) -> T {
        match self {
            Self::Constant(v) => v.clone(),
            Self::Computed(f) => f(ctx),
        }
    }
}

impl<T: Clone> Clone for StyleValue<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(v) => Self::Constant(v.clone()),
            Self::Computed(f) => Self::Computed(f.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StyleValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T> From<T> for StyleValue<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl From<Color> for StyleValue<Brush> {
    fn from(value: Color) -> Self {
        Self::Constant(Brush::Solid(value))
    }
}

/// A font size setting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FontSize {
    /// The size the value scale picks.
    #[default]
    Auto,
    /// A fixed size in pixels.
    Pixels(f64),
    /// A percentage of a reference size.
    Percent(f64),
}

impl FontSize {
    /// Converts to pixels; `Auto` and percentages use `reference`.
    pub fn to_pixels(self, reference: f64) -> f64 {
        match self {
            Self::Auto => reference,
            Self::Pixels(px) => px,
            Self::Percent(p) => reference * p / 100.0,
        }
    }
}

/// The style settings of one interaction state. Unset properties fall back to
/// the normal state (or the built-in default for the normal state itself).
#[derive(Clone, Debug, Default)]
pub struct StateStyle {
    /// Text fill.
    pub fill: Option<StyleValue<Brush>>,
    /// Font family.
    pub font_family: Option<StyleValue<FontFamily>>,
    /// Font style.
    pub font_style: Option<StyleValue<FontStyle>>,
    /// Font variant.
    pub font_variant: Option<StyleValue<FontVariant>>,
    /// Font weight.
    pub font_weight: Option<StyleValue<FontWeight>>,
    /// Font size.
    pub font_size: Option<StyleValue<FontSize>>,
}

impl StateStyle {
    /// Sets the fill.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<StyleValue<Brush>>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<StyleValue<FontFamily>>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_font_style(mut self, style: impl Into<StyleValue<FontStyle>>) -> Self {
        self.font_style = Some(style.into());
        self
    }

    /// Sets the font variant.
    #[must_use]
    pub fn with_font_variant(mut self, variant: impl Into<StyleValue<FontVariant>>) -> Self {
        self.font_variant = Some(variant.into());
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_font_weight(mut self, weight: impl Into<StyleValue<FontWeight>>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, size: impl Into<StyleValue<FontSize>>) -> Self {
        self.font_size = Some(size.into());
        self
    }
}

/// Resolves a property for a word in some state.
///
/// A constant in `state` wins outright. Otherwise the normal value is computed
/// (or `default` when unset) and, if `state` holds a callback, handed to it as
/// `source`.
pub(crate) fn resolve_property<T: Clone>(
    normal: Option<&StyleValue<T>>,
    state: Option<&StyleValue<T>>,
    ctx: &StyleContext<'_, T>,
    default: impl FnOnce() -> T,
) -> T {
    if let Some(StyleValue::Constant(v)) = state {
        return v.clone();
    }
    let normal_value = normal.map_or_else(default, |v| v.resolve(ctx));
    match state {
        Some(v) => v.resolve(&ctx.with_source(&normal_value, ctx.source_color)),
        None => normal_value,
    }
}

/// Resolves the fill. The default is the scaled color, else the source color.
///
/// State callbacks see the normal fill's color as `source_color`.
pub(crate) fn resolve_fill(
    normal: Option<&StyleValue<Brush>>,
    state: Option<&StyleValue<Brush>>,
    ctx: &StyleContext<'_, Brush>,
) -> Brush {
    if let Some(StyleValue::Constant(v)) = state {
        return v.clone();
    }
    let normal_value = normal.map_or_else(
        || Brush::Solid(ctx.scaled_color.unwrap_or(ctx.source_color)),
        |v| v.resolve(ctx),
    );
    match state {
        Some(v) => {
            let source_color = match &normal_value {
                Brush::Solid(c) => *c,
                _ => ctx.source_color,
            };
            v.resolve(&ctx.with_source(&normal_value, source_color))
        }
        None => normal_value,
    }
}

/// Resolves the font size in pixels.
///
/// Normal percentages are relative to `auto`, hover/selected percentages to the
/// resolved normal size.
pub(crate) fn resolve_font_size(
    normal: Option<&StyleValue<FontSize>>,
    state: Option<&StyleValue<FontSize>>,
    ctx: &StyleContext<'_, FontSize>,
    auto: f64,
) -> f64 {
    let normal_px = normal.map_or(auto, |v| v.resolve(ctx).to_pixels(auto));
    match state {
        Some(v) => {
            let source = FontSize::Pixels(normal_px);
            v.resolve(&ctx.with_source(&source, ctx.source_color))
                .to_pixels(normal_px)
        }
        None => normal_px,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use peniko::color::palette::css;

    fn ctx<T>() -> StyleContext<'static, T> {
        StyleContext::new(2, 7.0, Some("fruit"), css::RED, None)
    }

    fn solid(b: &Brush) -> Option<(u8, u8, u8, u8)> {
        match b {
            Brush::Solid(c) => Some(rgba(*c)),
            _ => None,
        }
    }

    fn rgba(c: Color) -> (u8, u8, u8, u8) {
        let c = c.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn fill_defaults_to_scaled_then_source_color() {
        let plain = resolve_fill(None, None, &ctx());
        assert_eq!(solid(&plain), Some(rgba(css::RED)));

        let scaled = StyleContext::new(0, 1.0, None, css::RED, Some(css::BLUE));
        let fill = resolve_fill(None, None, &scaled);
        assert_eq!(solid(&fill), Some(rgba(css::BLUE)));
    }

    #[test]
    fn state_constants_win_outright() {
        let normal = StyleValue::from(FontWeight::NORMAL);
        let hovered = StyleValue::from(FontWeight::BOLD);
        let w = resolve_property(Some(&normal), Some(&hovered), &ctx(), || FontWeight(100));
        assert_eq!(w, FontWeight::BOLD);
        let w = resolve_property(Some(&normal), None, &ctx(), || FontWeight(100));
        assert_eq!(w, FontWeight::NORMAL);
        let w = resolve_property(None, None, &ctx(), || FontWeight(100));
        assert_eq!(w, FontWeight(100));
    }

    #[test]
    fn state_callbacks_see_the_normal_value() {
        let normal = StyleValue::computed(|c: &StyleContext<'_, FontWeight>| {
            if c.value > 5.0 { FontWeight::BOLD } else { FontWeight::NORMAL }
        });
        let hovered = StyleValue::computed(|c: &StyleContext<'_, FontWeight>| {
            FontWeight(c.source.map_or(0, |w| w.0) + 100)
        });
        let w = resolve_property(Some(&normal), Some(&hovered), &ctx(), || FontWeight::NORMAL);
        assert_eq!(w, FontWeight(800));
    }

    #[test]
    fn hovered_fill_callbacks_get_the_normal_fill_as_source_color() {
        let normal: StyleValue<Brush> = css::GREEN.into();
        let hovered = StyleValue::computed(|c: &StyleContext<'_, Brush>| {
            Brush::Solid(c.source_color.with_alpha(0.5))
        });
        let fill = resolve_fill(Some(&normal), Some(&hovered), &ctx());
        let rgba = match fill {
            Brush::Solid(c) => c.to_rgba8(),
            _ => panic!("expected a solid fill"),
        };
        let green = css::GREEN.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (green.r, green.g, green.b));
        assert!(rgba.a < 255);
    }

    #[test]
    fn font_size_percentages_have_state_dependent_references() {
        let c = ctx();
        assert_eq!(resolve_font_size(None, None, &c, 20.0), 20.0);

        let half = StyleValue::from(FontSize::Percent(50.0));
        assert_eq!(resolve_font_size(Some(&half), None, &c, 20.0), 10.0);

        let double = StyleValue::from(FontSize::Percent(200.0));
        assert_eq!(resolve_font_size(Some(&half), Some(&double), &c, 20.0), 20.0);

        let fixed = StyleValue::from(FontSize::Pixels(30.0));
        assert_eq!(resolve_font_size(Some(&half), Some(&fixed), &c, 20.0), 30.0);

        let grow = StyleValue::computed(|c: &StyleContext<'_, FontSize>| {
            let base = c.source.map_or(0.0, |s| s.to_pixels(0.0));
            FontSize::Pixels(base + 4.0)
        });
        assert_eq!(resolve_font_size(None, Some(&grow), &c, 20.0), 24.0);
    }

    #[test]
    fn computed_values_debug_without_the_closure() {
        let v: StyleValue<FontSize> = StyleValue::computed(|_| FontSize::Auto);
        assert_eq!(std::format!("{v:?}"), "Computed(..)");
        assert_eq!(
            std::format!("{:?}", StyleValue::from(FontSize::Pixels(2.0))),
            "Constant(Pixels(2.0))"
        );
    }
}
