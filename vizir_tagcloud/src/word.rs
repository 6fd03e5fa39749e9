// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input rows and the per-word layout record.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use peniko::Brush;
use vizir_text::TextStyle;

use crate::sprite::Sprite;

/// One input data row: the word, its weight and an optional category.
#[derive(Clone, Debug, PartialEq)]
pub struct TagRow {
    /// The word as authored (it is lower-cased for display).
    pub x: String,
    /// The weight driving font size and (for linear color scales) color.
    pub value: f64,
    /// Optional category used by ordinal color scales.
    pub category: Option<String>,
}

impl TagRow {
    /// Creates a row without a category.
    pub fn new(x: impl Into<String>, value: f64) -> Self {
        Self {
            x: x.into(),
            value,
            category: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Zips parallel columns into rows.
    ///
    /// `categories` may be empty; otherwise every column must have the same length.
    pub fn from_columns<S: AsRef<str>>(
        words: &[S],
        values: &[f64],
        categories: &[S],
    ) -> Result<Vec<Self>, DataError> {
        if words.len() != values.len() {
            return Err(DataError::ColumnLengthMismatch {
                column: "value",
                expected: words.len(),
                found: values.len(),
            });
        }
        if !categories.is_empty() && categories.len() != words.len() {
            return Err(DataError::ColumnLengthMismatch {
                column: "category",
                expected: words.len(),
                found: categories.len(),
            });
        }
        Ok(words
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (w, v))| Self {
                x: String::from(w.as_ref()),
                value: *v,
                category: categories.get(i).map(|c| String::from(c.as_ref())),
            })
            .collect())
    }
}

/// Errors from building tag cloud input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataError {
    /// A column does not have as many entries as the word column.
    ColumnLengthMismatch {
        /// The offending column.
        column: &'static str,
        /// The length of the word column.
        expected: usize,
        /// The length of the offending column.
        found: usize,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnLengthMismatch {
                column,
                expected,
                found,
            } => write!(
                f,
                "column `{column}` has {found} entries, expected {expected}"
            ),
        }
    }
}

impl core::error::Error for DataError {}

/// A word of the cloud with its resolved style and layout geometry.
///
/// Words are pooled by row index: re-reading data overwrites the existing
/// record of a row instead of allocating a new one. Geometry is in canvas
/// pixels; after a successful placement `x`/`y` are relative to the canvas
/// center and `x0..x1`/`y0..y1` are the sprite box relative to `(x, y)`.
#[derive(Clone, Debug)]
pub struct Word {
    /// Lower-cased display text.
    pub text: String,
    /// Data value.
    pub value: f64,
    /// Data category.
    pub category: Option<String>,
    /// Index of the source row.
    pub row_index: usize,
    /// Resolved font; `font_size` is the layout size in pixels.
    pub font: TextStyle,
    /// Resolved fill.
    pub fill: Brush,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Center x.
    pub x: i32,
    /// Center y.
    pub y: i32,
    /// Left edge of the sprite box relative to `x`.
    pub x0: i32,
    /// Top edge of the sprite box relative to `y`.
    pub y0: i32,
    /// Right edge of the sprite box relative to `x`.
    pub x1: i32,
    /// Bottom edge of the sprite box relative to `y`.
    pub y1: i32,
    /// Sprite box width; always a multiple of 32.
    pub width: i32,
    /// Sprite box height before trimming.
    pub height: i32,
    /// Horizontal offset of the box in the sprite atlas.
    pub xoff: i32,
    /// Vertical offset of the box in the sprite atlas.
    pub yoff: i32,
    /// The glyph bitmask, present only between rasterization and placement.
    pub sprite: Option<Sprite>,
    /// `false` when rasterization left no covered pixels.
    pub has_text: bool,
    /// `true` when the last layout pass placed the word.
    pub placed: bool,
    /// `true` when the word is placed and lies inside the viewport.
    pub drawn: bool,
}

impl Word {
    /// Creates a word for `row_index` with default style and empty geometry.
    pub fn new(row_index: usize, text: &str, value: f64, category: Option<&str>) -> Self {
        Self {
            text: text.to_lowercase(),
            value,
            category: category.map(String::from),
            row_index,
            font: TextStyle::default(),
            fill: Brush::default(),
            rotate: 0.0,
            x: 0,
            y: 0,
            x0: 0,
            y0: 0,
            x1: 0,
            y1: 0,
            width: 0,
            height: 0,
            xoff: 0,
            yoff: 0,
            sprite: None,
            has_text: false,
            placed: false,
            drawn: false,
        }
    }

    /// Overwrites the data fields in place, keeping the allocation of `text`.
    pub(crate) fn reuse(&mut self, row_index: usize, text: &str, value: f64, category: Option<&str>) {
        self.row_index = row_index;
        self.text.clear();
        self.text.push_str(&text.to_lowercase());
        self.value = value;
        self.category = category.map(String::from);
        self.sprite = None;
        self.has_text = false;
        self.placed = false;
        self.drawn = false;
    }

    /// Records the atlas box of a freshly rasterized word.
    pub(crate) fn set_box(&mut self, width: i32, height: i32, xoff: i32, yoff: i32) {
        self.width = width;
        self.height = height;
        self.xoff = xoff;
        self.yoff = yoff;
        self.x1 = width >> 1;
        self.y1 = height >> 1;
        self.x0 = -self.x1;
        self.y0 = -self.y1;
    }

    /// Returns the font size in pixels.
    pub fn size(&self) -> f64 {
        self.font.font_size
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    #[test]
    fn words_are_lower_cased() {
        let w = Word::new(3, "Rust ÄÖ", 2.0, Some("Lang"));
        assert_eq!(w.text, "rust äö");
        assert_eq!(w.category.as_deref(), Some("Lang"));
    }

    #[test]
    fn reuse_overwrites_in_place() {
        let mut w = Word::new(0, "old", 1.0, None);
        w.drawn = true;
        w.reuse(5, "NEW", 9.0, Some("c"));
        assert_eq!((w.row_index, w.text.as_str(), w.value), (5, "new", 9.0));
        assert!(!w.drawn, "pooled words start undrawn");
    }

    #[test]
    fn reused_words_lower_case_like_fresh_ones() {
        // A word-final capital sigma lowers to the final form.
        let fresh = Word::new(0, "ΟΔΟΣ", 1.0, None);
        assert_eq!(fresh.text, "οδος");
        let mut pooled = Word::new(1, "x", 1.0, None);
        pooled.reuse(0, "ΟΔΟΣ", 1.0, None);
        assert_eq!(pooled.text, fresh.text);
    }

    #[test]
    fn set_box_centers_geometry() {
        let mut w = Word::new(0, "a", 1.0, None);
        w.set_box(64, 21, 32, 8);
        assert_eq!((w.x0, w.x1, w.y0, w.y1), (-32, 32, -10, 10));
        assert_eq!((w.xoff, w.yoff), (32, 8));
    }

    #[test]
    fn columns_must_line_up() {
        let rows = TagRow::from_columns(&["a", "b"][..], &[1.0, 2.0], &["x", "y"][..]).unwrap();
        assert_eq!(rows[1], TagRow::new("b", 2.0).with_category("y"));

        let no_cats: [&str; 0] = [];
        let rows = TagRow::from_columns(&["a"][..], &[1.0], &no_cats[..]).unwrap();
        assert_eq!(rows, vec![TagRow::new("a", 1.0)]);

        let err = TagRow::from_columns(&["a", "b"][..], &[1.0], &no_cats[..]).unwrap_err();
        assert_eq!(
            err,
            DataError::ColumnLengthMismatch {
                column: "value",
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            std::format!("{err}"),
            "column `value` has 1 entries, expected 2"
        );
    }
}
