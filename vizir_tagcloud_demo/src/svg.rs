// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `vizir_tagcloud_demo`.

use kurbo::{Affine, Rect};
use peniko::Brush;
use vizir_tagcloud::TagMark;
use vizir_text::GlyphOutliner;

/// How words are written out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WordStyle {
    /// `<text>` elements rendered with the viewer's fonts.
    Text,
    /// The exact glyph outlines the layout packed.
    Outlines,
}

#[derive(Debug)]
pub(crate) struct SvgScene {
    view_box: Rect,
    out: String,
}

impl SvgScene {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            out: String::new(),
        }
    }

    pub(crate) fn push_frame(&mut self, rect: Rect, stroke: &Brush) {
        self.out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        ));
        write_paint_attr(&mut self.out, "stroke", stroke);
        self.out.push_str(r#" stroke-dasharray="4 3"/>"#);
        self.out.push('\n');
    }

    pub(crate) fn push_marks(
        &mut self,
        marks: &[TagMark],
        style: WordStyle,
        outliner: &dyn GlyphOutliner,
    ) {
        for mark in marks {
            match style {
                WordStyle::Text => self.push_text(mark),
                WordStyle::Outlines => self.push_outline(mark, outliner),
            }
        }
    }

    fn push_text(&mut self, mark: &TagMark) {
        let [a, b, c, d, e, f] = mark.text_transform().as_coeffs();
        let font = &mark.font;
        self.out.push_str(&format!(
            r#"<text transform="matrix({a} {b} {c} {d} {e} {f})" text-anchor="middle" font-size="{}" font-family="{}" font-weight="{}" font-style="{}" font-variant="{}""#,
            font.font_size,
            escape_xml(font.font_family.as_css_family()),
            font.font_weight.0,
            font.font_style.as_css(),
            font.font_variant.as_css(),
        ));
        write_paint_attr(&mut self.out, "fill", &mark.fill);
        self.out.push('>');
        self.out.push_str(&escape_xml(&mark.text));
        self.out.push_str("</text>\n");
    }

    fn push_outline(&mut self, mark: &TagMark, outliner: &dyn GlyphOutliner) {
        let advance = outliner.measure(&mark.text, &mark.font).advance_width;
        let mut path = outliner.outline(&mark.text, &mark.font);
        path.apply_affine(mark.text_transform() * Affine::translate((-advance / 2.0, 0.0)));
        self.out.push_str(&format!(r#"<path d="{}""#, path.to_svg()));
        write_paint_attr(&mut self.out, "fill", &mark.fill);
        self.out.push_str("/>\n");
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let v = self.view_box;
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            v.x0,
            v.y0,
            v.width(),
            v.height(),
            v.width(),
            v.height()
        ));
        out.push('\n');
        out.push_str(&self.out);
        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
