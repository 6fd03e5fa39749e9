// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag cloud demos for `vizir_tagcloud`.
mod svg;

use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};
use vizir_tagcloud::{
    ColorScale, FontSize, LinearColorScale, StateStyle, StyleValue, TagCloud, TagCloudMode,
    TagCloudSettings, TagRow, ValueScale,
};
use vizir_text::{FontStyle, FontWeight, GlyphOutliner};

use svg::{SvgScene, WordStyle};

const VIEW: Rect = Rect::new(0.0, 0.0, 640.0, 400.0);

const LANGUAGES: [(&str, f64, &str); 24] = [
    ("Rust", 96.0, "systems"),
    ("Python", 88.0, "scripting"),
    ("TypeScript", 81.0, "web"),
    ("Go", 64.0, "systems"),
    ("Kotlin", 52.0, "jvm"),
    ("Swift", 47.0, "apple"),
    ("Zig", 41.0, "systems"),
    ("Elixir", 37.0, "functional"),
    ("Haskell", 33.0, "functional"),
    ("Scala", 30.0, "jvm"),
    ("Ruby", 28.0, "scripting"),
    ("Lua", 25.0, "scripting"),
    ("OCaml", 22.0, "functional"),
    ("Dart", 20.0, "web"),
    ("Julia", 18.0, "scientific"),
    ("Clojure", 16.0, "jvm"),
    ("Nim", 14.0, "systems"),
    ("Erlang", 12.0, "functional"),
    ("Fortran", 10.0, "scientific"),
    ("Elm", 9.0, "web"),
    ("Crystal", 8.0, "scripting"),
    ("Racket", 6.0, "functional"),
    ("Objective-C", 5.0, "apple"),
    ("COBOL", 3.0, "legacy"),
];

struct Section {
    title: &'static str,
    notes: String,
    svg: String,
}

fn main() {
    let outliner = demo_outliner();
    let outliner = outliner.as_ref();
    let sections = vec![
        spiral_demo(outliner),
        rectangular_demo(outliner),
        categories_demo(outliner),
        color_scale_demo(outliner),
        crowded_demo(outliner),
    ];

    let html = render_report("VizIR tag cloud demo", &sections);
    std::fs::write("vizir_tagcloud_demo.html", html).expect("write vizir_tagcloud_demo.html");
    println!("wrote vizir_tagcloud_demo.html");
}

fn demo_outliner() -> Box<dyn GlyphOutliner> {
    #[cfg(feature = "parley")]
    {
        Box::new(vizir_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Box::new(vizir_text::HeuristicTextMeasurer)
    }
}

fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", svg::escape_xml(title)));
    out.push_str("<style>body{font-family:sans-serif;margin:2em}section{margin-bottom:3em}</style>");
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", svg::escape_xml(title)));
    for s in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", svg::escape_xml(s.title)));
        out.push_str(&format!("<p>{}</p>\n", svg::escape_xml(&s.notes)));
        out.push_str(&s.svg);
        out.push_str("</section>\n");
    }
    out.push_str("</body></html>\n");
    out
}

fn language_rows(with_categories: bool) -> Vec<TagRow> {
    LANGUAGES
        .iter()
        .map(|(x, v, c)| {
            let row = TagRow::new(*x, *v);
            if with_categories {
                row.with_category(*c)
            } else {
                row
            }
        })
        .collect()
}

fn render(cloud: &mut TagCloud, style: WordStyle, outliner: &dyn GlyphOutliner) -> (String, String) {
    let ran = cloud.draw(outliner, VIEW);
    let layout = cloud.layout();
    let notes = format!(
        "stages {ran:?}; {} placed, {} failed; font {}..{}px; scale {:.3}",
        layout.placed,
        layout.failed,
        layout.font_range.min,
        layout.font_range.max,
        layout.transform.scale,
    );

    let mut scene = SvgScene::new(VIEW);
    scene.push_frame(VIEW, &Brush::Solid(css::LIGHT_GRAY));
    scene.push_marks(&cloud.marks(), style, outliner);
    (notes, scene.to_svg_string())
}

fn spiral_demo(outliner: &dyn GlyphOutliner) -> Section {
    let mut cloud = TagCloud::new(language_rows(false));
    let (notes, svg) = render(&mut cloud, WordStyle::Text, outliner);
    Section {
        title: "Archimedean spiral",
        notes,
        svg,
    }
}

fn rectangular_demo(outliner: &dyn GlyphOutliner) -> Section {
    let mut cloud = TagCloud::new(language_rows(false)).with_settings(
        TagCloudSettings::default()
            .with_mode(TagCloudMode::Rect)
            .with_angle_range(-90.0, 90.0, 5)
            .with_text_spacing(2.0),
    );
    let (notes, svg) = render(&mut cloud, WordStyle::Outlines, outliner);
    Section {
        title: "Rectangular spiral, packed outlines",
        notes,
        svg,
    }
}

fn categories_demo(outliner: &dyn GlyphOutliner) -> Section {
    let mut cloud = TagCloud::new(language_rows(true));
    cloud.set_hovered(
        StateStyle::default()
            .with_fill(css::BLACK)
            .with_font_weight(FontWeight::BOLD),
    );
    cloud.set_selected(
        StateStyle::default()
            .with_font_style(FontStyle::Italic)
            .with_fill(StyleValue::<Brush>::computed(|ctx| {
                Brush::Solid(ctx.source_color.with_alpha(0.5))
            })),
    );
    cloud.draw(outliner, VIEW);

    // Hover and selection only recolor; the layout stays put.
    cloud.hover(0);
    cloud.select(&[3, 6, 16], false);
    let (notes, svg) = render(&mut cloud, WordStyle::Text, outliner);
    let categories = cloud.auto_color_scale().categories().join(", ");
    Section {
        title: "Categories with hover and selection",
        notes: format!("{notes}; categories: {categories}"),
        svg,
    }
}

fn color_scale_demo(outliner: &dyn GlyphOutliner) -> Section {
    let (words, values): (Vec<&str>, Vec<f64>) = LANGUAGES.iter().map(|(x, v, _)| (*x, *v)).unzip();
    let rows = TagRow::from_columns(&words, &values, &[]).expect("matching columns");
    let mut cloud = TagCloud::new(rows)
        .with_settings(TagCloudSettings::default().with_angles([-45.0, 0.0, 45.0]));
    cloud.set_value_scale(ValueScale::log());
    cloud.set_color_scale(Some(ColorScale::from(LinearColorScale::new([
        Color::from_rgb8(0x19, 0x76, 0xd2),
        Color::from_rgb8(0xdd, 0x2c, 0x00),
    ]))));
    cloud.set_normal(
        StateStyle::default().with_font_size(StyleValue::<FontSize>::computed(|ctx| {
            if ctx.value < 10.0 {
                FontSize::Pixels(10.0)
            } else {
                FontSize::Percent(100.0)
            }
        })),
    );
    let (notes, svg) = render(&mut cloud, WordStyle::Text, outliner);
    Section {
        title: "Log value scale, linear color scale, fixed angles",
        notes,
        svg,
    }
}

fn crowded_demo(outliner: &dyn GlyphOutliner) -> Section {
    let rows = (0..400)
        .map(|i| TagRow::new(format!("tag{i}"), f64::from(400 - i)))
        .collect();
    let mut cloud = TagCloud::new(rows);
    let (notes, svg) = render(&mut cloud, WordStyle::Outlines, outliner);
    Section {
        title: "More words than fit",
        notes,
        svg,
    }
}
