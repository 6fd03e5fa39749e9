// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::format;
use alloc::vec::Vec;

use kurbo::Rect;
use vizir_text::HeuristicTextMeasurer;

use crate::{
    BitBoard, ConsistencyState, Placer, Sprite, SpiralPath, SpriteAtlas, TagCloud, TagCloudMode,
    TagCloudSettings, TagRow, Word,
};

fn rows(words: &[(&str, f64)]) -> Vec<TagRow> {
    words.iter().map(|(x, v)| TagRow::new(*x, *v)).collect()
}

fn numbered(n: usize) -> Vec<TagRow> {
    (0..n)
        .map(|i| TagRow::new(format!("word{i}"), (n - i) as f64))
        .collect()
}

fn positions(cloud: &TagCloud) -> Vec<(usize, i32, i32, bool, bool)> {
    cloud
        .words()
        .iter()
        .map(|w| (w.row_index, w.x, w.y, w.placed, w.drawn))
        .collect()
}

#[test]
fn two_words_on_a_tiny_canvas() {
    let mut cloud = TagCloud::new(rows(&[("ten", 10.0), ("one", 1.0)]))
        .with_settings(TagCloudSettings::default().with_angles([0.0]));
    cloud.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 64.0, 64.0));

    let layout = *cloud.layout();
    assert!(layout.font_range.min <= layout.font_range.max);
    assert_eq!(layout.placed, 2);

    let words = cloud.words();
    assert_eq!(words[0].text, "ten");
    assert_eq!((words[0].x, words[0].y), (0, 0), "top word sits at the center");
    assert_eq!(words[0].size(), layout.font_range.max);
    assert!((words[1].size() - layout.font_range.min).abs() <= 0.5);
    assert_ne!((words[1].x, words[1].y), (0, 0));
    assert!(words.iter().all(|w| w.rotate == 0.0));
}

#[test]
fn empty_text_is_not_placed() {
    let mut cloud = TagCloud::new(rows(&[("", 3.0)]));
    cloud.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 200.0, 100.0));

    let word = &cloud.words()[0];
    assert!(!word.has_text);
    assert!(!word.placed && !word.drawn);
    let layout = cloud.layout();
    assert!(layout.bounds.is_none());
    assert_eq!(layout.transform.scale, 1.0);
    assert_eq!(layout.failed, 1);
    assert!(cloud.marks().is_empty());
}

#[test]
fn overcrowded_canvas_drops_words() {
    let n = 300;
    let mut cloud = TagCloud::new(numbered(n));
    cloud.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 60.0, 60.0));

    let layout = cloud.layout();
    assert!(layout.placed > 0);
    assert!(layout.placed < n, "{} of {n} placed", layout.placed);
    assert_eq!(layout.placed + layout.failed, n);
    assert!(cloud.words().iter().any(|w| !w.drawn));
    assert_eq!(cloud.marks().len(), cloud.words().iter().filter(|w| w.drawn).count());
}

#[test]
fn equal_values_keep_data_order() {
    let mut cloud = TagCloud::new(rows(&[("d", 1.0), ("a", 1.0), ("c", 1.0), ("b", 1.0)]));
    cloud.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 300.0, 200.0));
    let order: Vec<usize> = cloud.words().iter().map(|w| w.row_index).collect();
    assert_eq!(order, [0, 1, 2, 3]);
}

#[test]
fn calculated_angles_cycle_in_placement_order() {
    let mut cloud = TagCloud::new(rows(&[
        ("f", 1.0),
        ("a", 6.0),
        ("e", 2.0),
        ("b", 5.0),
        ("d", 3.0),
        ("c", 4.0),
    ]))
    .with_settings(TagCloudSettings::default().with_angle_range(0.0, 90.0, 4));
    cloud.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 300.0, 200.0));

    let texts: Vec<&str> = cloud.words().iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, ["a", "b", "c", "d", "e", "f"]);
    let rotations: Vec<f64> = cloud.words().iter().map(|w| w.rotate).collect();
    assert_eq!(rotations, [0.0, 30.0, 60.0, 90.0, 0.0, 30.0]);
}

#[test]
fn relayout_with_unchanged_inputs_is_identical() {
    let view = Rect::new(0.0, 0.0, 320.0, 240.0);
    let mut cloud = TagCloud::new(numbered(40));
    cloud.draw(&HeuristicTextMeasurer, view);
    let first = positions(&cloud);
    let first_layout = *cloud.layout();

    assert!(cloud.draw(&HeuristicTextMeasurer, view).is_empty());
    assert_eq!(positions(&cloud), first);

    cloud.invalidate(ConsistencyState::BOUNDS);
    let ran = cloud.draw(&HeuristicTextMeasurer, view);
    assert!(ran.contains(ConsistencyState::BOUNDS));
    assert_eq!(positions(&cloud), first);
    assert_eq!(*cloud.layout(), first_layout);
}

#[test]
fn drawn_words_stay_inside_the_viewport() {
    for view in [
        Rect::new(0.0, 0.0, 320.0, 240.0),
        Rect::new(15.0, 30.0, 215.0, 430.0),
        Rect::new(0.0, 0.0, 90.0, 70.0),
    ] {
        let mut cloud = TagCloud::new(numbered(60));
        cloud.draw(&HeuristicTextMeasurer, view);
        let layout = cloud.layout();
        let tolerance = 0.5 * layout.transform.scale.max(1.0) + 1e-6;
        for w in cloud.words().iter().filter(|w| w.drawn) {
            let local = Rect::new(
                f64::from(w.x + w.x0),
                f64::from(w.y + w.y0),
                f64::from(w.x + w.x1),
                f64::from(w.y + w.y1),
            );
            let r = layout.transform.apply_rect(local);
            assert!(r.x0 >= view.x0 - tolerance && r.x1 <= view.x1 + tolerance, "{r:?} in {view:?}");
            assert!(r.y0 >= view.y0 - tolerance && r.y1 <= view.y1 + tolerance, "{r:?} in {view:?}");
        }
    }
}

#[test]
fn placed_sprite_widths_are_word_aligned() {
    let mut cloud = TagCloud::new(numbered(50))
        .with_settings(TagCloudSettings::default().with_angle_range(-60.0, 60.0, 5));
    cloud.draw(&HeuristicTextMeasurer, Rect::new(0.0, 0.0, 400.0, 300.0));
    assert!(cloud.layout().placed > 0);
    for w in cloud.words().iter().filter(|w| w.placed) {
        assert_eq!(w.width % 32, 0, "{:?} is {} wide", w.text, w.width);
    }
}

#[test]
fn spiral_paths_are_deterministic() {
    for mode in [TagCloudMode::Spiral, TagCloudMode::Rect] {
        let a: Vec<(i32, i32)> = SpiralPath::new(mode, 300.0, 200.0).take(2_000).collect();
        let b: Vec<(i32, i32)> = SpiralPath::new(mode, 300.0, 200.0).take(2_000).collect();
        assert_eq!(a, b);
    }
}

#[test]
fn board_only_gains_the_pixels_of_placed_words() {
    let (w, h) = (160, 120);
    let mut words: Vec<Word> = (0..25)
        .map(|i| {
            let mut word = Word::new(i, &format!("w{i}"), 1.0, None);
            word.font.font_size = f64::from(24 - i32::try_from(i).unwrap() / 2);
            word.rotate = if i % 3 == 0 { 90.0 } else { 0.0 };
            word
        })
        .collect();

    let mut atlas = SpriteAtlas::new();
    assert_eq!(atlas.rasterize_batch(&HeuristicTextMeasurer, &mut words, 0, 1.0), words.len());

    let mut board = BitBoard::new(w, h);
    let placer = Placer::new(TagCloudMode::Spiral, 160, 120);
    let mut bounds = None::<crate::CloudBounds>;
    let mut placed = 0;
    for word in &mut words {
        word.x = 80;
        word.y = 60;
        let ink = u64::from(word.sprite.as_ref().map_or(0, Sprite::count_ones));
        let before = board.count_ones();
        if placer.place(&mut board, word, bounds.as_ref()) {
            assert_eq!(board.count_ones(), before + ink, "{:?} overlapped", word.text);
            match bounds.as_mut() {
                Some(b) => b.include(word),
                None => bounds = Some(crate::CloudBounds::from_word(word)),
            }
            placed += 1;
        } else {
            assert_eq!(board.count_ones(), before);
        }
    }
    assert!(placed > 1);
}
