use super::*;
use crate::scene::position::Position;
use crate::scene::project::{
    AnimationSpec, BackgroundSource, ImageOverlay, MotionEffectSpec, ResizePolicy, TextLine,
    TextOverlay, TextStyle,
};
use crate::assets::color::ColorDef;
use std::path::PathBuf;

fn text(s: &str) -> Overlay {
    Overlay::Text(TextOverlay {
        lines: vec![TextLine {
            text: s.to_owned(),
            color: ColorDef::WHITE,
        }],
        style: TextStyle {
            font: "Arial".to_owned(),
            size: 80.0,
            bold: true,
            shadow: true,
            outline: false,
            outline_width: 3,
            panel: None,
            multicolor: false,
        },
        animation: AnimationSpec::default(),
        position: Position::center(),
        start_time: 0.0,
    })
}

fn logo() -> Overlay {
    Overlay::Image(ImageOverlay {
        path: PathBuf::from("logo.png"),
        width: None,
        position: Position::center(),
        fade_in: false,
        fade_out: false,
    })
}

fn scene(overlays: Vec<Overlay>, explicit: Option<f64>) -> Scene {
    Scene {
        id: "s".to_owned(),
        background: BackgroundSource::Image {
            path: PathBuf::from("bg.png"),
            resize: ResizePolicy::Crop,
        },
        motion_effect: MotionEffectSpec::default(),
        overlays,
        transition_in: None,
        explicit_duration: explicit,
    }
}

#[test]
fn empty_text_is_floor() {
    assert_eq!(text_duration(""), MIN_TEXT_SECS);
    assert_eq!(text_duration("   \n\t"), MIN_TEXT_SECS);
}

#[test]
fn text_duration_formula_and_clamps() {
    // 8 words: 8/1.8 + 1.5 + 3.2 = 9.144...
    let d = text_duration("one two three four five six seven eight");
    assert!((d - (8.0 / 1.8 + 1.5 + 3.2)).abs() < 1e-12);
    assert_eq!(text_duration("a"), MIN_TEXT_SECS);
    assert_eq!(text_duration(&"w ".repeat(10)), MAX_TEXT_SECS);
    assert_eq!(text_duration(&"w ".repeat(200)), MAX_TEXT_SECS);
}

#[test]
fn text_duration_is_deterministic() {
    let s = "the quick brown fox jumps";
    assert_eq!(text_duration(s).to_bits(), text_duration(s).to_bits());
}

#[test]
fn scene_without_text_is_four_and_a_half() {
    assert_eq!(compute_scene_duration(&scene(vec![], None)), 4.5);
    assert_eq!(compute_scene_duration(&scene(vec![logo()], None)), 4.5);
}

#[test]
fn scene_with_text_uses_longest_plus_buffer() {
    let s = scene(
        vec![text("hi"), text("one two three four five six seven eight")],
        None,
    );
    let expected = 8.0 / 1.8 + 1.5 + 3.2 + 1.0;
    assert!((compute_scene_duration(&s) - expected).abs() < 1e-12);
    assert_eq!(compute_scene_duration(&scene(vec![text("")], None)), 5.0);
}

#[test]
fn explicit_duration_wins() {
    let s = scene(vec![text(&"w ".repeat(50))], Some(2.25));
    assert_eq!(compute_scene_duration(&s), 2.25);
}
