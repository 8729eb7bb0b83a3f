use super::*;
use crate::scene::project::{AnimationKind, SlideFrom};

fn project(json: &str) -> ReelResult<Project> {
    let def: ProjectDef = serde_json::from_str(json).unwrap();
    parse_project(def)
}

fn one_scene(scene: &str) -> Project {
    project(&format!(r#"{{ "scenes": [ {scene} ] }}"#)).unwrap()
}

#[test]
fn missing_scenes_is_validation_error() {
    let err = project("{}").unwrap_err();
    assert!(matches!(err, ReelError::Validation(ref m) if m.contains("scenes")));
}

#[test]
fn odd_dimensions_are_rejected() {
    let err = project(r#"{ "width": 641, "scenes": [ { "image_path": "a.png" } ] }"#).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn text_overlay_without_content_is_rejected() {
    let err = project(
        r#"{ "scenes": [ { "image_path": "a.png", "overlays": [ { "type": "text" } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(ref m) if m.contains("overlays[0]")));
}

#[test]
fn text_line_without_text_is_rejected() {
    let err = project(
        r##"{ "scenes": [ { "image_path": "bg.png", "overlays": [
            { "type": "text", "lines": [ { "text": "ok" }, { "color": "#ff0000" } ] }
        ] } ] }"##,
    )
    .unwrap_err();
    assert!(
        matches!(err, ReelError::Validation(ref m) if m.contains("overlays[0].lines[1]: missing 'text'"))
    );
}

#[test]
fn image_overlay_without_path_is_rejected() {
    let err = project(
        r#"{ "scenes": [ { "image_path": "a.png", "overlays": [ { "type": "image" } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(ref m) if m.contains("overlays[0].path")));
}

#[test]
fn scene_without_background_is_rejected() {
    let err = project(r#"{ "scenes": [ { "name": "x" } ] }"#).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn start_time_past_scene_end_is_rejected() {
    let err = project(
        r#"{ "scenes": [ { "image_path": "a.png", "duration": 3,
             "overlays": [ { "type": "text", "text": "hi", "start_time": 3.0 } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(ref m) if m.contains("start_time")));
}

#[test]
fn start_time_check_is_deferred_for_video_scenes() {
    let p = one_scene(
        r#"{ "background": { "type": "video", "path": "v.mp4" },
             "overlays": [ { "type": "text", "text": "hi", "start_time": 30.0 } ] }"#,
    );
    assert_eq!(p.scenes.len(), 1);
}

#[test]
fn defaults_apply_to_scene_and_text() {
    let p = one_scene(
        r#"{ "image_path": "a.png", "overlays": [ { "type": "text", "text": "Hello\\nworld" } ] }"#,
    );
    assert_eq!(p.output.path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    let scene = &p.scenes[0];
    assert_eq!(scene.id, "Scene 1");
    assert_eq!(scene.motion_effect.kind, MotionKind::Static);
    let Overlay::Text(t) = &scene.overlays[0] else {
        panic!("expected text");
    };
    assert_eq!(t.lines.len(), 2);
    assert_eq!(t.lines[1].text, "world");
    assert_eq!(t.style.font, "Arial");
    assert_eq!(t.style.size, 80.0);
    assert!(!t.style.multicolor);
    assert_eq!(t.animation.kind, AnimationKind::Fade);
}

#[test]
fn line_colors_fall_back_to_color() {
    let p = one_scene(
        r##"{ "image_path": "a.png", "overlays": [ { "type": "text", "text": "a\\nb\\nc",
             "color": "#00FF00", "line_colors": ["#FF0000"] } ] }"##,
    );
    let Overlay::Text(t) = &p.scenes[0].overlays[0] else {
        panic!("expected text");
    };
    assert!(t.style.multicolor);
    assert_eq!(t.lines[0].color, ColorDef::rgb(255, 0, 0));
    assert_eq!(t.lines[1].color, ColorDef::rgb(0, 255, 0));
    assert_eq!(t.lines[2].color, ColorDef::rgb(0, 255, 0));
}

#[test]
fn unknown_kinds_become_defaults_with_warnings() {
    let p = one_scene(
        r#"{ "image_path": "a.png",
             "background_effect": { "type": "wobble" },
             "transition": { "type": "spin" },
             "overlays": [ { "type": "text", "text": "hi", "animation": "explode",
                             "background": "cloud" } ] }"#,
    );
    let scene = &p.scenes[0];
    assert_eq!(scene.motion_effect.kind, MotionKind::Static);
    assert_eq!(
        scene.transition_in.map(|t| t.kind),
        Some(TransitionKind::Crossfade)
    );
    let Overlay::Text(t) = &scene.overlays[0] else {
        panic!("expected text");
    };
    assert_eq!(t.animation.kind, AnimationKind::Fade);
    assert!(t.style.panel.is_none());
    assert_eq!(p.warnings.len(), 4);
}

#[test]
fn typewriter_is_a_silent_fade() {
    let p = one_scene(
        r#"{ "image_path": "a.png",
             "overlays": [ { "type": "text", "text": "hi", "animation": "typewriter" } ] }"#,
    );
    assert!(p.warnings.is_empty());
}

#[test]
fn legacy_animation_names_map_without_warnings() {
    let p = one_scene(
        r#"{ "image_path": "a.png", "overlays": [
             { "type": "text", "text": "a", "animation": "AnimateTextFromLeft" },
             { "type": "text", "text": "b", "animation": "AnimateTextGrowFromCenter" },
             { "type": "text", "text": "c", "animation": "AnimateTextFadeInWordByWord" },
             { "type": "text", "text": "d", "animation": "grow" },
             { "type": "text", "text": "e", "animation": "slide_left" }
           ] }"#,
    );
    assert!(p.warnings.is_empty(), "{:?}", p.warnings);
    let kinds: Vec<_> = p.scenes[0]
        .overlays
        .iter()
        .map(|o| match o {
            Overlay::Text(t) => t.animation.kind,
            Overlay::Image(_) => unreachable!(),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            AnimationKind::Fade,
            AnimationKind::Scale,
            AnimationKind::Fade,
            AnimationKind::Scale,
            AnimationKind::Slide(SlideFrom::Left),
        ]
    );
}

#[test]
fn ken_burns_variants() {
    let p = one_scene(
        r#"{ "image_path": "a.png", "background_effect": { "type": "kenBurns", "direction": "left" } }"#,
    );
    assert_eq!(
        p.scenes[0].motion_effect.kind,
        MotionKind::KenBurns {
            zoom: DEFAULT_KEN_BURNS_ZOOM,
            direction: KenBurnsDirection::In,
            pan: Some(PanDir::Left),
        }
    );

    let p = one_scene(
        r#"{ "image_path": "a.png", "background_effect": { "type": "kenburns_down" } }"#,
    );
    assert_eq!(
        p.scenes[0].motion_effect.kind,
        MotionKind::KenBurns {
            zoom: PRESET_PAN_ZOOM,
            direction: KenBurnsDirection::In,
            pan: Some(PanDir::Down),
        }
    );
}

#[test]
fn pulse_defaults_to_zoom_easing() {
    let p = one_scene(r#"{ "image_path": "a.png", "background_effect": { "type": "pulse" } }"#);
    assert_eq!(
        p.scenes[0].motion_effect.kind,
        MotionKind::ZoomPulse {
            intensity: DEFAULT_PULSE_INTENSITY,
            pulses: DEFAULT_PULSES
        }
    );
    assert_eq!(p.scenes[0].motion_effect.easing, EasePreset::Zoom.ease());
}

#[test]
fn transitions_parse_direction_fields() {
    let p = project(
        r#"{ "scenes": [
            { "image_path": "a.png" },
            { "image_path": "b.png", "transition": { "type": "slideIn", "from_edge": "right", "duration": 0.6 } },
            { "image_path": "c.png", "transition": { "type": "zoom", "direction": "out" } },
            { "image_path": "d.png", "transition": { "type": "none" } }
        ] }"#,
    )
    .unwrap();
    assert_eq!(
        p.scenes[1].transition_in,
        Some(TransitionSpec {
            kind: TransitionKind::Slide(SlideDir::Right),
            duration: 0.6
        })
    );
    assert_eq!(
        p.scenes[2].transition_in,
        Some(TransitionSpec {
            kind: TransitionKind::Zoom(ZoomDir::Out),
            duration: DEFAULT_TRANSITION_SECS
        })
    );
    assert_eq!(p.scenes[3].transition_in, None);
}

#[test]
fn image_overlay_width_forms() {
    let p = one_scene(
        r#"{ "image_path": "a.png", "overlays": [
            { "type": "image", "path": "l.png", "width": 0.25 },
            { "type": "image", "path": "l.png", "width": 120 },
            { "type": "image", "path": "l.png", "width": 1 }
        ] }"#,
    );
    let widths: Vec<_> = p.scenes[0]
        .overlays
        .iter()
        .map(|o| match o {
            Overlay::Image(i) => i.width,
            Overlay::Text(_) => None,
        })
        .collect();
    assert_eq!(
        widths,
        vec![
            Some(OverlayWidth::Fraction(0.25)),
            Some(OverlayWidth::Pixels(120)),
            Some(OverlayWidth::Pixels(1)),
        ]
    );
}

#[test]
fn legacy_output_path_is_used() {
    let p = project(r#"{ "output_path": "out/x.mp4", "scenes": [ { "image_path": "a.png" } ] }"#)
        .unwrap();
    assert_eq!(p.output.path, PathBuf::from("out/x.mp4"));
}

#[test]
fn split_lines_handles_both_newline_forms() {
    assert_eq!(split_lines("a\\nb\nc"), vec!["a", "b", "c"]);
    assert_eq!(split_lines("solo"), vec!["solo"]);
    assert_eq!(split_lines("a\\n\\nb"), vec!["a", "", "b"]);
}
