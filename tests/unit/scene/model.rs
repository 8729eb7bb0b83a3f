use super::*;

#[test]
fn project_defaults_fill_missing_fields() {
    let def: ProjectDef = serde_json::from_str(r#"{ "scenes": [] }"#).unwrap();
    assert_eq!((def.width, def.height), (1184, 864));
    assert_eq!(def.fps, FpsDef { num: 30, den: 1 });
    assert_eq!(def.output.codec, "libx264");
    assert_eq!(def.output.bitrate, "5000k");
    assert_eq!(def.defaults.font, "Arial");
    assert_eq!(def.defaults.color, ColorDef::WHITE);
    assert!(def.defaults.bold && def.defaults.shadow);
    assert_eq!(def.intro_fade, 0.5);
    assert_eq!(def.outro_fade, 1.0);
}

#[test]
fn missing_scenes_key_is_none() {
    let def: ProjectDef = serde_json::from_str(r#"{ "width": 640 }"#).unwrap();
    assert!(def.scenes.is_none());
}

#[test]
fn fps_accepts_integer_or_rational() {
    let a: FpsDef = serde_json::from_str("24").unwrap();
    let b: FpsDef = serde_json::from_str(r#"{ "num": 30000, "den": 1001 }"#).unwrap();
    assert_eq!(a, FpsDef { num: 24, den: 1 });
    assert_eq!(b, FpsDef { num: 30000, den: 1001 });
}

#[test]
fn overlays_are_tagged_by_type() {
    let scene: SceneDef = serde_json::from_str(
        r##"{
            "image_path": "bg.png",
            "overlays": [
                { "type": "text", "text": "Hi", "position": ["center", 0.8] },
                { "type": "image", "path": "logo.png", "width": 0.2, "fade_in": true }
            ]
        }"##,
    )
    .unwrap();
    assert_eq!(scene.overlays.len(), 2);
    match &scene.overlays[0] {
        OverlayDef::Text(t) => {
            assert_eq!(t.text.as_deref(), Some("Hi"));
            assert_eq!(
                t.position,
                Some(PositionDef::Pair([
                    AxisDef::Text("center".to_owned()),
                    AxisDef::Float(0.8)
                ]))
            );
        }
        other => panic!("expected text overlay, got {other:?}"),
    }
    match &scene.overlays[1] {
        OverlayDef::Image(i) => {
            assert_eq!(i.width, Some(NumberDef::Float(0.2)));
            assert!(i.fade_in);
            assert!(!i.fade_out);
        }
        other => panic!("expected image overlay, got {other:?}"),
    }
}

#[test]
fn integer_axis_stays_integer() {
    let pos: PositionDef = serde_json::from_str("[100, 1]").unwrap();
    assert_eq!(pos, PositionDef::Pair([AxisDef::Int(100), AxisDef::Int(1)]));
}

#[test]
fn video_background_accepts_legacy_field_names() {
    let bg: BackgroundDef = serde_json::from_str(
        r#"{ "type": "video", "path": "v.mp4", "video_start": 1.0, "video_speed": 2.0, "resize_method": "fit" }"#,
    )
    .unwrap();
    match bg {
        BackgroundDef::Video {
            start,
            speed,
            resize,
            ..
        } => {
            assert_eq!(start, Some(1.0));
            assert_eq!(speed, Some(2.0));
            assert_eq!(resize.as_deref(), Some("fit"));
        }
        other => panic!("expected video background, got {other:?}"),
    }
}
