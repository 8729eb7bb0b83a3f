use super::*;

fn write_png(dir: &Path, name: &str, w: u32, h: u32, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(w, h, image::Rgba(rgba))
        .save(dir.join(name))
        .unwrap();
}

fn project(json: &str) -> Project {
    Project::from_reader(json.as_bytes()).unwrap()
}

#[test]
fn builds_image_scene_with_inferred_duration() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "bg.png", 64, 64, [10, 20, 30, 255]);
    let p = project(
        r#"{ "width": 64, "height": 32, "fps": 10,
             "scenes": [ { "image_path": "bg.png" },
                         { "image_path": "bg.png",
                           "overlays": [ { "type": "text", "text": "hello there" } ] } ] }"#,
    );
    let clips = build_clips(&p, dir.path(), &FontBook::empty()).unwrap();
    assert_eq!(clips.len(), 2);
    assert_eq!(clips[0].duration(), 4.5);
    assert_eq!(clips[0].frame_count(), 45);
    assert_eq!(clips[1].duration(), 5.0);
    assert_eq!(clips[0].frame(0).unwrap().pixel(5, 5), [10, 20, 30, 255]);
}

#[test]
fn image_overlay_corner_sits_on_pixel_position() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "bg.png", 100, 100, [0, 0, 0, 255]);
    write_png(dir.path(), "logo.png", 20, 20, [255, 255, 255, 255]);
    let p = project(
        r#"{ "width": 100, "height": 100, "fps": 10,
             "scenes": [ { "image_path": "bg.png", "duration": 2,
               "overlays": [ { "type": "image", "path": "logo.png",
                               "position": [50, 50] } ] } ] }"#,
    );
    let clips = build_clips(&p, dir.path(), &FontBook::empty()).unwrap();
    let f = clips[0].frame(0).unwrap();
    assert_eq!(f.pixel(50, 50), [255, 255, 255, 255]);
    assert_eq!(f.pixel(69, 69), [255, 255, 255, 255]);
    assert_eq!(f.pixel(49, 49), [0, 0, 0, 255]);
    assert_eq!(f.pixel(70, 70), [0, 0, 0, 255]);
}

#[test]
fn image_overlay_fraction_position_is_top_left() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "bg.png", 100, 100, [0, 0, 0, 255]);
    write_png(dir.path(), "logo.png", 20, 10, [255, 255, 255, 255]);
    let p = project(
        r#"{ "width": 100, "height": 100, "fps": 10,
             "scenes": [ { "image_path": "bg.png", "duration": 2,
               "overlays": [ { "type": "image", "path": "logo.png", "width": 0.4,
                               "position": [0.5, 0.5] } ] } ] }"#,
    );
    let clips = build_clips(&p, dir.path(), &FontBook::empty()).unwrap();
    let f = clips[0].frame(0).unwrap();
    // 40x20 with its corner on (50, 50)
    assert_eq!(f.pixel(50, 50), [255, 255, 255, 255]);
    assert_eq!(f.pixel(89, 69), [255, 255, 255, 255]);
    assert_eq!(f.pixel(49, 50), [0, 0, 0, 255]);
    assert_eq!(f.pixel(90, 70), [0, 0, 0, 255]);
}

#[test]
fn image_overlay_center_keyword_centres_the_image() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "bg.png", 100, 100, [0, 0, 0, 255]);
    write_png(dir.path(), "logo.png", 40, 20, [255, 255, 255, 255]);
    let p = project(
        r#"{ "width": 100, "height": 100, "fps": 10,
             "scenes": [ { "image_path": "bg.png", "duration": 2,
               "overlays": [ { "type": "image", "path": "logo.png",
                               "position": "center" } ] } ] }"#,
    );
    let clips = build_clips(&p, dir.path(), &FontBook::empty()).unwrap();
    let f = clips[0].frame(0).unwrap();
    assert_eq!(f.pixel(30, 40), [255, 255, 255, 255]);
    assert_eq!(f.pixel(69, 59), [255, 255, 255, 255]);
    assert_eq!(f.pixel(29, 40), [0, 0, 0, 255]);
    assert_eq!(f.pixel(30, 39), [0, 0, 0, 255]);
}

#[test]
fn extreme_pixel_positions_render_without_overflow() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "bg.png", 32, 32, [0, 0, 0, 255]);
    write_png(dir.path(), "logo.png", 8, 8, [255, 255, 255, 255]);
    let p = project(
        r#"{ "width": 32, "height": 32, "fps": 10,
             "scenes": [ { "image_path": "bg.png", "duration": 1,
               "overlays": [
                 { "type": "text", "text": "far", "position": [9223372036854775807, 0] },
                 { "type": "text", "text": "away", "animation": "scale",
                   "position": [-9223372036854775808, 0] },
                 { "type": "image", "path": "logo.png",
                   "position": [9223372036854775807, 0] }
               ] } ] }"#,
    );
    let clips = build_clips(&p, dir.path(), &FontBook::empty()).unwrap();
    for i in [0, 5, 9] {
        let f = clips[0].frame(i).unwrap();
        assert_eq!(f.pixel(16, 16), [0, 0, 0, 255]);
    }
}

#[test]
fn missing_overlay_image_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "bg.png", 16, 16, [0, 0, 0, 255]);
    let p = project(
        r#"{ "width": 16, "height": 16,
             "scenes": [ { "image_path": "bg.png",
               "overlays": [ { "type": "image", "path": "gone.png" } ] } ] }"#,
    );
    let clips = build_clips(&p, dir.path(), &FontBook::empty()).unwrap();
    assert!(clips[0].layers.is_empty());
}

#[test]
fn missing_background_fails() {
    let dir = tempfile::tempdir().unwrap();
    let p = project(r#"{ "width": 16, "height": 16, "scenes": [ { "image_path": "nope.png" } ] }"#);
    let err = build_clips(&p, dir.path(), &FontBook::empty()).unwrap_err();
    assert!(matches!(err, ReelError::Asset(_)));
}
