use super::*;

const FULL: &str = r##"{
  "width": 640, "height": 360, "fps": { "num": 30000, "den": 1001 },
  "output": { "path": "out/reel.mp4", "bitrate": "2000k", "preset": "fast" },
  "audio_path": "music/theme.mp3",
  "intro_fade": 0.25, "outro_fade": 0.0,
  "defaults": { "font": "DejaVu Sans", "font_size": 48, "color": "#ffcc00", "bold": false },
  "scenes": [
    { "image_path": "a.png", "duration": 3,
      "background_effect": { "type": "kenburns", "zoom": 1.2, "direction": "out", "pan": "left" },
      "transition": { "type": "zoom", "direction": "out", "duration": 0.4 },
      "overlays": [
        { "type": "text", "text": "Hello\\nworld", "animation": "pop", "position": "top",
          "background": "rounded", "bg_opacity": 0.5, "outline": true },
        { "type": "text", "lines": [ { "text": "Red", "color": "#ff000080" }, { "text": "Plain" } ],
          "animation": "slide_in_bottom", "position": ["25%", 40], "start_time": 1.5 },
        { "type": "image", "path": "logo.png", "width": 0.2, "position": "center", "fade_in": true }
      ] },
    { "name": "Clip",
      "background": { "type": "video", "path": "v.mp4", "start": 1.0, "end": 4.5, "speed": 2.0,
                      "resize": "fit" },
      "transition": { "type": "slide", "from_edge": "up" },
      "overlays": [
        { "type": "image", "path": "logo.png", "width": 120, "position": [10, "center"],
          "fade_out": true }
      ] },
    { "background": { "type": "image", "path": "b.svg", "resize": "stretch" },
      "background_effect": { "type": "pulse", "intensity": 0.05, "pulses": 2 },
      "transition": { "type": "none" } },
    { "image_path": "c.png",
      "background_effect": { "type": "parallax", "depth": 0.1, "easing": "linear" } }
  ]
}"##;

#[test]
fn processed_json_loads_back_into_an_equal_project() {
    let original = Project::from_reader(FULL.as_bytes()).unwrap();
    assert!(original.warnings.is_empty(), "{:?}", original.warnings);

    let json = original.to_json_pretty().unwrap();
    let reloaded = Project::from_reader(json.as_bytes()).unwrap();

    assert!(reloaded.warnings.is_empty(), "{:?}", reloaded.warnings);
    assert_eq!(reloaded, original);
}

#[test]
fn processed_json_spells_out_defaults() {
    let p = Project::from_reader(
        r#"{ "scenes": [ { "image_path": "a.png", "overlays": [ { "type": "text", "text": "Hi" } ] } ] }"#
            .as_bytes(),
    )
    .unwrap();
    let v: serde_json::Value = serde_json::from_str(&p.to_json_pretty().unwrap()).unwrap();

    assert_eq!(v["width"], 1184);
    assert_eq!(v["output"]["path"], "output/video.mp4");
    let scene = &v["scenes"][0];
    assert_eq!(scene["name"], "Scene 1");
    assert_eq!(scene["background"]["type"], "image");
    assert_eq!(scene["background"]["resize"], "crop");
    assert_eq!(scene["transition"]["type"], "none");
    let text = &scene["overlays"][0];
    assert_eq!(text["font"], "Arial");
    assert_eq!(text["color"], "#FFFFFF");
    assert_eq!(text["animation"], "fade_in");
    assert_eq!(text["position"], "center");
}

#[test]
fn save_processed_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let p = Project::from_reader(FULL.as_bytes()).unwrap();
    let path = dir.path().join("nested/processed.json");

    p.save_processed(&path).unwrap();

    assert_eq!(Project::from_path(&path).unwrap(), p);
}
