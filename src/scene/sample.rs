/// A complete example project document exercising every scene feature.
///
/// Asset paths are relative and must be supplied next to the written file.
pub fn sample_project_json() -> String {
    let doc = serde_json::json!({
        "width": 1184,
        "height": 864,
        "fps": 30,
        "output": {
            "path": "output/video.mp4",
            "codec": "libx264",
            "audio_codec": "aac",
            "bitrate": "5000k",
            "preset": "medium"
        },
        "audio_path": "music.mp3",
        "intro_fade": 0.5,
        "outro_fade": 1.0,
        "defaults": {
            "font": "Arial",
            "font_size": 80,
            "color": "#FFFFFF",
            "bold": true,
            "shadow": true
        },
        "scenes": [
            {
                "name": "Intro",
                "image_path": "images/intro.png",
                "background_effect": { "type": "kenBurns", "zoom": 1.15, "direction": "in" },
                "overlays": [
                    {
                        "type": "text",
                        "text": "Welcome\\nto the show",
                        "animation": "fade_in",
                        "position": "center",
                        "start_time": 0.5,
                        "background": "rounded",
                        "bg_opacity": 0.6
                    },
                    {
                        "type": "image",
                        "path": "images/logo.png",
                        "width": 0.2,
                        "position": [0.9, 0.1],
                        "fade_in": true
                    }
                ]
            },
            {
                "name": "Highlights",
                "background": { "type": "video", "path": "clips/highlights.mp4",
                                "start": 1.0, "end": 7.0, "speed": 1.0, "resize": "crop" },
                "transition": { "type": "slide", "duration": 0.8, "from_edge": "left" },
                "overlays": [
                    {
                        "type": "text",
                        "lines": [
                            { "text": "Fast", "color": "#FFD700" },
                            { "text": "and bright", "color": "#FFFFFF" }
                        ],
                        "animation": "slide_left",
                        "position": "bottom",
                        "outline": true
                    }
                ]
            },
            {
                "name": "Outro",
                "image_path": "images/outro.png",
                "duration": 5,
                "background_effect": { "type": "parallax", "depth": 0.05 },
                "transition": { "type": "zoom", "duration": 1.0, "direction": "in" },
                "overlays": [
                    {
                        "type": "text",
                        "text": "Thanks for watching",
                        "animation": "pop",
                        "position": "top",
                        "background": "banner"
                    }
                ]
            }
        ]
    });
    // `json!` values always serialize.
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sample.rs"]
mod tests;
