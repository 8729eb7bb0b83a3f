use crate::assets::color::ColorDef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct FpsDef {
    pub(crate) num: u32,
    pub(crate) den: u32,
}

impl Default for FpsDef {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

impl<'de> Deserialize<'de> for FpsDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(u32),
            Obj { num: u32, den: u32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(num) => Ok(Self { num, den: 1 }),
            Repr::Obj { num, den } => Ok(Self { num, den }),
        }
    }
}

/// Top-level project document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProjectDef {
    #[serde(default = "default_width")]
    pub(crate) width: u32,
    #[serde(default = "default_height")]
    pub(crate) height: u32,
    #[serde(default)]
    pub(crate) fps: FpsDef,
    #[serde(default)]
    pub(crate) output: OutputDef,
    /// Flat alias for `output.path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) audio_path: Option<String>,
    #[serde(default = "default_intro_fade")]
    pub(crate) intro_fade: f64,
    #[serde(default = "default_outro_fade")]
    pub(crate) outro_fade: f64,
    #[serde(default)]
    pub(crate) defaults: TextDefaultsDef,
    pub(crate) scenes: Option<Vec<SceneDef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OutputDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) path: Option<String>,
    #[serde(default = "default_codec")]
    pub(crate) codec: String,
    #[serde(default = "default_audio_codec")]
    pub(crate) audio_codec: String,
    #[serde(default = "default_bitrate")]
    pub(crate) bitrate: String,
    #[serde(default = "default_preset")]
    pub(crate) preset: String,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            path: None,
            codec: default_codec(),
            audio_codec: default_audio_codec(),
            bitrate: default_bitrate(),
            preset: default_preset(),
        }
    }
}

/// Project-wide text defaults applied to overlays that leave a field unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TextDefaultsDef {
    #[serde(default = "default_font")]
    pub(crate) font: String,
    #[serde(default = "default_font_size")]
    pub(crate) font_size: f64,
    #[serde(default = "default_text_color")]
    pub(crate) color: ColorDef,
    #[serde(default = "yes")]
    pub(crate) bold: bool,
    #[serde(default = "yes")]
    pub(crate) shadow: bool,
}

impl Default for TextDefaultsDef {
    fn default() -> Self {
        Self {
            font: default_font(),
            font_size: default_font_size(),
            color: default_text_color(),
            bold: true,
            shadow: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SceneDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) background: Option<BackgroundDef>,
    /// Shorthand for an image background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) image_path: Option<String>,
    /// Shorthand for a video background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) video_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) background_effect: Option<MotionDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) transition: Option<TransitionDef>,
    #[serde(default)]
    pub(crate) overlays: Vec<OverlayDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum BackgroundDef {
    Image {
        path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resize: Option<String>,
    },
    Video {
        path: Option<String>,
        #[serde(default, alias = "video_start", skip_serializing_if = "Option::is_none")]
        start: Option<f64>,
        #[serde(default, alias = "video_end", skip_serializing_if = "Option::is_none")]
        end: Option<f64>,
        #[serde(default, alias = "video_speed", skip_serializing_if = "Option::is_none")]
        speed: Option<f64>,
        #[serde(default, alias = "resize_method", skip_serializing_if = "Option::is_none")]
        resize: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct MotionDef {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pulses: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) easing: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct TransitionDef {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) from_edge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) direction: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum OverlayDef {
    Text(TextOverlayDef),
    Image(ImageOverlayDef),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct TextOverlayDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) lines: Option<Vec<LineDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) line_colors: Option<Vec<ColorDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) animation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) position: Option<PositionDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<ColorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) shadow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) outline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) outline_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) bg_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) bg_padding: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LineDef {
    pub(crate) text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<ColorDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ImageOverlayDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) width: Option<NumberDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) position: Option<PositionDef>,
    #[serde(default)]
    pub(crate) fade_in: bool,
    #[serde(default)]
    pub(crate) fade_out: bool,
}

/// A JSON number that remembers whether it was written as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberDef {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum AxisDef {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum PositionDef {
    Named(String),
    Pair([AxisDef; 2]),
}

fn default_width() -> u32 {
    1184
}

fn default_height() -> u32 {
    864
}

fn default_intro_fade() -> f64 {
    0.5
}

fn default_outro_fade() -> f64 {
    1.0
}

fn default_codec() -> String {
    "libx264".to_owned()
}

fn default_audio_codec() -> String {
    "aac".to_owned()
}

fn default_bitrate() -> String {
    "5000k".to_owned()
}

fn default_preset() -> String {
    "medium".to_owned()
}

fn default_font() -> String {
    "Arial".to_owned()
}

fn default_font_size() -> f64 {
    80.0
}

fn default_text_color() -> ColorDef {
    ColorDef::WHITE
}

fn yes() -> bool {
    true
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
