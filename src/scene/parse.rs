//! The single conversion step from JSON boundary structs into typed project values.
//!
//! Missing required fields are collected and reported together as one validation error.
//! Unknown kind names are replaced by documented defaults and recorded as warnings.

use crate::animation::ease::{Ease, EasePreset};
use crate::assets::color::ColorDef;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{
    BackgroundDef, ImageOverlayDef, MotionDef, NumberDef, OverlayDef, ProjectDef, SceneDef,
    TextDefaultsDef, TextOverlayDef, TransitionDef,
};
use crate::scene::position::{Position, parse_position};
use crate::scene::project::{
    AnimationSpec, BackgroundPanel, BackgroundSource, ImageOverlay, KenBurnsDirection,
    MotionEffectSpec, MotionKind, OutputParams, Overlay, OverlayWidth, PanDir, PanelStyle,
    Project, ResizePolicy, Scene, SlideDir, SpecWarning, TextLine, TextOverlay, TextStyle,
    TransitionKind, TransitionSpec, ZoomDir,
};
use crate::scene::validate::check_overlay_start_times;
use std::path::PathBuf;

/// Default output file.
pub const DEFAULT_OUTPUT_PATH: &str = "output/video.mp4";
/// Default Ken Burns peak zoom.
pub const DEFAULT_KEN_BURNS_ZOOM: f64 = 1.15;
/// Zoom used by the directional `kenburns_<pan>` presets.
pub const PRESET_PAN_ZOOM: f64 = 1.1;
/// Default parallax depth.
pub const DEFAULT_PARALLAX_DEPTH: f64 = 0.05;
/// Default pulse intensity.
pub const DEFAULT_PULSE_INTENSITY: f64 = 0.03;
/// Default pulse count.
pub const DEFAULT_PULSES: f64 = 1.0;
/// Default transition overlap in seconds.
pub const DEFAULT_TRANSITION_SECS: f64 = 1.0;
/// Default panel opacity.
pub const DEFAULT_PANEL_OPACITY: f64 = 0.7;
/// Default panel padding in pixels.
pub const DEFAULT_PANEL_PADDING: u32 = 20;
/// Default outline radius in pixels.
pub const DEFAULT_OUTLINE_WIDTH: u32 = 3;

/// Animation names that are accepted but render as a fade. `AnimateText*` are legacy names.
const FADE_ALIASES: &[&str] = &["typewriter", "word_by_word", "none", "AnimateTextFromLeft"];

struct Collector {
    errors: Vec<String>,
    warnings: Vec<SpecWarning>,
}

impl Collector {
    fn error(&mut self, context: &str, message: impl std::fmt::Display) {
        self.errors.push(format!("{context}: {message}"));
    }

    fn warn(&mut self, context: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(context, "{message}");
        self.warnings.push(SpecWarning {
            context: context.to_owned(),
            message,
        });
    }
}

pub(crate) fn parse_project(def: ProjectDef) -> ReelResult<Project> {
    let mut c = Collector {
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    if def.width == 0 || def.height == 0 {
        c.error("width/height", "must be > 0");
    } else if def.width % 2 != 0 || def.height % 2 != 0 {
        c.error(
            "width/height",
            format!("{}x{} must both be even for yuv420p output", def.width, def.height),
        );
    }
    let fps = match Fps::new(def.fps.num, def.fps.den) {
        Ok(fps) => Some(fps),
        Err(e) => {
            c.error("fps", e);
            None
        }
    };
    if !(def.intro_fade.is_finite() && def.intro_fade >= 0.0) {
        c.error("intro_fade", "must be >= 0");
    }
    if !(def.outro_fade.is_finite() && def.outro_fade >= 0.0) {
        c.error("outro_fade", "must be >= 0");
    }

    let scenes = match def.scenes {
        None => {
            c.error("scenes", "missing required field");
            Vec::new()
        }
        Some(list) if list.is_empty() => {
            c.error("scenes", "at least one scene is required");
            Vec::new()
        }
        Some(list) => list
            .into_iter()
            .enumerate()
            .filter_map(|(i, s)| parse_scene(i, s, &def.defaults, &mut c))
            .collect(),
    };

    let canvas = Canvas {
        width: def.width,
        height: def.height,
    };

    if c.errors.is_empty() {
        for (i, scene) in scenes.iter().enumerate() {
            if let Err(e) = check_overlay_start_times(scene, None) {
                c.error(&format!("scenes[{i}]"), e);
            }
        }
    }

    let Some(fps) = fps.filter(|_| c.errors.is_empty()) else {
        return Err(ReelError::validation(c.errors.join("\n")));
    };

    let output_path = def
        .output
        .path
        .or(def.output_path)
        .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_owned());

    Ok(Project {
        canvas,
        fps,
        scenes,
        audio_track: def.audio_path.filter(|p| !p.trim().is_empty()).map(PathBuf::from),
        intro_fade: def.intro_fade,
        outro_fade: def.outro_fade,
        output: OutputParams {
            path: PathBuf::from(output_path),
            codec: def.output.codec,
            audio_codec: def.output.audio_codec,
            bitrate: def.output.bitrate,
            preset: def.output.preset,
        },
        warnings: c.warnings,
    })
}

fn parse_scene(
    index: usize,
    def: SceneDef,
    defaults: &TextDefaultsDef,
    c: &mut Collector,
) -> Option<Scene> {
    let ctx = format!("scenes[{index}]");
    let errors_before = c.errors.len();

    let background = parse_background(&ctx, &def, c);

    let explicit_duration = match def.duration {
        Some(d) if !d.is_finite() || d < 0.0 => {
            c.error(&format!("{ctx}.duration"), "must be >= 0");
            None
        }
        Some(d) if d > 0.0 => Some(d),
        _ => None,
    };

    let motion_effect = def
        .background_effect
        .as_ref()
        .map(|m| parse_motion(&format!("{ctx}.background_effect"), m, c))
        .unwrap_or_default();

    let transition_in = def
        .transition
        .as_ref()
        .and_then(|t| parse_transition(&format!("{ctx}.transition"), t, c));

    let overlays = def
        .overlays
        .iter()
        .enumerate()
        .filter_map(|(j, o)| {
            let octx = format!("{ctx}.overlays[{j}]");
            match o {
                OverlayDef::Text(t) => parse_text_overlay(&octx, t, defaults, c).map(Overlay::Text),
                OverlayDef::Image(i) => parse_image_overlay(&octx, i, c).map(Overlay::Image),
            }
        })
        .collect();

    if c.errors.len() > errors_before {
        return None;
    }

    Some(Scene {
        id: def
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Scene {}", index + 1)),
        background: background?,
        motion_effect,
        overlays,
        transition_in,
        explicit_duration,
    })
}

fn parse_background(ctx: &str, def: &SceneDef, c: &mut Collector) -> Option<BackgroundSource> {
    let resize = |name: &Option<String>, c: &mut Collector| -> ResizePolicy {
        match name.as_deref() {
            None => ResizePolicy::Crop,
            Some(n) => ResizePolicy::from_name(n).unwrap_or_else(|| {
                c.warn(
                    &format!("{ctx}.background.resize"),
                    format!("unknown resize policy \"{n}\", using crop"),
                );
                ResizePolicy::Crop
            }),
        }
    };

    match &def.background {
        Some(BackgroundDef::Image { path, resize: r }) => {
            let Some(path) = non_empty(path) else {
                c.error(&format!("{ctx}.background.path"), "missing required field");
                return None;
            };
            Some(BackgroundSource::Image {
                path: PathBuf::from(path),
                resize: resize(r, c),
            })
        }
        Some(BackgroundDef::Video {
            path,
            start,
            end,
            speed,
            resize: r,
        }) => {
            let Some(path) = non_empty(path) else {
                c.error(&format!("{ctx}.background.path"), "missing required field");
                return None;
            };
            let trim_start = start.unwrap_or(0.0);
            if !trim_start.is_finite() || trim_start < 0.0 {
                c.error(&format!("{ctx}.background.start"), "must be >= 0");
            }
            if let Some(e) = end
                && (!e.is_finite() || *e <= trim_start)
            {
                c.error(&format!("{ctx}.background.end"), "must be greater than start");
            }
            let speed = speed.unwrap_or(1.0);
            if !speed.is_finite() || speed <= 0.0 {
                c.error(&format!("{ctx}.background.speed"), "must be > 0");
            }
            Some(BackgroundSource::Video {
                path: PathBuf::from(path),
                trim_start,
                trim_end: *end,
                speed,
                resize: resize(r, c),
            })
        }
        None => {
            if let Some(p) = non_empty(&def.video_path) {
                Some(BackgroundSource::Video {
                    path: PathBuf::from(p),
                    trim_start: 0.0,
                    trim_end: None,
                    speed: 1.0,
                    resize: ResizePolicy::Crop,
                })
            } else if let Some(p) = non_empty(&def.image_path) {
                Some(BackgroundSource::Image {
                    path: PathBuf::from(p),
                    resize: ResizePolicy::Crop,
                })
            } else {
                c.error(
                    ctx,
                    "a background is required (\"background\", \"image_path\" or \"video_path\")",
                );
                None
            }
        }
    }
}

fn parse_motion(ctx: &str, def: &MotionDef, c: &mut Collector) -> MotionEffectSpec {
    let kind_name = def.kind.as_deref().unwrap_or("static");
    let key = kind_name.trim().to_ascii_lowercase().replace(['-', ' '], "_");

    let easing = match def.easing.as_deref() {
        Some(name) => resolve_ease(ctx, name, c),
        None if matches!(key.as_str(), "pulse" | "zoom_pulse" | "zoompulse") => {
            EasePreset::Zoom.ease()
        }
        None => EasePreset::Motion.ease(),
    };

    let kind = match key.as_str() {
        "static" | "none" => MotionKind::Static,
        "kenburns" | "ken_burns" => {
            let (direction, implied_pan) = parse_ken_burns_direction(ctx, def, c);
            let pan = match def.pan.as_deref() {
                Some(p) => PanDir::from_name(p).or_else(|| {
                    c.warn(ctx, format!("unknown pan \"{p}\", not panning"));
                    None
                }),
                None => implied_pan,
            };
            MotionKind::KenBurns {
                zoom: positive_or(ctx, "zoom", def.zoom, DEFAULT_KEN_BURNS_ZOOM, c),
                direction,
                pan,
            }
        }
        "kenburns_in" | "kenburns_out" => MotionKind::KenBurns {
            zoom: positive_or(ctx, "zoom", def.zoom, DEFAULT_KEN_BURNS_ZOOM, c),
            direction: if key.ends_with("_in") {
                KenBurnsDirection::In
            } else {
                KenBurnsDirection::Out
            },
            pan: None,
        },
        "kenburns_left" | "kenburns_right" | "kenburns_up" | "kenburns_down" => {
            MotionKind::KenBurns {
                zoom: positive_or(ctx, "zoom", def.zoom, PRESET_PAN_ZOOM, c),
                direction: KenBurnsDirection::In,
                pan: key.strip_prefix("kenburns_").and_then(PanDir::from_name),
            }
        }
        "parallax" => MotionKind::Parallax {
            depth: def.depth.filter(|d| d.is_finite() && *d >= 0.0).unwrap_or_else(|| {
                if def.depth.is_some() {
                    c.warn(ctx, format!("depth must be >= 0, using {DEFAULT_PARALLAX_DEPTH}"));
                }
                DEFAULT_PARALLAX_DEPTH
            }),
        },
        "pulse" | "zoom_pulse" | "zoompulse" => MotionKind::ZoomPulse {
            intensity: def
                .intensity
                .filter(|i| i.is_finite())
                .unwrap_or(DEFAULT_PULSE_INTENSITY),
            pulses: positive_or(ctx, "pulses", def.pulses, DEFAULT_PULSES, c),
        },
        _ => {
            c.warn(ctx, format!("unknown motion effect \"{kind_name}\", using static"));
            MotionKind::Static
        }
    };

    MotionEffectSpec { kind, easing }
}

/// A Ken Burns `direction` may also name a pan; the zoom then goes in.
fn parse_ken_burns_direction(
    ctx: &str,
    def: &MotionDef,
    c: &mut Collector,
) -> (KenBurnsDirection, Option<PanDir>) {
    let Some(name) = def.direction.as_deref() else {
        return (KenBurnsDirection::In, None);
    };
    match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "in" => (KenBurnsDirection::In, None),
        "out" => (KenBurnsDirection::Out, None),
        "in-out" | "inout" => (KenBurnsDirection::InOut, None),
        other => match PanDir::from_name(other) {
            Some(pan) => (KenBurnsDirection::In, Some(pan)),
            None => {
                c.warn(ctx, format!("unknown Ken Burns direction \"{name}\", using in"));
                (KenBurnsDirection::In, None)
            }
        },
    }
}

fn parse_transition(ctx: &str, def: &TransitionDef, c: &mut Collector) -> Option<TransitionSpec> {
    let kind_name = def.kind.as_deref().unwrap_or("fade");
    let kind = match kind_name.trim().to_ascii_lowercase().as_str() {
        "none" | "cut" => return None,
        "fade" | "crossfade" => TransitionKind::Crossfade,
        "slide" | "slidein" | "slide_in" => {
            let edge = def.from_edge.as_deref().unwrap_or("left");
            match edge.trim().to_ascii_lowercase().as_str() {
                "left" => TransitionKind::Slide(SlideDir::Left),
                "right" => TransitionKind::Slide(SlideDir::Right),
                "up" => TransitionKind::Slide(SlideDir::Up),
                "down" => TransitionKind::Slide(SlideDir::Down),
                _ => {
                    c.warn(ctx, format!("unknown slide edge \"{edge}\", using crossfade"));
                    TransitionKind::Crossfade
                }
            }
        }
        "zoom" => {
            let dir = def.direction.as_deref().unwrap_or("in");
            match dir.trim().to_ascii_lowercase().as_str() {
                "in" => TransitionKind::Zoom(ZoomDir::In),
                "out" => TransitionKind::Zoom(ZoomDir::Out),
                _ => {
                    c.warn(ctx, format!("unknown zoom direction \"{dir}\", using in"));
                    TransitionKind::Zoom(ZoomDir::In)
                }
            }
        }
        _ => {
            c.warn(ctx, format!("unknown transition \"{kind_name}\", using crossfade"));
            TransitionKind::Crossfade
        }
    };

    let duration = match def.duration {
        Some(d) if d.is_finite() && d >= 0.0 => d,
        Some(d) => {
            c.error(&format!("{ctx}.duration"), format!("{d} must be >= 0"));
            return None;
        }
        None => DEFAULT_TRANSITION_SECS,
    };

    Some(TransitionSpec { kind, duration })
}

fn parse_text_overlay(
    ctx: &str,
    def: &TextOverlayDef,
    defaults: &TextDefaultsDef,
    c: &mut Collector,
) -> Option<TextOverlay> {
    let color = def.color.unwrap_or(defaults.color);

    let (lines, multicolor) = if let Some(lines) = def.lines.as_ref().filter(|l| !l.is_empty()) {
        let mut out = Vec::with_capacity(lines.len());
        for (i, l) in lines.iter().enumerate() {
            let Some(text) = &l.text else {
                c.error(&format!("{ctx}.lines[{i}]"), "missing 'text'");
                continue;
            };
            out.push(TextLine {
                text: text.clone(),
                color: l.color.unwrap_or(color),
            });
        }
        if out.len() != lines.len() {
            return None;
        }
        (out, true)
    } else if let Some(text) = &def.text {
        let colors: &[ColorDef] = def.line_colors.as_deref().unwrap_or(&[]);
        let lines = split_lines(text)
            .into_iter()
            .enumerate()
            .map(|(i, t)| TextLine {
                text: t.to_owned(),
                color: colors.get(i).copied().unwrap_or(color),
            })
            .collect();
        (lines, def.line_colors.is_some())
    } else {
        c.error(ctx, "text overlay needs \"text\" or \"lines\"");
        return None;
    };

    let size = positive_or(ctx, "font_size", def.font_size, defaults.font_size, c);

    let panel = match def.background.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(n) if n.eq_ignore_ascii_case("none") => None,
        Some(n) => match PanelStyle::from_name(n) {
            Some(style) => Some(BackgroundPanel {
                style,
                opacity: def
                    .bg_opacity
                    .filter(|o| o.is_finite())
                    .unwrap_or(DEFAULT_PANEL_OPACITY)
                    .clamp(0.0, 1.0),
                padding: def.bg_padding.unwrap_or(DEFAULT_PANEL_PADDING),
            }),
            None => {
                c.warn(ctx, format!("unknown text background \"{n}\", drawing no panel"));
                None
            }
        },
    };

    let animation = match def.animation.as_deref() {
        None => AnimationSpec::default(),
        Some(name) => AnimationSpec::from_name(name).unwrap_or_else(|| {
            let known = FADE_ALIASES
                .iter()
                .any(|a| name.trim().eq_ignore_ascii_case(a));
            if !known {
                c.warn(ctx, format!("unknown animation \"{name}\", using fade"));
            }
            AnimationSpec::default()
        }),
    };

    let position = parse_position_field(ctx, def.position.as_ref(), c);

    let start_time = def.start_time.unwrap_or(0.0);
    if !start_time.is_finite() || start_time < 0.0 {
        c.error(&format!("{ctx}.start_time"), format!("{start_time} must be >= 0"));
        return None;
    }

    Some(TextOverlay {
        lines,
        style: TextStyle {
            font: def.font.clone().unwrap_or_else(|| defaults.font.clone()),
            size,
            bold: def.bold.unwrap_or(defaults.bold),
            shadow: def.shadow.unwrap_or(defaults.shadow),
            outline: def.outline.unwrap_or(false),
            outline_width: def.outline_width.unwrap_or(DEFAULT_OUTLINE_WIDTH),
            panel,
            multicolor,
        },
        animation,
        position,
        start_time,
    })
}

fn parse_image_overlay(ctx: &str, def: &ImageOverlayDef, c: &mut Collector) -> Option<ImageOverlay> {
    let Some(path) = non_empty(&def.path) else {
        c.error(&format!("{ctx}.path"), "missing required field");
        return None;
    };

    let width = match def.width {
        None => None,
        Some(NumberDef::Float(f)) if f.is_finite() && f > 0.0 && f <= 1.0 => {
            Some(OverlayWidth::Fraction(f))
        }
        Some(NumberDef::Float(f)) if f.is_finite() && f > 1.0 => {
            Some(OverlayWidth::Pixels(f.trunc() as u32))
        }
        Some(NumberDef::Int(px)) if px > 0 => {
            Some(OverlayWidth::Pixels(u32::try_from(px).unwrap_or(u32::MAX)))
        }
        Some(other) => {
            c.warn(ctx, format!("unusable width {other:?}, keeping natural size"));
            None
        }
    };

    Some(ImageOverlay {
        path: PathBuf::from(path),
        width,
        position: parse_position_field(ctx, def.position.as_ref(), c),
        fade_in: def.fade_in,
        fade_out: def.fade_out,
    })
}

fn parse_position_field(
    ctx: &str,
    def: Option<&crate::scene::model::PositionDef>,
    c: &mut Collector,
) -> Position {
    let Some(def) = def else {
        return Position::center();
    };
    let (pos, notes) = parse_position(def);
    for n in notes {
        c.warn(ctx, n);
    }
    pos
}

fn resolve_ease(ctx: &str, name: &str, c: &mut Collector) -> Ease {
    if let Some(p) = EasePreset::from_name(name) {
        return p.ease();
    }
    Ease::from_curve_name(name).unwrap_or_else(|| {
        c.warn(ctx, format!("unknown easing \"{name}\", using ease_in_out_cubic"));
        Ease::InOutCubic
    })
}

fn positive_or(ctx: &str, field: &str, v: Option<f64>, default: f64, c: &mut Collector) -> f64 {
    match v {
        None => default,
        Some(x) if x.is_finite() && x > 0.0 => x,
        Some(x) => {
            c.warn(ctx, format!("{field} {x} must be > 0, using {default}"));
            default
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Split text on real newlines and on the two-character `\n` escape.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').flat_map(|l| l.split("\\n")).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/parse.rs"]
mod tests;
