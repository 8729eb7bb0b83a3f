//! Conversion from typed project values back into the JSON document shape.
//!
//! Every default is written out explicitly, so the result loads back into an equal [`Project`].

use crate::scene::model::{
    AxisDef, BackgroundDef, FpsDef, ImageOverlayDef, LineDef, MotionDef, NumberDef, OutputDef,
    OverlayDef, PositionDef, ProjectDef, SceneDef, TextDefaultsDef, TextOverlayDef, TransitionDef,
};
use crate::scene::position::{AxisPos, Position};
use crate::scene::project::{
    AnimationKind, BackgroundSource, ImageOverlay, KenBurnsDirection, MotionEffectSpec,
    MotionKind, Overlay, OverlayWidth, PanDir, PanelStyle, Project, ResizePolicy, Scene, SlideDir,
    SlideFrom, TextOverlay, TransitionKind, TransitionSpec, ZoomDir,
};
use std::path::Path;

pub(crate) fn project_to_def(project: &Project) -> ProjectDef {
    ProjectDef {
        width: project.canvas.width,
        height: project.canvas.height,
        fps: FpsDef {
            num: project.fps.num,
            den: project.fps.den,
        },
        output: OutputDef {
            path: Some(path_string(&project.output.path)),
            codec: project.output.codec.clone(),
            audio_codec: project.output.audio_codec.clone(),
            bitrate: project.output.bitrate.clone(),
            preset: project.output.preset.clone(),
        },
        output_path: None,
        audio_path: project.audio_track.as_deref().map(path_string),
        intro_fade: project.intro_fade,
        outro_fade: project.outro_fade,
        defaults: TextDefaultsDef::default(),
        scenes: Some(project.scenes.iter().map(scene_def).collect()),
    }
}

fn scene_def(scene: &Scene) -> SceneDef {
    SceneDef {
        name: Some(scene.id.clone()),
        background: Some(background_def(&scene.background)),
        image_path: None,
        video_path: None,
        duration: scene.explicit_duration,
        background_effect: Some(motion_def(&scene.motion_effect)),
        transition: Some(transition_def(scene.transition_in.as_ref())),
        overlays: scene
            .overlays
            .iter()
            .map(|o| match o {
                Overlay::Text(t) => OverlayDef::Text(text_overlay_def(t)),
                Overlay::Image(i) => OverlayDef::Image(image_overlay_def(i)),
            })
            .collect(),
    }
}

fn background_def(bg: &BackgroundSource) -> BackgroundDef {
    match bg {
        BackgroundSource::Image { path, resize } => BackgroundDef::Image {
            path: Some(path_string(path)),
            resize: Some(resize_name(*resize).to_owned()),
        },
        BackgroundSource::Video {
            path,
            trim_start,
            trim_end,
            speed,
            resize,
        } => BackgroundDef::Video {
            path: Some(path_string(path)),
            start: Some(*trim_start),
            end: *trim_end,
            speed: Some(*speed),
            resize: Some(resize_name(*resize).to_owned()),
        },
    }
}

fn resize_name(policy: ResizePolicy) -> &'static str {
    match policy {
        ResizePolicy::Crop => "crop",
        ResizePolicy::Fit => "fit",
        ResizePolicy::Stretch => "stretch",
    }
}

fn motion_def(spec: &MotionEffectSpec) -> MotionDef {
    let mut def = MotionDef {
        easing: Some(spec.easing.curve_name().to_owned()),
        ..MotionDef::default()
    };
    match spec.kind {
        MotionKind::Static => def.kind = Some("static".to_owned()),
        MotionKind::KenBurns {
            zoom,
            direction,
            pan,
        } => {
            def.kind = Some("kenburns".to_owned());
            def.zoom = Some(zoom);
            def.direction = Some(
                match direction {
                    KenBurnsDirection::In => "in",
                    KenBurnsDirection::Out => "out",
                    KenBurnsDirection::InOut => "in-out",
                }
                .to_owned(),
            );
            def.pan = pan.map(|p| {
                let name = match p {
                    PanDir::Left => "left",
                    PanDir::Right => "right",
                    PanDir::Up => "up",
                    PanDir::Down => "down",
                };
                name.to_owned()
            });
        }
        MotionKind::Parallax { depth } => {
            def.kind = Some("parallax".to_owned());
            def.depth = Some(depth);
        }
        MotionKind::ZoomPulse { intensity, pulses } => {
            def.kind = Some("zoom_pulse".to_owned());
            def.intensity = Some(intensity);
            def.pulses = Some(pulses);
        }
    }
    def
}

fn transition_def(spec: Option<&TransitionSpec>) -> TransitionDef {
    let Some(spec) = spec else {
        return TransitionDef {
            kind: Some("none".to_owned()),
            ..TransitionDef::default()
        };
    };
    let mut def = TransitionDef {
        duration: Some(spec.duration),
        ..TransitionDef::default()
    };
    match spec.kind {
        TransitionKind::Crossfade => def.kind = Some("crossfade".to_owned()),
        TransitionKind::Slide(dir) => {
            def.kind = Some("slide".to_owned());
            def.from_edge = Some(
                match dir {
                    SlideDir::Left => "left",
                    SlideDir::Right => "right",
                    SlideDir::Up => "up",
                    SlideDir::Down => "down",
                }
                .to_owned(),
            );
        }
        TransitionKind::Zoom(dir) => {
            def.kind = Some("zoom".to_owned());
            def.direction = Some(
                match dir {
                    ZoomDir::In => "in",
                    ZoomDir::Out => "out",
                }
                .to_owned(),
            );
        }
    }
    def
}

fn text_overlay_def(overlay: &TextOverlay) -> TextOverlayDef {
    let style = &overlay.style;
    let (text, lines, color) = if style.multicolor {
        let lines = overlay
            .lines
            .iter()
            .map(|l| LineDef {
                text: Some(l.text.clone()),
                color: Some(l.color),
            })
            .collect();
        (None, Some(lines), None)
    } else {
        let color = overlay.lines.first().map(|l| l.color);
        (Some(overlay.joined_text()), None, color)
    };

    let animation = match overlay.animation.kind {
        AnimationKind::Fade => "fade_in",
        AnimationKind::Slide(SlideFrom::Left) => "slide_in_left",
        AnimationKind::Slide(SlideFrom::Right) => "slide_in_right",
        AnimationKind::Slide(SlideFrom::Top) => "slide_in_top",
        AnimationKind::Slide(SlideFrom::Bottom) => "slide_in_bottom",
        AnimationKind::Scale => "scale_in",
        AnimationKind::Pop => "pop_in",
    };

    TextOverlayDef {
        text,
        lines,
        line_colors: None,
        animation: Some(animation.to_owned()),
        position: Some(position_def(overlay.position)),
        start_time: Some(overlay.start_time),
        font: Some(style.font.clone()),
        font_size: Some(style.size),
        color,
        bold: Some(style.bold),
        shadow: Some(style.shadow),
        outline: Some(style.outline),
        outline_width: Some(style.outline_width),
        background: Some(
            match style.panel.map(|p| p.style) {
                None => "none",
                Some(PanelStyle::Banner) => "banner",
                Some(PanelStyle::Rounded) => "rounded",
                Some(PanelStyle::Box) => "box",
                Some(PanelStyle::Gradient) => "gradient",
            }
            .to_owned(),
        ),
        bg_opacity: style.panel.map(|p| p.opacity),
        bg_padding: style.panel.map(|p| p.padding),
    }
}

fn image_overlay_def(overlay: &ImageOverlay) -> ImageOverlayDef {
    ImageOverlayDef {
        path: Some(path_string(&overlay.path)),
        width: overlay.width.map(|w| match w {
            OverlayWidth::Pixels(px) => NumberDef::Int(i64::from(px)),
            OverlayWidth::Fraction(f) => NumberDef::Float(f),
        }),
        position: Some(position_def(overlay.position)),
        fade_in: overlay.fade_in,
        fade_out: overlay.fade_out,
    }
}

fn position_def(pos: Position) -> PositionDef {
    if pos == Position::center() {
        return PositionDef::Named("center".to_owned());
    }
    let axis = |a: AxisPos| match a {
        AxisPos::Center => AxisDef::Text("center".to_owned()),
        AxisPos::Pixels(px) => AxisDef::Int(px),
        AxisPos::Fraction(f) if (0.0..=1.0).contains(&f) => AxisDef::Float(f),
        AxisPos::Fraction(f) => AxisDef::Text(format!("{}%", f * 100.0)),
    };
    PositionDef::Pair([axis(pos.x), axis(pos.y)])
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/export.rs"]
mod tests;
