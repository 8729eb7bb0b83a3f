use crate::animation::ease::{Ease, EasePreset};
use crate::assets::color::ColorDef;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::export::project_to_def;
use crate::scene::model::ProjectDef;
use crate::scene::parse::parse_project;
use crate::scene::position::Position;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A fully parsed, immutable project.
///
/// Built once from a JSON document through [`Project::from_path`] or [`Project::from_reader`].
/// Every default is applied during construction; renderers never see optional fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    /// Output frame size.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Scenes in playback order. Never empty.
    pub scenes: Vec<Scene>,
    /// Optional music track, relative to the assets root.
    pub audio_track: Option<PathBuf>,
    /// Fade-from-black at the start of the video, in seconds.
    pub intro_fade: f64,
    /// Fade-to-black at the end of the video, in seconds.
    pub outro_fade: f64,
    /// Encoder settings.
    pub output: OutputParams,
    /// Non-fatal problems found while parsing.
    pub warnings: Vec<SpecWarning>,
}

impl Project {
    /// Parse and validate a project from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let def: ProjectDef = serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse project JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a project from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// The processed project as a JSON document with every default written out.
    ///
    /// The document loads back through [`Project::from_reader`] into an equal project, minus
    /// the parse warnings.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(&project_to_def(self))
            .map_err(|e| ReelError::serde(format!("serialize project JSON: {e}")))
    }

    /// Write [`Project::to_json_pretty`] to `path`, creating parent directories.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save_processed(&self, path: impl AsRef<Path>) -> ReelResult<()> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write processed project '{}'", path.display()))?;
        tracing::info!("saved processed project");
        Ok(())
    }

    pub(crate) fn from_def(def: ProjectDef) -> ReelResult<Self> {
        let project = parse_project(def)?;
        for w in &project.warnings {
            tracing::warn!(context = %w.context, "{}", w.message);
        }
        Ok(project)
    }
}

/// A non-fatal configuration problem that was replaced by a default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecWarning {
    /// Where in the document the problem was found, e.g. `scenes[1].transition`.
    pub context: String,
    /// What was substituted.
    pub message: String,
}

impl std::fmt::Display for SpecWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

/// Encoder parameters passed to ffmpeg.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputParams {
    /// Output file path.
    pub path: PathBuf,
    /// Video codec (`-c:v`).
    pub codec: String,
    /// Audio codec (`-c:a`).
    pub audio_codec: String,
    /// Video bitrate (`-b:v`).
    pub bitrate: String,
    /// Encoder speed preset (`-preset`).
    pub preset: String,
}

/// One timed segment of the output video.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Scene name, `"Scene N"` when not given.
    pub id: String,
    /// Background source.
    pub background: BackgroundSource,
    /// Motion applied to still backgrounds.
    pub motion_effect: MotionEffectSpec,
    /// Overlays in draw order.
    pub overlays: Vec<Overlay>,
    /// Transition from the previous scene. Ignored on the first scene.
    pub transition_in: Option<TransitionSpec>,
    /// Explicit positive duration in seconds.
    pub explicit_duration: Option<f64>,
}

/// How a background is fitted to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Scale to cover, centre-crop the overflow.
    #[default]
    Crop,
    /// Scale to fit inside, transparent bars.
    Fit,
    /// Non-uniform scale to the exact size.
    Stretch,
}

impl ResizePolicy {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "crop" | "fill" | "cover" => Self::Crop,
            "fit" | "contain" | "letterbox" => Self::Fit,
            "stretch" => Self::Stretch,
            _ => return None,
        })
    }
}

/// Where a scene's background pixels come from.
#[derive(Clone, Debug, PartialEq)]
pub enum BackgroundSource {
    /// Still image (raster or SVG).
    Image {
        /// Path relative to the assets root.
        path: PathBuf,
        /// Fit policy.
        resize: ResizePolicy,
    },
    /// Video file decoded through ffmpeg.
    Video {
        /// Path relative to the assets root.
        path: PathBuf,
        /// Source seconds skipped at the start.
        trim_start: f64,
        /// Source second where playback stops; `None` plays to the end.
        trim_end: Option<f64>,
        /// Playback speed multiplier, > 0.
        speed: f64,
        /// Fit policy.
        resize: ResizePolicy,
    },
}

impl BackgroundSource {
    /// Source file path.
    pub fn path(&self) -> &Path {
        match self {
            Self::Image { path, .. } | Self::Video { path, .. } => path,
        }
    }
}

/// A layer drawn over the background.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    /// Animated text.
    Text(TextOverlay),
    /// Still image such as a logo.
    Image(ImageOverlay),
}

/// One logical line of text with its colour.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Line content. May still wrap into several rows.
    pub text: String,
    /// Fill colour.
    pub color: ColorDef,
}

/// Animated text overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    /// Logical lines.
    pub lines: Vec<TextLine>,
    /// Styling shared by all lines.
    pub style: TextStyle,
    /// Entrance animation.
    pub animation: AnimationSpec,
    /// Anchor of the text centre.
    pub position: Position,
    /// Seconds after scene start when the animation begins.
    pub start_time: f64,
}

impl TextOverlay {
    /// All lines joined with newlines.
    pub fn joined_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Text styling.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Family name or font file path.
    pub font: String,
    /// Nominal size at 720p; scaled with the frame height.
    pub size: f64,
    /// Request the bold weight.
    pub bold: bool,
    /// Draw a soft drop shadow.
    pub shadow: bool,
    /// Draw a black outline.
    pub outline: bool,
    /// Outline radius in pixels.
    pub outline_width: u32,
    /// Optional panel behind the text.
    pub panel: Option<BackgroundPanel>,
    /// Lines carry their own colours. Affects the panel colour.
    pub multicolor: bool,
}

/// Panel drawn behind text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundPanel {
    /// Panel shape.
    pub style: PanelStyle,
    /// Panel opacity in `[0, 1]`.
    pub opacity: f64,
    /// Space between glyph image and panel edge.
    pub padding: u32,
}

/// Panel shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelStyle {
    /// Full rectangle.
    Banner,
    /// Rectangle with rounded corners.
    Rounded,
    /// Rectangle inset by half the padding.
    Box,
    /// Vertical alpha falloff peaking at the centre row.
    Gradient,
}

impl PanelStyle {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "rounded" => Self::Rounded,
            "box" => Self::Box,
            "gradient" => Self::Gradient,
            _ => return None,
        })
    }
}

/// Edge a sliding text enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideFrom {
    /// Enters from the left edge.
    Left,
    /// Enters from the right edge.
    Right,
    /// Enters from the top edge.
    Top,
    /// Enters from the bottom edge.
    Bottom,
}

/// Text entrance animation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Alpha ramp in place.
    Fade,
    /// Slide in from off-canvas.
    Slide(SlideFrom),
    /// Grow from 30 % to full size.
    Scale,
    /// Grow past full size, then settle.
    Pop,
}

/// Text animation. Durations are fixed per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Animation kind.
    pub kind: AnimationKind,
}

impl AnimationSpec {
    /// Length of the animating phase in seconds.
    pub fn duration_secs(self) -> f64 {
        match self.kind {
            AnimationKind::Fade | AnimationKind::Slide(_) => 0.8,
            AnimationKind::Scale => 0.7,
            AnimationKind::Pop => 0.5,
        }
    }

    /// Match an animation name by keyword, in the order fade, slide, scale, pop.
    ///
    /// Returns `None` when no keyword matches.
    pub fn from_name(name: &str) -> Option<Self> {
        let n = name.to_ascii_lowercase();
        let kind = if n.contains("fade") {
            AnimationKind::Fade
        } else if n.contains("slide") && n.contains("left") {
            AnimationKind::Slide(SlideFrom::Left)
        } else if n.contains("slide") && n.contains("right") {
            AnimationKind::Slide(SlideFrom::Right)
        } else if n.contains("slide") && n.contains("bottom") {
            AnimationKind::Slide(SlideFrom::Bottom)
        } else if n.contains("slide") && n.contains("top") {
            AnimationKind::Slide(SlideFrom::Top)
        } else if n.contains("scale") || n.contains("zoom") || n.contains("grow") {
            AnimationKind::Scale
        } else if n.contains("pop") || n.contains("bounce") {
            AnimationKind::Pop
        } else {
            return None;
        };
        Some(Self { kind })
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Fade,
        }
    }
}

/// Image overlay width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayWidth {
    /// Absolute width in pixels.
    Pixels(u32),
    /// Fraction of the frame width.
    Fraction(f64),
}

impl OverlayWidth {
    /// Width in pixels on a frame of width `frame_width`.
    pub fn resolve(self, frame_width: u32) -> u32 {
        match self {
            Self::Pixels(px) => px.max(1),
            Self::Fraction(f) => ((f64::from(frame_width) * f).trunc() as u32).max(1),
        }
    }
}

/// Still image layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOverlay {
    /// Path relative to the assets root.
    pub path: PathBuf,
    /// Target width, aspect kept. `None` keeps the natural size.
    pub width: Option<OverlayWidth>,
    /// Placement of the image; see [`Position::place_box`].
    pub position: Position,
    /// Fade in over the first 0.5 s of the scene.
    pub fade_in: bool,
    /// Fade out over the last 0.5 s of the scene.
    pub fade_out: bool,
}

/// Fade length used by image overlays.
pub const IMAGE_OVERLAY_FADE_SECS: f64 = 0.5;

/// Ken Burns zoom direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KenBurnsDirection {
    /// `1 -> zoom`.
    In,
    /// `zoom -> 1`.
    Out,
    /// `1 -> zoom -> 1`.
    InOut,
}

/// Pan direction for Ken Burns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanDir {
    /// Image travels so the view moves left.
    Left,
    /// View moves right.
    Right,
    /// View moves up.
    Up,
    /// View moves down.
    Down,
}

impl PanDir {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            _ => return None,
        })
    }
}

/// Background motion kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionKind {
    /// No motion.
    Static,
    /// Slow zoom with optional pan.
    KenBurns {
        /// Peak scale factor.
        zoom: f64,
        /// Zoom direction.
        direction: KenBurnsDirection,
        /// Optional pan.
        pan: Option<PanDir>,
    },
    /// Constant pre-zoom with one lateral pass.
    Parallax {
        /// Fraction of the frame width travelled to each side.
        depth: f64,
    },
    /// Sinusoidal breathing zoom.
    ZoomPulse {
        /// Peak scale deviation.
        intensity: f64,
        /// Full sine periods over the scene.
        pulses: f64,
    },
}

/// Background motion effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionEffectSpec {
    /// Effect kind.
    pub kind: MotionKind,
    /// Progress easing. Ignored by [`MotionKind::ZoomPulse`].
    pub easing: Ease,
}

impl Default for MotionEffectSpec {
    fn default() -> Self {
        Self {
            kind: MotionKind::Static,
            easing: EasePreset::Motion.ease(),
        }
    }
}

/// Direction the incoming scene travels during a slide transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDir {
    /// Travels leftwards, entering from the right edge.
    Left,
    /// Travels rightwards, entering from the left edge.
    Right,
    /// Travels upwards, entering from the bottom edge.
    Up,
    /// Travels downwards, entering from the top edge.
    Down,
}

/// Zoom transition direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDir {
    /// Incoming scene grows from half size.
    In,
    /// Outgoing scene grows past full size.
    Out,
}

/// Transition kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Alpha blend.
    Crossfade,
    /// Incoming scene slides over the outgoing one.
    Slide(SlideDir),
    /// Scale plus alpha.
    Zoom(ZoomDir),
}

/// Transition into a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSpec {
    /// Transition kind.
    pub kind: TransitionKind,
    /// Requested overlap in seconds, before clamping.
    pub duration: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/project.rs"]
mod tests;
