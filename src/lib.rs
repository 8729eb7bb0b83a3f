//! storyreel turns a declarative scene document into a finished video.
//!
//! A project is a list of scenes. Each scene has an image or video background, an optional motion
//! effect and any number of text or image overlays. Scenes are joined by transitions, faded in and
//! out, optionally given a soundtrack, and streamed into `ffmpeg` as an MP4.
//!
//! - Parse a [`Project`] from JSON
//! - Create a [`RenderSession`] (validates assets, builds scene clips, resolves the timeline)
//! - Render single frames or stream a range into a [`FrameSink`], or call [`render`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod audio;
pub(crate) mod effects;
pub(crate) mod encode;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod text;
pub(crate) mod timeline;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8Premul};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::{Ease, EasePreset};
pub use crate::animation::text::{TextAnimation, TextFrames, TextPose};
pub use crate::assets::color::ColorDef;
pub use crate::assets::font::{FontBook, FontFace, FontMatch, ResolvedFont};
pub use crate::assets::media::{
    AudioPcm, MIX_SAMPLE_RATE, VideoSourceInfo, decode_audio_f32_stereo, probe_video,
};
pub use crate::audio::track::{SOUNDTRACK_FADE_OUT_SECS, fit_to_length, load_soundtrack};
pub use crate::effects::motion::{MotionEffect, MotionSample};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::builder::{build_clip, build_clips};
pub use crate::scene::clip::SceneClip;
pub use crate::scene::duration::{
    BASE_READ_SECS, MAX_TEXT_SECS, MIN_TEXT_SECS, NO_TEXT_SCENE_SECS, PER_WORD_SECS,
    TEXT_SCENE_BUFFER_SECS, WORDS_PER_SECOND, compute_scene_duration, text_duration,
};
pub use crate::scene::position::{AxisPos, Position};
pub use crate::scene::project::{
    AnimationKind, AnimationSpec, BackgroundPanel, BackgroundSource, IMAGE_OVERLAY_FADE_SECS,
    ImageOverlay, KenBurnsDirection, MotionEffectSpec, MotionKind, OutputParams, Overlay,
    OverlayWidth, PanDir, PanelStyle, Project, ResizePolicy, Scene, SlideDir, SlideFrom,
    SpecWarning, TextLine, TextOverlay, TextStyle, TransitionKind, TransitionSpec, ZoomDir,
};
pub use crate::scene::sample::sample_project_json;
pub use crate::scene::validate::check_assets;
pub use crate::session::render_session::{
    CancelToken, RenderSession, RenderSessionOpts, RenderStats,
};
pub use crate::session::{RenderOpts, render, render_with_stats};
pub use crate::text::raster::{LINE_SPACING, MAX_WIDTH_FRACTION, TEXT_PADDING};
pub use crate::timeline::compose::Composer;
pub use crate::timeline::resolve::{
    FrameSource, ResolvedTimeline, ResolvedTransition, TimelineEntry, TimelineInput,
};
