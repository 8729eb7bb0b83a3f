use std::sync::Arc;

use crate::animation::text::TextAnimation;
use crate::effects::composite::blit_over;
use crate::effects::motion::MotionEffect;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::ReelResult;
use crate::render::frame::FrameRGBA;
use crate::scene::project::IMAGE_OVERLAY_FADE_SECS;
use crate::scene::video::VideoBackground;

/// Pixels behind the overlays of a scene.
#[derive(Debug)]
pub(crate) enum ClipBackground {
    /// Canvas-sized still image driven by a motion effect.
    Still {
        image: Arc<FrameRGBA>,
        motion: MotionEffect,
    },
    /// Video decoded on demand.
    Video(VideoBackground),
}

/// A still image layer fixed at one position.
#[derive(Debug)]
pub(crate) struct ImageLayer {
    pub(crate) image: Arc<FrameRGBA>,
    pub(crate) x: i64,
    pub(crate) y: i64,
    pub(crate) fade_in: bool,
    pub(crate) fade_out: bool,
}

impl ImageLayer {
    /// Layer opacity at scene time `t` in a scene lasting `duration` seconds.
    pub(crate) fn opacity(&self, t: f64, duration: f64) -> f32 {
        let mut a = 1.0f64;
        if self.fade_in {
            a = a.min(t / IMAGE_OVERLAY_FADE_SECS);
        }
        if self.fade_out {
            a = a.min((duration - t) / IMAGE_OVERLAY_FADE_SECS);
        }
        a.clamp(0.0, 1.0) as f32
    }
}

#[derive(Debug)]
pub(crate) enum ClipLayer {
    Text(TextAnimation),
    Image(ImageLayer),
}

/// One scene with all assets prepared, rendering any of its frames on demand.
#[derive(Debug)]
pub struct SceneClip {
    pub(crate) id: String,
    pub(crate) duration: f64,
    pub(crate) canvas: Canvas,
    pub(crate) fps: Fps,
    pub(crate) background: ClipBackground,
    pub(crate) layers: Vec<ClipLayer>,
}

impl SceneClip {
    /// Scene name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolved length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// `round(duration * fps)`.
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames(self.duration)
    }

    /// Render scene-local frame `i` into `dst`, replacing its contents.
    pub fn render_into(&self, i: u64, dst: &mut FrameRGBA) -> ReelResult<()> {
        let t = self.fps.frames_to_secs(i);
        match &self.background {
            ClipBackground::Still { image, motion } => motion.render(image, t, dst),
            ClipBackground::Video(video) => {
                let frame = video.frame_at(t)?;
                dst.data.fill(0);
                blit_over(dst, &frame, 0, 0, 1.0);
            }
        }
        for layer in &self.layers {
            match layer {
                ClipLayer::Text(anim) => anim.draw_into(dst, i),
                ClipLayer::Image(img) => {
                    blit_over(dst, &img.image, img.x, img.y, img.opacity(t, self.duration));
                }
            }
        }
        Ok(())
    }

    /// Scene-local frame `i` as a new canvas-sized image.
    pub fn frame(&self, i: u64) -> ReelResult<FrameRGBA> {
        let mut out = FrameRGBA::transparent(self.canvas.width, self.canvas.height);
        self.render_into(i, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/clip.rs"]
mod tests;
