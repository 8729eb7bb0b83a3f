use std::sync::Arc;

use crate::animation::ease::EasePreset;
use crate::effects::composite::{Placement, draw_scaled_over};
use crate::foundation::core::{Canvas, Fps};
use crate::render::frame::FrameRGBA;
use crate::scene::position::Position;
use crate::scene::project::{AnimationKind, AnimationSpec, SlideFrom};

/// Where and how the text image is drawn on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPose {
    /// Destination x of the (scaled) image's top-left corner.
    pub x: f64,
    /// Destination y of the (scaled) image's top-left corner.
    pub y: f64,
    /// Horizontal scale, already snapped to whole destination pixels.
    pub scale_x: f64,
    /// Vertical scale, already snapped to whole destination pixels.
    pub scale_y: f64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
}

/// A rasterized text image animated onto a scene canvas.
///
/// Frames before the start are blank; the entrance runs for a fixed number of frames; afterwards
/// the image rests unmodified at its target position.
#[derive(Clone, Debug)]
pub struct TextAnimation {
    image: Arc<FrameRGBA>,
    kind: AnimationKind,
    anchor: (i64, i64),
    canvas: Canvas,
    start_frame: u64,
    anim_frames: u64,
    total_frames: u64,
}

impl TextAnimation {
    /// Prepare an animation of `image` centred on `position`.
    pub fn new(
        image: Arc<FrameRGBA>,
        spec: AnimationSpec,
        position: Position,
        start_time: f64,
        scene_duration: f64,
        canvas: Canvas,
        fps: Fps,
    ) -> Self {
        Self {
            image,
            kind: spec.kind,
            anchor: position.resolve(canvas),
            canvas,
            start_frame: fps.secs_to_frames(start_time.max(0.0)),
            anim_frames: fps.secs_to_frames(spec.duration_secs()),
            total_frames: fps.secs_to_frames(scene_duration.max(0.0)),
        }
    }

    /// Number of frames covering the scene.
    pub fn frame_count(&self) -> u64 {
        self.total_frames
    }

    /// The text image being animated.
    pub fn image(&self) -> &FrameRGBA {
        &self.image
    }

    /// Top-left corner of the image once it has settled.
    pub fn target(&self) -> (i64, i64) {
        (
            self.anchor.0.saturating_sub(i64::from(self.image.width / 2)),
            self.anchor.1.saturating_sub(i64::from(self.image.height / 2)),
        )
    }

    /// Pose for scene-local frame `i`, or `None` when nothing is drawn.
    pub fn pose(&self, i: u64) -> Option<TextPose> {
        if i < self.start_frame || i >= self.total_frames {
            return None;
        }
        let (tx, ty) = self.target();
        let (tx, ty) = (tx as f64, ty as f64);
        let local = i - self.start_frame;
        if local >= self.anim_frames {
            return Some(TextPose {
                x: tx,
                y: ty,
                scale_x: 1.0,
                scale_y: 1.0,
                opacity: 1.0,
            });
        }
        let p = local as f64 / self.anim_frames as f64;
        let w = f64::from(self.image.width);
        let h = f64::from(self.image.height);
        let (cw, ch) = self.canvas.size_f64();

        let pose = match self.kind {
            AnimationKind::Fade => TextPose {
                x: tx,
                y: ty,
                scale_x: 1.0,
                scale_y: 1.0,
                opacity: p as f32,
            },
            AnimationKind::Slide(from) => {
                let e = EasePreset::Text.ease().apply(p);
                let (x, y) = match from {
                    SlideFrom::Left => ((-w + (w + tx) * e).trunc(), ty),
                    SlideFrom::Right => ((cw + (tx - cw) * e).trunc(), ty),
                    SlideFrom::Top => (tx, (-h + (h + ty) * e).trunc()),
                    SlideFrom::Bottom => (tx, (ch + (ty - ch) * e).trunc()),
                };
                TextPose {
                    x,
                    y,
                    scale_x: 1.0,
                    scale_y: 1.0,
                    opacity: ramp(e, 0.3),
                }
            }
            AnimationKind::Scale => {
                let e = EasePreset::Text.ease().apply(p);
                self.scaled_pose(0.3 + 0.7 * e, ramp(e, 0.4))?
            }
            AnimationKind::Pop => {
                let scale = if p < 0.5 {
                    0.3 + 0.9 * (p * 2.0)
                } else {
                    1.2 - 0.2 * ((p - 0.5) * 2.0)
                };
                self.scaled_pose(scale, ramp(p, 0.2))?
            }
        };
        Some(pose)
    }

    fn scaled_pose(&self, scale: f64, opacity: f32) -> Option<TextPose> {
        let sw = (f64::from(self.image.width) * scale).trunc() as i64;
        let sh = (f64::from(self.image.height) * scale).trunc() as i64;
        if sw <= 0 || sh <= 0 {
            return None;
        }
        Some(TextPose {
            x: self.anchor.0.saturating_sub(sw / 2) as f64,
            y: self.anchor.1.saturating_sub(sh / 2) as f64,
            scale_x: sw as f64 / f64::from(self.image.width),
            scale_y: sh as f64 / f64::from(self.image.height),
            opacity,
        })
    }

    /// Composite frame `i` over `dst`.
    pub fn draw_into(&self, dst: &mut FrameRGBA, i: u64) {
        let Some(pose) = self.pose(i) else {
            return;
        };
        draw_scaled_over(
            dst,
            &self.image,
            Placement {
                x: pose.x,
                y: pose.y,
                scale_x: pose.scale_x,
                scale_y: pose.scale_y,
            },
            pose.opacity,
        );
    }

    /// Full-canvas transparent frame with only the text drawn.
    pub fn frame(&self, i: u64) -> FrameRGBA {
        let mut out = FrameRGBA::transparent(self.canvas.width, self.canvas.height);
        self.draw_into(&mut out, i);
        out
    }

    /// Lazy iterator over every frame of the animation.
    pub fn frames(&self) -> TextFrames<'_> {
        TextFrames {
            anim: self,
            next: 0,
        }
    }
}

fn ramp(progress: f64, until: f64) -> f32 {
    if progress < until {
        (progress / until) as f32
    } else {
        1.0
    }
}

/// Iterator returned by [`TextAnimation::frames`].
#[derive(Debug)]
pub struct TextFrames<'a> {
    anim: &'a TextAnimation,
    next: u64,
}

impl Iterator for TextFrames<'_> {
    type Item = FrameRGBA;

    fn next(&mut self) -> Option<FrameRGBA> {
        if self.next >= self.anim.total_frames {
            return None;
        }
        let f = self.anim.frame(self.next);
        self.next += 1;
        Some(f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.anim.total_frames - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TextFrames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/animation/text.rs"]
mod tests;
