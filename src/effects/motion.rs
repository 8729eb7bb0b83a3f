use crate::effects::composite::{Placement, blit_over, draw_scaled_over};
use crate::foundation::core::{Canvas, Vec2};
use crate::render::frame::FrameRGBA;
use crate::scene::project::{KenBurnsDirection, MotionEffectSpec, MotionKind, PanDir};

/// Scale and placement of a canvas-sized background at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    /// Uniform scale applied to the background.
    pub scale: f64,
    /// Top-left of the scaled background relative to the canvas origin.
    pub offset: Vec2,
}

impl MotionSample {
    /// No scale, no offset.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
    };
}

/// A motion effect bound to a scene duration and canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionEffect {
    spec: MotionEffectSpec,
    duration: f64,
    canvas: Canvas,
}

impl MotionEffect {
    /// Bind `spec` to a scene of `duration` seconds on `canvas`.
    pub fn new(spec: MotionEffectSpec, duration: f64, canvas: Canvas) -> Self {
        Self {
            spec,
            duration,
            canvas,
        }
    }

    /// `true` for [`MotionKind::Static`].
    pub fn is_static(&self) -> bool {
        matches!(self.spec.kind, MotionKind::Static)
    }

    /// Transform at scene-local time `t` seconds.
    pub fn sample(&self, t: f64) -> MotionSample {
        let (w, h) = self.canvas.size_f64();
        let linear = if self.duration > 0.0 {
            (t / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let p = self.spec.easing.apply(linear);

        match self.spec.kind {
            MotionKind::Static => MotionSample::IDENTITY,
            MotionKind::KenBurns {
                zoom,
                direction,
                pan,
            } => {
                let scale = match direction {
                    KenBurnsDirection::In => 1.0 + (zoom - 1.0) * p,
                    KenBurnsDirection::Out => zoom - (zoom - 1.0) * p,
                    KenBurnsDirection::InOut if p < 0.5 => 1.0 + (zoom - 1.0) * (p * 2.0),
                    KenBurnsDirection::InOut => zoom - (zoom - 1.0) * ((p - 0.5) * 2.0),
                };
                let avail_w = w * scale - w;
                let avail_h = h * scale - h;
                let mut offset = Vec2::new(-avail_w / 2.0, -avail_h / 2.0);
                match pan {
                    Some(PanDir::Right) => offset.x = -avail_w * p,
                    Some(PanDir::Left) => offset.x = -avail_w * (1.0 - p),
                    Some(PanDir::Down) => offset.y = -avail_h * p,
                    Some(PanDir::Up) => offset.y = -avail_h * (1.0 - p),
                    None => {}
                }
                MotionSample { scale, offset }
            }
            MotionKind::Parallax { depth } => {
                let scale = 1.0 + 2.0 * depth;
                MotionSample {
                    scale,
                    offset: Vec2::new(
                        -depth * w + w * depth * (p - 0.5) * 2.0,
                        -(h * scale - h) / 2.0,
                    ),
                }
            }
            MotionKind::ZoomPulse { intensity, pulses } => {
                let phase = if self.duration > 0.0 {
                    t / self.duration * pulses
                } else {
                    0.0
                };
                let scale = 1.0 + intensity * (phase * std::f64::consts::TAU).sin();
                MotionSample {
                    scale,
                    offset: Vec2::new(-(w * scale - w) / 2.0, -(h * scale - h) / 2.0),
                }
            }
        }
    }

    /// Draw `background` transformed for time `t` into `dst`, replacing its contents.
    ///
    /// A static effect copies the background bit-exactly.
    pub fn render(&self, background: &FrameRGBA, t: f64, dst: &mut FrameRGBA) {
        dst.data.fill(0);
        if self.is_static() {
            blit_over(dst, background, 0, 0, 1.0);
            return;
        }
        let s = self.sample(t);
        draw_scaled_over(
            dst,
            background,
            Placement::uniform(s.offset.x, s.offset.y, s.scale),
            1.0,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/motion.rs"]
mod tests;
