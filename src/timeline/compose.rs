use crate::effects::composite::scale_brightness_in_place;
use crate::effects::transitions::compose_transition;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::scene::clip::SceneClip;
use crate::scene::project::TransitionSpec;
use crate::timeline::resolve::{FrameSource, ResolvedTimeline, TimelineInput};

/// Scene clips on a resolved timeline, producing any output frame on demand.
#[derive(Debug)]
pub struct Composer {
    clips: Vec<SceneClip>,
    timeline: ResolvedTimeline,
    canvas: Canvas,
    intro_fade: f64,
    outro_fade: f64,
}

impl Composer {
    /// Resolve the timeline for `clips` in order.
    ///
    /// `transitions[i]` is the requested transition into clip `i`.
    pub fn new(
        clips: Vec<SceneClip>,
        transitions: &[Option<TransitionSpec>],
        intro_fade: f64,
        outro_fade: f64,
    ) -> ReelResult<Self> {
        let first = clips
            .first()
            .ok_or_else(|| ReelError::validation("nothing to compose"))?;
        let (canvas, fps) = (first.canvas, first.fps);
        let inputs: Vec<TimelineInput<'_>> = clips
            .iter()
            .enumerate()
            .map(|(i, c)| TimelineInput {
                id: c.id(),
                duration_sec: c.duration(),
                transition_in: transitions.get(i).copied().flatten(),
            })
            .collect();
        let timeline = ResolvedTimeline::resolve(&inputs, fps)?;
        tracing::debug!(
            scenes = timeline.entries.len(),
            total_sec = timeline.total_duration_sec,
            total_frames = timeline.total_frames,
            "timeline resolved"
        );
        Ok(Self {
            clips,
            timeline,
            canvas,
            intro_fade: intro_fade.max(0.0),
            outro_fade: outro_fade.max(0.0),
        })
    }

    /// The resolved timeline.
    pub fn timeline(&self) -> &ResolvedTimeline {
        &self.timeline
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Prepared clips in timeline order.
    pub fn clips(&self) -> &[SceneClip] {
        &self.clips
    }

    /// Brightness multiplier from the intro and outro fades at output frame `frame`.
    pub fn fade_factor(&self, frame: u64) -> f64 {
        let t = self.timeline.fps.frames_to_secs(frame);
        let mut f = 1.0f64;
        if self.intro_fade > 0.0 {
            f = f.min(t / self.intro_fade);
        }
        if self.outro_fade > 0.0 {
            f = f.min((self.timeline.total_duration_sec - t) / self.outro_fade);
        }
        f.clamp(0.0, 1.0)
    }

    /// Render output frame `frame`.
    pub fn frame(&self, frame: u64) -> ReelResult<FrameRGBA> {
        if frame >= self.timeline.total_frames {
            return Err(ReelError::render(format!(
                "frame {frame} out of range (total {})",
                self.timeline.total_frames
            )));
        }
        let (w, h) = (self.canvas.width, self.canvas.height);
        let mut out = FrameRGBA::transparent(w, h);
        match self.timeline.locate(frame) {
            FrameSource::Single { entry, local } => {
                self.clips[self.timeline.entries[entry].scene].render_into(local, &mut out)?;
            }
            FrameSource::Transition {
                kind,
                progress,
                outgoing,
                incoming,
            } => {
                let mut a = FrameRGBA::transparent(w, h);
                let mut b = FrameRGBA::transparent(w, h);
                self.clips[self.timeline.entries[outgoing.0].scene].render_into(outgoing.1, &mut a)?;
                self.clips[self.timeline.entries[incoming.0].scene].render_into(incoming.1, &mut b)?;
                compose_transition(kind, progress, &a, &b, &mut out);
            }
        }
        scale_brightness_in_place(&mut out, self.fade_factor(frame) as f32);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/compose.rs"]
mod tests;
