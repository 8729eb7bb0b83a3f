use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::project::{TransitionKind, TransitionSpec};

/// Transition into a timeline entry after clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTransition {
    /// Transition kind.
    pub kind: TransitionKind,
    /// Overlap with the previous entry in seconds.
    pub duration_sec: f64,
    /// Overlap in output frames.
    pub frames: u64,
}

/// One scene placed on the output timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEntry {
    /// Position of the scene in the project.
    pub scene: usize,
    /// Scene name.
    pub id: String,
    /// Absolute start in seconds.
    pub start_sec: f64,
    /// Scene length in seconds.
    pub duration_sec: f64,
    /// Absolute start frame.
    pub start_frame: u64,
    /// Scene length in frames.
    pub frame_count: u64,
    /// Transition from the previous entry, never present on the first one.
    pub transition_in: Option<ResolvedTransition>,
}

impl TimelineEntry {
    /// Absolute end time in seconds.
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.duration_sec
    }
}

/// Ordered scene placement with overlaps resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTimeline {
    /// Entries in scene order.
    pub entries: Vec<TimelineEntry>,
    /// End of the last entry in seconds.
    pub total_duration_sec: f64,
    /// `round(total_duration_sec * fps)`.
    pub total_frames: u64,
    /// Output frame rate.
    pub fps: Fps,
}

/// What the resolver needs to know about one scene.
#[derive(Clone, Debug)]
pub struct TimelineInput<'a> {
    /// Scene name.
    pub id: &'a str,
    /// Resolved scene length in seconds.
    pub duration_sec: f64,
    /// Requested transition into this scene.
    pub transition_in: Option<TransitionSpec>,
}

impl ResolvedTimeline {
    /// Place scenes back to back, overlapping each pair by its clamped transition length.
    ///
    /// A transition is clamped to half of the shorter of the two scenes it joins. The first
    /// scene's transition has nothing to overlap and is dropped.
    pub fn resolve(scenes: &[TimelineInput<'_>], fps: Fps) -> ReelResult<Self> {
        if scenes.is_empty() {
            return Err(ReelError::validation("timeline needs at least one scene"));
        }

        let mut entries: Vec<TimelineEntry> = Vec::with_capacity(scenes.len());
        let mut cursor = 0.0f64;
        for (i, s) in scenes.iter().enumerate() {
            if !(s.duration_sec.is_finite() && s.duration_sec > 0.0) {
                return Err(ReelError::validation(format!(
                    "scene \"{}\" has non-positive duration {}",
                    s.id, s.duration_sec
                )));
            }

            let transition_in = match (entries.last(), s.transition_in) {
                (Some(prev), Some(spec)) => {
                    let limit = 0.5 * prev.duration_sec.min(s.duration_sec);
                    let d = spec.duration.max(0.0).min(limit);
                    if d < spec.duration {
                        tracing::debug!(scene = %s.id, requested = spec.duration, clamped = d, "transition clamped");
                    }
                    (d > 0.0).then(|| ResolvedTransition {
                        kind: spec.kind,
                        duration_sec: d,
                        frames: fps.secs_to_frames(d),
                    })
                }
                (None, Some(_)) => {
                    tracing::debug!(scene = %s.id, "transition on first scene ignored");
                    None
                }
                _ => None,
            };

            let start_sec = match transition_in {
                Some(t) => cursor - t.duration_sec,
                None => cursor,
            };
            entries.push(TimelineEntry {
                scene: i,
                id: s.id.to_owned(),
                start_sec,
                duration_sec: s.duration_sec,
                start_frame: fps.secs_to_frames(start_sec),
                frame_count: fps.secs_to_frames(s.duration_sec),
                transition_in,
            });
            cursor = start_sec + s.duration_sec;
        }

        Ok(Self {
            entries,
            total_duration_sec: cursor,
            total_frames: fps.secs_to_frames(cursor),
            fps,
        })
    }

    /// Which entries contribute to output frame `frame`.
    pub fn locate(&self, frame: u64) -> FrameSource {
        let k = self
            .entries
            .partition_point(|e| e.start_frame <= frame)
            .saturating_sub(1);
        let cur = &self.entries[k];
        let local = clamp_local(frame.saturating_sub(cur.start_frame), cur.frame_count);

        if k > 0
            && let Some(t) = cur.transition_in
            && t.frames > 0
            && frame < cur.start_frame + t.frames
        {
            let prev = &self.entries[k - 1];
            let prev_local = clamp_local(frame.saturating_sub(prev.start_frame), prev.frame_count);
            let progress = (frame - cur.start_frame) as f64 / t.frames as f64;
            return FrameSource::Transition {
                kind: t.kind,
                progress,
                outgoing: (k - 1, prev_local),
                incoming: (k, local),
            };
        }
        FrameSource::Single { entry: k, local }
    }
}

fn clamp_local(local: u64, frame_count: u64) -> u64 {
    local.min(frame_count.saturating_sub(1))
}

/// Entries and local frame indices behind one output frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameSource {
    /// One scene alone.
    Single {
        /// Entry index.
        entry: usize,
        /// Scene-local frame.
        local: u64,
    },
    /// Two scenes blended by a transition.
    Transition {
        /// Transition kind.
        kind: TransitionKind,
        /// Linear progress in `[0, 1)`.
        progress: f64,
        /// Entry index and local frame of the outgoing scene.
        outgoing: (usize, u64),
        /// Entry index and local frame of the incoming scene.
        incoming: (usize, u64),
    },
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/resolve.rs"]
mod tests;
