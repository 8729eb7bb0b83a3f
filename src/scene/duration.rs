//! Scene display duration inferred from overlay content.
//!
//! These constants are a reading-time heuristic. They are kept exactly so that renders stay
//! reproducible across versions; change them only as a deliberate product decision.

use crate::scene::project::{Overlay, Scene};

/// Words read per second.
pub const WORDS_PER_SECOND: f64 = 1.8;
/// Fixed lead-in added to every text.
pub const BASE_READ_SECS: f64 = 1.5;
/// Extra seconds per word for comprehension.
pub const PER_WORD_SECS: f64 = 0.4;
/// Shortest text display time.
pub const MIN_TEXT_SECS: f64 = 4.0;
/// Longest text display time.
pub const MAX_TEXT_SECS: f64 = 10.0;
/// Duration of a scene without text overlays.
pub const NO_TEXT_SCENE_SECS: f64 = 4.5;
/// Buffer added after the longest text of a scene.
pub const TEXT_SCENE_BUFFER_SECS: f64 = 1.0;

/// Display time for one piece of text, in seconds.
pub fn text_duration(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return MIN_TEXT_SECS;
    }
    let w = words as f64;
    (w / WORDS_PER_SECOND + BASE_READ_SECS + w * PER_WORD_SECS).clamp(MIN_TEXT_SECS, MAX_TEXT_SECS)
}

/// Duration of `scene` in seconds. A positive explicit duration always wins.
pub fn compute_scene_duration(scene: &Scene) -> f64 {
    if let Some(d) = scene.explicit_duration
        && d > 0.0
    {
        return d;
    }
    scene
        .overlays
        .iter()
        .filter_map(|o| match o {
            Overlay::Text(t) => Some(text_duration(&t.joined_text())),
            Overlay::Image(_) => None,
        })
        .reduce(f64::max)
        .map_or(NO_TEXT_SCENE_SECS, |longest| longest + TEXT_SCENE_BUFFER_SECS)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/duration.rs"]
mod tests;
