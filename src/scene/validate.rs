use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::duration::compute_scene_duration;
use crate::scene::project::{BackgroundSource, Overlay, Project, Scene};
use std::path::Path;

/// Scene duration when it is known without probing media.
///
/// Video scenes without an explicit duration take their length from the source file.
pub(crate) fn static_scene_duration(scene: &Scene) -> Option<f64> {
    match (&scene.background, scene.explicit_duration) {
        (_, Some(d)) => Some(d),
        (BackgroundSource::Image { .. }, None) => Some(compute_scene_duration(scene)),
        (BackgroundSource::Video { .. }, None) => None,
    }
}

/// Every text overlay must start inside `[0, duration)`.
///
/// `duration` overrides the statically known duration; when neither is known the check is
/// deferred.
pub(crate) fn check_overlay_start_times(scene: &Scene, duration: Option<f64>) -> Result<(), String> {
    let Some(duration) = duration.or_else(|| static_scene_duration(scene)) else {
        return Ok(());
    };
    for (j, overlay) in scene.overlays.iter().enumerate() {
        if let Overlay::Text(t) = overlay
            && !(t.start_time >= 0.0 && t.start_time < duration)
        {
            return Err(format!(
                "overlays[{j}].start_time {} is outside scene \"{}\" duration [0, {duration:.3})",
                t.start_time, scene.id
            ));
        }
    }
    Ok(())
}

/// Check that every background and the audio track exist under `assets_root`.
///
/// Missing image overlays are not checked here; they are skipped with a warning at build time.
#[tracing::instrument(skip(project), fields(scenes = project.scenes.len()))]
pub fn check_assets(project: &Project, assets_root: &Path) -> ReelResult<()> {
    for scene in &project.scenes {
        let path = assets_root.join(scene.background.path());
        if !path.is_file() {
            return Err(ReelError::asset(format!(
                "scene \"{}\": background file '{}' not found",
                scene.id,
                path.display()
            )));
        }
    }
    if let Some(audio) = &project.audio_track {
        let path = assets_root.join(audio);
        if !path.is_file() {
            return Err(ReelError::asset(format!(
                "audio file '{}' not found",
                path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/validate.rs"]
mod tests;
