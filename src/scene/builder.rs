use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::animation::text::TextAnimation;
use crate::assets::decode::load_image;
use crate::assets::font::FontBook;
use crate::assets::media::probe_video;
use crate::effects::composite::{crop_to_fill, fit_letterbox, resize, stretch};
use crate::effects::motion::MotionEffect;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::scene::clip::{ClipBackground, ClipLayer, ImageLayer, SceneClip};
use crate::scene::duration::compute_scene_duration;
use crate::scene::project::{BackgroundSource, ImageOverlay, Overlay, Project, ResizePolicy, Scene};
use crate::scene::validate::check_overlay_start_times;
use crate::scene::video::{VideoBackground, VideoTiming};
use crate::text::raster::TextRasterizer;

/// Build every scene of `project`, one rayon task per scene.
///
/// Results keep scene order. The first failing scene aborts the build.
#[tracing::instrument(skip(project, fonts), fields(scenes = project.scenes.len()))]
pub fn build_clips(
    project: &Project,
    assets_root: &Path,
    fonts: &FontBook,
) -> ReelResult<Vec<SceneClip>> {
    project
        .scenes
        .par_iter()
        .map(|scene| build_clip(scene, project.canvas, project.fps, assets_root, fonts))
        .collect()
}

/// Prepare one scene: fit the background, rasterize text and load image overlays.
pub fn build_clip(
    scene: &Scene,
    canvas: Canvas,
    fps: Fps,
    assets_root: &Path,
    fonts: &FontBook,
) -> ReelResult<SceneClip> {
    let (background, duration) = match &scene.background {
        BackgroundSource::Image { path, resize } => {
            let duration = compute_scene_duration(scene);
            let raw = load_image(&assets_root.join(path), Some(canvas))?;
            let fitted = fit_to_canvas(&raw, *resize, canvas)?;
            (
                ClipBackground::Still {
                    image: Arc::new(fitted),
                    motion: MotionEffect::new(scene.motion_effect, duration, canvas),
                },
                duration,
            )
        }
        BackgroundSource::Video {
            path,
            trim_start,
            trim_end,
            speed,
            resize,
        } => {
            let info = probe_video(&assets_root.join(path))?;
            let timing = VideoTiming::new(
                info.duration_sec,
                *trim_start,
                *trim_end,
                *speed,
                scene.explicit_duration,
            )?;
            let duration = scene
                .explicit_duration
                .unwrap_or_else(|| timing.natural_duration());
            if timing.looping {
                tracing::debug!(scene = %scene.id, "video shorter than scene, looping");
            }
            (
                ClipBackground::Video(VideoBackground::new(info, timing, *resize, canvas)),
                duration,
            )
        }
    };

    check_overlay_start_times(scene, Some(duration)).map_err(|msg| {
        ReelError::validation(format!("scene \"{}\": {msg}", scene.id))
    })?;

    let mut text = TextRasterizer::new(fonts);
    let mut layers = Vec::with_capacity(scene.overlays.len());
    for overlay in &scene.overlays {
        match overlay {
            Overlay::Text(t) => {
                let image = text.rasterize(&t.lines, &t.style, canvas)?;
                layers.push(ClipLayer::Text(TextAnimation::new(
                    Arc::new(image),
                    t.animation,
                    t.position,
                    t.start_time,
                    duration,
                    canvas,
                    fps,
                )));
            }
            Overlay::Image(o) => match load_overlay_image(o, assets_root, canvas) {
                Ok(layer) => layers.push(ClipLayer::Image(layer)),
                Err(e) => {
                    tracing::warn!(scene = %scene.id, path = %o.path.display(), error = %e, "skipping image overlay");
                }
            },
        }
    }

    tracing::debug!(scene = %scene.id, duration, layers = layers.len(), "scene built");
    Ok(SceneClip {
        id: scene.id.clone(),
        duration,
        canvas,
        fps,
        background,
        layers,
    })
}

fn fit_to_canvas(raw: &FrameRGBA, policy: ResizePolicy, canvas: Canvas) -> ReelResult<FrameRGBA> {
    match policy {
        ResizePolicy::Crop => crop_to_fill(raw, canvas),
        ResizePolicy::Fit => fit_letterbox(raw, canvas),
        ResizePolicy::Stretch => stretch(raw, canvas),
    }
}

fn load_overlay_image(
    overlay: &ImageOverlay,
    assets_root: &Path,
    canvas: Canvas,
) -> ReelResult<ImageLayer> {
    let raw = load_image(&assets_root.join(&overlay.path), None)?;
    let image = match overlay.width {
        Some(width) => {
            let w = width.resolve(canvas.width);
            let h = ((f64::from(raw.height) * f64::from(w) / f64::from(raw.width)).trunc() as u32)
                .max(1);
            resize(&raw, w, h)?
        }
        None => raw,
    };
    let (x, y) = overlay.position.place_box(canvas, image.width, image.height);
    Ok(ImageLayer {
        x,
        y,
        image: Arc::new(image),
        fade_in: overlay.fade_in,
        fade_out: overlay.fade_out,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
