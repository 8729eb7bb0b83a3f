//! Prepared render sessions and the one-call `render` entry point.

pub(crate) mod render_session;

use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::foundation::error::ReelResult;
use crate::scene::project::Project;
use render_session::{CancelToken, RenderSession, RenderSessionOpts, RenderStats};

/// Options for [`render`].
#[derive(Clone, Debug, Default)]
pub struct RenderOpts {
    /// Output file. `None` uses the project's output path, resolved against the assets root.
    pub out_path: Option<PathBuf>,
    /// Range rendering knobs.
    pub session: RenderSessionOpts,
    /// Refuse to replace an existing output file.
    pub no_overwrite: bool,
    /// Cancellation flag observed between frames.
    pub cancel: CancelToken,
}

/// Render the whole project to an MP4 and return the written path.
///
/// Relative asset paths resolve against `assets_root`. A failed or cancelled render leaves no
/// output file behind.
#[tracing::instrument(skip(project, opts), fields(scenes = project.scenes.len()))]
pub fn render(project: &Project, assets_root: &Path, opts: RenderOpts) -> ReelResult<PathBuf> {
    let (path, _) = render_with_stats(project, assets_root, opts)?;
    Ok(path)
}

/// [`render`], also returning the range statistics.
pub fn render_with_stats(
    project: &Project,
    assets_root: &Path,
    opts: RenderOpts,
) -> ReelResult<(PathBuf, RenderStats)> {
    let out_path = opts
        .out_path
        .clone()
        .unwrap_or_else(|| assets_root.join(&project.output.path));

    let session = RenderSession::new(project, assets_root, opts.session.clone())?;
    let mut sink_opts = FfmpegSinkOpts::from_output(&project.output, &out_path);
    sink_opts.overwrite = !opts.no_overwrite;
    let mut sink = FfmpegSink::new(sink_opts);

    let started = std::time::Instant::now();
    let stats = session.render_range(session.full_range(), &mut sink, &opts.cancel)?;
    tracing::info!(
        path = %out_path.display(),
        frames = stats.frames_rendered,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "video written"
    );
    Ok((out_path, stats))
}
