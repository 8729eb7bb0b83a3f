use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};

use rayon::prelude::*;

use crate::assets::font::FontBook;
use crate::assets::media::AudioPcm;
use crate::audio::mix::{frame_to_sample, write_f32le_file};
use crate::audio::track::load_soundtrack;
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::scene::builder::build_clips;
use crate::scene::clip::SceneClip;
use crate::scene::project::Project;
use crate::scene::validate::check_assets;
use crate::timeline::compose::Composer;
use crate::timeline::resolve::ResolvedTimeline;

const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;
const ENCODER_GONE: &str = "encoder thread is not accepting frames";

/// Options controlling `RenderSession` range rendering behavior.
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Enable frame-level parallelism (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Frames rendered per parallel batch.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Bounded channel capacity between render workers and the encoder thread.
    pub channel_capacity: usize,
    /// Attach the project soundtrack in `render_range`.
    pub enable_audio: bool,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            channel_capacity: 4,
            enable_audio: true,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames rendered and handed to the sink.
    pub frames_rendered: u64,
    /// `true` when a soundtrack was attached.
    pub audio: bool,
}

/// Cooperative cancellation flag shared between a render and its controller.
///
/// Rendering checks the flag between frames; once set, the sink is aborted and
/// [`ReelError::Cancelled`] is returned.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// `true` once [`CancelToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn check(&self) -> ReelResult<()> {
        if self.is_cancelled() {
            Err(ReelError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Prepared project ready to render frames.
///
/// Construction validates assets, builds every scene clip and resolves the timeline; after that
/// every frame is a pure function of its index.
#[derive(Debug)]
pub struct RenderSession {
    composer: Composer,
    audio_track: Option<PathBuf>,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Prepare `project` with fonts discovered from the system.
    pub fn new(
        project: &Project,
        assets_root: impl AsRef<Path>,
        opts: RenderSessionOpts,
    ) -> ReelResult<Self> {
        Self::with_fonts(project, assets_root, opts, &FontBook::with_system_fonts())
    }

    /// Prepare `project`, resolving text fonts against `fonts`.
    #[tracing::instrument(skip_all, fields(scenes = project.scenes.len()))]
    pub fn with_fonts(
        project: &Project,
        assets_root: impl AsRef<Path>,
        opts: RenderSessionOpts,
        fonts: &FontBook,
    ) -> ReelResult<Self> {
        let assets_root = assets_root.as_ref();
        check_assets(project, assets_root)?;

        let clips = build_clips(project, assets_root, fonts)?;
        let transitions: Vec<_> = project.scenes.iter().map(|s| s.transition_in).collect();
        let composer = Composer::new(clips, &transitions, project.intro_fade, project.outro_fade)?;

        let timeline = composer.timeline();
        tracing::info!(
            width = project.canvas.width,
            height = project.canvas.height,
            fps = project.fps.as_f64(),
            duration_sec = timeline.total_duration_sec,
            frames = timeline.total_frames,
            "session ready"
        );
        Ok(Self {
            composer,
            audio_track: project.audio_track.as_ref().map(|p| assets_root.join(p)),
            opts,
        })
    }

    /// The resolved timeline.
    pub fn timeline(&self) -> &ResolvedTimeline {
        self.composer.timeline()
    }

    /// Prepared scene clips in project order.
    pub fn clips(&self) -> &[SceneClip] {
        self.composer.clips()
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.composer.canvas()
    }

    /// Frame range covering the whole timeline.
    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.timeline().total_frames),
        }
    }

    /// Render a single output frame.
    pub fn render_frame(&self, frame: FrameIndex) -> ReelResult<FrameRGBA> {
        if frame.0 >= self.timeline().total_frames {
            return Err(ReelError::validation(format!(
                "frame {} is outside the timeline (total {})",
                frame.0,
                self.timeline().total_frames
            )));
        }
        self.composer.frame(frame.0)
    }

    /// Render a frame range and stream frames into a sink.
    ///
    /// The sink receives frames in strictly increasing index order. When `parallel` is enabled,
    /// out-of-order worker completion is reordered on the encoder thread behind a bounded channel.
    /// On cancellation or any failure the sink is aborted before the error is returned.
    pub fn render_range(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
        cancel: &CancelToken,
    ) -> ReelResult<RenderStats> {
        if range.is_empty() {
            return Err(ReelError::validation("render range must be non-empty"));
        }
        if range.end.0 > self.timeline().total_frames {
            return Err(ReelError::validation(
                "render range must be within the timeline",
            ));
        }

        let res = self.stream_range(range, sink, cancel);
        match &res {
            Ok(stats) => {
                tracing::info!(frames = stats.frames_rendered, audio = stats.audio, "range rendered");
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed, aborting sink");
                sink.abort();
            }
        }
        res
    }

    fn stream_range(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
        cancel: &CancelToken,
    ) -> ReelResult<RenderStats> {
        let timeline = self.timeline();
        let mut audio_tmp = TempFileGuard(None);
        let audio_cfg = match (&self.audio_track, self.opts.enable_audio) {
            (Some(track), true) => {
                let pcm = load_soundtrack(track, timeline.total_duration_sec)?;
                let path = std::env::temp_dir().join(format!(
                    "storyreel_audio_{}_{}.f32le",
                    std::process::id(),
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_nanos())
                        .unwrap_or(0)
                ));
                write_f32le_file(range_samples(&pcm, range, timeline), &path)?;
                audio_tmp.0 = Some(path.clone());
                Some(AudioInputConfig {
                    path,
                    sample_rate: pcm.sample_rate,
                    channels: pcm.channels,
                })
            }
            _ => None,
        };
        let has_audio = audio_cfg.is_some();

        let canvas = self.canvas();
        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: timeline.fps,
            audio: audio_cfg,
        };

        let cap = self.opts.channel_capacity.max(1);
        let bytes_per_frame = u64::from(cfg.width)
            .saturating_mul(u64::from(cfg.height))
            .saturating_mul(4)
            .max(1);
        let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);
        let chunk_size = normalized_chunk_size(self.opts.chunk_size)
            .min(max_chunk_by_mem)
            .min(range.len_frames());

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };

        let stats = std::thread::scope(|scope| -> ReelResult<RenderStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
            let range_start = range.start.0;
            let range_end = range.end.0;
            let sink_ref: &mut dyn FrameSink = sink;

            let enc = scope.spawn(move || -> ReelResult<()> {
                sink_ref.begin(cfg)?;

                let mut next = range_start;
                let mut pending = HashMap::<u64, Arc<FrameRGBA>>::new();
                while next < range_end {
                    if let Some(frame) = pending.remove(&next) {
                        sink_ref.push_frame(FrameIndex(next), &frame)?;
                        next += 1;
                        continue;
                    }
                    let msg = rx
                        .recv()
                        .map_err(|_| ReelError::render("encoder channel disconnected"))?;
                    pending.insert(msg.idx.0, msg.frame);
                }

                sink_ref.end()
            });

            let produce_res = match pool.as_ref() {
                Some(pool) => {
                    let mut chunk_start = range_start;
                    let mut res = Ok(());
                    while chunk_start < range_end && res.is_ok() {
                        let chunk_end = (chunk_start + chunk_size).min(range_end);
                        res = render_chunk_parallel(&self.composer, pool, &tx, cancel, chunk_start, chunk_end);
                        tracing::debug!(chunk_start, chunk_end, "chunk rendered");
                        chunk_start = chunk_end;
                    }
                    res
                }
                None => (range_start..range_end).try_for_each(|f| {
                    cancel.check()?;
                    let frame = self.composer.frame(f)?;
                    send(&tx, f, frame)
                }),
            };

            drop(tx);
            let enc_res = enc
                .join()
                .map_err(|_| ReelError::render("encoder thread panicked"))?;

            match (produce_res, enc_res) {
                (Ok(()), Ok(())) => Ok(RenderStats {
                    frames_total: range.len_frames(),
                    frames_rendered: range.len_frames(),
                    audio: has_audio,
                }),
                (Err(ReelError::Cancelled), _) => Err(ReelError::Cancelled),
                (Err(p), Err(e)) if is_encoder_gone(&p) => Err(e),
                (Err(p), _) => Err(p),
                (Ok(()), Err(e)) => Err(e),
            }
        })?;

        drop(audio_tmp);
        Ok(stats)
    }
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: Arc<FrameRGBA>,
}

fn send(tx: &mpsc::SyncSender<FrameMsg>, f: u64, frame: FrameRGBA) -> ReelResult<()> {
    tx.send(FrameMsg {
        idx: FrameIndex(f),
        frame: Arc::new(frame),
    })
    .map_err(|_| ReelError::render(ENCODER_GONE))
}

fn is_encoder_gone(e: &ReelError) -> bool {
    matches!(e, ReelError::Render(m) if m == ENCODER_GONE)
}

fn render_chunk_parallel(
    composer: &Composer,
    pool: &rayon::ThreadPool,
    tx: &mpsc::SyncSender<FrameMsg>,
    cancel: &CancelToken,
    start: u64,
    end: u64,
) -> ReelResult<()> {
    let tx = tx.clone();
    pool.install(|| {
        (start..end).into_par_iter().try_for_each(move |f| {
            cancel.check()?;
            let frame = composer.frame(f)?;
            send(&tx, f, frame)
        })
    })
}

/// Soundtrack samples covering `range`.
fn range_samples<'a>(pcm: &'a AudioPcm, range: FrameRange, timeline: &ResolvedTimeline) -> &'a [f32] {
    let ch = usize::from(pcm.channels.max(1));
    let total = pcm.frames();
    let a = (frame_to_sample(range.start.0, timeline.fps, pcm.sample_rate) as usize).min(total);
    let b = (frame_to_sample(range.end.0, timeline.fps, pcm.sample_rate) as usize).clamp(a, total);
    &pcm.interleaved_f32[a * ch..b * ch]
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ReelError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
