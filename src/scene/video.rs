use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::assets::media::{VideoSourceInfo, decode_video_frames_rgba8};
use crate::effects::composite::{crop_to_fill, fit_letterbox, stretch};
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::scene::project::ResizePolicy;

const CACHE_CAPACITY: usize = 64;
const DECODE_BATCH: u32 = 16;

/// Trim and playback parameters of a video background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct VideoTiming {
    /// First source second played.
    pub(crate) trim_start: f64,
    /// Source seconds between `trim_start` and the effective end.
    pub(crate) trimmed_len: f64,
    /// Playback speed multiplier.
    pub(crate) speed: f64,
    /// Wrap around when scene time runs past the trimmed range.
    pub(crate) looping: bool,
}

impl VideoTiming {
    /// Playback parameters for a source of `source_len` seconds.
    ///
    /// Loops only when `explicit` asks for more time than the trimmed source provides.
    pub(crate) fn new(
        source_len: f64,
        trim_start: f64,
        trim_end: Option<f64>,
        speed: f64,
        explicit: Option<f64>,
    ) -> ReelResult<Self> {
        let end = trim_end.map_or(source_len, |e| e.min(source_len));
        let trimmed_len = end - trim_start;
        if !(trimmed_len > 0.0) {
            return Err(ReelError::asset(format!(
                "video trim [{trim_start}, {end}) is empty for a {source_len:.3}s source"
            )));
        }
        let natural = trimmed_len / speed;
        Ok(Self {
            trim_start,
            trimmed_len,
            speed,
            looping: explicit.is_some_and(|d| d > natural),
        })
    }

    /// Scene length when no explicit duration is given.
    pub(crate) fn natural_duration(&self) -> f64 {
        self.trimmed_len / self.speed
    }

    /// Source second shown at scene time `t`.
    pub(crate) fn source_time(&self, t: f64) -> f64 {
        let played = t.max(0.0) * self.speed;
        if self.looping {
            self.trim_start + played.rem_euclid(self.trimmed_len)
        } else {
            self.trim_start + played.min(self.trimmed_len)
        }
    }
}

struct FrameCache {
    frames: HashMap<u64, Arc<FrameRGBA>>,
    lru: VecDeque<u64>,
}

impl FrameCache {
    fn touch(&mut self, key: u64) {
        if let Some(pos) = self.lru.iter().position(|k| *k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key);
    }

    fn insert(&mut self, key: u64, frame: Arc<FrameRGBA>) {
        self.frames.insert(key, frame);
        self.touch(key);
        while self.lru.len() > CACHE_CAPACITY {
            if let Some(old) = self.lru.pop_front() {
                self.frames.remove(&old);
            }
        }
    }
}

/// A video background decoded on demand and fitted to the canvas.
///
/// Frames are decoded through ffmpeg in small sequential batches and kept in a bounded LRU keyed
/// by source frame index.
pub(crate) struct VideoBackground {
    info: Arc<VideoSourceInfo>,
    timing: VideoTiming,
    resize: ResizePolicy,
    canvas: Canvas,
    cache: Mutex<FrameCache>,
}

impl std::fmt::Debug for VideoBackground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoBackground")
            .field("source", &self.info.source_path)
            .field("timing", &self.timing)
            .finish()
    }
}

impl VideoBackground {
    pub(crate) fn new(
        info: VideoSourceInfo,
        timing: VideoTiming,
        resize: ResizePolicy,
        canvas: Canvas,
    ) -> Self {
        Self {
            info: Arc::new(info),
            timing,
            resize,
            canvas,
            cache: Mutex::new(FrameCache {
                frames: HashMap::new(),
                lru: VecDeque::new(),
            }),
        }
    }

    pub(crate) fn timing(&self) -> VideoTiming {
        self.timing
    }

    fn source_fps(&self) -> f64 {
        if self.info.fps.is_finite() && self.info.fps > 0.0 {
            self.info.fps
        } else {
            30.0
        }
    }

    /// Canvas-sized frame shown at scene time `t`.
    pub(crate) fn frame_at(&self, t: f64) -> ReelResult<Arc<FrameRGBA>> {
        let fps = self.source_fps();
        let key = (self.timing.source_time(t) * fps).floor().max(0.0) as u64;
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| ReelError::render("video frame cache poisoned"))?;
        if let Some(hit) = cache.frames.get(&key).cloned() {
            cache.touch(key);
            return Ok(hit);
        }

        let batch = decode_video_frames_rgba8(&self.info, key as f64 / fps, DECODE_BATCH)?;
        if batch.is_empty() {
            // Seeking exactly at the end of the stream yields nothing; step back one frame.
            if key > 0 {
                drop(cache);
                return self.frame_at_key(key - 1);
            }
            return Err(ReelError::asset(format!(
                "no video frames decoded from '{}'",
                self.info.source_path.display()
            )));
        }
        tracing::debug!(key, decoded = batch.len(), "decoded video batch");
        let mut first = None;
        for (i, rgba) in batch.into_iter().enumerate() {
            let frame = Arc::new(self.fit(rgba)?);
            if i == 0 {
                first = Some(frame.clone());
            }
            cache.insert(key + i as u64, frame);
        }
        first.ok_or_else(|| ReelError::render("empty video batch"))
    }

    fn frame_at_key(&self, key: u64) -> ReelResult<Arc<FrameRGBA>> {
        let fps = self.source_fps();
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| ReelError::render("video frame cache poisoned"))?;
        if let Some(hit) = cache.frames.get(&key).cloned() {
            return Ok(hit);
        }
        let rgba = decode_video_frames_rgba8(&self.info, key as f64 / fps, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ReelError::asset(format!(
                    "no video frames decoded from '{}'",
                    self.info.source_path.display()
                ))
            })?;
        let frame = Arc::new(self.fit(rgba)?);
        cache.insert(key, frame.clone());
        Ok(frame)
    }

    fn fit(&self, straight_rgba: Vec<u8>) -> ReelResult<FrameRGBA> {
        let raw = FrameRGBA::from_straight(self.info.width, self.info.height, straight_rgba)?;
        match self.resize {
            ResizePolicy::Crop => crop_to_fill(&raw, self.canvas),
            ResizePolicy::Fit => fit_letterbox(&raw, self.canvas),
            ResizePolicy::Stretch => stretch(&raw, self.canvas),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/video.rs"]
mod tests;
