//! Frame sinks: in-memory capture and streaming MP4 encoding through `ffmpeg`.

pub(crate) mod ffmpeg;
pub(crate) mod sink;
