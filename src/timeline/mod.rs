//! Absolute ordering of scene clips and composition of output frames.

pub(crate) mod compose;
pub(crate) mod resolve;
