//! Soundtrack fitting and raw PCM output for the encoder.

pub(crate) mod mix;
pub(crate) mod track;
