use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Fps;
use crate::foundation::error::ReelResult;

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
pub(crate) fn write_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> ReelResult<()> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("create audio output directory '{}'", parent.display())
        })?;
    }

    let file = std::fs::File::create(out_path)
        .with_context(|| format!("create audio file '{}'", out_path.display()))?;
    let mut w = std::io::BufWriter::new(file);
    for &sample in samples_interleaved {
        w.write_all(&sample.clamp(-1.0, 1.0).to_le_bytes())
            .with_context(|| format!("write audio file '{}'", out_path.display()))?;
    }
    w.flush()
        .with_context(|| format!("flush audio file '{}'", out_path.display()))?;
    Ok(())
}

/// Convert a frame offset to the nearest sample index at `sample_rate`.
pub(crate) fn frame_to_sample(frame: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frame) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + (den / 2)) / den) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
