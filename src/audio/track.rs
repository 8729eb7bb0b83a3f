use std::path::Path;

use crate::assets::media::{AudioPcm, MIX_SAMPLE_RATE, decode_audio_f32_stereo};
use crate::foundation::error::ReelResult;

/// Linear fade-out applied before the soundtrack is cut.
pub const SOUNDTRACK_FADE_OUT_SECS: f64 = 1.5;

/// Decode `path` and fit it to `total_sec` of output.
#[tracing::instrument(level = "debug")]
pub fn load_soundtrack(path: &Path, total_sec: f64) -> ReelResult<AudioPcm> {
    let pcm = decode_audio_f32_stereo(path, MIX_SAMPLE_RATE)?;
    tracing::debug!(source_sec = pcm.duration_sec(), total_sec, "soundtrack decoded");
    Ok(fit_to_length(&pcm, total_sec))
}

/// Loop or truncate `pcm` to exactly `round(total_sec * rate)` frames, then fade out the tail.
///
/// A source without samples yields silence of the requested length.
pub fn fit_to_length(pcm: &AudioPcm, total_sec: f64) -> AudioPcm {
    let ch = usize::from(pcm.channels.max(1));
    let target_frames = (total_sec.max(0.0) * f64::from(pcm.sample_rate)).round() as usize;
    let src = &pcm.interleaved_f32;
    let src_frames = pcm.frames();

    let mut out = Vec::with_capacity(target_frames * ch);
    if src_frames == 0 {
        out.resize(target_frames * ch, 0.0);
    } else {
        while out.len() < target_frames * ch {
            let take = (target_frames * ch - out.len()).min(src_frames * ch);
            out.extend_from_slice(&src[..take]);
        }
        if src_frames < target_frames {
            tracing::debug!(src_frames, target_frames, "soundtrack looped");
        }
    }

    let fade_frames = ((SOUNDTRACK_FADE_OUT_SECS * f64::from(pcm.sample_rate)).round() as usize)
        .min(target_frames);
    if fade_frames > 0 {
        let first = target_frames - fade_frames;
        for (n, frame) in out.chunks_exact_mut(ch).enumerate().skip(first) {
            // reaches exactly zero on the last frame
            let remaining = (target_frames - 1 - n) as f32;
            let gain = if fade_frames > 1 {
                remaining / (fade_frames - 1) as f32
            } else {
                0.0
            };
            for s in frame {
                *s *= gain;
            }
        }
    }

    AudioPcm {
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        interleaved_f32: out,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/track.rs"]
mod tests;
