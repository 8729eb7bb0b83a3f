use crate::animation::ease::EasePreset;
use crate::effects::composite::{Placement, blit_over, draw_scaled_over};
use crate::render::frame::FrameRGBA;
use crate::scene::project::{SlideDir, TransitionKind, ZoomDir};

/// Composite the overlap of two canvas-sized scene frames into `dst`, replacing its contents.
///
/// `progress` is the linear position inside the overlap, `0` when it begins and `1` when the
/// incoming scene takes over. Alpha ramps use linear progress; motion uses the transition easing.
pub(crate) fn compose_transition(
    kind: TransitionKind,
    progress: f64,
    outgoing: &FrameRGBA,
    incoming: &FrameRGBA,
    dst: &mut FrameRGBA,
) {
    let p = progress.clamp(0.0, 1.0);
    let eased = EasePreset::Transition.ease().apply(p);
    let w = f64::from(dst.width);
    let h = f64::from(dst.height);
    dst.data.fill(0);

    match kind {
        TransitionKind::Crossfade => {
            blit_over(dst, outgoing, 0, 0, (1.0 - p) as f32);
            blit_over(dst, incoming, 0, 0, p as f32);
        }
        TransitionKind::Slide(dir) => {
            let rest = 1.0 - eased;
            let (x, y) = match dir {
                SlideDir::Left => (w * rest, 0.0),
                SlideDir::Right => (-w * rest, 0.0),
                SlideDir::Up => (0.0, h * rest),
                SlideDir::Down => (0.0, -h * rest),
            };
            blit_over(dst, outgoing, 0, 0, 1.0);
            blit_over(dst, incoming, x.trunc() as i64, y.trunc() as i64, 1.0);
        }
        TransitionKind::Zoom(ZoomDir::In) => {
            blit_over(dst, outgoing, 0, 0, (1.0 - p) as f32);
            draw_centred(dst, incoming, 0.5 + 0.5 * eased, p as f32);
        }
        TransitionKind::Zoom(ZoomDir::Out) => {
            draw_centred(dst, outgoing, 1.0 + 0.5 * eased, (1.0 - p) as f32);
            blit_over(dst, incoming, 0, 0, p as f32);
        }
    }
}

fn draw_centred(dst: &mut FrameRGBA, src: &FrameRGBA, scale: f64, opacity: f32) {
    let x = (f64::from(dst.width) - f64::from(src.width) * scale) / 2.0;
    let y = (f64::from(dst.height) - f64::from(src.height) * scale) / 2.0;
    draw_scaled_over(dst, src, Placement::uniform(x, y, scale), opacity);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
