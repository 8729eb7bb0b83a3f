use crate::assets::color::ColorDef;
use crate::effects::composite::blit_over;
use crate::foundation::error::ReelResult;
use crate::render::cpu::{CpuCanvas, PaintRgba8};
use crate::render::frame::FrameRGBA;
use crate::scene::project::{BackgroundPanel, PanelStyle, TextLine};
use kurbo::Shape;

const MAX_CORNER_RADIUS: u32 = 30;

/// Panel colour contrasting with the text: black behind light text, white behind dark text.
/// Multi-colour text always gets black.
pub(crate) fn panel_color(lines: &[TextLine], multicolor: bool) -> ColorDef {
    if multicolor {
        return ColorDef::BLACK;
    }
    let text = lines.first().map_or(ColorDef::WHITE, |l| l.color);
    if text.brightness() > 128.0 {
        ColorDef::BLACK
    } else {
        ColorDef::WHITE
    }
}

/// Grow `text` by `panel.padding` on every side and draw the panel behind it.
pub(crate) fn compose_panel(
    text: &FrameRGBA,
    panel: &BackgroundPanel,
    color: ColorDef,
) -> ReelResult<FrameRGBA> {
    let pad = panel.padding;
    let w = text.width + 2 * pad;
    let h = text.height + 2 * pad;
    let alpha = (255.0 * panel.opacity.clamp(0.0, 1.0)).trunc() as u8;
    let paint = PaintRgba8::new(color.r, color.g, color.b, alpha);
    let (wf, hf) = (f64::from(w), f64::from(h));

    let mut canvas = CpuCanvas::new(w, h)?;
    match panel.style {
        PanelStyle::Banner => canvas.fill_rect(0.0, 0.0, wf, hf, paint),
        PanelStyle::Rounded => {
            let radius = f64::from(MAX_CORNER_RADIUS.min(h / 4));
            let path = kurbo::RoundedRect::new(0.0, 0.0, wf, hf, radius).to_path(0.1);
            canvas.fill_path(&path, paint);
        }
        PanelStyle::Box => {
            let inset = f64::from(pad / 2);
            canvas.fill_rect(inset, inset, wf - inset, hf - inset, paint);
        }
        PanelStyle::Gradient => {
            let half = hf / 2.0;
            for y in 0..h {
                let falloff = 1.0 - (f64::from(y) - half).abs() / half;
                let a = (f64::from(alpha) * falloff).trunc().clamp(0.0, 255.0) as u8;
                if a == 0 {
                    continue;
                }
                canvas.fill_rect(
                    0.0,
                    f64::from(y),
                    wf,
                    f64::from(y + 1),
                    PaintRgba8 { a, ..paint },
                );
            }
        }
    }

    let mut out = canvas.finish()?;
    blit_over(&mut out, text, i64::from(pad), i64::from(pad), 1.0);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/text/panel.rs"]
mod tests;
