use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{mul_div255_u8, opacity_to_u8};
use crate::render::frame::FrameRGBA;
use image::imageops::FilterType;

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity multiplier on the source.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = opacity_to_u8(opacity);
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Paste `src` with its top-left corner at integer `(x, y)` of `dst`. Clips to `dst` bounds.
pub(crate) fn blit_over(dst: &mut FrameRGBA, src: &FrameRGBA, x: i64, y: i64, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    let dw = i64::from(dst.width);
    let dh = i64::from(dst.height);
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(i64::from(src.width)).min(dw);
    let y1 = y.saturating_add(i64::from(src.height)).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let copy_exact = opacity >= 1.0;
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        for dx in x0..x1 {
            let sx = (dx - x) as usize;
            let si = (sy * src.width as usize + sx) * 4;
            let di = ((dy as usize) * dst.width as usize + dx as usize) * 4;
            let s = [
                src.data[si],
                src.data[si + 1],
                src.data[si + 2],
                src.data[si + 3],
            ];
            if s[3] == 0 {
                continue;
            }
            if copy_exact && s[3] == 255 {
                dst.data[di..di + 4].copy_from_slice(&s);
                continue;
            }
            let d = [
                dst.data[di],
                dst.data[di + 1],
                dst.data[di + 2],
                dst.data[di + 3],
            ];
            dst.data[di..di + 4].copy_from_slice(&over(d, s, opacity));
        }
    }
}

/// Where and how large a source image is drawn on a destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placement {
    /// Destination x of the scaled image's top-left corner.
    pub(crate) x: f64,
    /// Destination y of the scaled image's top-left corner.
    pub(crate) y: f64,
    /// Horizontal scale factor applied to the source.
    pub(crate) scale_x: f64,
    /// Vertical scale factor applied to the source.
    pub(crate) scale_y: f64,
}

impl Placement {
    pub(crate) fn uniform(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            scale_x: scale,
            scale_y: scale,
        }
    }

    fn is_integer_identity(&self) -> bool {
        self.scale_x == 1.0
            && self.scale_y == 1.0
            && self.x.fract() == 0.0
            && self.y.fract() == 0.0
    }
}

/// Draw `src` transformed by `placement` over `dst` with bilinear sampling.
///
/// Pixels whose centre falls outside the placed rectangle are left untouched. An unscaled,
/// integer-aligned placement degenerates to [`blit_over`], so the source is copied bit-exactly.
pub(crate) fn draw_scaled_over(
    dst: &mut FrameRGBA,
    src: &FrameRGBA,
    placement: Placement,
    opacity: f32,
) {
    if opacity <= 0.0 || src.width == 0 || src.height == 0 {
        return;
    }
    if placement.is_integer_identity() {
        blit_over(dst, src, placement.x as i64, placement.y as i64, opacity);
        return;
    }
    let sx = placement.scale_x.max(1e-6);
    let sy = placement.scale_y.max(1e-6);
    let right = placement.x + f64::from(src.width) * sx;
    let bottom = placement.y + f64::from(src.height) * sy;

    let x0 = (placement.x - 0.5).ceil().max(0.0) as i64;
    let y0 = (placement.y - 0.5).ceil().max(0.0) as i64;
    let x1 = ((right - 0.5).ceil() as i64).min(i64::from(dst.width));
    let y1 = ((bottom - 0.5).ceil() as i64).min(i64::from(dst.height));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        let v = ((dy as f64 + 0.5) - placement.y) / sy - 0.5;
        for dx in x0..x1 {
            let u = ((dx as f64 + 0.5) - placement.x) / sx - 0.5;
            let s = sample_bilinear(src, u, v);
            if s[3] == 0 {
                continue;
            }
            let di = ((dy as usize) * dst.width as usize + dx as usize) * 4;
            let d = [
                dst.data[di],
                dst.data[di + 1],
                dst.data[di + 2],
                dst.data[di + 3],
            ];
            dst.data[di..di + 4].copy_from_slice(&over(d, s, opacity));
        }
    }
}

/// Bilinear sample with clamp-to-edge addressing.
fn sample_bilinear(src: &FrameRGBA, u: f64, v: f64) -> PremulRgba8 {
    let max_x = f64::from(src.width - 1);
    let max_y = f64::from(src.height - 1);
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);
    let x0 = u.floor();
    let y0 = v.floor();
    let fx = u - x0;
    let fy = v - y0;
    let x0 = x0 as i64;
    let y0 = y0 as i64;
    let x1 = (x0 + 1).min(i64::from(src.width) - 1);
    let y1 = (y0 + 1).min(i64::from(src.height) - 1);

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) + (f64::from(p10[c]) - f64::from(p00[c])) * fx;
        let bot = f64::from(p01[c]) + (f64::from(p11[c]) - f64::from(p01[c])) * fx;
        out[c] = (top + (bot - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Multiply every pixel by `opacity` (alpha included), producing a faded layer.
pub(crate) fn scale_opacity_in_place(frame: &mut FrameRGBA, opacity: f32) {
    if opacity >= 1.0 {
        return;
    }
    let op = opacity_to_u8(opacity);
    for v in frame.data.iter_mut() {
        *v = mul_div255(u16::from(*v), op);
    }
}

/// Darken colour channels by `factor`, keeping alpha. Used for fade-from/to-black.
pub(crate) fn scale_brightness_in_place(frame: &mut FrameRGBA, factor: f32) {
    if factor >= 1.0 {
        return;
    }
    let f = opacity_to_u8(factor);
    for px in frame.data.chunks_exact_mut(4) {
        for c in px.iter_mut().take(3) {
            *c = mul_div255(u16::from(*c), f);
        }
    }
}

/// Resample to an exact size with a triangle filter. Premultiplied data resamples correctly.
pub(crate) fn resize(src: &FrameRGBA, width: u32, height: u32) -> ReelResult<FrameRGBA> {
    if src.width == width && src.height == height {
        return Ok(src.clone());
    }
    if width == 0 || height == 0 {
        return Err(ReelError::render("cannot resize an image to zero size"));
    }
    let buf = image::RgbaImage::from_raw(src.width, src.height, src.data.clone())
        .ok_or_else(|| ReelError::render("image buffer size mismatch"))?;
    let out = image::imageops::resize(&buf, width, height, FilterType::Triangle);
    FrameRGBA::from_premul(width, height, out.into_raw())
}

/// Scale uniformly until `target` is covered on both axes, then centre-crop the overflow.
///
/// Never letterboxes and never distorts.
pub(crate) fn crop_to_fill(src: &FrameRGBA, target: Canvas) -> ReelResult<FrameRGBA> {
    if src.width == 0 || src.height == 0 {
        return Err(ReelError::asset("background image has zero size"));
    }
    let (tw, th) = target.size_f64();
    let scale = (tw / f64::from(src.width)).max(th / f64::from(src.height));
    let sw = ((f64::from(src.width) * scale).round() as u32).max(target.width);
    let sh = ((f64::from(src.height) * scale).round() as u32).max(target.height);
    let scaled = resize(src, sw, sh)?;
    if sw == target.width && sh == target.height {
        return Ok(scaled);
    }

    let buf = image::RgbaImage::from_raw(sw, sh, scaled.data)
        .ok_or_else(|| ReelError::render("image buffer size mismatch"))?;
    let left = (sw - target.width) / 2;
    let top = (sh - target.height) / 2;
    let cropped = image::imageops::crop_imm(&buf, left, top, target.width, target.height).to_image();
    FrameRGBA::from_premul(target.width, target.height, cropped.into_raw())
}

/// Scale uniformly to fit inside `target`, centred on transparent bars.
pub(crate) fn fit_letterbox(src: &FrameRGBA, target: Canvas) -> ReelResult<FrameRGBA> {
    if src.width == 0 || src.height == 0 {
        return Err(ReelError::asset("background image has zero size"));
    }
    let (tw, th) = target.size_f64();
    let scale = (tw / f64::from(src.width)).min(th / f64::from(src.height));
    let sw = ((f64::from(src.width) * scale).round() as u32).clamp(1, target.width);
    let sh = ((f64::from(src.height) * scale).round() as u32).clamp(1, target.height);
    let scaled = resize(src, sw, sh)?;
    let mut out = FrameRGBA::transparent(target.width, target.height);
    blit_over(
        &mut out,
        &scaled,
        i64::from((target.width - sw) / 2),
        i64::from((target.height - sh) / 2),
        1.0,
    );
    Ok(out)
}

/// Scale non-uniformly to exactly `target`.
pub(crate) fn stretch(src: &FrameRGBA, target: Canvas) -> ReelResult<FrameRGBA> {
    resize(src, target.width, target.height)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
