use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};

/// Largest raster dimension produced from an SVG.
const MAX_DIM: u32 = 16_384;

/// Raster size for an SVG so that it covers `cover` without upscaling blur.
///
/// Without a cover target the SVG's own size is used.
pub(crate) fn svg_raster_size(tree: &usvg::Tree, cover: Option<Canvas>) -> ReelResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (f64::from(size.width()), f64::from(size.height()));
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(ReelError::asset("svg has invalid width/height"));
    }

    let scale = match cover {
        Some(c) => (f64::from(c.width) / w).max(f64::from(c.height) / h).max(1.0),
        None => 1.0,
    };
    let out_w = (w * scale).ceil().max(1.0) as u32;
    let out_h = (h * scale).ceil().max(1.0) as u32;
    if out_w > MAX_DIM || out_h > MAX_DIM {
        return Err(ReelError::asset(format!(
            "svg raster size too large: {out_w}x{out_h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((out_w, out_h))
}

/// Render `tree` scaled to exactly `width`x`height`. Output is premultiplied RGBA8.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> ReelResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ReelError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.take())
}
