use std::path::Path;

use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_size};
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Decode a raster image (PNG, JPEG, WebP, ...) into premultiplied RGBA.
pub(crate) fn decode_image(bytes: &[u8]) -> ReelResult<FrameRGBA> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ReelError::asset(format!("decode image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameRGBA::from_straight(width, height, rgba.into_raw())
}

pub(crate) fn parse_svg(bytes: &[u8]) -> ReelResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts).map_err(|e| ReelError::asset(format!("parse svg: {e}")))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Load a still image from disk.
///
/// SVG files are rasterized large enough to cover `cover` when given, so they stay sharp when
/// fitted to the canvas.
#[tracing::instrument(level = "debug", skip(cover))]
pub(crate) fn load_image(path: &Path, cover: Option<Canvas>) -> ReelResult<FrameRGBA> {
    let bytes = std::fs::read(path)
        .map_err(|e| ReelError::asset(format!("read image '{}': {e}", path.display())))?;
    if is_svg(path) {
        let tree = parse_svg(&bytes)?;
        let (w, h) = svg_raster_size(&tree, cover)?;
        let data = rasterize_svg_to_premul_rgba8(&tree, w, h)?;
        return FrameRGBA::from_premul(w, h, data);
    }
    decode_image(&bytes).map_err(|e| match e {
        ReelError::Asset(m) => ReelError::asset(format!("'{}': {m}", path.display())),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
