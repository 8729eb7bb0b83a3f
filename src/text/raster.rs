use std::collections::HashMap;

use crate::assets::color::ColorDef;
use crate::assets::font::{FontBook, ResolvedFont};
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::cpu::{CpuCanvas, PaintRgba8};
use crate::render::frame::FrameRGBA;
use crate::scene::project::{TextLine, TextStyle};
use crate::text::panel;

/// Transparent margin around the glyph block, in pixels.
pub const TEXT_PADDING: u32 = 40;
/// Row advance as a multiple of the font size.
pub const LINE_SPACING: f64 = 1.2;
/// Rows wrap at this fraction of the frame width.
pub const MAX_WIDTH_FRACTION: f64 = 0.9;

const SHADOW_PASSES: [i64; 3] = [3, 2, 1];
const BUILTIN_ADVANCE: f64 = 0.6;
const BUILTIN_BOX: f64 = 0.7;

/// Pixel font size for a nominal 720p size on a frame of height `frame_height`.
pub(crate) fn font_pixel_size(nominal: f64, frame_height: u32) -> u32 {
    ((nominal * f64::from(frame_height) / 720.0 * 1.5).trunc() as u32).max(1)
}

/// Greedy word wrap. `measure` returns the rendered width of a candidate row.
///
/// A word that alone exceeds `max_width` still gets its own row. Input without words yields the
/// input unchanged as a single row.
pub(crate) fn wrap_words(
    text: &str,
    max_width: f64,
    mut measure: impl FnMut(&str) -> f64,
) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        current.push(word);
        let candidate = current.join(" ");
        if measure(&candidate) <= max_width {
            continue;
        }
        current.pop();
        if !current.is_empty() {
            rows.push(current.join(" "));
        }
        current = vec![word];
    }
    if !current.is_empty() {
        rows.push(current.join(" "));
    }
    if rows.is_empty() {
        rows.push(text.to_owned());
    }
    rows
}

struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

enum RowShape {
    Blank,
    Glyphs(parley::Layout<PaintRgba8>),
    Blocks(String),
}

struct Row {
    shape: RowShape,
    width: f64,
    color: ColorDef,
}

/// Rasterizes multi-line styled text into a premultiplied RGBA image.
///
/// Holds parley shaping contexts, so one instance is used per thread.
pub(crate) struct TextRasterizer<'a> {
    fonts: &'a FontBook,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<PaintRgba8>,
    loaded: HashMap<(String, bool), Option<LoadedFont>>,
}

impl<'a> TextRasterizer<'a> {
    pub(crate) fn new(fonts: &'a FontBook) -> Self {
        Self {
            fonts,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            loaded: HashMap::new(),
        }
    }

    /// Render `lines` for a frame of size `frame`, including shadow, outline and panel.
    #[tracing::instrument(skip_all, fields(lines = lines.len(), font = %style.font))]
    pub(crate) fn rasterize(
        &mut self,
        lines: &[TextLine],
        style: &TextStyle,
        frame: Canvas,
    ) -> ReelResult<FrameRGBA> {
        let size = font_pixel_size(style.size, frame.height);
        let size_f = f64::from(size);
        let line_height = (size_f * LINE_SPACING).trunc().max(1.0);
        let max_width = (f64::from(frame.width) * MAX_WIDTH_FRACTION).trunc();

        self.ensure_font(&style.font, style.bold);
        let rows = self.build_rows(lines, style, size_f, max_width)?;

        let widest = rows
            .iter()
            .filter(|r| !matches!(r.shape, RowShape::Blank))
            .map(|r| r.width)
            .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |a| a.max(w))))
            .unwrap_or(if style.multicolor {
                size_f * 10.0
            } else {
                size_f * 5.0
            });
        let pad = f64::from(TEXT_PADDING);
        let img_w = (widest + 2.0 * pad).ceil() as u32;
        let img_h = (line_height * rows.len().max(1) as f64 + 2.0 * pad) as u32;

        let mut canvas = CpuCanvas::new(img_w, img_h)?;
        let font = self
            .loaded
            .get(&(style.font.clone(), style.bold))
            .and_then(|f| f.as_ref());

        for (i, row) in rows.iter().enumerate() {
            if matches!(row.shape, RowShape::Blank) {
                continue;
            }
            let x = ((f64::from(img_w) - row.width) / 2.0).floor();
            let y = pad + i as f64 * line_height;

            if style.shadow {
                let step = (size / 30).max(3) as i64;
                for k in SHADOW_PASSES {
                    let alpha = (80 + (3 - k) * 40) as u8;
                    let off = (step * k) as f64;
                    draw_row(
                        &mut canvas,
                        row,
                        font,
                        size_f,
                        x + off,
                        y + off,
                        PaintRgba8::new(0, 0, 0, alpha),
                    );
                }
            }

            if style.outline && style.outline_width > 0 {
                let ow = i64::from(style.outline_width);
                for ox in -ow..=ow {
                    for oy in -ow..=ow {
                        if ox.abs() != ow && oy.abs() != ow {
                            continue;
                        }
                        draw_row(
                            &mut canvas,
                            row,
                            font,
                            size_f,
                            x + ox as f64,
                            y + oy as f64,
                            PaintRgba8::new(0, 0, 0, 255),
                        );
                    }
                }
            }

            let c = row.color;
            draw_row(
                &mut canvas,
                row,
                font,
                size_f,
                x,
                y,
                PaintRgba8::new(c.r, c.g, c.b, c.a),
            );
        }

        let text = canvas.finish()?;
        match &style.panel {
            Some(p) => panel::compose_panel(&text, p, panel::panel_color(lines, style.multicolor)),
            None => Ok(text),
        }
    }

    fn ensure_font(&mut self, name: &str, bold: bool) {
        let key = (name.to_owned(), bold);
        if self.loaded.contains_key(&key) {
            return;
        }
        let loaded = match self.fonts.resolve(name, bold).0 {
            ResolvedFont::Builtin => None,
            ResolvedFont::Face(face) => {
                let families = self.font_ctx.collection.register_fonts(
                    parley::fontique::Blob::from(face.data.as_ref().clone()),
                    None,
                );
                let family = families
                    .first()
                    .and_then(|(id, _)| self.font_ctx.collection.family_name(*id))
                    .map(str::to_owned);
                match family {
                    Some(family) => Some(LoadedFont {
                        family,
                        data: vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
                            face.index,
                        ),
                    }),
                    None => {
                        tracing::warn!(font = %face.family, "font registered no families, using built-in glyphs");
                        None
                    }
                }
            }
        };
        self.loaded.insert(key, loaded);
    }

    fn build_rows(
        &mut self,
        lines: &[TextLine],
        style: &TextStyle,
        size: f64,
        max_width: f64,
    ) -> ReelResult<Vec<Row>> {
        let key = (style.font.clone(), style.bold);
        let family = self
            .loaded
            .get(&key)
            .and_then(|f| f.as_ref().map(|f| f.family.clone()));

        let mut rows = Vec::new();
        for line in lines {
            if line.text.trim().is_empty() {
                rows.push(Row {
                    shape: RowShape::Blank,
                    width: 0.0,
                    color: line.color,
                });
                continue;
            }
            let wrapped = match &family {
                Some(family) => {
                    let mut failure = None;
                    let texts = wrap_words(&line.text, max_width, |candidate| {
                        match self.layout(candidate, family, size) {
                            Ok(l) => f64::from(l.width()),
                            Err(e) => {
                                failure = Some(e);
                                0.0
                            }
                        }
                    });
                    if let Some(e) = failure {
                        return Err(e);
                    }
                    texts
                }
                None => wrap_words(&line.text, max_width, |c| builtin_width(c, size)),
            };
            for text in wrapped {
                let row = match &family {
                    Some(family) => {
                        let layout = self.layout(&text, family, size)?;
                        Row {
                            width: f64::from(layout.width()),
                            shape: RowShape::Glyphs(layout),
                            color: line.color,
                        }
                    }
                    None => Row {
                        width: builtin_width(&text, size),
                        color: line.color,
                        shape: RowShape::Blocks(text),
                    },
                };
                rows.push(row);
            }
        }
        if rows.is_empty() {
            rows.push(Row {
                shape: RowShape::Blank,
                width: 0.0,
                color: ColorDef::WHITE,
            });
        }
        Ok(rows)
    }

    fn layout(
        &mut self,
        text: &str,
        family: &str,
        size: f64,
    ) -> ReelResult<parley::Layout<PaintRgba8>> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(PaintRgba8::default()));
        let mut layout: parley::Layout<PaintRgba8> = builder.build(text);
        layout.break_all_lines(None);
        if !layout.width().is_finite() {
            return Err(ReelError::render(format!("text layout failed for '{text}'")));
        }
        Ok(layout)
    }
}

fn builtin_width(text: &str, size: f64) -> f64 {
    (text.chars().count() as f64 * size * BUILTIN_ADVANCE).ceil()
}

fn draw_row(
    canvas: &mut CpuCanvas,
    row: &Row,
    font: Option<&LoadedFont>,
    size: f64,
    x: f64,
    y: f64,
    paint: PaintRgba8,
) {
    match (&row.shape, font) {
        (RowShape::Glyphs(layout), Some(font)) => {
            canvas.fill_layout(layout, &font.data, Affine::translate((x, y)), paint);
        }
        (RowShape::Blocks(text), _) => draw_blocks(canvas, text, size, x, y, paint),
        (RowShape::Blank, _) | (RowShape::Glyphs(_), None) => {}
    }
}

/// Built-in face: one filled box per visible character on a fixed advance.
fn draw_blocks(canvas: &mut CpuCanvas, text: &str, size: f64, x: f64, y: f64, paint: PaintRgba8) {
    let advance = size * BUILTIN_ADVANCE;
    let height = size * BUILTIN_BOX;
    let width = advance * 0.8;
    let top = y + (size * LINE_SPACING - height) / 2.0;
    for (i, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let x0 = x + i as f64 * advance + (advance - width) / 2.0;
        canvas.fill_rect(x0, top, x0 + width, top + height, paint);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
