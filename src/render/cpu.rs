use crate::foundation::core::Affine;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Straight-alpha paint colour. Also the brush type of text layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PaintRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl PaintRgba8 {
    pub(crate) const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// A `vello_cpu` render context bound to one output size.
///
/// Each draw call composites over everything drawn before it; [`CpuCanvas::finish`] resolves the
/// scene into a premultiplied [`FrameRGBA`].
pub(crate) struct CpuCanvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl CpuCanvas {
    pub(crate) fn new(width: u32, height: u32) -> ReelResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ReelError::render(format!("canvas width {width} exceeds u16")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ReelError::render(format!("canvas height {height} exceeds u16")))?;
        if w == 0 || h == 0 {
            return Err(ReelError::render("canvas must be non-empty"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        })
    }

    pub(crate) fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, paint: PaintRgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint.to_cpu());
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
    }

    pub(crate) fn fill_path(&mut self, path: &kurbo::BezPath, paint: PaintRgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint.to_cpu());
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Fill every glyph run of `layout`, translated by `transform`, in a single colour.
    pub(crate) fn fill_layout(
        &mut self,
        layout: &parley::Layout<PaintRgba8>,
        font: &vello_cpu::peniko::FontData,
        transform: Affine,
        paint: PaintRgba8,
    ) {
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint.to_cpu());
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    pub(crate) fn finish(mut self) -> ReelResult<FrameRGBA> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA::from_premul(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
