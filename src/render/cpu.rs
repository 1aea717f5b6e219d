use crate::{
    foundation::core::{Canvas, Rgb8},
    foundation::error::{DotfieldError, DotfieldResult},
    render::plan::{DotOp, FramePlan},
    render::target::RenderTarget,
};

/// Final raster output: RGBA8 pixels, row-major. Every pixel is opaque
/// because frames start from an opaque background fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

/// CPU rasterizer target backed by `vello_cpu`.
///
/// Owns a pixmap sized to the canvas and a lazily-reused render context.
/// Construction fails with [`DotfieldError::Surface`] when a raster
/// context cannot exist for the requested dimensions (zero-size, or larger
/// than the rasterizer's `u16` coordinate space).
#[derive(Debug)]
pub struct CpuTarget {
    canvas: Canvas,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: vello_cpu::Pixmap,
}

impl CpuTarget {
    /// Create a target for `canvas`.
    pub fn new(canvas: Canvas) -> DotfieldResult<Self> {
        if canvas.is_empty() {
            return Err(DotfieldError::surface(
                "cannot acquire a raster context for a zero-size canvas",
            ));
        }
        let w = u16::try_from(canvas.width).map_err(|_| {
            DotfieldError::surface(format!("canvas width {} exceeds u16", canvas.width))
        })?;
        let h = u16::try_from(canvas.height).map_err(|_| {
            DotfieldError::surface(format!("canvas height {} exceeds u16", canvas.height))
        })?;
        Ok(Self {
            canvas,
            ctx: Some(vello_cpu::RenderContext::new(w, h)),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Copy of the most recently drawn frame.
    pub fn frame(&self) -> FrameRgba {
        FrameRgba {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        f: impl FnOnce(&mut vello_cpu::RenderContext, &mut vello_cpu::Pixmap) -> R,
    ) -> DotfieldResult<R> {
        let mut ctx = self
            .ctx
            .take()
            .ok_or_else(|| DotfieldError::surface("raster context unavailable"))?;
        ctx.reset();
        let out = f(&mut ctx, &mut self.pixmap);
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl RenderTarget for CpuTarget {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn draw(&mut self, plan: &FramePlan) -> DotfieldResult<()> {
        if plan.canvas != self.canvas {
            return Err(DotfieldError::validation(format!(
                "frame plan is {}x{} but the target is {}x{}",
                plan.canvas.width, plan.canvas.height, self.canvas.width, self.canvas.height
            )));
        }

        self.with_ctx_mut(|ctx, pixmap| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

            ctx.set_paint(paint_color(plan.clear));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(plan.canvas.width),
                f64::from(plan.canvas.height),
            ));

            for op in &plan.ops {
                match op {
                    DotOp::Disc {
                        center,
                        radius,
                        color,
                    } => {
                        ctx.set_paint(paint_color(*color));
                        let circle = kurbo::Circle::new((center.x, center.y), *radius);
                        ctx.fill_path(&shape_to_cpu(&circle));
                    }
                    DotOp::Rect {
                        center,
                        half,
                        color,
                    } => {
                        ctx.set_paint(paint_color(*color));
                        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                            center.x - half,
                            center.y - half,
                            center.x + half,
                            center.y + half,
                        ));
                    }
                    DotOp::Polygon { points, color } => {
                        ctx.set_paint(paint_color(*color));
                        ctx.fill_path(&polygon_to_cpu(points));
                    }
                }
            }

            ctx.flush();
            pixmap.data_as_u8_slice_mut().fill(0);
            ctx.render_to_pixmap(pixmap);
        })
    }
}

fn paint_color(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
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

fn polygon_to_cpu(points: &[kurbo::Point]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let Some(first) = points.first() else {
        return out;
    };
    out.move_to(vello_cpu::kurbo::Point::new(first.x, first.y));
    for p in &points[1..] {
        out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y));
    }
    out.close_path();
    out
}
