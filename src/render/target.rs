use crate::{
    foundation::core::{Background, Canvas, Dot, DotShape},
    foundation::error::DotfieldResult,
    foundation::rng::Rng64,
    render::plan::{FramePlan, build_frame},
};

/// Seam between the frame planner and a concrete rasterizer.
///
/// The CPU implementation is [`CpuTarget`](crate::CpuTarget); tests use
/// mock targets that record the plans they are asked to draw.
pub trait RenderTarget {
    /// Output dimensions of this target.
    fn canvas(&self) -> Canvas;

    /// Execute a frame plan synchronously: clear, fill the background, and
    /// paint every op. Fails without a partial draw when the raster context
    /// is unavailable.
    fn draw(&mut self, plan: &FramePlan) -> DotfieldResult<()>;
}

/// Render one static frame of dots onto `target`.
///
/// Convenience composition of [`build_frame`] and
/// [`RenderTarget::draw`]; the per-frame animation path goes through the
/// same plan builder.
pub fn render_dots<T: RenderTarget + ?Sized>(
    target: &mut T,
    dots: &[Dot],
    shape: DotShape,
    background: Background,
    rng: &mut Rng64,
) -> DotfieldResult<()> {
    let plan = build_frame(target.canvas(), dots, shape, background, rng);
    target.draw(&plan)
}
