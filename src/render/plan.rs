use crate::foundation::{
    core::{Background, Canvas, Dot, DotShape, MIN_DOT_SIZE, Point, Rgb8},
    rng::Rng64,
};

/// Vertex count of the organic polygon shape.
pub const ORGANIC_POINTS: usize = 8;

/// Divisor turning the short canvas side into the base dot radius.
const BASE_RADIUS_DIVISOR: f64 = 80.0;

/// One primitive draw in a [`FramePlan`], in paint order.
#[derive(Clone, Debug, PartialEq)]
pub enum DotOp {
    /// Filled disc.
    Disc {
        /// Disc center.
        center: Point,
        /// Disc radius in pixels.
        radius: f64,
        /// Fill color.
        color: Rgb8,
    },
    /// Axis-aligned filled square of side `2 * half`.
    Rect {
        /// Square center.
        center: Point,
        /// Half side length in pixels.
        half: f64,
        /// Fill color.
        color: Rgb8,
    },
    /// Filled irregular polygon.
    Polygon {
        /// Polygon vertices, closed implicitly.
        points: Vec<Point>,
        /// Fill color.
        color: Rgb8,
    },
}

/// Backend-agnostic description of one static frame: a background clear
/// followed by one op per dot.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Output dimensions.
    pub canvas: Canvas,
    /// Resolved background fill.
    pub clear: Rgb8,
    /// Per-dot draw ops in input order.
    pub ops: Vec<DotOp>,
}

/// Base radius for a canvas: `min(width, height) / 80`.
pub fn base_radius(canvas: Canvas) -> f64 {
    f64::from(canvas.width.min(canvas.height)) / BASE_RADIUS_DIVISOR
}

/// Build the draw plan for a static frame.
///
/// Every dot becomes exactly one op of the requested shape with radius
/// `base_radius * size` (size clamped to at least [`MIN_DOT_SIZE`]). The
/// organic shape jitters each vertex radius by `0.7 + rng() * 0.6`, so its
/// output is only reproducible under a fixed-seed generator. An empty dot
/// sequence produces a plan with zero ops (background only).
pub fn build_frame(
    canvas: Canvas,
    dots: &[Dot],
    shape: DotShape,
    background: Background,
    rng: &mut Rng64,
) -> FramePlan {
    let base = base_radius(canvas);
    let mut ops = Vec::with_capacity(dots.len());

    for dot in dots {
        let radius = base * dot.size.max(MIN_DOT_SIZE);
        let op = match shape {
            DotShape::Circle => DotOp::Disc {
                center: dot.pos,
                radius,
                color: dot.color,
            },
            DotShape::Square => DotOp::Rect {
                center: dot.pos,
                half: radius,
                color: dot.color,
            },
            DotShape::Organic => DotOp::Polygon {
                points: organic_outline(dot.pos, radius, rng),
                color: dot.color,
            },
        };
        ops.push(op);
    }

    FramePlan {
        canvas,
        clear: background.rgb(),
        ops,
    }
}

fn organic_outline(center: Point, radius: f64, rng: &mut Rng64) -> Vec<Point> {
    let step = std::f64::consts::TAU / ORGANIC_POINTS as f64;
    (0..ORGANIC_POINTS)
        .map(|i| {
            let angle = i as f64 * step;
            let r = radius * (0.7 + rng.next_f64_01() * 0.6);
            Point::new(center.x + angle.cos() * r, center.y + angle.sin() * r)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dots(n: usize) -> Vec<Dot> {
        (0..n)
            .map(|i| Dot::new(Point::new(i as f64 * 10.0, 5.0), Rgb8::new(10, 20, 30)))
            .collect()
    }

    fn count_ops(plan: &FramePlan) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for op in &plan.ops {
            match op {
                DotOp::Disc { .. } => counts.0 += 1,
                DotOp::Rect { .. } => counts.1 += 1,
                DotOp::Polygon { .. } => counts.2 += 1,
            }
        }
        counts
    }

    #[test]
    fn circle_plan_is_one_disc_per_dot_and_nothing_else() {
        let mut rng = Rng64::new(0);
        let plan = build_frame(
            Canvas::new(400, 300),
            &dots(7),
            DotShape::Circle,
            Background::White,
            &mut rng,
        );
        assert_eq!(count_ops(&plan), (7, 0, 0));
    }

    #[test]
    fn square_plan_is_one_rect_per_dot() {
        let mut rng = Rng64::new(0);
        let plan = build_frame(
            Canvas::new(400, 300),
            &dots(5),
            DotShape::Square,
            Background::White,
            &mut rng,
        );
        assert_eq!(count_ops(&plan), (0, 5, 0));
    }

    #[test]
    fn unknown_shape_key_falls_back_to_discs() {
        let mut rng = Rng64::new(0);
        let plan = build_frame(
            Canvas::new(400, 300),
            &dots(3),
            DotShape::parse("starburst"),
            Background::White,
            &mut rng,
        );
        assert_eq!(count_ops(&plan), (3, 0, 0));
    }

    #[test]
    fn empty_dots_make_a_background_only_plan() {
        let mut rng = Rng64::new(0);
        let plan = build_frame(
            Canvas::new(400, 300),
            &[],
            DotShape::Circle,
            Background::Blue,
            &mut rng,
        );
        assert!(plan.ops.is_empty());
        assert_eq!(plan.clear, Background::Blue.rgb());
    }

    #[test]
    fn base_radius_tracks_the_short_side() {
        assert_eq!(base_radius(Canvas::new(400, 300)), 300.0 / 80.0);
        assert_eq!(base_radius(Canvas::new(160, 800)), 2.0);
    }

    #[test]
    fn radius_scales_with_size_and_clamps_to_positive() {
        let canvas = Canvas::new(400, 400);
        let base = base_radius(canvas);
        let mut rng = Rng64::new(0);
        let input = [
            Dot::new(Point::new(1.0, 1.0), Rgb8::new(0, 0, 0)).with_size(0.5),
            Dot::new(Point::new(2.0, 2.0), Rgb8::new(0, 0, 0)).with_size(-3.0),
        ];
        let plan = build_frame(canvas, &input, DotShape::Circle, Background::White, &mut rng);
        let DotOp::Disc { radius: r0, .. } = plan.ops[0] else {
            panic!("expected disc");
        };
        let DotOp::Disc { radius: r1, .. } = plan.ops[1] else {
            panic!("expected disc");
        };
        assert_eq!(r0, base * 0.5);
        assert_eq!(r1, base * MIN_DOT_SIZE);
    }

    #[test]
    fn organic_outline_jitters_within_bounds_and_replays_by_seed() {
        let canvas = Canvas::new(400, 400);
        let d = [Dot::new(Point::new(200.0, 200.0), Rgb8::new(1, 2, 3))];
        let plan_a = build_frame(canvas, &d, DotShape::Organic, Background::White, &mut Rng64::new(11));
        let plan_b = build_frame(canvas, &d, DotShape::Organic, Background::White, &mut Rng64::new(11));
        assert_eq!(plan_a, plan_b);

        let DotOp::Polygon { points, .. } = &plan_a.ops[0] else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), ORGANIC_POINTS);
        let base = base_radius(canvas);
        for p in points {
            let r = (*p - Point::new(200.0, 200.0)).hypot();
            assert!(r >= base * 0.7 - 1e-9);
            assert!(r <= base * 1.3 + 1e-9);
        }
    }
}
