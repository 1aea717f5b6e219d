use crate::foundation::core::{Canvas, Point};

/// Column/row split chosen for a dot-count request on a canvas.
///
/// Columns track the canvas aspect ratio so cells stay close to square:
/// `cols = ceil(sqrt(n * w/h))`, `rows = ceil(n / cols)` (bumped by one when
/// the product still falls short).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of grid columns.
    pub cols: u32,
    /// Number of grid rows.
    pub rows: u32,
}

impl GridSpec {
    /// Solve the column/row split for `dot_count` dots on `canvas`.
    ///
    /// Degenerate requests (zero dots or an empty canvas) yield a 0x0 spec.
    pub fn solve(canvas: Canvas, dot_count: u32) -> Self {
        if dot_count == 0 || canvas.is_empty() {
            return Self { cols: 0, rows: 0 };
        }
        let n = f64::from(dot_count);
        let aspect = f64::from(canvas.width) / f64::from(canvas.height);
        let cols = ((n * aspect).sqrt().ceil() as u32).max(1);
        let mut rows = ((n / f64::from(cols)).ceil() as u32).max(1);
        if rows.saturating_mul(cols) < dot_count {
            rows += 1;
        }
        Self { cols, rows }
    }
}

/// Generate row-major dot centers covering `canvas` for `dot_count` dots.
///
/// Centers sit at `((col + 0.5) * cell_w, (row + 0.5) * cell_h)`. Emission
/// stops only at row boundaries once `dot_count` positions exist, so the
/// final row is always complete: the returned length satisfies
/// `dot_count <= len <= dot_count + cols - 1`. The row-complete overshoot is
/// part of the contract (a truncated final row would read as visually
/// ragged); callers that need an exact count must truncate themselves.
///
/// `dot_count == 0` or an empty canvas returns an empty sequence.
pub fn generate(canvas: Canvas, dot_count: u32) -> Vec<Point> {
    let spec = GridSpec::solve(canvas, dot_count);
    if spec.cols == 0 {
        return Vec::new();
    }

    let cell_w = f64::from(canvas.width) / f64::from(spec.cols);
    let cell_h = f64::from(canvas.height) / f64::from(spec.rows);

    let mut out = Vec::with_capacity(dot_count as usize + spec.cols as usize);
    for row in 0..spec.rows {
        for col in 0..spec.cols {
            out.push(Point::new(
                (f64::from(col) + 0.5) * cell_w,
                (f64::from(row) + 0.5) * cell_h,
            ));
        }
        if out.len() >= dot_count as usize {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_bounds(canvas: Canvas, positions: &[Point]) {
        for p in positions {
            assert!(p.x >= 0.0 && p.x <= f64::from(canvas.width), "x = {}", p.x);
            assert!(p.y >= 0.0 && p.y <= f64::from(canvas.height), "y = {}", p.y);
        }
    }

    #[test]
    fn zero_dots_is_an_empty_sequence() {
        assert!(generate(Canvas::new(400, 300), 0).is_empty());
    }

    #[test]
    fn empty_canvas_is_an_empty_sequence() {
        assert!(generate(Canvas::new(0, 300), 100).is_empty());
        assert!(generate(Canvas::new(400, 0), 100).is_empty());
    }

    #[test]
    fn single_dot_on_square_canvas_lands_at_center() {
        let canvas = Canvas::new(300, 300);
        let grid = generate(canvas, 1);
        assert_eq!(grid.len(), 1);
        assert!((grid[0] - canvas.center()).hypot() < 1e-9);
    }

    #[test]
    fn length_is_row_complete_between_n_and_n_plus_cols() {
        for (w, h, n) in [(400u32, 300u32, 100u32), (1024, 768, 5000), (300, 900, 77)] {
            let canvas = Canvas::new(w, h);
            let spec = GridSpec::solve(canvas, n);
            let grid = generate(canvas, n);
            assert!(grid.len() >= n as usize);
            assert!(grid.len() <= (n + spec.cols - 1) as usize);
            assert_eq!(grid.len() % spec.cols as usize, 0, "final row complete");
            assert_in_bounds(canvas, &grid);
        }
    }

    #[test]
    fn scenario_400x300_with_100_dots() {
        let canvas = Canvas::new(400, 300);
        let spec = GridSpec::solve(canvas, 100);
        let grid = generate(canvas, 100);
        assert!(grid.len() >= 100);
        assert!(grid.len() < 100 + spec.cols as usize);
        assert_in_bounds(canvas, &grid);
    }

    #[test]
    fn positions_are_row_major_cell_centers() {
        let canvas = Canvas::new(100, 100);
        let grid = generate(canvas, 4);
        let spec = GridSpec::solve(canvas, 4);
        assert_eq!((spec.cols, spec.rows), (2, 2));
        assert_eq!(grid[0], Point::new(25.0, 25.0));
        assert_eq!(grid[1], Point::new(75.0, 25.0));
        assert_eq!(grid[2], Point::new(25.0, 75.0));
        assert_eq!(grid[3], Point::new(75.0, 75.0));
    }
}
