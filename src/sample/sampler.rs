use crate::{
    foundation::core::{DEFAULT_DOT_SIZE, Dot, Point, Rgb8},
    foundation::error::{DotfieldError, DotfieldResult},
    pixels::buffer::PixelBuffer,
};

/// Options for [`sample`].
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct SampleOptions {
    /// Window half-size. `0` reads a single pixel; `r > 0` averages the
    /// `(2r+1)^2` window around the position.
    pub sample_radius: u32,
    /// Derive the size weight from local brightness instead of the fixed
    /// default.
    pub adaptive_sizing: bool,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            sample_radius: 0,
            adaptive_sizing: false,
        }
    }
}

/// Read (or average) the buffer color under each grid position, producing
/// one [`Dot`] per position.
///
/// Positions are clamped (floor, then clamp into `[0, w-1] x [0, h-1]`) for
/// sampling only; the emitted dot keeps the original fractional position.
/// With `sample_radius > 0` the window's pixel coordinates are clamped
/// independently to the canvas bounds while the divisor stays `(2r+1)^2`, so
/// edge pixels are resampled rather than excluded.
///
/// With `adaptive_sizing`, `size = clamp(1 - brightness/255, 0.1, 1.0)`
/// where `brightness = (r+g+b)/3`; otherwise every dot gets
/// [`DEFAULT_DOT_SIZE`].
pub fn sample(
    buffer: &PixelBuffer,
    positions: &[Point],
    opts: SampleOptions,
) -> DotfieldResult<Vec<Dot>> {
    if positions.is_empty() {
        return Ok(Vec::new());
    }
    if buffer.is_empty() {
        return Err(DotfieldError::invalid_input(
            "cannot sample colors from an empty pixel buffer",
        ));
    }

    let mut out = Vec::with_capacity(positions.len());
    for &pos in positions {
        let (px, py) = clamp_to_pixel(buffer, pos);
        let color = if opts.sample_radius == 0 {
            buffer.rgb_at(px, py)
        } else {
            window_average(buffer, px, py, opts.sample_radius)
        };

        let size = if opts.adaptive_sizing {
            let brightness =
                (f64::from(color.r) + f64::from(color.g) + f64::from(color.b)) / 3.0;
            (1.0 - brightness / 255.0).clamp(0.1, 1.0)
        } else {
            DEFAULT_DOT_SIZE
        };

        out.push(Dot::new(pos, color).with_size(size));
    }
    Ok(out)
}

fn clamp_to_pixel(buffer: &PixelBuffer, pos: Point) -> (u32, u32) {
    let max_x = i64::from(buffer.width()) - 1;
    let max_y = i64::from(buffer.height()) - 1;
    let x = (pos.x.floor() as i64).clamp(0, max_x) as u32;
    let y = (pos.y.floor() as i64).clamp(0, max_y) as u32;
    (x, y)
}

fn window_average(buffer: &PixelBuffer, cx: u32, cy: u32, radius: u32) -> Rgb8 {
    let r = i64::from(radius);
    let max_x = i64::from(buffer.width()) - 1;
    let max_y = i64::from(buffer.height()) - 1;

    let mut sum = [0u64; 3];
    for dy in -r..=r {
        let y = (i64::from(cy) + dy).clamp(0, max_y) as u32;
        for dx in -r..=r {
            let x = (i64::from(cx) + dx).clamp(0, max_x) as u32;
            let px = buffer.rgb_at(x, y);
            sum[0] += u64::from(px.r);
            sum[1] += u64::from(px.g);
            sum[2] += u64::from(px.b);
        }
    }

    // Fixed divisor: edge samples are clamped duplicates, never dropped.
    let div = (2 * radius as u64 + 1).pow(2);
    Rgb8::new(
        (sum[0] / div) as u8,
        (sum[1] / div) as u8,
        (sum[2] / div) as u8,
    )
}
