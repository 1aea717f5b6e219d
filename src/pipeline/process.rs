use crate::{
    foundation::core::{Background, Canvas, Dot, DotShape, Rgb8, WaveformKind},
    foundation::error::{DotfieldError, DotfieldResult},
    foundation::rng::Rng64,
    grid::generate::generate,
    palette::quantize::{Centroid, quantize},
    pixels::buffer::PixelBuffer,
    sample::sampler::{SampleOptions, sample},
};

/// Largest palette a single processing request may ask for.
pub const MAX_COLOR_COUNT: u32 = 32;

/// Denominator of the display size scale: a slider value of 70 leaves dot
/// sizes untouched.
pub const DOT_SIZE_SCALE_BASIS: f64 = 70.0;

/// Everything that shapes one image-to-dots run, consolidated in one place
/// so callers cannot half-configure a pipeline.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct PipelineOptions {
    /// Requested dot count. The grid may overshoot by up to one row.
    pub dot_count: u32,
    /// Palette size for quantization, at most [`MAX_COLOR_COUNT`].
    pub color_count: u32,
    /// Sampling window half-size, see [`SampleOptions`].
    pub sample_radius: u32,
    /// Size dots by local darkness instead of uniformly.
    pub adaptive_sizing: bool,
    /// Shape drawn for each dot in static renders.
    pub shape: DotShape,
    /// Animation transform, `None` for a static field.
    pub waveform: Option<WaveformKind>,
    /// Frame background fill.
    pub background: Background,
    /// Display size slider in `[10, 100]`, applied as `size * scale / 70`.
    pub dot_size_scale: u32,
    /// Collapse sampled colors to BT.601 luma before rendering.
    pub monochrome: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            dot_count: 5_000,
            color_count: 32,
            sample_radius: 0,
            adaptive_sizing: false,
            shape: DotShape::Circle,
            waveform: Some(WaveformKind::Ripple),
            background: Background::White,
            dot_size_scale: 40,
            monochrome: false,
        }
    }
}

impl PipelineOptions {
    /// Check range constraints before processing.
    pub fn validate(&self) -> DotfieldResult<()> {
        if self.color_count > MAX_COLOR_COUNT {
            return Err(DotfieldError::validation(format!(
                "color_count {} exceeds the maximum of {MAX_COLOR_COUNT}",
                self.color_count
            )));
        }
        if !(10..=100).contains(&self.dot_size_scale) {
            return Err(DotfieldError::validation(format!(
                "dot_size_scale {} is outside 10..=100",
                self.dot_size_scale
            )));
        }
        Ok(())
    }
}

/// Output of [`process_image`]: the dot field plus the extracted palette.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessedImage {
    /// Dimensions of the source buffer, which the dot positions cover.
    pub canvas: Canvas,
    /// Sampled dots in grid order, sizes not yet display-scaled.
    pub dots: Vec<Dot>,
    /// Representative colors of the source image.
    pub palette: Vec<Centroid>,
}

/// Run the full image-to-dots pipeline: grid placement, color sampling,
/// and palette extraction.
///
/// An empty buffer short-circuits to an empty result rather than erroring;
/// "no pixels" is a degenerate request, not a failure. Sizes in the result
/// are raw sampler output; apply [`prepare_for_render`] before drawing.
#[tracing::instrument(skip(buffer, rng), fields(pixels = buffer.pixel_count()))]
pub fn process_image(
    buffer: &PixelBuffer,
    opts: &PipelineOptions,
    rng: &mut Rng64,
) -> DotfieldResult<ProcessedImage> {
    opts.validate()?;
    if buffer.is_empty() {
        return Ok(ProcessedImage {
            canvas: buffer.canvas(),
            dots: Vec::new(),
            palette: Vec::new(),
        });
    }

    let canvas = buffer.canvas();
    let positions = generate(canvas, opts.dot_count);
    let dots = sample(
        buffer,
        &positions,
        SampleOptions {
            sample_radius: opts.sample_radius,
            adaptive_sizing: opts.adaptive_sizing,
        },
    )?;
    let palette = quantize(buffer, opts.color_count, rng)?;
    tracing::debug!(dots = dots.len(), palette = palette.len(), "image processed");

    Ok(ProcessedImage {
        canvas,
        dots,
        palette,
    })
}

/// Apply the display size slider: `size * scale / 70`.
pub fn scale_dot_sizes(dots: &[Dot], dot_size_scale: u32) -> Vec<Dot> {
    let factor = f64::from(dot_size_scale) / DOT_SIZE_SCALE_BASIS;
    dots.iter()
        .map(|dot| dot.with_size(dot.size * factor))
        .collect()
}

/// Replace each dot's color with its BT.601 luma (gray).
pub fn to_monochrome(dots: &[Dot]) -> Vec<Dot> {
    dots.iter()
        .map(|dot| {
            let y = 0.299 * f64::from(dot.color.r)
                + 0.587 * f64::from(dot.color.g)
                + 0.114 * f64::from(dot.color.b);
            let y = y.round().clamp(0.0, 255.0) as u8;
            dot.with_color(Rgb8::new(y, y, y))
        })
        .collect()
}

/// Pure display-time transform chain: size scaling, then the optional
/// monochrome pass. The processed dots stay untouched so display settings
/// can change without re-sampling the image.
pub fn prepare_for_render(dots: &[Dot], opts: &PipelineOptions) -> Vec<Dot> {
    let scaled = scale_dot_sizes(dots, opts.dot_size_scale);
    if opts.monochrome {
        to_monochrome(&scaled)
    } else {
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Point;

    fn gradient_buffer(w: u32, h: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                let v = ((x + y) * 255 / (w + h - 2).max(1)) as u8;
                data.extend_from_slice(&[v, 255 - v, 128, 255]);
            }
        }
        PixelBuffer::new(w, h, data).unwrap()
    }

    #[test]
    fn defaults_validate() {
        PipelineOptions::default().validate().unwrap();
    }

    #[test]
    fn out_of_range_options_are_rejected() {
        let mut opts = PipelineOptions {
            color_count: 33,
            ..Default::default()
        };
        assert!(matches!(
            opts.validate().unwrap_err(),
            DotfieldError::Validation(_)
        ));
        opts.color_count = 32;
        opts.dot_size_scale = 101;
        assert!(opts.validate().is_err());
        opts.dot_size_scale = 9;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn empty_buffer_yields_an_empty_result() {
        let buf = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        let mut rng = Rng64::new(0);
        let out = process_image(&buf, &PipelineOptions::default(), &mut rng).unwrap();
        assert!(out.dots.is_empty());
        assert!(out.palette.is_empty());
    }

    #[test]
    fn processing_covers_the_request_with_a_row_complete_grid() {
        let buf = gradient_buffer(40, 30);
        let opts = PipelineOptions {
            dot_count: 100,
            color_count: 8,
            ..Default::default()
        };
        let mut rng = Rng64::new(42);
        let out = process_image(&buf, &opts, &mut rng).unwrap();

        assert!(out.dots.len() >= 100);
        assert!(out.palette.len() <= 8);
        assert_eq!(out.canvas, Canvas::new(40, 30));
        for dot in &out.dots {
            assert!(dot.pos.x >= 0.0 && dot.pos.x <= 40.0);
            assert!(dot.pos.y >= 0.0 && dot.pos.y <= 30.0);
        }
    }

    #[test]
    fn fixed_seed_replays_the_whole_run() {
        let buf = gradient_buffer(16, 16);
        let opts = PipelineOptions {
            dot_count: 20,
            color_count: 4,
            ..Default::default()
        };
        let a = process_image(&buf, &opts, &mut Rng64::new(7)).unwrap();
        let b = process_image(&buf, &opts, &mut Rng64::new(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn size_scale_at_basis_is_the_identity() {
        let dots = vec![
            Dot::new(Point::new(1.0, 1.0), Rgb8::new(0, 0, 0)).with_size(0.5),
            Dot::new(Point::new(2.0, 2.0), Rgb8::new(0, 0, 0)),
        ];
        assert_eq!(scale_dot_sizes(&dots, 70), dots);
        let small = scale_dot_sizes(&dots, 35);
        assert_eq!(small[0].size, 0.25);
        assert_eq!(small[1].size, 0.5);
    }

    #[test]
    fn monochrome_uses_bt601_weights() {
        let dots = vec![Dot::new(Point::new(0.0, 0.0), Rgb8::new(255, 0, 0))];
        let mono = to_monochrome(&dots);
        // 0.299 * 255 = 76.245 rounds to 76.
        assert_eq!(mono[0].color, Rgb8::new(76, 76, 76));

        let white = to_monochrome(&[Dot::new(Point::new(0.0, 0.0), Rgb8::new(255, 255, 255))]);
        assert_eq!(white[0].color, Rgb8::new(255, 255, 255));
    }

    #[test]
    fn prepare_chain_scales_then_desaturates_without_touching_input() {
        let dots = vec![Dot::new(Point::new(0.0, 0.0), Rgb8::new(0, 255, 0)).with_size(1.0)];
        let before = dots.clone();
        let opts = PipelineOptions {
            dot_size_scale: 35,
            monochrome: true,
            ..Default::default()
        };
        let out = prepare_for_render(&dots, &opts);
        assert_eq!(out[0].size, 0.5);
        // 0.587 * 255 = 149.685 rounds to 150.
        assert_eq!(out[0].color, Rgb8::new(150, 150, 150));
        assert_eq!(dots, before);
    }

    #[test]
    fn options_round_trip_through_json() {
        let opts = PipelineOptions {
            shape: DotShape::Organic,
            waveform: Some(WaveformKind::Wave),
            background: Background::Blue,
            monochrome: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: PipelineOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.shape, DotShape::Organic);
        assert_eq!(back.waveform, Some(WaveformKind::Wave));
        assert_eq!(back.background, Background::Blue);
        assert!(back.monochrome);
    }
}
