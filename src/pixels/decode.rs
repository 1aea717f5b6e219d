use anyhow::Context;

use crate::{foundation::error::DotfieldResult, pixels::buffer::PixelBuffer};

/// Longest side an input image is downscaled to before sampling.
pub const MAX_DECODE_DIM: u32 = 1024;

/// Decode encoded image bytes into a straight-RGBA8 [`PixelBuffer`],
/// downscaling so the longest side is at most [`MAX_DECODE_DIM`] while
/// preserving aspect ratio.
pub fn decode_image(bytes: &[u8]) -> DotfieldResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let (w, h) = (dyn_img.width(), dyn_img.height());

    let dyn_img = if w.max(h) > MAX_DECODE_DIM {
        dyn_img.resize(
            MAX_DECODE_DIM,
            MAX_DECODE_DIM,
            image::imageops::FilterType::Triangle,
        )
    } else {
        dyn_img
    };

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}
