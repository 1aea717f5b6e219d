use crate::foundation::{
    core::{Canvas, Rgb8},
    error::{DotfieldError, DotfieldResult},
};

/// Decoded raster image: straight RGBA8, row-major, no padding.
///
/// The byte length is validated on construction (`width * height * 4`) and
/// the buffer is immutable afterwards; downstream stages only read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap decoded pixel data. Fails with
    /// [`DotfieldError::InvalidInput`] when the byte length does not match
    /// the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> DotfieldResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| DotfieldError::invalid_input("pixel buffer dimensions overflow"))?;
        if data.len() != expected {
            return Err(DotfieldError::invalid_input(format!(
                "pixel buffer length {} does not match {}x{}x4",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas covering this buffer.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB channels of the pixel at `(x, y)`. Coordinates must be in
    /// bounds; callers clamp before indexing.
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb8 {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Rgb8::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_is_invalid_input() {
        let err = PixelBuffer::new(2, 2, vec![0u8; 15]).unwrap_err();
        assert!(matches!(err, DotfieldError::InvalidInput(_)));
    }

    #[test]
    fn zero_size_buffer_is_a_valid_empty() {
        let buf = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.pixel_count(), 0);
    }

    #[test]
    fn rgb_at_indexes_row_major() {
        // 2x1: red then green.
        let buf =
            PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        assert_eq!(buf.rgb_at(0, 0), Rgb8::new(255, 0, 0));
        assert_eq!(buf.rgb_at(1, 0), Rgb8::new(0, 255, 0));
    }
}
