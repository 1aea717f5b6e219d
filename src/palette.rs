//! Palette extraction via k-means color quantization.

pub mod quantize;
