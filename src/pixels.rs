//! Decoded pixel data: the RGBA8 buffer and image decoding into it.

pub mod buffer;
pub mod decode;
