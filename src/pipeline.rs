//! The image-to-dots pipeline and its consolidated options.

pub mod process;
