//! Dotfield turns raster images into animated fields of colored dots.
//!
//! The pipeline is a chain of pure stages over plain value types:
//!
//! 1. **Decode**: image bytes -> [`PixelBuffer`] (RGBA8, capped at
//!    [`MAX_DECODE_DIM`] on the longest side)
//! 2. **Place**: canvas + dot count -> grid positions ([`generate_grid`])
//! 3. **Sample**: buffer + positions -> [`Dot`]s ([`sample_colors`]), with
//!    an optional k-means palette ([`quantize`]) alongside
//! 4. **Plan**: dots + shape + background -> [`FramePlan`] (backend-agnostic
//!    draw ops)
//! 5. **Render**: plan -> pixels through a [`RenderTarget`]; the CPU
//!    implementation is [`CpuTarget`]
//!
//! [`process_image`] runs stages 2-3 in one call; [`AnimationEngine`]
//! re-runs stages 4-5 every frame with a time-based waveform transform in
//! between.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: all randomness flows through an injected
//!   [`Rng64`], so a fixed seed replays palettes, organic outlines, and
//!   whole pipeline runs exactly.
//! - **Transforms are pure**: display scaling, monochrome, and waveforms
//!   derive new dot sequences instead of mutating processed output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod grid;
mod palette;
mod pipeline;
mod pixels;
mod render;
mod sample;

pub use animation::engine::{
    AnimationEngine, FrameClock, FrameToken, PlayState, SystemClock,
};
pub use animation::waveform::{DEFAULT_SPEED, apply as apply_waveform, clamp_speed};
pub use foundation::core::{
    Background, Canvas, DEFAULT_DOT_SIZE, Dot, DotShape, MIN_DOT_SIZE, Point, Rgb8, Vec2,
    WaveformKind,
};
pub use foundation::error::{DotfieldError, DotfieldResult};
pub use foundation::rng::Rng64;
pub use grid::generate::{GridSpec, generate as generate_grid};
pub use palette::quantize::{Centroid, KMEANS_ITERATIONS, quantize};
pub use pipeline::process::{
    DOT_SIZE_SCALE_BASIS, MAX_COLOR_COUNT, PipelineOptions, ProcessedImage, prepare_for_render,
    process_image, scale_dot_sizes, to_monochrome,
};
pub use pixels::buffer::PixelBuffer;
pub use pixels::decode::{MAX_DECODE_DIM, decode_image};
pub use render::cpu::{CpuTarget, FrameRgba};
pub use render::plan::{DotOp, FramePlan, ORGANIC_POINTS, base_radius, build_frame};
pub use render::target::{RenderTarget, render_dots};
pub use sample::sampler::{SampleOptions, sample as sample_colors};
