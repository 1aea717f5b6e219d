//! Time-based dot transforms and the frame-loop engine.

pub mod engine;
pub mod waveform;
