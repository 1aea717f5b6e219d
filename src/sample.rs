//! Color sampling from pixel buffers at grid positions.

pub mod sampler;
