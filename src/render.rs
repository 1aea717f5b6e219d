//! Frame planning and rasterization: dots to a backend-agnostic plan, plan
//! to pixels.

pub mod cpu;
pub mod plan;
pub mod target;
