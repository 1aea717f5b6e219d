//! Core value types, errors, and the deterministic random generator.

pub mod core;
pub mod error;
pub mod rng;
