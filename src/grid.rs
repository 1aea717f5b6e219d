//! Aspect-aware grid placement of dot positions.

pub mod generate;
