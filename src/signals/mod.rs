//! Crossover signal detection and the EMA + crossover pipeline.

pub mod crossover;
pub mod engine;

pub use crossover::*;
pub use engine::*;
