//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{EmaPoint, PricePoint, Timestamp};
pub use signal::{CrossoverState, SignalDirection, SignalEvent};
