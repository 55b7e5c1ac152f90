//! Chart-ready view of an analysis: line series, signal markers and hover
//! tooltip content for the front end.

pub mod payload;
pub mod tooltip;

pub use payload::*;
pub use tooltip::*;
