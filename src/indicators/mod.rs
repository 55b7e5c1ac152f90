pub mod error;
pub mod trend;

pub use error::IndicatorError;
