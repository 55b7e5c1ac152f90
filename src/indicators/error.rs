//! Indicator error types.

use thiserror::Error;

/// Errors raised by indicator and signal computations.
///
/// Short input series are not errors; they produce empty output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// A parameter is outside its valid domain (e.g. a zero period).
    #[error("invalid parameter `{param}`: {reason}")]
    InvalidParameter { param: &'static str, reason: String },
}

impl IndicatorError {
    #[must_use]
    pub fn invalid_parameter(param: &'static str, reason: impl Into<String>) -> Self {
        IndicatorError::InvalidParameter {
            param,
            reason: reason.into(),
        }
    }
}
