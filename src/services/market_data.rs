//! Market data provider interface and series validation.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::indicators::PricePoint;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to quote provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode quote provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("quote provider error: {message}")]
    Api { code: Option<u16>, message: String },

    #[error("invalid {field} `{value}` at {datetime}")]
    InvalidValue {
        datetime: String,
        field: &'static str,
        value: String,
    },

    #[error("unrecognised timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("no price data for {0}")]
    EmptySeries(String),

    #[error("price series is not strictly increasing in time at index {index}")]
    UnorderedSeries { index: usize },

    #[error("close at index {index} must be finite and non-negative, got {close}")]
    InvalidClose { index: usize, close: f64 },
}

impl ProviderError {
    /// Whether the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Http(_))
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Chronologically ordered close prices for `symbol`, at most `limit`
    /// points, newest last.
    async fn get_price_series(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PricePoint>, ProviderError>;
}

/// Check the ordering and value invariants the signal pipeline relies on:
/// at least one point, strictly increasing timestamps, finite non-negative
/// closes.
pub fn validate_series<T: Ord>(symbol: &str, series: &[PricePoint<T>]) -> Result<(), ProviderError> {
    if series.is_empty() {
        return Err(ProviderError::EmptySeries(symbol.to_string()));
    }

    for (index, point) in series.iter().enumerate() {
        if !point.close.is_finite() || point.close < 0.0 {
            return Err(ProviderError::InvalidClose {
                index,
                close: point.close,
            });
        }
        if index > 0 && series[index - 1].time >= point.time {
            return Err(ProviderError::UnorderedSeries { index });
        }
    }

    Ok(())
}

/// Provider serving fixed series from memory. Used for offline runs and
/// tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    series: HashMap<String, Vec<PricePoint>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: impl Into<String>, series: Vec<PricePoint>) -> Self {
        self.series.insert(symbol.into(), series);
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn get_price_series(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let series = self
            .series
            .get(symbol)
            .ok_or_else(|| ProviderError::EmptySeries(symbol.to_string()))?;
        let start = series.len().saturating_sub(limit);
        let latest = &series[start..];
        validate_series(symbol, latest)?;
        Ok(latest.to_vec())
    }
}
