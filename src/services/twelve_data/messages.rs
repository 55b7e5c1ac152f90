//! Wire types for the Twelve Data `/time_series` response.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::indicators::{PricePoint, Timestamp};
use crate::services::market_data::{validate_series, ProviderError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesResponse {
    #[serde(default)]
    pub meta: Option<TimeSeriesMeta>,
    #[serde(default)]
    pub values: Option<Vec<TimeSeriesValue>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesMeta {
    pub symbol: String,
    pub interval: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
}

/// One bar. Prices arrive as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesValue {
    pub datetime: String,
    pub close: String,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub high: Option<String>,
    #[serde(default)]
    pub low: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
}

impl TimeSeriesValue {
    pub fn to_price_point(&self) -> Result<PricePoint, ProviderError> {
        let time = parse_datetime(&self.datetime)?;
        let close = self
            .close
            .trim()
            .parse::<f64>()
            .map_err(|_| ProviderError::InvalidValue {
                datetime: self.datetime.clone(),
                field: "close",
                value: self.close.clone(),
            })?;
        Ok(PricePoint::new(time, close))
    }
}

impl TimeSeriesResponse {
    /// Convert into a chronologically ordered, validated series.
    ///
    /// The provider lists bars newest first.
    pub fn into_series(self, symbol: &str) -> Result<Vec<PricePoint>, ProviderError> {
        let TimeSeriesResponse {
            values,
            status,
            code,
            message,
            ..
        } = self;

        let values = match (status.as_deref(), values) {
            (Some("error"), _) | (_, None) => {
                return Err(ProviderError::Api {
                    code,
                    message: message.unwrap_or_else(|| "Unknown error".to_string()),
                })
            }
            (_, Some(values)) => values,
        };

        let mut series = values
            .iter()
            .map(TimeSeriesValue::to_price_point)
            .collect::<Result<Vec<_>, _>>()?;
        series.reverse();

        validate_series(symbol, &series)?;
        Ok(series)
    }
}

/// Parse `YYYY-MM-DD` (daily bars, midnight) or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_datetime(raw: &str) -> Result<Timestamp, ProviderError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| ProviderError::InvalidTimestamp(raw.to_string()))
}
