//! REST client for the Twelve Data time series API.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::messages::TimeSeriesResponse;
use crate::config::ProviderConfig;
use crate::models::indicators::PricePoint;
use crate::services::market_data::{MarketDataProvider, ProviderError};

pub struct TwelveDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    interval: String,
}

impl TwelveDataClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Build a client on top of an existing `reqwest::Client`, e.g. one
    /// pointed at a mock server.
    pub fn with_client(config: &ProviderConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            interval: config.interval.clone(),
        }
    }

    /// Raw `/time_series` call. Provider-level errors come back inside the
    /// response body, usually with HTTP 200.
    pub async fn time_series(
        &self,
        symbol: &str,
        output_size: usize,
    ) -> Result<TimeSeriesResponse, ProviderError> {
        let url = format!("{}/time_series", self.base_url);
        let output_size = output_size.to_string();

        debug!(symbol, interval = %self.interval, output_size = %output_size, "Requesting time series");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", self.interval.as_str()),
                ("outputsize", output_size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<TimeSeriesResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ProviderError::Api {
                code: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected HTTP status")
                    .to_string(),
            }),
            Err(e) => Err(ProviderError::Decode(e)),
        }
    }
}

#[async_trait]
impl MarketDataProvider for TwelveDataClient {
    async fn get_price_series(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        info!(symbol, "Fetching price series");

        let response = self.time_series(symbol, limit).await?;
        let series = response.into_series(symbol).map_err(|e| {
            warn!(symbol, error = %e, "Quote provider returned unusable data");
            e
        })?;

        debug!(symbol, points = series.len(), "Fetched price series");
        Ok(series)
    }
}
