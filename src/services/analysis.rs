//! Fetch a series from the configured provider and run the signal pipeline
//! over it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::chart::ChartPayload;
use crate::config::AnalysisSettings;
use crate::indicators::IndicatorError;
use crate::metrics::Metrics;
use crate::services::market_data::{MarketDataProvider, ProviderError};
use crate::signals::engine::SignalEngine;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

pub struct AnalysisService {
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub metrics: Option<Arc<Metrics>>,
    pub output_size: usize,
    pub defaults: AnalysisSettings,
}

impl AnalysisService {
    pub fn new(
        data_provider: Arc<dyn MarketDataProvider>,
        output_size: usize,
        defaults: AnalysisSettings,
    ) -> Self {
        Self {
            data_provider,
            metrics: None,
            output_size,
            defaults,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the chart payload for `symbol`. `settings` falls back to the
    /// service defaults.
    pub async fn chart(
        &self,
        symbol: &str,
        settings: Option<AnalysisSettings>,
    ) -> Result<ChartPayload, AnalysisError> {
        let settings = settings.unwrap_or(self.defaults);
        let series = self
            .data_provider
            .get_price_series(symbol, self.output_size)
            .await?;

        debug!(symbol, points = series.len(), "Evaluating signals");
        let analysis = SignalEngine::evaluate(&series, &settings)?;

        if let Some(metrics) = &self.metrics {
            for signal in &analysis.signals {
                metrics.record_signal(signal.direction);
            }
            metrics
                .ema_lookup_misses_total
                .inc_by(analysis.misaligned as u64);
        }

        info!(
            symbol,
            signals = analysis.signals.len(),
            period = settings.ema_period,
            tolerance = settings.tolerance,
            "Found {} crossover signals",
            analysis.signals.len()
        );

        Ok(ChartPayload::build(symbol, &series, &analysis))
    }
}
