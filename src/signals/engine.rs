//! EMA + crossover pipeline over one price series.

use tracing::debug;

use crate::config::AnalysisSettings;
use crate::indicators::trend::compute_ema;
use crate::indicators::IndicatorError;
use crate::models::indicators::{EmaPoint, PricePoint};
use crate::models::signal::{SignalDirection, SignalEvent};
use crate::signals::crossover::detect_crossovers_report;

/// EMA line and crossover signals computed from one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<T> {
    pub settings: AnalysisSettings,
    pub ema: Vec<EmaPoint<T>>,
    pub signals: Vec<SignalEvent<T>>,
    /// Points past the warm-up window that still had no EMA value.
    pub misaligned: usize,
}

impl<T> Analysis<T> {
    pub fn signals_by(&self, direction: SignalDirection) -> impl Iterator<Item = &SignalEvent<T>> {
        self.signals
            .iter()
            .filter(move |signal| signal.direction == direction)
    }
}

pub struct SignalEngine;

impl SignalEngine {
    /// Compute the EMA for `settings.ema_period`, then detect crossovers
    /// against it with `settings.tolerance`.
    pub fn evaluate<T: Ord + Clone>(
        series: &[PricePoint<T>],
        settings: &AnalysisSettings,
    ) -> Result<Analysis<T>, IndicatorError> {
        let ema = compute_ema(series, settings.ema_period)?;
        let report = detect_crossovers_report(series, &ema, settings.tolerance)?;

        let warm_up = settings.ema_period.saturating_sub(1).min(series.len());
        let misaligned = report.skipped.saturating_sub(warm_up);

        debug!(
            points = series.len(),
            ema_points = ema.len(),
            signals = report.signals.len(),
            misaligned,
            period = settings.ema_period,
            tolerance = settings.tolerance,
            "Signal evaluation complete"
        );

        Ok(Analysis {
            settings: *settings,
            ema,
            signals: report.signals,
            misaligned,
        })
    }
}
