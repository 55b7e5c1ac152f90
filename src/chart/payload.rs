use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::indicators::{PricePoint, Timestamp};
use crate::models::signal::{SignalDirection, SignalEvent};
use crate::signals::engine::Analysis;

/// `{time, value}` pair as consumed by line series and marker series.
/// `time` is UTC epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub symbol: String,
    pub ema_period: usize,
    pub tolerance: f64,
    pub prices: Vec<LinePoint>,
    pub ema: Vec<LinePoint>,
    pub buy_markers: Vec<LinePoint>,
    pub sell_markers: Vec<LinePoint>,
    pub signals: Vec<SignalEvent<i64>>,
    #[serde(default)]
    pub misaligned: usize,
}

pub fn epoch_seconds(time: &Timestamp) -> i64 {
    time.and_utc().timestamp()
}

/// `YYYY-MM-DD` for midnight timestamps, `YYYY-MM-DD HH:MM` otherwise.
pub fn format_time(epoch: i64) -> String {
    match DateTime::from_timestamp(epoch, 0) {
        Some(dt) if dt.timestamp() % 86_400 == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => epoch.to_string(),
    }
}

/// One-line console summary, e.g. `2024-03-15: BUY at $51.20`.
pub fn describe_signal(signal: &SignalEvent<i64>) -> String {
    format!(
        "{}: {} at ${:.2}",
        format_time(signal.time),
        signal.direction.action(),
        signal.price
    )
}

impl ChartPayload {
    pub fn build(symbol: &str, series: &[PricePoint], analysis: &Analysis<Timestamp>) -> Self {
        let signals: Vec<SignalEvent<i64>> = analysis
            .signals
            .iter()
            .cloned()
            .map(|signal| signal.map_time(|t| epoch_seconds(&t)))
            .collect();

        let markers = |direction: SignalDirection| -> Vec<LinePoint> {
            analysis
                .signals_by(direction)
                .map(|s| LinePoint {
                    time: epoch_seconds(&s.time),
                    value: s.price,
                })
                .collect()
        };

        Self {
            symbol: symbol.to_string(),
            ema_period: analysis.settings.ema_period,
            tolerance: analysis.settings.tolerance,
            prices: series
                .iter()
                .map(|p| LinePoint {
                    time: epoch_seconds(&p.time),
                    value: p.close,
                })
                .collect(),
            ema: analysis
                .ema
                .iter()
                .map(|e| LinePoint {
                    time: epoch_seconds(&e.time),
                    value: e.value,
                })
                .collect(),
            buy_markers: markers(SignalDirection::Bullish),
            sell_markers: markers(SignalDirection::Bearish),
            signals,
            misaligned: analysis.misaligned,
        }
    }

    pub fn summary_lines(&self) -> Vec<String> {
        self.signals.iter().map(describe_signal).collect()
    }
}
