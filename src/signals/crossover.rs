//! Tolerance-band crossover detection.
//!
//! Each price point is classified against a band of `±tolerance` around the
//! EMA at the same timestamp. Closes inside the band keep the last confirmed
//! side, so a signal only fires when price leaves the band on the opposite
//! side from where it was last confirmed.

use tracing::{debug, warn};

use crate::indicators::IndicatorError;
use crate::models::indicators::{EmaPoint, PricePoint};
use crate::models::signal::{CrossoverState, SignalDirection, SignalEvent};

pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Detection output plus how many price points found an EMA value.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverReport<T> {
    pub signals: Vec<SignalEvent<T>>,
    /// Points with an EMA value at their timestamp.
    pub evaluated: usize,
    /// Points without one (warm-up window or misaligned timestamps).
    pub skipped: usize,
}

impl<T> Default for CrossoverReport<T> {
    fn default() -> Self {
        Self {
            signals: Vec::new(),
            evaluated: 0,
            skipped: 0,
        }
    }
}

/// Classify a close against the band around `ema_value`.
/// Inside the band the previous confirmed state is kept.
pub fn classify(close: f64, ema_value: f64, tolerance: f64, last: CrossoverState) -> CrossoverState {
    let upper_band = ema_value * (1.0 + tolerance);
    let lower_band = ema_value * (1.0 - tolerance);

    if close > upper_band {
        CrossoverState::Above
    } else if close < lower_band {
        CrossoverState::Below
    } else {
        last
    }
}

/// Signal emitted when moving from `last` to `current`, if any.
/// Leaving `Neutral` never emits.
pub fn transition(last: CrossoverState, current: CrossoverState) -> Option<SignalDirection> {
    match (last, current) {
        (CrossoverState::Below, CrossoverState::Above) => Some(SignalDirection::Bullish),
        (CrossoverState::Above, CrossoverState::Below) => Some(SignalDirection::Bearish),
        _ => None,
    }
}

/// Detect crossovers, matching EMA values by timestamp with a sorted merge.
///
/// Both inputs must be ordered by time. Price points without an EMA value at
/// the exact same timestamp are skipped without touching the state.
pub fn detect_crossovers<T: Ord + Clone>(
    series: &[PricePoint<T>],
    ema: &[EmaPoint<T>],
    tolerance: f64,
) -> Result<Vec<SignalEvent<T>>, IndicatorError> {
    detect_crossovers_report(series, ema, tolerance).map(|report| report.signals)
}

/// Same as [`detect_crossovers`], also returning evaluated/skipped counts.
pub fn detect_crossovers_report<T: Ord + Clone>(
    series: &[PricePoint<T>],
    ema: &[EmaPoint<T>],
    tolerance: f64,
) -> Result<CrossoverReport<T>, IndicatorError> {
    validate_tolerance(tolerance)?;
    let report = run(merge_lookup(series, ema), tolerance);
    log_report(&report, ema.len());
    Ok(report)
}

/// Reference implementation: looks every price point up in `ema` with a
/// linear scan. O(n·m), but only needs timestamp equality.
pub fn detect_crossovers_linear<T: PartialEq + Clone>(
    series: &[PricePoint<T>],
    ema: &[EmaPoint<T>],
    tolerance: f64,
) -> Result<Vec<SignalEvent<T>>, IndicatorError> {
    validate_tolerance(tolerance)?;
    let lookup = series.iter().map(|point| {
        let value = ema
            .iter()
            .find(|e| e.time == point.time)
            .map(|e| e.value);
        (point, value)
    });
    let report = run(lookup, tolerance);
    log_report(&report, ema.len());
    Ok(report.signals)
}

fn validate_tolerance(tolerance: f64) -> Result<(), IndicatorError> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(IndicatorError::invalid_parameter(
            "tolerance",
            format!("must be a non-negative fraction, got {}", tolerance),
        ));
    }
    Ok(())
}

/// Pair every price point with the EMA value at its timestamp by walking both
/// sorted slices once.
fn merge_lookup<'a, T: Ord>(
    series: &'a [PricePoint<T>],
    ema: &'a [EmaPoint<T>],
) -> impl Iterator<Item = (&'a PricePoint<T>, Option<f64>)> + 'a {
    let mut cursor = 0;
    series.iter().map(move |point| {
        while cursor < ema.len() && ema[cursor].time < point.time {
            cursor += 1;
        }
        let value = ema
            .get(cursor)
            .filter(|e| e.time == point.time)
            .map(|e| e.value);
        (point, value)
    })
}

fn run<'a, T, I>(points: I, tolerance: f64) -> CrossoverReport<T>
where
    T: Clone + 'a,
    I: Iterator<Item = (&'a PricePoint<T>, Option<f64>)>,
{
    let (_, report) = points.fold(
        (CrossoverState::Neutral, CrossoverReport::default()),
        |(last, mut report), (point, ema_value)| {
            let Some(ema_value) = ema_value else {
                report.skipped += 1;
                return (last, report);
            };
            report.evaluated += 1;

            let current = classify(point.close, ema_value, tolerance, last);
            if let Some(direction) = transition(last, current) {
                report
                    .signals
                    .push(SignalEvent::new(point.time.clone(), direction, point.close));
            }

            let next = if current == CrossoverState::Neutral {
                last
            } else {
                current
            };
            (next, report)
        },
    );
    report
}

fn log_report<T>(report: &CrossoverReport<T>, ema_len: usize) {
    if report.evaluated == 0 && ema_len > 0 {
        warn!(
            skipped = report.skipped,
            ema_points = ema_len,
            "No price point matched an EMA timestamp"
        );
    }
    debug!(
        evaluated = report.evaluated,
        skipped = report.skipped,
        signals = report.signals.len(),
        "Crossover detection complete"
    );
}
