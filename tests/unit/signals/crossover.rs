//! Unit tests for tolerance-band crossover detection

use trendband::indicators::trend::compute_ema;
use trendband::indicators::IndicatorError;
use trendband::models::indicators::{EmaPoint, PricePoint};
use trendband::models::signal::{SignalDirection, SignalEvent};
use trendband::signals::crossover::{
    detect_crossovers, detect_crossovers_linear, detect_crossovers_report, DEFAULT_TOLERANCE,
};

fn series_from(closes: &[f64]) -> Vec<PricePoint<u32>> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(i as u32, close))
        .collect()
}

fn flat_ema(len: usize, value: f64) -> Vec<EmaPoint<u32>> {
    (0..len).map(|i| EmaPoint::new(i as u32, value)).collect()
}

/// Deterministic zig-zag with swings wide enough to cross a 5% band.
fn create_oscillating_series(count: usize) -> Vec<PricePoint<u32>> {
    (0..count)
        .map(|i| {
            let phase = (i % 40) as f64 / 40.0;
            let swing = if phase < 0.5 { phase } else { 1.0 - phase };
            PricePoint::new(i as u32, 80.0 + swing * 80.0 + (i as f64 * 0.05))
        })
        .collect()
}

#[test]
fn test_band_crossing_scenario() {
    let series = series_from(&[90.0, 100.0, 110.0, 100.0, 90.0]);
    let ema = flat_ema(5, 100.0);

    let signals = detect_crossovers(&series, &ema, 0.05).unwrap();
    assert_eq!(
        signals,
        vec![
            SignalEvent::new(2, SignalDirection::Bullish, 110.0),
            SignalEvent::new(4, SignalDirection::Bearish, 90.0),
        ]
    );
}

#[test]
fn test_first_confirmed_state_does_not_signal() {
    let series = series_from(&[120.0, 121.0, 122.0]);
    let ema = flat_ema(3, 100.0);
    assert!(detect_crossovers(&series, &ema, 0.05).unwrap().is_empty());
}

#[test]
fn test_closes_inside_band_never_signal() {
    let series = series_from(&[96.0, 104.0, 100.0, 95.5, 104.9, 99.0]);
    let ema = flat_ema(6, 100.0);
    let report = detect_crossovers_report(&series, &ema, 0.05).unwrap();
    assert!(report.signals.is_empty());
    assert_eq!(report.evaluated, 6);
    assert_eq!(report.skipped, 0);
}

#[test]
fn test_hysteresis_suppresses_chatter() {
    // Confirmed above, then repeated returns into the band: nothing new.
    let series = series_from(&[90.0, 110.0, 104.0, 106.0, 101.0, 107.0, 96.0, 94.0]);
    let ema = flat_ema(series.len(), 100.0);

    let signals = detect_crossovers(&series, &ema, 0.05).unwrap();
    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0].direction, SignalDirection::Bullish);
    assert_eq!(signals[0].time, 1);
    assert_eq!(signals[1].direction, SignalDirection::Bearish);
    assert_eq!(signals[1].time, 7);
}

#[test]
fn test_naive_two_state_comparison_would_differ() {
    // Around the EMA but inside the band: a plain above/below comparison
    // would flip every point; the band keeps it quiet.
    let series = series_from(&[90.0, 101.0, 99.0, 101.0, 99.0]);
    let ema = flat_ema(series.len(), 100.0);
    assert!(detect_crossovers(&series, &ema, 0.05).unwrap().is_empty());
}

#[test]
fn test_zero_tolerance_uses_ema_as_band() {
    let series = series_from(&[99.0, 100.0, 101.0, 100.0, 99.0]);
    let ema = flat_ema(series.len(), 100.0);
    let signals = detect_crossovers(&series, &ema, 0.0).unwrap();
    assert_eq!(
        signals,
        vec![
            SignalEvent::new(2, SignalDirection::Bullish, 101.0),
            SignalEvent::new(4, SignalDirection::Bearish, 99.0),
        ]
    );
}

#[test]
fn test_points_without_ema_are_skipped() {
    // EMA only for t1, t2 and t4: t0 and t3 keep the state untouched.
    let series = series_from(&[50.0, 90.0, 110.0, 80.0, 120.0]);
    let ema = vec![
        EmaPoint::new(1, 100.0),
        EmaPoint::new(2, 100.0),
        EmaPoint::new(4, 100.0),
    ];

    let report = detect_crossovers_report(&series, &ema, 0.05).unwrap();
    assert_eq!(report.evaluated, 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(
        report.signals,
        vec![SignalEvent::new(2, SignalDirection::Bullish, 110.0)]
    );
}

#[test]
fn test_misaligned_timestamps_produce_nothing() {
    let series = series_from(&[90.0, 110.0, 90.0]);
    let ema: Vec<EmaPoint<u32>> = (10..13).map(|t| EmaPoint::new(t, 100.0)).collect();
    let report = detect_crossovers_report(&series, &ema, 0.05).unwrap();
    assert!(report.signals.is_empty());
    assert_eq!(report.skipped, 3);
}

#[test]
fn test_empty_inputs() {
    let series: Vec<PricePoint<u32>> = Vec::new();
    let ema: Vec<EmaPoint<u32>> = Vec::new();
    assert!(detect_crossovers(&series, &ema, DEFAULT_TOLERANCE)
        .unwrap()
        .is_empty());

    let single = series_from(&[10.0]);
    assert!(detect_crossovers(&single, &ema, DEFAULT_TOLERANCE)
        .unwrap()
        .is_empty());
}

#[test]
fn test_negative_tolerance_rejected() {
    let series = series_from(&[1.0, 2.0]);
    let ema = flat_ema(2, 1.5);

    let err = detect_crossovers(&series, &ema, -0.1).unwrap_err();
    assert!(matches!(
        err,
        IndicatorError::InvalidParameter {
            param: "tolerance",
            ..
        }
    ));
    assert!(detect_crossovers_linear(&series, &ema, -0.1).is_err());
    assert!(detect_crossovers(&series, &ema, f64::NAN).is_err());
}

#[test]
fn test_merge_lookup_matches_linear_scan() {
    let series = create_oscillating_series(400);
    for period in [5, 20, 50] {
        for tolerance in [0.0, 0.02, 0.05, 0.1] {
            let ema = compute_ema(&series, period).unwrap();
            let merged = detect_crossovers(&series, &ema, tolerance).unwrap();
            let linear = detect_crossovers_linear(&series, &ema, tolerance).unwrap();
            assert_eq!(merged, linear, "period {} tolerance {}", period, tolerance);
        }
    }
}

#[test]
fn test_signals_alternate_and_are_time_ordered() {
    let series = create_oscillating_series(400);
    let ema = compute_ema(&series, 10).unwrap();
    let signals = detect_crossovers(&series, &ema, 0.05).unwrap();

    assert!(!signals.is_empty());
    for pair in signals.windows(2) {
        assert!(pair[0].time < pair[1].time);
        assert_ne!(pair[0].direction, pair[1].direction);
    }
}

#[test]
fn test_signal_serializes_with_type_field() {
    let signal = SignalEvent::new(3u32, SignalDirection::Bearish, 90.0);
    let value = serde_json::to_value(&signal).unwrap();
    assert_eq!(value["type"], "bearish");
    assert_eq!(value["time"], 3);
    assert_eq!(value["price"], 90.0);
}
