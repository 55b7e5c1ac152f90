//! EMA (Exponential Moving Average) indicator

use crate::indicators::IndicatorError;
use crate::models::indicators::{EmaPoint, PricePoint};

/// Smoothing factor `k = 2 / (period + 1)`.
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Compute the EMA series for `period` over a time-ordered price series.
///
/// The first value is the simple average of the first `period` closes and is
/// stamped with the time of the `period`-th point; each later point applies
/// `ema = (close - ema) * k + ema`. The result has `len - period + 1`
/// entries, or none when the series is shorter than `period`.
///
/// Closes are not validated: negative or non-finite input propagates through
/// the arithmetic unchanged.
pub fn compute_ema<T: Clone>(
    series: &[PricePoint<T>],
    period: usize,
) -> Result<Vec<EmaPoint<T>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::invalid_parameter(
            "period",
            "EMA period must be at least 1",
        ));
    }
    if series.len() < period {
        return Ok(Vec::new());
    }

    let k = ema_multiplier(period);
    let (window, rest) = series.split_at(period);
    let seed = window.iter().map(|p| p.close).sum::<f64>() / period as f64;

    let mut ema = Vec::with_capacity(series.len() - period + 1);
    ema.push(EmaPoint::new(window[period - 1].time.clone(), seed));

    let mut value = seed;
    for point in rest {
        value = (point.close - value) * k + value;
        ema.push(EmaPoint::new(point.time.clone(), value));
    }

    Ok(ema)
}
