use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp type used by the service layer. The indicator functions are
/// generic and accept any ordered key.
pub type Timestamp = NaiveDateTime;

/// One close price at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint<T = Timestamp> {
    pub time: T,
    pub close: f64,
}

impl<T> PricePoint<T> {
    pub fn new(time: T, close: f64) -> Self {
        Self { time, close }
    }
}

/// EMA value aligned to the timestamp of the price point it was computed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaPoint<T = Timestamp> {
    pub time: T,
    pub value: f64,
}

impl<T> EmaPoint<T> {
    pub fn new(time: T, value: f64) -> Self {
        Self { time, value }
    }
}
