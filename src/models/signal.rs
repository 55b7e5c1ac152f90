use serde::{Deserialize, Serialize};

use super::indicators::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Bullish => "bullish",
            SignalDirection::Bearish => "bearish",
        }
    }

    /// Action label shown next to a signal (`BUY` / `SELL`).
    pub fn action(&self) -> &'static str {
        match self {
            SignalDirection::Bullish => "BUY",
            SignalDirection::Bearish => "SELL",
        }
    }
}

/// A confirmed crossing of the tolerance band around the EMA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent<T = Timestamp> {
    pub time: T,
    #[serde(rename = "type")]
    pub direction: SignalDirection,
    pub price: f64,
}

impl<T> SignalEvent<T> {
    pub fn new(time: T, direction: SignalDirection, price: f64) -> Self {
        Self {
            time,
            direction,
            price,
        }
    }

    pub fn map_time<U, F>(self, f: F) -> SignalEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        SignalEvent {
            time: f(self.time),
            direction: self.direction,
            price: self.price,
        }
    }
}

/// Side of the band a price was last confirmed on. Lives only for the
/// duration of one detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverState {
    Above,
    Below,
    #[default]
    Neutral,
}
