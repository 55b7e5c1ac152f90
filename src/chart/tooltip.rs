use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::payload::{epoch_seconds, format_time, ChartPayload, LinePoint};

/// Values shown when hovering the chart at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub time: i64,
    pub ema_period: usize,
    pub price: Option<f64>,
    pub ema: Option<f64>,
    pub buy: Option<f64>,
    pub sell: Option<f64>,
}

fn value_at(points: &[LinePoint], time: i64) -> Option<f64> {
    points
        .binary_search_by_key(&time, |p| p.time)
        .ok()
        .map(|i| points[i].value)
}

impl ChartPayload {
    /// Tooltip for `time`, or `None` when no series has a point there.
    pub fn tooltip_at(&self, time: i64) -> Option<Tooltip> {
        let tooltip = Tooltip {
            time,
            ema_period: self.ema_period,
            price: value_at(&self.prices, time),
            ema: value_at(&self.ema, time),
            buy: value_at(&self.buy_markers, time),
            sell: value_at(&self.sell_markers, time),
        };

        if tooltip.price.is_none()
            && tooltip.ema.is_none()
            && tooltip.buy.is_none()
            && tooltip.sell.is_none()
        {
            return None;
        }
        Some(tooltip)
    }

    /// Time of the first price point on `date`, for intraday series where
    /// no bar sits at midnight.
    pub fn first_time_on(&self, date: NaiveDate) -> Option<i64> {
        let start = epoch_seconds(&date.and_time(NaiveTime::MIN));
        let index = self.prices.partition_point(|p| p.time < start);
        self.prices
            .get(index)
            .map(|p| p.time)
            .filter(|&time| time < start + 86_400)
    }
}

impl Tooltip {
    /// Date line followed by one line per available value, dollars to two
    /// decimals.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format_time(self.time)];
        if let Some(price) = self.price {
            lines.push(format!("Price: ${:.2}", price));
        }
        if let Some(ema) = self.ema {
            lines.push(format!("EMA {}: ${:.2}", self.ema_period, ema));
        }
        if let Some(buy) = self.buy {
            lines.push(format!("BUY Signal: ${:.2}", buy));
        }
        if let Some(sell) = self.sell {
            lines.push(format!("SELL Signal: ${:.2}", sell));
        }
        lines
    }
}
