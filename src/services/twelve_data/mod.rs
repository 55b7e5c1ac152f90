//! Twelve Data quote provider (`/time_series` REST endpoint).

pub mod client;
pub mod messages;

pub use client::TwelveDataClient;
pub use messages::{TimeSeriesMeta, TimeSeriesResponse, TimeSeriesValue};
