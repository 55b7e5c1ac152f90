//! trendband: EMA trend line and tolerance-band crossover signals for daily
//! price series, plus the provider client and HTTP surface around them.

pub mod chart;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
