//! Unit tests for environment configuration

use std::collections::HashMap;
use trendband::config::{Config, DEFAULT_BASE_URL, DEFAULT_EMA_PERIOD};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = Config::from_lookup(lookup(&[]));
    assert_eq!(config, Config::default());
    assert_eq!(config.port, 8080);
    assert_eq!(config.default_symbol, "TQQQ");
    assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.provider.interval, "1day");
    assert_eq!(config.provider.output_size, 5000);
    assert_eq!(config.analysis.ema_period, DEFAULT_EMA_PERIOD);
    assert!(!config.is_production());
}

#[test]
fn test_config_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("ENVIRONMENT", "production"),
        ("PORT", "9090"),
        ("DEFAULT_SYMBOL", "SPY"),
        ("TWELVE_DATA_API_KEY", "secret"),
        ("TWELVE_DATA_BASE_URL", "http://localhost:1234"),
        ("PRICE_INTERVAL", "1week"),
        ("OUTPUT_SIZE", "500"),
        ("EMA_PERIOD", "50"),
        ("CROSSOVER_TOLERANCE", "0.02"),
    ]));

    assert!(config.is_production());
    assert_eq!(config.port, 9090);
    assert_eq!(config.default_symbol, "SPY");
    assert_eq!(config.provider.api_key, "secret");
    assert_eq!(config.provider.base_url, "http://localhost:1234");
    assert_eq!(config.provider.interval, "1week");
    assert_eq!(config.provider.output_size, 500);
    assert_eq!(config.analysis.ema_period, 50);
    assert_eq!(config.analysis.tolerance, 0.02);
}

#[test]
fn test_config_invalid_values_fall_back() {
    let config = Config::from_lookup(lookup(&[
        ("PORT", "not-a-port"),
        ("EMA_PERIOD", "-3"),
        ("CROSSOVER_TOLERANCE", ""),
        ("DEFAULT_SYMBOL", "   "),
    ]));
    assert_eq!(config.port, 8080);
    assert_eq!(config.analysis.ema_period, DEFAULT_EMA_PERIOD);
    assert_eq!(config.analysis.tolerance, 0.05);
    assert_eq!(config.default_symbol, "TQQQ");
}
