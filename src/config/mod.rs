//! Environment-driven configuration.
//!
//! Every setting has a default, so the binaries start with an empty
//! environment. `.env` is loaded by the binaries before `Config::from_env`.

use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";
pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_SYMBOL: &str = "TQQQ";
pub const DEFAULT_INTERVAL: &str = "1day";
pub const DEFAULT_OUTPUT_SIZE: usize = 5000;
pub const DEFAULT_EMA_PERIOD: usize = 125;

/// EMA period and tolerance band used for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub ema_period: usize,
    pub tolerance: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            ema_period: DEFAULT_EMA_PERIOD,
            tolerance: crate::signals::DEFAULT_TOLERANCE,
        }
    }
}

/// Quote provider connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub interval: String,
    pub output_size: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            output_size: DEFAULT_OUTPUT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub default_symbol: String,
    pub provider: ProviderConfig,
    pub analysis: AnalysisSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            provider: ProviderConfig::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string_or = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        Self {
            environment: string_or("ENVIRONMENT", defaults.environment),
            port: parse_or(&lookup, "PORT", defaults.port),
            default_symbol: string_or("DEFAULT_SYMBOL", defaults.default_symbol),
            provider: ProviderConfig {
                base_url: string_or("TWELVE_DATA_BASE_URL", defaults.provider.base_url),
                api_key: string_or("TWELVE_DATA_API_KEY", defaults.provider.api_key),
                interval: string_or("PRICE_INTERVAL", defaults.provider.interval),
                output_size: parse_or(&lookup, "OUTPUT_SIZE", defaults.provider.output_size),
            },
            analysis: AnalysisSettings {
                ema_period: parse_or(&lookup, "EMA_PERIOD", defaults.analysis.ema_period),
                tolerance: parse_or(&lookup, "CROSSOVER_TOLERANCE", defaults.analysis.tolerance),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparseable config value, using default");
            default
        }),
        None => default,
    }
}
