//! Tracing subscriber setup.
//!
//! Production emits JSON lines for log aggregation; every other environment
//! gets ANSI-coloured human output. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,trendband=debug,tower_http=info";

/// Initialize logging; `production` selects JSON output
/// (see `Config::is_production`).
pub fn init_logging(production: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init: tests and the CLI may both end up here more than once
    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if production {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}
