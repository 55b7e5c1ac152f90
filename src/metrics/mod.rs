//! Prometheus metrics for the HTTP surface and the signal pipeline.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::signal::SignalDirection;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub crossover_signals_total: IntCounterVec,
    pub ema_lookup_misses_total: IntCounter,
}

impl Metrics {
    /// Create a metrics set on its own registry, so several instances
    /// (one per test server) never collide.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let crossover_signals_total = IntCounterVec::new(
            Opts::new(
                "crossover_signals_total",
                "Crossover signals emitted, by direction",
            ),
            &["direction"],
        )?;
        let ema_lookup_misses_total = IntCounter::new(
            "ema_lookup_misses_total",
            "Price points past the EMA warm-up window with no EMA value at their timestamp",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(crossover_signals_total.clone()))?;
        registry.register(Box::new(ema_lookup_misses_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            crossover_signals_total,
            ema_lookup_misses_total,
        })
    }

    pub fn record_signal(&self, direction: SignalDirection) {
        self.crossover_signals_total
            .with_label_values(&[direction.as_str()])
            .inc();
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
