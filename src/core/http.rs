//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::QueryRejection, Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::chart::ChartPayload;
use crate::config::{AnalysisSettings, Config};
use crate::metrics::Metrics;
use crate::services::analysis::{AnalysisError, AnalysisService};
use crate::services::twelve_data::TwelveDataClient;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analysis: Arc<AnalysisService>,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": "trendband"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Error body returned by the chart endpoint.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let status = match &err {
            AnalysisError::Indicator(_) => StatusCode::BAD_REQUEST,
            AnalysisError::Provider(e) if e.is_transport() => StatusCode::SERVICE_UNAVAILABLE,
            AnalysisError::Provider(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    period: Option<usize>,
    tolerance: Option<f64>,
}

/// Price line, EMA line and crossover markers for a symbol
async fn get_chart(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<ChartPayload>, ApiError> {
    let Query(params) = query?;
    let defaults = state.analysis.defaults;
    let settings = AnalysisSettings {
        ema_period: params.period.unwrap_or(defaults.ema_period),
        tolerance: params.tolerance.unwrap_or(defaults.tolerance),
    };

    let payload = state
        .analysis
        .chart(&symbol, Some(settings))
        .await
        .map_err(|e| {
            warn!(symbol = %symbol, error = %e, "Chart request failed");
            ApiError::from(e)
        })?;

    Ok(Json(payload))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/chart/{symbol}", get(get_chart))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Build the application state for `config`, backed by the Twelve Data
/// client.
pub fn build_state(config: &Config) -> Result<AppState, prometheus::Error> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(TwelveDataClient::new(&config.provider));
    let analysis = AnalysisService::new(provider, config.provider.output_size, config.analysis)
        .with_metrics(metrics.clone());

    Ok(AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
        analysis: Arc::new(analysis),
    })
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = build_state(&config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Chart endpoint available at http://0.0.0.0:{}/api/chart/{}",
        config.port, config.default_symbol
    );
    axum::serve(listener, app).await?;

    Ok(())
}
