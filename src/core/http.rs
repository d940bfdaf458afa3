//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::core::refresh::{RefreshError, SignalRefresher};
use crate::metrics::Metrics;
use crate::render::{render_empty_page, render_page, RenderOptions};

pub const SERVICE_NAME: &str = "optimist-trader";

#[derive(Clone)]
pub struct AppState {
    pub refresher: Arc<SignalRefresher>,
    pub metrics: Arc<Metrics>,
    pub render: Arc<RenderOptions>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(
        refresher: Arc<SignalRefresher>,
        metrics: Arc<Metrics>,
        render: RenderOptions,
    ) -> Self {
        Self {
            refresher,
            metrics,
            render: Arc::new(render),
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Stock table rendered from the latest snapshot
pub async fn index(State(state): State<AppState>) -> Html<String> {
    match state.refresher.latest().await {
        Some(snapshot) => Html(render_page(&snapshot, &state.render)),
        None => Html(render_empty_page(&state.render)),
    }
}

pub async fn list_signals(State(state): State<AppState>) -> Response {
    match state.refresher.latest().await {
        Some(snapshot) => Json(snapshot.as_ref().clone()).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "no refresh has completed yet" })),
        )
            .into_response(),
    }
}

/// Run a refresh pass immediately
pub async fn trigger_refresh(State(state): State<AppState>) -> Response {
    match state.refresher.refresh().await {
        Ok(snapshot) => Json(snapshot.as_ref().clone()).into_response(),
        Err(RefreshError::AlreadyRunning) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": RefreshError::AlreadyRunning.to_string() })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "manual refresh failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let last_refresh = state
        .refresher
        .latest()
        .await
        .map(|snapshot| snapshot.generated_at.to_rfc3339());

    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "service": SERVICE_NAME,
        "refreshing": state.refresher.is_refreshing(),
        "last_refresh": last_refresh,
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
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
            duration_ms = duration.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/signals", get(list_signals))
        .route("/api/refresh", post(trigger_refresh))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
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

pub async fn start_server(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
