use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use sentilearn::learning::{learning_router, LearnerRepository, LearningService};
use sentilearn::sentiment::{sentiment_router, SentimentAnalyzer};
use serde_json::json;
use std::sync::Arc;

const DEMO_GREETING: &str = "Hello from the SentiLearn server!";

pub(crate) fn with_application_routes<R>(
    service: Arc<LearningService<R>>,
    analyzer: Arc<SentimentAnalyzer>,
) -> axum::Router
where
    R: LearnerRepository + 'static,
{
    learning_router(service)
        .merge(sentiment_router(analyzer))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/ping", axum::routing::get(ping_endpoint))
        .route("/api/demo", axum::routing::get(demo_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn ping_endpoint(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "message": &*state.ping_message }))
}

pub(crate) async fn demo_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "message": DEMO_GREETING }))
}
