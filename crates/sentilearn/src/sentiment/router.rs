use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::samples::sample_texts;
use super::{AnalyzeRequest, SentimentAnalyzer, SentimentResult};
use crate::error::AppError;
use crate::request::json_or_default;

/// Router exposing the sentiment demo endpoints.
pub fn sentiment_router(analyzer: Arc<SentimentAnalyzer>) -> Router {
    Router::new()
        .route("/api/sentiment/analyze", post(analyze_handler))
        .route("/api/sentiment/examples", get(examples_handler))
        .with_state(analyzer)
}

pub(crate) async fn analyze_handler(
    State(analyzer): State<Arc<SentimentAnalyzer>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<SentimentResult>, AppError> {
    let request: AnalyzeRequest = json_or_default(body);
    let (text, approach) = request.validate()?;
    let result = analyzer.analyze(text, approach)?;
    Ok(Json(result))
}

pub(crate) async fn examples_handler() -> Response {
    (StatusCode::OK, Json(json!({ "examples": sample_texts() }))).into_response()
}
