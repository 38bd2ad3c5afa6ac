use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::certificate::render_certificate_html;
use super::domain::{CertificateId, UserId};
use super::repository::LearnerRepository;
use super::service::{LearningError, LearningService};
use super::validation::{CertificateRequest, CreateUserRequest, ProgressUpdateRequest};
use crate::request::json_or_default;

/// Router builder exposing learner registration, progress, certificate, and dashboard endpoints.
pub fn learning_router<R>(service: Arc<LearningService<R>>) -> Router
where
    R: LearnerRepository + 'static,
{
    Router::new()
        .route("/api/users/create", post(create_user_handler::<R>))
        .route("/api/progress/update", post(update_progress_handler::<R>))
        .route("/api/progress/:user_id", get(progress_handler::<R>))
        .route(
            "/api/certificates/generate",
            post(generate_certificate_handler::<R>),
        )
        .route(
            "/api/certificates/:certificate_id/download",
            get(download_certificate_handler::<R>),
        )
        .route("/api/dashboard/:user_id", get(dashboard_handler::<R>))
        .with_state(service)
}

pub(crate) async fn create_user_handler<R>(
    State(service): State<Arc<LearningService<R>>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Response
where
    R: LearnerRepository + 'static,
{
    let outcome = json_or_default::<CreateUserRequest>(body)
        .validate()
        .map_err(LearningError::from)
        .and_then(|new_user| service.create_user(new_user));

    match outcome {
        Ok(registration) => {
            let message = if registration.created {
                "User created successfully"
            } else {
                "User already exists"
            };
            let payload = json!({
                "userId": registration.record.user.id,
                "user": registration.record.user,
                "message": message,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err, "Failed to create user"),
    }
}

pub(crate) async fn update_progress_handler<R>(
    State(service): State<Arc<LearningService<R>>>,
    body: Result<Json<ProgressUpdateRequest>, JsonRejection>,
) -> Response
where
    R: LearnerRepository + 'static,
{
    let outcome = json_or_default::<ProgressUpdateRequest>(body)
        .validate()
        .map_err(LearningError::from)
        .and_then(|(user_id, event)| service.record_progress(&user_id, event));

    match outcome {
        Ok(receipt) => {
            let payload = json!({
                "success": true,
                "progress": receipt.progress,
                "message": "Progress updated successfully",
                "pointsAwarded": receipt.points_awarded,
                "encouragement": receipt.encouragement,
                "certificateEligible": receipt.eligible,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err, "Failed to update progress"),
    }
}

pub(crate) async fn progress_handler<R>(
    State(service): State<Arc<LearningService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: LearnerRepository + 'static,
{
    match service.progress(&UserId(user_id)) {
        Ok(record) => {
            let payload = json!({
                "user": record.user,
                "progress": record.progress,
                "certificates": record.certificates,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(LearningError::UserNotFound(_)) => {
            let payload = json!({ "error": "User progress not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => error_response(err, "Failed to fetch progress"),
    }
}

pub(crate) async fn generate_certificate_handler<R>(
    State(service): State<Arc<LearningService<R>>>,
    body: Result<Json<CertificateRequest>, JsonRejection>,
) -> Response
where
    R: LearnerRepository + 'static,
{
    let outcome = json_or_default::<CertificateRequest>(body)
        .validate()
        .map_err(LearningError::from)
        .and_then(|user_id| service.generate_certificate(&user_id));

    match outcome {
        Ok(receipt) => {
            let payload = json!({
                "success": true,
                "certificate": receipt.certificate,
                "message": "Certificate generated successfully!",
                "encouragement": receipt.encouragement,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err, "Failed to generate certificate"),
    }
}

pub(crate) async fn download_certificate_handler<R>(
    State(service): State<Arc<LearningService<R>>>,
    Path(certificate_id): Path<String>,
) -> Response
where
    R: LearnerRepository + 'static,
{
    match service.certificate(&CertificateId(certificate_id)) {
        Ok(certificate) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            render_certificate_html(&certificate),
        )
            .into_response(),
        Err(err) => error_response(err, "Failed to download certificate"),
    }
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<LearningService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: LearnerRepository + 'static,
{
    match service.dashboard(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err, "Failed to fetch dashboard data"),
    }
}

/// Maps service failures onto status codes. Repository failures stay opaque to clients.
fn error_response(err: LearningError, failure: &str) -> Response {
    match err {
        LearningError::Validation(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        LearningError::Ineligible(error) => {
            let payload = json!({
                "error": error.to_string(),
                "requirements": error.requirements,
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        LearningError::UserNotFound(_) | LearningError::CertificateNotFound(_) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        LearningError::Repository(error) => {
            error!(error = %error, "{failure}");
            let payload = json!({ "error": failure });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
