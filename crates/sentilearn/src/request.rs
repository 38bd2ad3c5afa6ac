use axum::extract::rejection::JsonRejection;
use axum::Json;
use tracing::debug;

/// Unwraps a JSON request body. A missing, mistyped, or unparseable body becomes the empty
/// request, so field validation decides the client-facing 400.
pub(crate) fn json_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable request body");
            T::default()
        }
    }
}
