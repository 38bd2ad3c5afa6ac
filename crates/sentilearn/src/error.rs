use crate::config::ConfigError;
use crate::learning::LearningError;
use crate::sentiment::{AnalysisError, LexiconError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Startup, command-line, and analyze endpoint failures.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Lexicon(LexiconError),
    Analysis(AnalysisError),
    Learning(LearningError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Lexicon(err) => write!(f, "lexicon error: {}", err),
            AppError::Analysis(err) => write!(f, "analysis error: {}", err),
            AppError::Learning(err) => write!(f, "learning error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Lexicon(err) => Some(err),
            AppError::Analysis(err) => Some(err),
            AppError::Learning(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Analysis(_) => StatusCode::BAD_REQUEST,
            AppError::Learning(LearningError::Validation(_))
            | AppError::Learning(LearningError::Ineligible(_)) => StatusCode::BAD_REQUEST,
            AppError::Learning(LearningError::UserNotFound(_))
            | AppError::Learning(LearningError::CertificateNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Lexicon(_)
            | AppError::Learning(LearningError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self {
            _ if status.is_server_error() => "internal server error".to_string(),
            AppError::Analysis(err) => err.to_string(),
            AppError::Learning(err) => err.to_string(),
            other => other.to_string(),
        };
        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LexiconError> for AppError {
    fn from(value: LexiconError) -> Self {
        Self::Lexicon(value)
    }
}

impl From<AnalysisError> for AppError {
    fn from(value: AnalysisError) -> Self {
        Self::Analysis(value)
    }
}

impl From<LearningError> for AppError {
    fn from(value: LearningError) -> Self {
        Self::Learning(value)
    }
}
