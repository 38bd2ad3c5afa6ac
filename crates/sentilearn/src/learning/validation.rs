//! Structural checks for untrusted request bodies.
//!
//! Bodies are deserialized loosely (every field optional, untyped where clients disagree on the
//! type) and then converted into domain values here, so handlers never see half-valid input.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::domain::{GameResult, ModuleId, ProgressEvent, QuizResult, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name and email are required")]
    MissingUserFields,
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Missing required fields")]
    MissingProgressFields,
    #[error("Valid user ID is required")]
    MissingUserId,
    #[error("Invalid {event} data: {reason}")]
    InvalidEventData { event: String, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
}

/// Registration details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl CreateUserRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            email: Some(Value::String(email.into())),
        }
    }

    /// Both fields must be non-blank strings; anything else counts as missing.
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        let name = non_blank(self.name).ok_or(ValidationError::MissingUserFields)?;
        let email = non_blank(self.email).ok_or(ValidationError::MissingUserFields)?;
        if !looks_like_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(NewUser { name, email })
    }
}

fn non_blank(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(raw)) => Some(raw.trim().to_string()).filter(|value| !value.is_empty()),
        _ => None,
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    matches!(domain.rsplit_once('.'), Some((host, tld)) if !host.is_empty() && !tld.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ProgressUpdateRequest {
    pub fn validate(self) -> Result<(UserId, ProgressEvent), ValidationError> {
        let user_id = required_string(self.user_id.as_ref())
            .map(UserId)
            .ok_or(ValidationError::MissingProgressFields)?;
        let kind = required_string(self.kind.as_ref()).ok_or(ValidationError::MissingProgressFields)?;
        let data = self.data.ok_or(ValidationError::MissingProgressFields)?;

        let event = match kind.as_str() {
            ProgressEvent::MODULE_COMPLETED => ProgressEvent::ModuleCompleted {
                module_id: module_id(&data)?,
            },
            ProgressEvent::GAME_COMPLETED => {
                let result: GameResult = typed_payload(&kind, data)?;
                check_percentage(&kind, result.percentage)?;
                ProgressEvent::GameCompleted(result)
            }
            ProgressEvent::QUIZ_COMPLETED => {
                let result: QuizResult = typed_payload(&kind, data)?;
                check_percentage(&kind, result.percentage)?;
                ProgressEvent::QuizCompleted(result)
            }
            _ => ProgressEvent::Unrecognized(kind),
        };

        Ok((user_id, event))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
}

impl CertificateRequest {
    pub fn validate(self) -> Result<UserId, ValidationError> {
        required_string(self.user_id.as_ref())
            .map(UserId)
            .ok_or(ValidationError::MissingUserId)
    }
}

fn required_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(raw)) if !raw.trim().is_empty() => Some(raw.clone()),
        _ => None,
    }
}

/// Lesson pages send module ids as either strings or numbers.
fn module_id(data: &Value) -> Result<ModuleId, ValidationError> {
    match data.get("moduleId") {
        Some(Value::String(raw)) if !raw.trim().is_empty() => Ok(ModuleId(raw.clone())),
        Some(Value::Number(number)) => Ok(ModuleId(number.to_string())),
        _ => Err(ValidationError::InvalidEventData {
            event: ProgressEvent::MODULE_COMPLETED.to_string(),
            reason: "moduleId must be a string or number".to_string(),
        }),
    }
}

fn typed_payload<T: DeserializeOwned>(kind: &str, data: Value) -> Result<T, ValidationError> {
    serde_json::from_value(data).map_err(|err| ValidationError::InvalidEventData {
        event: kind.to_string(),
        reason: err.to_string(),
    })
}

fn check_percentage(kind: &str, percentage: f64) -> Result<(), ValidationError> {
    if percentage.is_finite() && (0.0..=100.0).contains(&percentage) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEventData {
            event: kind.to_string(),
            reason: format!("percentage must be between 0 and 100, got {percentage}"),
        })
    }
}
