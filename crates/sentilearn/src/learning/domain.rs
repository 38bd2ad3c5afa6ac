use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for registered learners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(pub String);

impl CertificateId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Learning module identifier as sent by the lesson pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// One finished game round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_type: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub completed_at: DateTime<Utc>,
}

/// One finished quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub completed_at: DateTime<Utc>,
}

/// Accumulated learner activity. `total_score` only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub modules_completed: Vec<ModuleId>,
    pub games_played: Vec<GameRecord>,
    pub quiz_scores: Vec<QuizRecord>,
    pub total_score: u32,
    pub certificates_earned: Vec<CertificateId>,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl UserProgress {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            modules_completed: Vec::new(),
            games_played: Vec::new(),
            quiz_scores: Vec::new(),
            total_score: 0,
            certificates_earned: Vec::new(),
            started_at: now,
            last_activity: now,
        }
    }

    /// Game percentages followed by quiz percentages.
    pub fn all_percentages(&self) -> impl Iterator<Item = f64> + '_ {
        self.games_played
            .iter()
            .map(|game| game.percentage)
            .chain(self.quiz_scores.iter().map(|quiz| quiz.percentage))
    }
}

/// Validated payload of a `game_completed` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_type: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    pub percentage: f64,
}

/// Validated payload of a `quiz_completed` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    pub percentage: f64,
}

/// Learner activity reported by the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    ModuleCompleted { module_id: ModuleId },
    GameCompleted(GameResult),
    QuizCompleted(QuizResult),
    /// Any other event type. Only refreshes `last_activity`.
    Unrecognized(String),
}

impl ProgressEvent {
    pub const MODULE_COMPLETED: &'static str = "module_completed";
    pub const GAME_COMPLETED: &'static str = "game_completed";
    pub const QUIZ_COMPLETED: &'static str = "quiz_completed";

    pub fn kind(&self) -> &str {
        match self {
            ProgressEvent::ModuleCompleted { .. } => Self::MODULE_COMPLETED,
            ProgressEvent::GameCompleted(_) => Self::GAME_COMPLETED,
            ProgressEvent::QuizCompleted(_) => Self::QUIZ_COMPLETED,
            ProgressEvent::Unrecognized(kind) => kind,
        }
    }
}

/// Issued course certificate. Never modified after issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: CertificateId,
    pub user_id: UserId,
    pub user_name: String,
    pub course_name: String,
    pub issue_date: DateTime<Utc>,
    pub score: u32,
    pub modules: usize,
    pub games: usize,
    pub certificate_url: String,
}

/// Unit of storage: everything the service keeps for a single learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerRecord {
    pub user: User,
    pub progress: UserProgress,
    pub certificates: Vec<Certificate>,
}

impl LearnerRecord {
    pub fn new(user: User) -> Self {
        let progress = UserProgress::new(user.created_at);
        Self {
            user,
            progress,
            certificates: Vec::new(),
        }
    }
}
