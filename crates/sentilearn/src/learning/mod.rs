//! Learner progress tracking, certificate eligibility, and the dashboard read model.
//!
//! Progress rules and eligibility checks are pure functions over [`UserProgress`]; the
//! [`LearningService`] applies them to repository records inside a single atomic update so that
//! concurrent events for one learner never lose writes.

pub mod certificate;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod eligibility;
pub mod encouragement;
pub mod progress;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use certificate::render_certificate_html;
pub use config::{CertificateRequirements, LearningConfig, PointsPolicy};
pub use dashboard::{
    dashboard_stats, recent_activity, ActivityKind, DashboardStats, DashboardView, RecentActivity,
};
pub use domain::{
    Certificate, CertificateId, GameRecord, GameResult, LearnerRecord, ModuleId, ProgressEvent,
    QuizRecord, QuizResult, User, UserId, UserProgress,
};
pub use eligibility::{
    average_score, is_eligible, issue_certificate, next_milestone, EligibilityGap,
    IneligibleError, NextMilestone,
};
pub use encouragement::{EncouragementKind, Encourager};
pub use progress::apply_event;
pub use repository::{LearnerRepository, RepositoryError};
pub use router::learning_router;
pub use service::{
    CertificateReceipt, LearningError, LearningService, ProgressReceipt, UserRegistration,
};
pub use validation::{
    CertificateRequest, CreateUserRequest, NewUser, ProgressUpdateRequest, ValidationError,
};
