use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::config::LearningConfig;
use super::dashboard::{dashboard_stats, recent_activity, DashboardView};
use super::domain::{
    Certificate, CertificateId, LearnerRecord, ProgressEvent, User, UserId, UserProgress,
};
use super::eligibility::{is_eligible, issue_certificate, IneligibleError};
use super::encouragement::{EncouragementKind, Encourager};
use super::progress::apply_event;
use super::repository::{LearnerRepository, RepositoryError};
use super::validation::{NewUser, ValidationError};

/// Service composing the learner repository, progress rules, and encouragement picker.
pub struct LearningService<R> {
    repository: Arc<R>,
    config: LearningConfig,
    encourager: Encourager,
}

/// Outcome of a registration request. `created` is false when the email was already known.
#[derive(Debug, Clone)]
pub struct UserRegistration {
    pub record: LearnerRecord,
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressReceipt {
    pub progress: UserProgress,
    pub points_awarded: u32,
    pub encouragement: &'static str,
    pub eligible: bool,
}

#[derive(Debug, Clone)]
pub struct CertificateReceipt {
    pub certificate: Certificate,
    pub encouragement: &'static str,
}

impl<R> LearningService<R>
where
    R: LearnerRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: LearningConfig) -> Self {
        Self::with_encourager(repository, config, Encourager::from_entropy())
    }

    pub fn with_encourager(
        repository: Arc<R>,
        config: LearningConfig,
        encourager: Encourager,
    ) -> Self {
        Self {
            repository,
            config,
            encourager,
        }
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Register a learner, or hand back the existing record when the email is already known.
    pub fn create_user(&self, new_user: NewUser) -> Result<UserRegistration, LearningError> {
        if let Some(record) = self.repository.find_by_email(&new_user.email)? {
            return Ok(UserRegistration {
                record,
                created: false,
            });
        }

        let user = User {
            id: UserId::generate(),
            name: new_user.name,
            email: new_user.email.clone(),
            created_at: Utc::now(),
        };

        match self.repository.insert(LearnerRecord::new(user)) {
            Ok(record) => {
                info!(user_id = %record.user.id, "registered learner");
                Ok(UserRegistration {
                    record,
                    created: true,
                })
            }
            // Lost a race with a concurrent registration for the same email.
            Err(RepositoryError::Conflict) => {
                let record = self
                    .repository
                    .find_by_email(&new_user.email)?
                    .ok_or(RepositoryError::Conflict)?;
                Ok(UserRegistration {
                    record,
                    created: false,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Apply one progress event atomically and report the points it earned.
    pub fn record_progress(
        &self,
        user_id: &UserId,
        event: ProgressEvent,
    ) -> Result<ProgressReceipt, LearningError> {
        let now = Utc::now();
        let (progress, points_awarded) = self
            .repository
            .update(user_id, |record| {
                let next = apply_event(&record.progress, &event, &self.config.points, now);
                let awarded = next.total_score - record.progress.total_score;
                record.progress = next;
                (record.progress.clone(), awarded)
            })
            .map_err(|err| missing_user(user_id, err))?;

        info!(
            user_id = %user_id,
            event = event.kind(),
            points = points_awarded,
            total_score = progress.total_score,
            "recorded progress"
        );

        let kind = EncouragementKind::for_event(&event, self.config.requirements.min_average_score);
        Ok(ProgressReceipt {
            eligible: is_eligible(&progress, &self.config.requirements),
            encouragement: self.encourager.pick(kind),
            progress,
            points_awarded,
        })
    }

    pub fn progress(&self, user_id: &UserId) -> Result<LearnerRecord, LearningError> {
        self.repository
            .fetch(user_id)?
            .ok_or_else(|| LearningError::UserNotFound(user_id.clone()))
    }

    /// Issue a certificate when the learner meets every requirement at the moment of issuance.
    pub fn generate_certificate(
        &self,
        user_id: &UserId,
    ) -> Result<CertificateReceipt, LearningError> {
        let now = Utc::now();
        let certificate = self
            .repository
            .update(user_id, |record| {
                let certificate =
                    issue_certificate(&record.user, &mut record.progress, &self.config, now)?;
                record.certificates.push(certificate.clone());
                Ok::<_, IneligibleError>(certificate)
            })
            .map_err(|err| missing_user(user_id, err))??;

        info!(
            user_id = %user_id,
            certificate_id = %certificate.id,
            score = certificate.score,
            "issued certificate"
        );

        Ok(CertificateReceipt {
            certificate,
            encouragement: self.encourager.pick(EncouragementKind::Completion),
        })
    }

    pub fn certificate(&self, id: &CertificateId) -> Result<Certificate, LearningError> {
        self.repository
            .find_certificate(id)?
            .ok_or_else(|| LearningError::CertificateNotFound(id.clone()))
    }

    pub fn dashboard(&self, user_id: &UserId) -> Result<DashboardView, LearningError> {
        let record = self.progress(user_id)?;
        let stats = dashboard_stats(&record.progress, &record.certificates, &self.config);
        let recent_activity = recent_activity(&record.progress);

        Ok(DashboardView {
            user: record.user,
            stats,
            recent_activity,
            certificates: record.certificates,
            progress: record.progress,
        })
    }
}

fn missing_user(user_id: &UserId, err: RepositoryError) -> LearningError {
    match err {
        RepositoryError::NotFound => LearningError::UserNotFound(user_id.clone()),
        other => other.into(),
    }
}

/// Error raised by the learning service.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User not found")]
    UserNotFound(UserId),
    #[error("Certificate not found")]
    CertificateNotFound(CertificateId),
    #[error(transparent)]
    Ineligible(#[from] IneligibleError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
