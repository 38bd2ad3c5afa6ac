use super::domain::{Certificate, CertificateId, LearnerRecord, UserId};

/// Storage abstraction so the service can be exercised against any backend.
///
/// `update` runs the closure while the record is held exclusively, which keeps concurrent
/// progress events for the same learner from overwriting each other.
pub trait LearnerRepository: Send + Sync {
    /// Stores a new learner. Fails with `Conflict` when the id or the email is already taken.
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<LearnerRecord>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<LearnerRecord>, RepositoryError>;
    fn update<T, F>(&self, id: &UserId, apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut LearnerRecord) -> T;
    fn find_certificate(&self, id: &CertificateId)
        -> Result<Option<Certificate>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
