use metrics_exporter_prometheus::PrometheusHandle;
use sentilearn::learning::{
    Certificate, CertificateId, LearnerRecord, LearnerRepository, RepositoryError, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) ping_message: Arc<str>,
}

#[derive(Default)]
struct LearnerStore {
    records: HashMap<UserId, LearnerRecord>,
    emails: HashMap<String, UserId>,
}

/// Process-local learner storage. One lock covers the whole store, so every `update`
/// closure runs with exclusive access to its record.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLearnerRepository {
    store: Arc<Mutex<LearnerStore>>,
}

impl InMemoryLearnerRepository {
    fn lock(&self) -> Result<MutexGuard<'_, LearnerStore>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl LearnerRepository for InMemoryLearnerRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.records.contains_key(&record.user.id)
            || guard.emails.contains_key(&record.user.email)
        {
            return Err(RepositoryError::Conflict);
        }
        guard
            .emails
            .insert(record.user.email.clone(), record.user.id.clone());
        guard.records.insert(record.user.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<LearnerRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.records.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<LearnerRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .emails
            .get(email)
            .and_then(|id| guard.records.get(id))
            .cloned())
    }

    fn update<T, F>(&self, id: &UserId, apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut LearnerRecord) -> T,
    {
        let mut guard = self.lock()?;
        let record = guard.records.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(apply(record))
    }

    fn find_certificate(
        &self,
        id: &CertificateId,
    ) -> Result<Option<Certificate>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .records
            .values()
            .flat_map(|record| record.certificates.iter())
            .find(|certificate| &certificate.id == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sentilearn::learning::User;

    fn record(id: &str, email: &str) -> LearnerRecord {
        LearnerRecord::new(User {
            id: UserId(id.to_string()),
            name: "Learner".to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        })
    }

    #[test]
    fn insert_rejects_duplicate_ids_and_emails() {
        let repository = InMemoryLearnerRepository::default();
        repository
            .insert(record("u1", "a@example.com"))
            .expect("first insert");

        assert!(matches!(
            repository.insert(record("u1", "b@example.com")),
            Err(RepositoryError::Conflict)
        ));
        assert!(matches!(
            repository.insert(record("u2", "a@example.com")),
            Err(RepositoryError::Conflict)
        ));

        let found = repository
            .find_by_email("a@example.com")
            .expect("lookup")
            .expect("record present");
        assert_eq!(found.user.id, UserId("u1".to_string()));
    }

    #[test]
    fn update_applies_in_place_and_reports_missing_records() {
        let repository = InMemoryLearnerRepository::default();
        repository
            .insert(record("u1", "a@example.com"))
            .expect("insert");

        let total = repository
            .update(&UserId("u1".to_string()), |record| {
                record.progress.total_score += 20;
                record.progress.total_score
            })
            .expect("update");
        assert_eq!(total, 20);
        assert_eq!(
            repository
                .fetch(&UserId("u1".to_string()))
                .expect("fetch")
                .expect("present")
                .progress
                .total_score,
            20
        );

        assert!(matches!(
            repository.update(&UserId("ghost".to_string()), |_| ()),
            Err(RepositoryError::NotFound)
        ));
    }
}
