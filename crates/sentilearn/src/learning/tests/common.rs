use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::learning::domain::{
    Certificate, CertificateId, GameResult, LearnerRecord, ModuleId, ProgressEvent, QuizResult,
    UserId,
};
use crate::learning::repository::{LearnerRepository, RepositoryError};
use crate::learning::validation::NewUser;
use crate::learning::{learning_router, Encourager, LearningConfig, LearningService};

pub(super) fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub(super) fn module(id: u32) -> ProgressEvent {
    ProgressEvent::ModuleCompleted {
        module_id: ModuleId(id.to_string()),
    }
}

pub(super) fn game(game_type: &str, percentage: f64) -> ProgressEvent {
    ProgressEvent::GameCompleted(GameResult {
        game_type: game_type.to_string(),
        score: (percentage / 10.0) as u32,
        total_questions: 10,
        percentage,
    })
}

pub(super) fn quiz(percentage: f64) -> ProgressEvent {
    ProgressEvent::QuizCompleted(QuizResult {
        score: (percentage / 20.0) as u32,
        total_questions: 5,
        percentage,
    })
}

pub(super) fn build_service() -> (LearningService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LearningService::with_encourager(
        repository.clone(),
        LearningConfig::default(),
        Encourager::seeded(11),
    );
    (service, repository)
}

/// Registers a learner and walks them through every certificate requirement.
pub(super) fn eligible_learner(service: &LearningService<MemoryRepository>) -> UserId {
    let registration = service
        .create_user(new_user("Maya"))
        .expect("registration succeeds");
    let user_id = registration.record.user.id;
    for id in 1..=5 {
        service.record_progress(&user_id, module(id)).expect("module");
    }
    service
        .record_progress(&user_id, game("emotion-match", 90.0))
        .expect("game");
    service
        .record_progress(&user_id, game("speed-round", 80.0))
        .expect("game");
    user_id
}

pub(super) fn learning_router_with_service(
    service: LearningService<MemoryRepository>,
) -> axum::Router {
    learning_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<UserId, LearnerRecord>>>,
}

impl LearnerRepository for MemoryRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let duplicate_email = guard
            .values()
            .any(|existing| existing.user.email == record.user.email);
        if duplicate_email || guard.contains_key(&record.user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.user.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<LearnerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<LearnerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.user.email == email)
            .cloned())
    }

    fn update<T, F>(&self, id: &UserId, apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut LearnerRecord) -> T,
    {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(apply(record))
    }

    fn find_certificate(
        &self,
        id: &CertificateId,
    ) -> Result<Option<Certificate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .flat_map(|record| record.certificates.iter())
            .find(|certificate| &certificate.id == id)
            .cloned())
    }
}

/// Reports a conflict on insert but never finds the competing record.
pub(super) struct ConflictRepository;

impl LearnerRepository for ConflictRepository {
    fn insert(&self, _record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &UserId) -> Result<Option<LearnerRecord>, RepositoryError> {
        Ok(None)
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<LearnerRecord>, RepositoryError> {
        Ok(None)
    }

    fn update<T, F>(&self, _id: &UserId, _apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut LearnerRecord) -> T,
    {
        Err(RepositoryError::NotFound)
    }

    fn find_certificate(
        &self,
        _id: &CertificateId,
    ) -> Result<Option<Certificate>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl LearnerRepository for UnavailableRepository {
    fn insert(&self, _record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &UserId) -> Result<Option<LearnerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<LearnerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update<T, F>(&self, _id: &UserId, _apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut LearnerRecord) -> T,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_certificate(
        &self,
        _id: &CertificateId,
    ) -> Result<Option<Certificate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
