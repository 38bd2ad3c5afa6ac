use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sentilearn::learning::{
    Certificate, CertificateId, CreateUserRequest, Encourager, LearnerRecord, LearnerRepository,
    LearningConfig, LearningError, LearningService, NextMilestone, ProgressUpdateRequest,
    RepositoryError, UserId,
};
use serde_json::json;

#[derive(Default)]
struct VecRepository {
    records: Mutex<Vec<LearnerRecord>>,
}

impl LearnerRepository for VecRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        let taken = records.iter().any(|existing| {
            existing.user.id == record.user.id || existing.user.email == record.user.email
        });
        if taken {
            return Err(RepositoryError::Conflict);
        }
        records.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<LearnerRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.iter().find(|record| &record.user.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<LearnerRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records
            .iter()
            .find(|record| record.user.email == email)
            .cloned())
    }

    fn update<T, F>(&self, id: &UserId, apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut LearnerRecord) -> T,
    {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        let record = records
            .iter_mut()
            .find(|record| &record.user.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(apply(record))
    }

    fn find_certificate(
        &self,
        id: &CertificateId,
    ) -> Result<Option<Certificate>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records
            .iter()
            .flat_map(|record| record.certificates.iter())
            .find(|certificate| &certificate.id == id)
            .cloned())
    }
}

fn service() -> LearningService<VecRepository> {
    LearningService::with_encourager(
        Arc::new(VecRepository::default()),
        LearningConfig::default(),
        Encourager::seeded(3),
    )
}

fn record(service: &LearningService<VecRepository>, body: serde_json::Value) {
    let request: ProgressUpdateRequest = serde_json::from_value(body).expect("request parses");
    let (user_id, event) = request.validate().expect("valid event");
    service
        .record_progress(&user_id, event)
        .expect("progress recorded");
}

#[test]
fn learner_progresses_from_registration_to_certificate() {
    let service = service();
    let request: CreateUserRequest =
        serde_json::from_value(json!({ "name": "Jordan", "email": "jordan@example.org" }))
            .expect("request parses");
    let registration = service
        .create_user(request.validate().expect("valid user"))
        .expect("registers");
    let user_id = registration.record.user.id.clone();

    let mut milestones = HashMap::new();
    for module in 1..=5 {
        record(
            &service,
            json!({ "userId": user_id, "type": "module_completed", "data": { "moduleId": module } }),
        );
    }
    milestones.insert(
        "after modules",
        service.dashboard(&user_id).expect("dashboard").stats.next_milestone,
    );

    record(
        &service,
        json!({
            "userId": user_id,
            "type": "game_completed",
            "data": { "gameType": "emotion-match", "score": 6, "totalQuestions": 10, "percentage": 60 }
        }),
    );
    record(
        &service,
        json!({
            "userId": user_id,
            "type": "game_completed",
            "data": { "gameType": "speed-round", "score": 7, "totalQuestions": 10, "percentage": 70 }
        }),
    );
    milestones.insert(
        "after games",
        service.dashboard(&user_id).expect("dashboard").stats.next_milestone,
    );

    assert!(matches!(
        service.generate_certificate(&user_id),
        Err(LearningError::Ineligible(_))
    ));

    record(
        &service,
        json!({
            "userId": user_id,
            "type": "quiz_completed",
            "data": { "score": 5, "totalQuestions": 5, "percentage": 100 }
        }),
    );
    record(
        &service,
        json!({
            "userId": user_id,
            "type": "quiz_completed",
            "data": { "score": 5, "totalQuestions": 5, "percentage": 100 }
        }),
    );

    assert_eq!(milestones["after modules"], NextMilestone::PlayGames(2));
    assert_eq!(
        milestones["after games"],
        NextMilestone::ImproveAverage {
            target: 80,
            current: 65
        }
    );

    let receipt = service.generate_certificate(&user_id).expect("eligible");
    assert_eq!(receipt.certificate.score, 83);
    assert_eq!(receipt.certificate.modules, 5);
    assert_eq!(receipt.certificate.games, 2);

    let view = service.dashboard(&user_id).expect("dashboard");
    assert_eq!(view.stats.total_score, 100 + 6 + 7 + 20 + 20);
    assert_eq!(view.stats.certificates_earned, 1);
    assert_eq!(view.stats.average_game_score, 65);
    assert_eq!(
        service
            .certificate(&receipt.certificate.id)
            .expect("stored")
            .user_name,
        "Jordan"
    );
}

#[test]
fn unknown_event_types_only_touch_activity_time() {
    let service = service();
    let user_id = service
        .create_user(
            CreateUserRequest::new("Sam", "sam@example.org")
                .validate()
                .expect("valid user"),
        )
        .expect("registers")
        .record
        .user
        .id;

    let before = service.progress(&user_id).expect("progress").progress;
    record(
        &service,
        json!({ "userId": user_id, "type": "video_watched", "data": { "videoId": "intro" } }),
    );
    let after = service.progress(&user_id).expect("progress").progress;

    assert_eq!(after.total_score, before.total_score);
    assert_eq!(after.modules_completed, before.modules_completed);
    assert!(after.last_activity >= before.last_activity);
}
