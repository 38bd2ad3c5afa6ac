use chrono::{DateTime, Utc};

use super::config::PointsPolicy;
use super::domain::{GameRecord, ProgressEvent, QuizRecord, UserProgress};

/// Returns the progress record after `event`, leaving the input untouched.
pub fn apply_event(
    progress: &UserProgress,
    event: &ProgressEvent,
    points: &PointsPolicy,
    now: DateTime<Utc>,
) -> UserProgress {
    let mut next = progress.clone();
    next.last_activity = now;

    match event {
        ProgressEvent::ModuleCompleted { module_id } => {
            if !next.modules_completed.contains(module_id) {
                next.modules_completed.push(module_id.clone());
                next.total_score += points.module_completion;
            }
        }
        ProgressEvent::GameCompleted(result) => {
            next.games_played.push(GameRecord {
                game_type: result.game_type.clone(),
                score: result.score,
                total_questions: result.total_questions,
                percentage: result.percentage,
                completed_at: now,
            });
            next.total_score += percentage_points(result.percentage, points.game_percentage_divisor);
        }
        ProgressEvent::QuizCompleted(result) => {
            next.quiz_scores.push(QuizRecord {
                score: result.score,
                total_questions: result.total_questions,
                percentage: result.percentage,
                completed_at: now,
            });
            next.total_score += percentage_points(result.percentage, points.quiz_percentage_divisor);
        }
        ProgressEvent::Unrecognized(_) => {}
    }

    next
}

fn percentage_points(percentage: f64, divisor: f64) -> u32 {
    if divisor <= 0.0 || !percentage.is_finite() || percentage <= 0.0 {
        return 0;
    }
    (percentage / divisor).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::config::LearningConfig;
    use crate::learning::domain::{GameResult, ModuleId, QuizResult};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn points() -> PointsPolicy {
        LearningConfig::default().points
    }

    fn module(id: &str) -> ProgressEvent {
        ProgressEvent::ModuleCompleted {
            module_id: ModuleId(id.to_string()),
        }
    }

    #[test]
    fn module_completion_is_idempotent() {
        let progress = UserProgress::new(start());
        let once = apply_event(&progress, &module("intro"), &points(), start());
        let later = start() + Duration::minutes(5);
        let twice = apply_event(&once, &module("intro"), &points(), later);

        assert_eq!(once.total_score, 20);
        assert_eq!(twice.total_score, 20);
        assert_eq!(twice.modules_completed.len(), 1);
        assert_eq!(twice.last_activity, later);
    }

    #[test]
    fn games_accumulate_and_award_tenth_of_percentage() {
        let progress = UserProgress::new(start());
        let game = ProgressEvent::GameCompleted(GameResult {
            game_type: "speed".to_string(),
            score: 8,
            total_questions: 10,
            percentage: 87.5,
        });

        let once = apply_event(&progress, &game, &points(), start());
        let twice = apply_event(&once, &game, &points(), start());

        assert_eq!(once.total_score, 8);
        assert_eq!(twice.total_score, 16);
        assert_eq!(twice.games_played.len(), 2);
        assert_eq!(twice.games_played[0].game_type, "speed");
    }

    #[test]
    fn quizzes_award_fifth_of_percentage() {
        let progress = UserProgress::new(start());
        let quiz = ProgressEvent::QuizCompleted(QuizResult {
            score: 9,
            total_questions: 10,
            percentage: 94.0,
        });

        let next = apply_event(&progress, &quiz, &points(), start());

        assert_eq!(next.total_score, 18);
        assert_eq!(next.quiz_scores.len(), 1);
        assert_eq!(next.quiz_scores[0].percentage, 94.0);
    }

    #[test]
    fn unknown_events_only_touch_last_activity() {
        let progress = UserProgress::new(start());
        let later = start() + Duration::hours(2);
        let next = apply_event(
            &progress,
            &ProgressEvent::Unrecognized("video_watched".to_string()),
            &points(),
            later,
        );

        let mut expected = progress.clone();
        expected.last_activity = later;
        assert_eq!(next, expected);
    }

    #[test]
    fn input_record_is_not_mutated() {
        let progress = UserProgress::new(start());
        let _ = apply_event(&progress, &module("basics"), &points(), start());
        assert!(progress.modules_completed.is_empty());
        assert_eq!(progress.total_score, 0);
    }
}
