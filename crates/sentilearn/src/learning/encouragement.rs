use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::domain::ProgressEvent;

const SUCCESS: [&str; 4] = [
    "Awesome job! You're getting really good at this!",
    "Fantastic! You understood that perfectly!",
    "Amazing work! You're becoming a sentiment expert!",
    "Great thinking! That was spot on!",
];

const PROGRESS: [&str; 4] = [
    "You're doing great! Keep going!",
    "Nice work! You're learning so much!",
    "Excellent progress! Keep it up!",
    "You're on the right track!",
];

const COMPLETION: [&str; 4] = [
    "Wow! You completed everything! You're a sentiment analysis superstar!",
    "Incredible! You've mastered sentiment analysis!",
    "Outstanding! You should be proud of yourself!",
    "Amazing achievement! You're ready to teach others!",
];

const EFFORT: [&str; 4] = [
    "Great effort! Learning is all about trying!",
    "Nice try! You're getting better with each attempt!",
    "Good work! Every mistake helps you learn!",
    "Keep going! You're doing your best and that's what matters!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncouragementKind {
    Success,
    Progress,
    Completion,
    Effort,
}

impl EncouragementKind {
    pub fn messages(&self) -> &'static [&'static str] {
        match self {
            EncouragementKind::Success => &SUCCESS,
            EncouragementKind::Progress => &PROGRESS,
            EncouragementKind::Completion => &COMPLETION,
            EncouragementKind::Effort => &EFFORT,
        }
    }

    /// Scored activities at or above `success_threshold` percent count as a success.
    pub fn for_event(event: &ProgressEvent, success_threshold: u32) -> Self {
        let threshold = f64::from(success_threshold);
        match event {
            ProgressEvent::GameCompleted(result) if result.percentage >= threshold => Self::Success,
            ProgressEvent::QuizCompleted(result) if result.percentage >= threshold => Self::Success,
            ProgressEvent::GameCompleted(_) | ProgressEvent::QuizCompleted(_) => Self::Effort,
            ProgressEvent::ModuleCompleted { .. } | ProgressEvent::Unrecognized(_) => {
                Self::Progress
            }
        }
    }
}

/// Picks flavor messages uniformly at random. Seed it to make picks reproducible.
#[derive(Debug)]
pub struct Encourager {
    rng: Mutex<StdRng>,
}

impl Encourager {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn pick(&self, kind: EncouragementKind) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        kind.messages()
            .choose(&mut *rng)
            .copied()
            .unwrap_or_default()
    }
}

impl Default for Encourager {
    fn default() -> Self {
        Self::from_entropy()
    }
}
