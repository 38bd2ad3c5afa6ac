use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::config::{CertificateRequirements, LearningConfig};
use super::domain::{Certificate, CertificateId, User, UserProgress};

/// Rounded mean of every game and quiz percentage, 0 when nothing has been scored.
pub fn average_score(progress: &UserProgress) -> u32 {
    rounded_mean(progress.all_percentages())
}

/// Rounded mean of game percentages only.
pub fn average_game_score(progress: &UserProgress) -> u32 {
    rounded_mean(progress.games_played.iter().map(|game| game.percentage))
}

fn rounded_mean(values: impl Iterator<Item = f64>) -> u32 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return 0;
    }
    (sum / count as f64).round().max(0.0) as u32
}

pub fn is_eligible(progress: &UserProgress, requirements: &CertificateRequirements) -> bool {
    EligibilityGap::of(progress, requirements).is_met()
}

/// Current values next to the required ones, so clients can render progress towards the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityGap {
    pub modules_required: usize,
    pub modules_completed: usize,
    pub games_required: usize,
    pub games_played: usize,
    pub average_score_required: u32,
    pub average_score: u32,
}

impl EligibilityGap {
    pub fn of(progress: &UserProgress, requirements: &CertificateRequirements) -> Self {
        Self {
            modules_required: requirements.min_modules,
            modules_completed: progress.modules_completed.len(),
            games_required: requirements.min_games_played,
            games_played: progress.games_played.len(),
            average_score_required: requirements.min_average_score,
            average_score: average_score(progress),
        }
    }

    pub fn is_met(&self) -> bool {
        self.modules_completed >= self.modules_required
            && self.average_score >= self.average_score_required
            && self.games_played >= self.games_required
    }
}

/// Raised when a certificate is requested before the thresholds are met.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("User not eligible for certificate")]
pub struct IneligibleError {
    pub requirements: EligibilityGap,
}

/// Re-checks eligibility, then issues a certificate and records it on the progress.
///
/// Every successful call issues a fresh certificate; repeated requests are not collapsed.
pub fn issue_certificate(
    user: &User,
    progress: &mut UserProgress,
    config: &LearningConfig,
    now: DateTime<Utc>,
) -> Result<Certificate, IneligibleError> {
    let gap = EligibilityGap::of(progress, &config.requirements);
    if !gap.is_met() {
        return Err(IneligibleError { requirements: gap });
    }

    let id = CertificateId::generate();
    let certificate = Certificate {
        certificate_url: format!("/api/certificates/{id}/download"),
        id: id.clone(),
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        course_name: config.course_name.clone(),
        issue_date: now,
        score: gap.average_score,
        modules: gap.modules_completed,
        games: gap.games_played,
    };

    progress.certificates_earned.push(id);
    Ok(certificate)
}

/// The first requirement the learner still has to meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextMilestone {
    CompleteModules(usize),
    PlayGames(usize),
    ImproveAverage { target: u32, current: u32 },
    ReadyForCertificate,
}

impl fmt::Display for NextMilestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextMilestone::CompleteModules(count) => write!(f, "Complete {count} more modules"),
            NextMilestone::PlayGames(count) => write!(f, "Play {count} more games"),
            NextMilestone::ImproveAverage { target, current } => {
                write!(f, "Improve average score to {target}% (current: {current}%)")
            }
            NextMilestone::ReadyForCertificate => f.write_str("Ready for certificate!"),
        }
    }
}

impl Serialize for NextMilestone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn next_milestone(
    progress: &UserProgress,
    requirements: &CertificateRequirements,
) -> NextMilestone {
    let modules = progress.modules_completed.len();
    if modules < requirements.min_modules {
        return NextMilestone::CompleteModules(requirements.min_modules - modules);
    }

    let games = progress.games_played.len();
    if games < requirements.min_games_played {
        return NextMilestone::PlayGames(requirements.min_games_played - games);
    }

    let current = average_score(progress);
    if current < requirements.min_average_score {
        return NextMilestone::ImproveAverage {
            target: requirements.min_average_score,
            current,
        };
    }

    NextMilestone::ReadyForCertificate
}
