use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::LearningConfig;
use super::domain::{Certificate, User, UserProgress};
use super::eligibility::{average_game_score, next_milestone, NextMilestone};

const RECENT_PER_KIND: usize = 3;
const RECENT_LIMIT: usize = 5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_modules: usize,
    pub completed_modules: usize,
    pub total_games: usize,
    pub average_game_score: u32,
    pub total_score: u32,
    pub certificates_earned: usize,
    pub days_active: u32,
    pub completion_percentage: u32,
    pub next_milestone: NextMilestone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Game,
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// Everything the dashboard page renders for one learner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub user: User,
    pub stats: DashboardStats,
    pub recent_activity: Vec<RecentActivity>,
    pub certificates: Vec<Certificate>,
    pub progress: UserProgress,
}

pub fn dashboard_stats(
    progress: &UserProgress,
    certificates: &[Certificate],
    config: &LearningConfig,
) -> DashboardStats {
    let completed_modules = progress.modules_completed.len();
    let completion_percentage = if config.total_modules == 0 {
        0
    } else {
        (completed_modules as f64 / config.total_modules as f64 * 100.0).round() as u32
    };

    DashboardStats {
        total_modules: config.total_modules,
        completed_modules,
        total_games: progress.games_played.len(),
        average_game_score: average_game_score(progress),
        total_score: progress.total_score,
        certificates_earned: certificates.len(),
        days_active: days_active(progress),
        completion_percentage,
        next_milestone: next_milestone(progress, &config.requirements),
    }
}

/// Whole days between the first and the latest activity, rounded up.
pub fn days_active(progress: &UserProgress) -> u32 {
    let elapsed = (progress.last_activity - progress.started_at)
        .num_milliseconds()
        .unsigned_abs();
    (elapsed as f64 / MILLIS_PER_DAY).ceil() as u32
}

/// Latest games and modules, newest first. Modules carry `last_activity` as their date.
pub fn recent_activity(progress: &UserProgress) -> Vec<RecentActivity> {
    let games = tail(&progress.games_played).iter().map(|game| RecentActivity {
        kind: ActivityKind::Game,
        description: format!("Played {} - {}%", game.game_type, game.percentage),
        date: game.completed_at,
    });
    let modules = tail(&progress.modules_completed)
        .iter()
        .map(|module_id| RecentActivity {
            kind: ActivityKind::Module,
            description: format!("Completed Module {module_id}"),
            date: progress.last_activity,
        });

    let mut activities: Vec<RecentActivity> = games.chain(modules).collect();
    activities.sort_by(|a, b| b.date.cmp(&a.date));
    activities.truncate(RECENT_LIMIT);
    activities
}

fn tail<T>(items: &[T]) -> &[T] {
    &items[items.len().saturating_sub(RECENT_PER_KIND)..]
}
