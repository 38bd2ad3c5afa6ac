use serde::{Deserialize, Serialize};

/// Thresholds a learner must reach before a certificate is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRequirements {
    pub min_modules: usize,
    pub min_average_score: u32,
    pub min_games_played: usize,
}

/// Points credited to `total_score` per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsPolicy {
    pub module_completion: u32,
    pub game_percentage_divisor: f64,
    pub quiz_percentage_divisor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    pub requirements: CertificateRequirements,
    pub points: PointsPolicy,
    pub total_modules: usize,
    pub course_name: String,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            requirements: CertificateRequirements {
                min_modules: 5,
                min_average_score: 80,
                min_games_played: 2,
            },
            points: PointsPolicy {
                module_completion: 20,
                game_percentage_divisor: 10.0,
                quiz_percentage_divisor: 5.0,
            },
            total_modules: 5,
            course_name: "Sentiment Analysis Mastery".to_string(),
        }
    }
}
