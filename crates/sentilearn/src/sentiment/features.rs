use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::lexicon::{Lexicon, WordPattern};

const EXCLAMATION_BONUS: f64 = 0.5;
const CAPS_BONUS: f64 = 0.3;

/// Keyword counts and punctuation signals pulled out of a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentFeatures {
    pub positive_count: f64,
    pub negative_count: f64,
    pub neutral_count: f64,
    pub found_keywords: Vec<String>,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub caps_count: usize,
}

pub(crate) fn extract_features(lexicon: &Lexicon, text: &str) -> SentimentFeatures {
    let lowered = text.to_lowercase();
    let mut found_keywords = Vec::new();

    let mut positive_count = count_matches(&lexicon.positive, &lowered, &mut found_keywords);
    let negative_count = count_matches(&lexicon.negative, &lowered, &mut found_keywords);
    let neutral_count = count_matches(&lexicon.neutral, &lowered, &mut found_keywords);

    // punctuation and caps are read from the original casing
    let exclamation_count = text.matches('!').count();
    let question_count = text.matches('?').count();
    let caps_count = lexicon.caps_runs(text);

    if exclamation_count > 0 {
        positive_count += exclamation_count as f64 * EXCLAMATION_BONUS;
        let suffix = if exclamation_count > 1 { "s" } else { "" };
        found_keywords.push(format!("{exclamation_count} exclamation mark{suffix}"));
    }

    if caps_count > 0 {
        positive_count += caps_count as f64 * CAPS_BONUS;
        found_keywords.push(format!("{caps_count} words in CAPS"));
    }

    let mut seen = HashSet::new();
    found_keywords.retain(|keyword| seen.insert(keyword.clone()));

    SentimentFeatures {
        positive_count,
        negative_count,
        neutral_count,
        found_keywords,
        exclamation_count,
        question_count,
        caps_count,
    }
}

fn count_matches(patterns: &[WordPattern], lowered: &str, found: &mut Vec<String>) -> f64 {
    let mut total = 0usize;
    for pattern in patterns {
        let hits = pattern.occurrences(lowered);
        if hits > 0 {
            total += hits;
            found.push(pattern.word.to_string());
        }
    }
    total as f64
}
