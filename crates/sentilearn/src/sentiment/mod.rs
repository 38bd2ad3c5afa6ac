//! Keyword and heuristic sentiment scoring used by the interactive demo.
//!
//! Both modes share the same feature extraction pass: three fixed dictionaries matched on whole
//! words plus punctuation and capitalisation signals. Keyword mode compares the counts directly;
//! advanced mode adjusts the difference for negations, intensifiers and text length.

mod decision;
mod features;
mod lexicon;
pub mod router;
pub mod samples;

pub use features::SentimentFeatures;
pub use lexicon::{Lexicon, LexiconError};
pub use router::sentiment_router;
pub use samples::{sample_texts, SampleText};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use decision::{advanced_score, advanced_verdict, keyword_verdict, Verdict};
use features::extract_features;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// Decision mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisApproach {
    #[default]
    Keyword,
    Advanced,
}

impl AnalysisApproach {
    /// Anything other than `"advanced"` falls back to keyword mode.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("advanced") => Self::Advanced,
            _ => Self::Keyword,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisApproach::Keyword => "keyword",
            AnalysisApproach::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunctuationFeatures {
    pub exclamation_marks: usize,
    pub question_marks: usize,
    pub caps_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub positive_words: f64,
    pub negative_words: f64,
    pub neutral_words: f64,
    pub total_words: usize,
    pub features: PunctuationFeatures,
}

/// Response shown to the learner after an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub confidence: u8,
    pub approach: AnalysisApproach,
    pub keywords: Vec<String>,
    pub explanation: String,
    pub details: AnalysisDetails,
}

/// Input rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Text is required and must be a string")]
    MissingText,
    #[error("Text cannot be empty")]
    EmptyText,
}

/// Scores texts against a compiled [`Lexicon`]. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
}

impl SentimentAnalyzer {
    pub fn new() -> Result<Self, LexiconError> {
        Ok(Self {
            lexicon: Lexicon::compile()?,
        })
    }

    pub fn features(&self, text: &str) -> SentimentFeatures {
        extract_features(&self.lexicon, text)
    }

    pub fn analyze(
        &self,
        text: &str,
        approach: AnalysisApproach,
    ) -> Result<SentimentResult, AnalysisError> {
        if text.is_empty() {
            return Err(AnalysisError::MissingText);
        }
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }

        let features = self.features(text);
        let total_words = self.lexicon.word_count(text);

        let Verdict {
            sentiment,
            confidence,
            explanation,
        } = match approach {
            AnalysisApproach::Keyword => keyword_verdict(&features),
            AnalysisApproach::Advanced => {
                let adjusted = advanced_score(text, total_words, &features);
                advanced_verdict(adjusted, &features)
            }
        };

        debug!(
            approach = approach.label(),
            sentiment = sentiment.label(),
            confidence,
            total_words,
            "sentiment analysed"
        );

        Ok(SentimentResult {
            sentiment,
            confidence,
            approach,
            explanation,
            details: AnalysisDetails {
                positive_words: features.positive_count,
                negative_words: features.negative_count,
                neutral_words: features.neutral_count,
                total_words,
                features: PunctuationFeatures {
                    exclamation_marks: features.exclamation_count,
                    question_marks: features.question_count,
                    caps_words: features.caps_count,
                },
            },
            keywords: features.found_keywords,
        })
    }
}

/// Untyped request body for the analyze endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub approach: Option<Value>,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>, approach: AnalysisApproach) -> Self {
        Self {
            text: Some(Value::String(text.into())),
            approach: Some(Value::String(approach.label().to_string())),
        }
    }

    /// Rejects bodies whose `text` is absent or not a string.
    pub fn validate(&self) -> Result<(&str, AnalysisApproach), AnalysisError> {
        let text = match &self.text {
            Some(Value::String(text)) => text.as_str(),
            _ => return Err(AnalysisError::MissingText),
        };
        let approach = AnalysisApproach::from_label(self.approach.as_ref().and_then(Value::as_str));
        Ok((text, approach))
    }
}
