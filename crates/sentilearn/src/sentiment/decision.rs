use super::features::SentimentFeatures;
use super::lexicon::{contains_any, INTENSIFIERS, NEGATION_WORDS};
use super::Sentiment;

const KEYWORD_BASE_CONFIDENCE: f64 = 60.0;
const KEYWORD_CONFIDENCE_CAP: f64 = 90.0;
const ADVANCED_CONFIDENCE_CAP: f64 = 95.0;
const ADVANCED_NEUTRAL_CAP: f64 = 85.0;
const ADVANCED_NEUTRAL_FLOOR: f64 = 40.0;
const LONG_TEXT_WORDS: usize = 10;
const LABEL_THRESHOLD: f64 = 0.5;

/// Label, confidence and explanation produced by one of the two decision modes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verdict {
    pub sentiment: Sentiment,
    pub confidence: u8,
    pub explanation: String,
}

pub(crate) fn keyword_verdict(features: &SentimentFeatures) -> Verdict {
    let positive = features.positive_count;
    let negative = features.negative_count;

    if positive > negative && positive > 0.0 {
        Verdict {
            sentiment: Sentiment::Positive,
            confidence: keyword_confidence(positive),
            explanation: format!(
                "Found {positive} positive keyword{} indicating happy or excited feelings!",
                plural(positive)
            ),
        }
    } else if negative > positive && negative > 0.0 {
        Verdict {
            sentiment: Sentiment::Negative,
            confidence: keyword_confidence(negative),
            explanation: format!(
                "Detected {negative} negative keyword{} showing sad or upset feelings.",
                plural(negative)
            ),
        }
    } else if features.neutral_count > 0.0 {
        Verdict {
            sentiment: Sentiment::Neutral,
            confidence: 75,
            explanation: "Found neutral language suggesting calm, balanced feelings.".to_string(),
        }
    } else {
        Verdict {
            sentiment: Sentiment::Neutral,
            confidence: 50,
            explanation: "No strong emotional keywords detected, appears to be neutral."
                .to_string(),
        }
    }
}

fn keyword_confidence(count: f64) -> u8 {
    to_percent(KEYWORD_CONFIDENCE_CAP.min(KEYWORD_BASE_CONFIDENCE + count * 10.0))
}

fn plural(count: f64) -> &'static str {
    if count == 1.0 {
        ""
    } else {
        "s"
    }
}

/// Raw score and unrounded confidence after the negation and intensifier adjustments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AdvancedScore {
    pub score: f64,
    pub confidence: f64,
}

pub(crate) fn advanced_score(
    text: &str,
    word_count: usize,
    features: &SentimentFeatures,
) -> AdvancedScore {
    let lowered = text.to_lowercase();
    let mut score = features.positive_count - features.negative_count;
    let mut confidence = 50.0;

    if word_count > LONG_TEXT_WORDS {
        confidence += 10.0;
    }

    if contains_any(&lowered, &NEGATION_WORDS) {
        score *= -0.5;
        confidence -= 15.0;
    }

    if contains_any(&lowered, &INTENSIFIERS) {
        score *= 1.3;
        confidence += 10.0;
    }

    AdvancedScore { score, confidence }
}

pub(crate) fn advanced_verdict(adjusted: AdvancedScore, features: &SentimentFeatures) -> Verdict {
    let AdvancedScore { score, confidence } = adjusted;

    let (sentiment, confidence) = if score > LABEL_THRESHOLD {
        (
            Sentiment::Positive,
            ADVANCED_CONFIDENCE_CAP.min(confidence + score * 10.0),
        )
    } else if score < -LABEL_THRESHOLD {
        (
            Sentiment::Negative,
            ADVANCED_CONFIDENCE_CAP.min(confidence + score.abs() * 10.0),
        )
    } else if features.neutral_count > 0.0 {
        (
            Sentiment::Neutral,
            ADVANCED_NEUTRAL_CAP.min(confidence + 20.0),
        )
    } else {
        (Sentiment::Neutral, ADVANCED_NEUTRAL_FLOOR.max(confidence))
    };

    let confidence = to_percent(confidence);
    Verdict {
        sentiment,
        confidence,
        explanation: format!(
            "Advanced analysis detected {} sentiment with {confidence}% confidence. The algorithm considered word patterns, context, and linguistic features.",
            sentiment.label()
        ),
    }
}

fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, ADVANCED_CONFIDENCE_CAP) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(positive: f64, negative: f64, neutral: f64) -> SentimentFeatures {
        SentimentFeatures {
            positive_count: positive,
            negative_count: negative,
            neutral_count: neutral,
            found_keywords: Vec::new(),
            exclamation_count: 0,
            question_count: 0,
            caps_count: 0,
        }
    }

    #[test]
    fn keyword_tie_is_neutral() {
        let verdict = keyword_verdict(&features(2.0, 2.0, 0.0));
        assert_eq!(verdict.sentiment, Sentiment::Neutral);
        assert_eq!(verdict.confidence, 50);
    }

    #[test]
    fn keyword_confidence_is_capped_at_ninety() {
        let verdict = keyword_verdict(&features(7.0, 1.0, 0.0));
        assert_eq!(verdict.sentiment, Sentiment::Positive);
        assert_eq!(verdict.confidence, 90);
        assert_eq!(
            verdict.explanation,
            "Found 7 positive keywords indicating happy or excited feelings!"
        );
    }

    #[test]
    fn keyword_singular_explanation() {
        let verdict = keyword_verdict(&features(0.0, 1.0, 0.0));
        assert_eq!(verdict.sentiment, Sentiment::Negative);
        assert_eq!(verdict.confidence, 70);
        assert_eq!(
            verdict.explanation,
            "Detected 1 negative keyword showing sad or upset feelings."
        );
    }

    #[test]
    fn keyword_neutral_words_raise_confidence() {
        let verdict = keyword_verdict(&features(0.0, 0.0, 1.0));
        assert_eq!(verdict.sentiment, Sentiment::Neutral);
        assert_eq!(verdict.confidence, 75);
    }

    #[test]
    fn negation_flips_and_dampens_score() {
        let base = features(1.0, 0.0, 0.0);
        let plain = advanced_score("I love this", 3, &base);
        let negated = advanced_score("I don't love this", 4, &base);

        assert_eq!(plain.score, 1.0);
        assert_eq!(negated.score, -0.5);
        assert_eq!(negated.confidence, 35.0);
        assert!(negated.score < plain.score);
    }

    #[test]
    fn negation_applies_before_intensifier() {
        let adjusted = advanced_score("not really bad", 3, &features(0.0, 2.0, 0.0));
        assert!((adjusted.score - 1.3).abs() < 1e-9);
        assert_eq!(adjusted.confidence, 45.0);
    }

    #[test]
    fn long_text_adds_confidence() {
        let adjusted = advanced_score("a b c d e f g h i j k", 11, &features(0.0, 0.0, 0.0));
        assert_eq!(adjusted.confidence, 60.0);
    }

    #[test]
    fn advanced_labels_use_half_point_threshold() {
        let neutral = advanced_verdict(
            AdvancedScore {
                score: 0.5,
                confidence: 35.0,
            },
            &features(0.0, 0.0, 0.0),
        );
        assert_eq!(neutral.sentiment, Sentiment::Neutral);
        assert_eq!(neutral.confidence, 40);

        let negative = advanced_verdict(
            AdvancedScore {
                score: -6.0,
                confidence: 50.0,
            },
            &features(0.0, 6.0, 0.0),
        );
        assert_eq!(negative.sentiment, Sentiment::Negative);
        assert_eq!(negative.confidence, 95);
    }

    #[test]
    fn advanced_neutral_words_cap_at_eighty_five() {
        let verdict = advanced_verdict(
            AdvancedScore {
                score: 0.0,
                confidence: 70.0,
            },
            &features(0.0, 0.0, 2.0),
        );
        assert_eq!(verdict.confidence, 85);
    }
}
