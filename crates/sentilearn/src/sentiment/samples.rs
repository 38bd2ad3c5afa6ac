use serde::Serialize;

use super::Sentiment;

/// Practice sentence offered on the demo page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleText {
    pub text: &'static str,
    pub expected_sentiment: Sentiment,
    pub explanation: &'static str,
}

pub fn sample_texts() -> Vec<SampleText> {
    vec![
        SampleText {
            text: "I absolutely love this new video game! It's amazing!",
            expected_sentiment: Sentiment::Positive,
            explanation: "Contains strong positive words like 'love' and 'amazing' with excitement punctuation.",
        },
        SampleText {
            text: "This homework is so boring and I hate it.",
            expected_sentiment: Sentiment::Negative,
            explanation: "Uses negative words 'boring' and 'hate' to express dislike.",
        },
        SampleText {
            text: "Today is Tuesday and we have math class.",
            expected_sentiment: Sentiment::Neutral,
            explanation: "States facts without emotional language or opinions.",
        },
        SampleText {
            text: "I can't wait for summer vacation! Beach time!!!",
            expected_sentiment: Sentiment::Positive,
            explanation: "Shows excitement with 'can't wait' and multiple exclamation marks.",
        },
        SampleText {
            text: "I'm feeling sad because my friend moved away.",
            expected_sentiment: Sentiment::Negative,
            explanation: "Directly states sadness and explains the emotional cause.",
        },
        SampleText {
            text: "The weather is okay today, nothing special.",
            expected_sentiment: Sentiment::Neutral,
            explanation: "Uses neutral descriptor 'okay' and neutral phrase 'nothing special'.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{AnalysisApproach, SentimentAnalyzer};

    #[test]
    fn keyword_mode_agrees_with_every_sample() {
        let analyzer = SentimentAnalyzer::new().expect("lexicon compiles");
        for sample in sample_texts() {
            let result = analyzer
                .analyze(sample.text, AnalysisApproach::Keyword)
                .expect("sample analyses");
            assert_eq!(result.sentiment, sample.expected_sentiment, "{}", sample.text);
        }
    }
}
