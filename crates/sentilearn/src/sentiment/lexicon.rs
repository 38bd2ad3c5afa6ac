use regex::Regex;

pub(crate) const POSITIVE_WORDS: [&str; 27] = [
    "love",
    "amazing",
    "awesome",
    "great",
    "happy",
    "excited",
    "wonderful",
    "fantastic",
    "best",
    "fun",
    "good",
    "excellent",
    "perfect",
    "beautiful",
    "brilliant",
    "incredible",
    "outstanding",
    "superb",
    "delightful",
    "joy",
    "smile",
    "laugh",
    "celebrate",
    "win",
    "success",
    "proud",
    "thankful",
];

pub(crate) const NEGATIVE_WORDS: [&str; 27] = [
    "hate",
    "terrible",
    "awful",
    "bad",
    "sad",
    "angry",
    "boring",
    "worst",
    "horrible",
    "disgusting",
    "ugly",
    "stupid",
    "died",
    "crying",
    "upset",
    "disappointed",
    "frustrated",
    "annoyed",
    "worried",
    "scared",
    "hurt",
    "broken",
    "fail",
    "lost",
    "wrong",
    "difficult",
    "problem",
];

pub(crate) const NEUTRAL_WORDS: [&str; 13] = [
    "okay", "regular", "normal", "fine", "alright", "average", "typical", "usual", "ordinary",
    "standard", "common", "general", "basic",
];

/// Matched as plain substrings of the lowercased text, so "no" also fires inside "know".
pub(crate) const NEGATION_WORDS: [&str; 7] =
    ["not", "no", "never", "don't", "doesn't", "can't", "won't"];

/// Substring matched, same as the negation list.
pub(crate) const INTENSIFIERS: [&str; 6] = [
    "very",
    "really",
    "extremely",
    "absolutely",
    "totally",
    "completely",
];

/// Raised when a dictionary pattern fails to compile.
#[derive(Debug, thiserror::Error)]
#[error("failed to compile sentiment pattern for '{word}'")]
pub struct LexiconError {
    pub word: String,
    #[source]
    pub source: regex::Error,
}

/// Dictionary word with its whole-word matcher.
#[derive(Debug, Clone)]
pub(crate) struct WordPattern {
    pub word: &'static str,
    pattern: Regex,
}

impl WordPattern {
    fn compile(word: &'static str) -> Result<Self, LexiconError> {
        // ASCII word boundaries: accented letters never join a dictionary word.
        let expression = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(word));
        let pattern = Regex::new(&expression).map_err(|source| LexiconError {
            word: word.to_string(),
            source,
        })?;
        Ok(Self { word, pattern })
    }

    pub fn occurrences(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// Compiled matchers for the three sentiment dictionaries and the punctuation features.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub(crate) positive: Vec<WordPattern>,
    pub(crate) negative: Vec<WordPattern>,
    pub(crate) neutral: Vec<WordPattern>,
    caps_run: Regex,
    whitespace: Regex,
}

impl Lexicon {
    pub fn compile() -> Result<Self, LexiconError> {
        Ok(Self {
            positive: compile_words(&POSITIVE_WORDS)?,
            negative: compile_words(&NEGATIVE_WORDS)?,
            neutral: compile_words(&NEUTRAL_WORDS)?,
            caps_run: compile_raw("caps", "[A-Z]{2,}")?,
            whitespace: compile_raw("whitespace", r"\s+")?,
        })
    }

    /// Runs of two or more uppercase ASCII letters.
    pub(crate) fn caps_runs(&self, text: &str) -> usize {
        self.caps_run.find_iter(text).count()
    }

    /// Number of pieces left after splitting on whitespace runs. Leading or trailing
    /// whitespace contributes an empty piece, and empty text still counts as one.
    pub(crate) fn word_count(&self, text: &str) -> usize {
        self.whitespace.split(text).count()
    }
}

fn compile_words(words: &[&'static str]) -> Result<Vec<WordPattern>, LexiconError> {
    words.iter().map(|word| WordPattern::compile(word)).collect()
}

fn compile_raw(name: &str, pattern: &str) -> Result<Regex, LexiconError> {
    Regex::new(pattern).map_err(|source| LexiconError {
        word: name.to_string(),
        source,
    })
}

pub(crate) fn contains_any(lowered: &str, words: &[&str]) -> bool {
    words.iter().any(|word| lowered.contains(word))
}
