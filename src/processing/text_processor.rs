//! Keyword extraction and basic text statistics

use crate::processing::keyword_set::KeywordSet;
use crate::processing::stopwords::StopwordSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Turns free text into a set of significant lowercase tokens.
pub struct KeywordExtractor {
    stopwords: StopwordSet,
    strip_regex: Regex,
    whitespace_regex: Regex,
}

/// Size figures shown alongside a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub keyword_count: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self::with_stopwords(StopwordSet::new())
    }

    pub fn with_stopwords(stopwords: StopwordSet) -> Self {
        let strip_regex = Regex::new(r"[^a-z0-9\s]").expect("Invalid strip regex");
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            stopwords,
            strip_regex,
            whitespace_regex,
        }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Extract the keyword set of `text`.
    ///
    /// Lowercases, removes every character that is not `a-z`, `0-9` or
    /// whitespace, splits on whitespace runs and drops stopwords. Never fails;
    /// empty input gives an empty set.
    pub fn extract(&self, text: &str) -> KeywordSet {
        if text.is_empty() {
            return KeywordSet::new();
        }

        let lowered = text.to_lowercase();
        let stripped = self.strip_regex.replace_all(&lowered, "");

        self.whitespace_regex
            .split(&stripped)
            .filter(|token| !token.is_empty() && !self.stopwords.contains(token))
            .collect()
    }

    /// Same as [`extract`](Self::extract) but only the first `max` keywords.
    pub fn extract_top(&self, text: &str, max: usize) -> Vec<String> {
        let mut keywords = self.extract(text).into_vec();
        keywords.truncate(max);
        keywords
    }

    pub fn extract_optional(&self, text: Option<&str>) -> KeywordSet {
        text.map(|t| self.extract(t)).unwrap_or_default()
    }

    /// Character, word, sentence and keyword counts; blank text gives zeros.
    pub fn stats(&self, text: &str) -> TextStats {
        // unicode_sentences underflows on empty input
        if text.trim().is_empty() {
            return TextStats {
                character_count: text.chars().count(),
                ..TextStats::default()
            };
        }

        TextStats {
            character_count: text.chars().count(),
            word_count: text.unicode_words().count(),
            sentence_count: text
                .unicode_sentences()
                .filter(|s| !s.trim().is_empty())
                .count(),
            keyword_count: self.extract(text).len(),
        }
    }
}
