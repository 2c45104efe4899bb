//! Stopword filtering for keyword extraction

use std::collections::HashSet;

/// Common English function words dropped by the keyword extractor.
pub static DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "a", "an", "to", "of", "in", "on", "for", "with",
    "by", "at", "is", "are", "as", "be", "from", "that", "this", "it",
    "our", "we", "you", "your", "us", "will", "must", "have", "has", "was",
    "were", "or", "but", "if", "then", "so", "not", "can", "should", "may",
    "do", "does", "did", "using", "used", "into", "out", "about", "over", "under",
    "more", "less", "than", "such", "these", "those", "their", "which", "who", "what",
    "when", "where", "how", "why", "all", "any", "each", "other", "some", "most",
    "many", "much", "very", "just", "also", "too", "both", "either", "neither", "own",
    "same", "new", "now", "after", "before", "again", "once",
];

/// Set of lowercase words excluded from keyword sets.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordSet {
    pub fn new() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }

    /// Build a set from an arbitrary word list, ignoring the defaults.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self { words }
    }

    /// Default list plus extra words (e.g. from configuration).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend(extra);
        set
    }

    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in extra {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.words.insert(word);
            }
        }
    }

    /// Expects an already-lowercased token.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
