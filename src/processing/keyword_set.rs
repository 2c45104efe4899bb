//! Deduplicated keyword collection with stable first-seen ordering

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// A set of keyword tokens that remembers insertion order.
///
/// Membership is what matters for matching; the order is kept so that
/// reports and tests see keywords in the order they first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token, returning `false` if it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.index.contains(&token) {
            return false;
        }
        self.index.insert(token.clone());
        self.ordered.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains(token)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }

    /// Space-joined tokens, suitable for feeding back into the extractor.
    pub fn joined(&self) -> String {
        self.ordered.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for KeywordSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

impl Serialize for KeywordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.ordered.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeywordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tokens = Vec::<String>::deserialize(deserializer)?;
        Ok(tokens.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let set: KeywordSet = ["quick", "fox", "quick", "dog", "fox"].into_iter().collect();
        assert_eq!(set.as_slice(), &["quick", "fox", "dog"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_insert_reports_novelty() {
        let mut set = KeywordSet::new();
        assert!(set.insert("rust"));
        assert!(!set.insert("rust"));
        assert!(set.contains("rust"));
        assert!(!set.contains("Rust"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let set: KeywordSet = ["sql", "react"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["sql","react"]"#);

        let back: KeywordSet = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(back.as_slice(), &["a", "b"]);
    }
}
