//! Keyword overlap scoring between a required list and a candidate set

use crate::processing::keyword_set::KeywordSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strsim::jaro_winkler;

/// Outcome of comparing required keywords against a candidate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage of required keywords found, 0 to 100.
    pub score: u8,
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub suggestions: Vec<String>,
}

/// A missing keyword that looks like a misspelling of a candidate token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss {
    pub keyword: String,
    pub candidate: String,
    pub similarity: f32,
}

/// Anything that carries a name and a keyword list, such as a stored resume.
pub trait KeywordSource {
    fn name(&self) -> &str;
    fn keywords(&self) -> &[String];
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            score: 0,
            found: Vec::new(),
            missing: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && !self.found.is_empty()
    }

    pub fn total_required(&self) -> usize {
        self.found.len() + self.missing.len()
    }
}

/// Suggestion text for one missing keyword.
pub fn suggestion_for(term: &str) -> String {
    format!("Add or highlight \"{}\" in your resume.", term)
}

/// Overlap percentage, rounded half up and clamped to [0, 100].
///
/// An empty requirement list scores 0. Only a complete match scores 100,
/// so 199 of 200 gives 99 rather than a rounded-up 100.
pub fn overlap_score(found: usize, required: usize) -> u8 {
    if required == 0 {
        return 0;
    }
    let percent = (100.0 * found as f64 / required as f64).round().clamp(0.0, 100.0) as u8;
    if found < required {
        percent.min(99)
    } else {
        percent
    }
}

/// Stateless matcher; the only setting is the near-miss threshold.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    near_miss_threshold: f32,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordMatcher {
    pub fn new() -> Self {
        Self {
            near_miss_threshold: 0.88,
        }
    }

    pub fn with_near_miss_threshold(threshold: f32) -> Self {
        let mut matcher = Self::new();
        matcher.set_near_miss_threshold(threshold);
        matcher
    }

    /// Set near-miss threshold (0.0 to 1.0)
    pub fn set_near_miss_threshold(&mut self, threshold: f32) {
        self.near_miss_threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn near_miss_threshold(&self) -> f32 {
        self.near_miss_threshold
    }

    /// Partition `required` into found and missing against `candidate`.
    ///
    /// Both partitions keep `required`'s order; duplicates in `required`
    /// are kept and counted.
    pub fn match_keywords(&self, required: &[String], candidate: &KeywordSet) -> MatchResult {
        let (found, missing): (Vec<String>, Vec<String>) = required
            .iter()
            .cloned()
            .partition(|keyword| candidate.contains(keyword));

        let score = overlap_score(found.len(), required.len());
        let suggestions = missing.iter().map(|k| suggestion_for(k)).collect();

        MatchResult {
            score,
            found,
            missing,
            suggestions,
        }
    }

    /// Pick the candidate sharing the most distinct keywords with `required`.
    ///
    /// Ties go to the earliest candidate. Returns `None` only when
    /// `candidates` is empty.
    pub fn best_candidate<'a, C: KeywordSource>(
        &self,
        required: &[String],
        candidates: &'a [C],
    ) -> Option<&'a C> {
        let required: HashSet<&str> = required.iter().map(String::as_str).collect();

        let mut best: Option<(&'a C, usize)> = None;
        for candidate in candidates {
            let overlap = candidate
                .keywords()
                .iter()
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .intersection(&required)
                .count();

            match best {
                Some((_, best_overlap)) if overlap <= best_overlap => {}
                _ => best = Some((candidate, overlap)),
            }
        }

        best.map(|(candidate, _)| candidate)
    }

    /// For each missing keyword, the closest candidate token above the threshold.
    pub fn near_misses(&self, missing: &[String], candidate: &KeywordSet) -> Vec<NearMiss> {
        let mut hints = Vec::new();

        for keyword in missing {
            if keyword.len() < 3 {
                continue;
            }

            let closest = candidate
                .iter()
                .filter(|token| *token != keyword.as_str())
                .map(|token| (token, jaro_winkler(keyword, token) as f32))
                .filter(|(_, similarity)| *similarity >= self.near_miss_threshold)
                .fold(None, |best: Option<(&str, f32)>, (token, similarity)| match best {
                    Some((_, best_similarity)) if best_similarity >= similarity => best,
                    _ => Some((token, similarity)),
                });

            if let Some((token, similarity)) = closest {
                hints.push(NearMiss {
                    keyword: keyword.clone(),
                    candidate: token.to_string(),
                    similarity,
                });
            }
        }

        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct Named {
        name: String,
        keywords: Vec<String>,
    }

    impl KeywordSource for Named {
        fn name(&self) -> &str {
            &self.name
        }

        fn keywords(&self) -> &[String] {
            &self.keywords
        }
    }

    fn named(name: &str, keywords: &[&str]) -> Named {
        Named {
            name: name.to_string(),
            keywords: strings(keywords),
        }
    }

    #[test]
    fn test_half_match() {
        let matcher = KeywordMatcher::new();
        let required = strings(&["react", "node.js", "aws", "typescript"]);
        let candidate: KeywordSet = ["react", "node.js", "python"].into_iter().collect();

        let result = matcher.match_keywords(&required, &candidate);

        assert_eq!(result.found, strings(&["react", "node.js"]));
        assert_eq!(result.missing, strings(&["aws", "typescript"]));
        assert_eq!(result.score, 50);
        assert_eq!(
            result.suggestions,
            vec![
                "Add or highlight \"aws\" in your resume.".to_string(),
                "Add or highlight \"typescript\" in your resume.".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_required_scores_zero() {
        let matcher = KeywordMatcher::new();
        let candidate: KeywordSet = ["react"].into_iter().collect();

        let result = matcher.match_keywords(&[], &candidate);

        assert_eq!(result, MatchResult::empty());
        assert!(!result.is_complete());
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let matcher = KeywordMatcher::new();
        let result = matcher.match_keywords(&strings(&["sql", "excel"]), &KeywordSet::new());
        assert_eq!(result.score, 0);
        assert_eq!(result.missing.len(), 2);
    }

    #[test]
    fn test_full_match_is_exactly_100() {
        let matcher = KeywordMatcher::new();
        let candidate: KeywordSet = ["sql", "excel", "python"].into_iter().collect();
        let result = matcher.match_keywords(&strings(&["sql", "excel"]), &candidate);
        assert_eq!(result.score, 100);
        assert!(result.is_complete());
    }

    #[test]
    fn test_partition_covers_required() {
        let matcher = KeywordMatcher::new();
        let required = strings(&["a", "b", "c", "a", "d"]);
        let candidate: KeywordSet = ["a", "d", "z"].into_iter().collect();

        let result = matcher.match_keywords(&required, &candidate);

        let found: HashSet<_> = result.found.iter().collect();
        let missing: HashSet<_> = result.missing.iter().collect();
        let all: HashSet<_> = required.iter().collect();
        assert!(found.is_disjoint(&missing));
        assert_eq!(found.union(&missing).cloned().collect::<HashSet<_>>(), all);
        assert_eq!(result.total_required(), 5);
        assert_eq!(result.score, 60);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(overlap_score(1, 3), 33);
        assert_eq!(overlap_score(2, 3), 67);
        assert_eq!(overlap_score(1, 8), 13);
        assert_eq!(overlap_score(0, 0), 0);
        assert_eq!(overlap_score(5, 4), 100);
        assert_eq!(overlap_score(199, 200), 99);
        assert_eq!(overlap_score(200, 200), 100);
    }

    #[test]
    fn test_best_candidate_by_raw_overlap() {
        let matcher = KeywordMatcher::new();
        let required = strings(&["Python", "ML", "SQL"]);
        let candidates = vec![
            named("A", &["Python", "SQL"]),
            named("B", &["Python", "ML", "SQL"]),
        ];

        let best = matcher.best_candidate(&required, &candidates).unwrap();
        assert_eq!(best.name(), "B");
    }

    #[test]
    fn test_best_candidate_ties_and_empty() {
        let matcher = KeywordMatcher::new();
        let required = strings(&["sql"]);
        let candidates = vec![
            named("first", &["java"]),
            named("second", &["go"]),
        ];

        assert_eq!(matcher.best_candidate(&required, &candidates).unwrap().name(), "first");

        let none: Vec<Named> = Vec::new();
        assert!(matcher.best_candidate(&required, &none).is_none());
    }

    #[test]
    fn test_best_candidate_ignores_duplicate_keywords() {
        let matcher = KeywordMatcher::new();
        let required = strings(&["sql", "excel"]);
        let candidates = vec![
            named("dupes", &["sql", "sql", "sql"]),
            named("both", &["sql", "excel"]),
        ];

        assert_eq!(matcher.best_candidate(&required, &candidates).unwrap().name(), "both");
    }

    #[test]
    fn test_near_misses() {
        let matcher = KeywordMatcher::new();
        let candidate: KeywordSet = ["kubernets", "python"].into_iter().collect();
        let hints = matcher.near_misses(&strings(&["kubernetes", "aws"]), &candidate);

        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].keyword, "kubernetes");
        assert_eq!(hints[0].candidate, "kubernets");
        assert!(hints[0].similarity >= 0.88);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let matcher = KeywordMatcher::with_near_miss_threshold(3.0);
        assert_eq!(matcher.near_miss_threshold(), 1.0);
    }

    fn keyword() -> impl Strategy<Value = String> {
        "[a-f]{1,2}"
    }

    proptest! {
        #[test]
        fn prop_found_and_missing_partition_required(
            required in prop::collection::vec(keyword(), 0..30),
            candidate in prop::collection::vec(keyword(), 0..30),
        ) {
            let candidate: KeywordSet = candidate.into_iter().collect();
            let result = KeywordMatcher::new().match_keywords(&required, &candidate);

            let found: HashSet<&String> = result.found.iter().collect();
            let missing: HashSet<&String> = result.missing.iter().collect();
            let all: HashSet<&String> = required.iter().collect();

            prop_assert!(found.is_disjoint(&missing));
            prop_assert_eq!(found.union(&missing).cloned().collect::<HashSet<_>>(), all);
            prop_assert_eq!(result.total_required(), required.len());
            prop_assert_eq!(result.suggestions.len(), result.missing.len());
        }

        #[test]
        fn prop_score_stays_in_range(
            required in prop::collection::vec(keyword(), 0..30),
            candidate in prop::collection::vec(keyword(), 0..30),
        ) {
            let candidate: KeywordSet = candidate.into_iter().collect();
            let result = KeywordMatcher::new().match_keywords(&required, &candidate);

            prop_assert!(result.score <= 100);
            if required.is_empty() || candidate.is_empty() {
                prop_assert_eq!(result.score, 0);
            }
        }

        #[test]
        fn prop_full_score_only_for_complete_match(
            required in prop::collection::vec(keyword(), 0..30),
            candidate in prop::collection::vec(keyword(), 0..30),
        ) {
            let candidate: KeywordSet = candidate.into_iter().collect();
            let result = KeywordMatcher::new().match_keywords(&required, &candidate);

            let complete = result.missing.is_empty() && !required.is_empty();
            prop_assert_eq!(result.score == 100, complete);
        }

        #[test]
        fn prop_only_complete_counts_score_100(found in 0usize..500, extra in 0usize..500) {
            let required = found + extra;
            let score = overlap_score(found, required);

            prop_assert!(score <= 100);
            prop_assert_eq!(score == 100, required > 0 && extra == 0);
        }
    }
}
