//! Curated work-term vocabulary and targeted keyword extraction

use crate::error::{Result, ScannerError};
use aho_corasick::AhoCorasick;
use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;

/// Characters that may bound a single-word term inside a token.
const WORD_BOUNDARY: &[char] = &['.', '-'];

/// Default number of curated keywords pulled from one text.
pub const DEFAULT_MAX_KEYWORDS: usize = 20;

/// Known work and technology terms, in priority order.
pub static DEFAULT_TERMS: &[&str] = &[
    // Job matcher core terms
    "react", "node.js", "python", "aws", "typescript", "agile", "analytics", "sql",
    "machine learning", "product", "user research", "statistics", "project management",
    "leadership", "javascript", "java", "c++", "docker", "kubernetes", "cloud", "data",
    "api", "design", "testing", "scrum", "jira", "git", "html", "css", "devops", "linux",

    // Programming languages
    "rust", "go", "c#", "ruby", "php", "swift", "kotlin", "scala", "haskell", "clojure",
    "matlab", "perl", "bash", "powershell", "r",

    // Web
    "vue", "angular", "svelte", "sass", "tailwind", "bootstrap", "jquery", "webpack",
    "vite", "babel", "express", "nextjs", "next.js", "graphql", "rest", "grpc",
    "microservices", "frontend", "backend", "full stack",

    // Infrastructure
    "azure", "gcp", "terraform", "ansible", "jenkins", "gitlab", "github", "continuous integration",
    "nginx", "redis", "kafka", "rabbitmq", "elasticsearch", "serverless", "unix",
    "networking", "security", "sre",

    // Databases
    "postgresql", "mysql", "mongodb", "cassandra", "dynamodb", "sqlite", "oracle",
    "sql server", "neo4j", "nosql",

    // Data and ML
    "deep learning", "tensorflow", "pytorch", "scikit-learn", "pandas", "numpy",
    "jupyter", "spark", "hadoop", "airflow", "data analysis", "data science",
    "data engineering", "etl", "tableau", "power bi", "excel", "nlp",
    "computer vision", "ai", "ml",

    // Testing and process
    "jest", "pytest", "junit", "selenium", "cypress", "tdd", "bdd", "kanban",
    "confluence", "figma", "ux", "ui", "product strategy", "product management",
    "roadmap", "stakeholder management", "experimentation",

    // Soft skills
    "communication", "teamwork", "problem solving", "critical thinking", "creativity",
    "adaptability", "time management", "collaboration", "mentoring", "coaching",
    "presentation", "negotiation", "customer service", "analytical", "detail oriented",
    "strategic planning", "budget management", "cross-functional",

    // Roles
    "software engineer", "developer", "architect", "senior", "lead", "principal",
    "manager", "director", "data scientist", "ml engineer", "product manager",
    "designer", "analyst", "consultant",
];

/// A fixed, ordered list of recognised skill terms.
///
/// Single-word terms match whole words of the normalised text, also when
/// the word is bounded by `.` or `-`; terms with spaces match anywhere as
/// substrings. Terms are normalised like the text before matching.
pub struct CuratedVocabulary {
    terms: Vec<String>,
    match_forms: Vec<String>,
    phrase_matcher: Option<AhoCorasick>,
    phrase_term_index: Vec<usize>,
    normalize_regex: Regex,
}

impl CuratedVocabulary {
    /// The built-in vocabulary.
    pub fn new() -> Result<Self> {
        Self::from_terms(DEFAULT_TERMS.iter().copied())
    }

    /// Built-in vocabulary followed by additional terms.
    pub fn with_extra_terms<I, S>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let defaults = DEFAULT_TERMS.iter().map(|t| t.to_string());
        let extra = extra.into_iter().map(|t| t.as_ref().to_string());
        Self::from_terms(defaults.chain(extra))
    }

    /// Vocabulary made only of `terms`, keeping the first occurrence of each.
    pub fn from_terms<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalize_regex = Regex::new(r"[^a-z0-9\s+#.\-]").expect("Invalid normalize regex");

        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        let mut match_forms = Vec::new();
        for term in terms {
            let term = Self::collapse_whitespace(&term.as_ref().to_lowercase());
            if term.is_empty() {
                continue;
            }

            let match_form = Self::collapse_whitespace(&normalize_regex.replace_all(&term, " "));
            if match_form.is_empty() {
                warn!("Ignoring curated term '{}': nothing left to match after normalisation", term);
                continue;
            }
            if seen.insert(match_form.clone()) {
                ordered.push(term);
                match_forms.push(match_form);
            }
        }

        let mut phrases = Vec::new();
        let mut phrase_term_index = Vec::new();
        for (idx, form) in match_forms.iter().enumerate() {
            if form.contains(' ') {
                phrases.push(form.as_str());
                phrase_term_index.push(idx);
            }
        }

        let phrase_matcher = if phrases.is_empty() {
            None
        } else {
            let matcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(&phrases)
                .map_err(|e| ScannerError::Processing(format!("Failed to build phrase matcher: {}", e)))?;
            Some(matcher)
        };

        debug!(
            "Curated vocabulary ready: {} terms ({} phrases)",
            ordered.len(),
            phrase_term_index.len()
        );

        Ok(Self {
            terms: ordered,
            match_forms,
            phrase_matcher,
            phrase_term_index,
            normalize_regex,
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Curated terms occurring in `text`, in vocabulary order, at most `max`.
    pub fn extract(&self, text: &str, max: usize) -> Vec<String> {
        if text.trim().is_empty() || max == 0 {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let normalized = self.normalize_regex.replace_all(&lowered, " ");
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut word_set: HashSet<&str> = HashSet::with_capacity(words.len() * 2);
        for &word in &words {
            word_set.insert(word);
            let trimmed = word.trim_matches(WORD_BOUNDARY);
            if !trimmed.is_empty() {
                word_set.insert(trimmed);
            }
            // "react-based" also counts as "react"
            if trimmed.contains('-') {
                for part in trimmed.split('-') {
                    let part = part.trim_matches(WORD_BOUNDARY);
                    if !part.is_empty() {
                        word_set.insert(part);
                    }
                }
            }
        }

        let mut phrase_hits = vec![false; self.terms.len()];
        if let Some(matcher) = &self.phrase_matcher {
            let collapsed = words.join(" ");
            for mat in matcher.find_overlapping_iter(&collapsed) {
                phrase_hits[self.phrase_term_index[mat.pattern().as_usize()]] = true;
            }
        }

        self.terms
            .iter()
            .enumerate()
            .filter(|(idx, _)| phrase_hits[*idx] || word_set.contains(self.match_forms[*idx].as_str()))
            .map(|(_, term)| term.clone())
            .take(max)
            .collect()
    }

    fn collapse_whitespace(term: &str) -> String {
        term.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
