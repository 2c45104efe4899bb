//! Scan engine combining keyword extraction and matching

use crate::config::Config;
use crate::error::Result;
use crate::processing::keyword_set::KeywordSet;
use crate::processing::matcher::{KeywordMatcher, MatchResult, NearMiss};
use crate::processing::stopwords::StopwordSet;
use crate::processing::text_processor::{KeywordExtractor, TextStats};
use crate::processing::vocabulary::CuratedVocabulary;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Coordinates the extractor, curated vocabulary and matcher.
pub struct ScanEngine {
    extractor: KeywordExtractor,
    vocabulary: CuratedVocabulary,
    matcher: KeywordMatcher,
    max_curated_keywords: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub result: MatchResult,

    /// Keywords of the resume (the candidate side)
    pub resume_keywords: KeywordSet,

    /// Keywords of the job description (the required side)
    pub job_keywords: KeywordSet,

    pub resume_stats: TextStats,
    pub job_stats: TextStats,

    /// Possible misspellings of missing keywords found in the resume
    pub near_misses: Vec<NearMiss>,

    pub resume_source: String,
    pub job_source: String,

    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl ScanEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let stopwords = StopwordSet::with_extra(&config.extraction.extra_stopwords);
        let vocabulary = CuratedVocabulary::with_extra_terms(&config.vocabulary.extra_terms)?;
        let matcher = KeywordMatcher::with_near_miss_threshold(config.matching.near_miss_threshold);

        Ok(Self {
            extractor: KeywordExtractor::with_stopwords(stopwords),
            vocabulary,
            matcher,
            max_curated_keywords: config.vocabulary.max_keywords,
        })
    }

    /// Engine with built-in stopwords and vocabulary.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&Config::default())
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    pub fn vocabulary(&self) -> &CuratedVocabulary {
        &self.vocabulary
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn max_curated_keywords(&self) -> usize {
        self.max_curated_keywords
    }

    /// Curated keywords of `text`, limited to the configured maximum.
    pub fn curated_keywords(&self, text: &str) -> Vec<String> {
        self.vocabulary.extract(text, self.max_curated_keywords)
    }

    /// Score a resume against a job description.
    ///
    /// Every job keyword is a requirement; empty texts give a zero score.
    pub fn scan(
        &self,
        resume_text: &str,
        job_text: &str,
        resume_source: &str,
        job_source: &str,
    ) -> ScanReport {
        let start_time = Instant::now();

        let resume_keywords = self.extractor.extract(resume_text);
        let job_keywords = self.extractor.extract(job_text);
        debug!(
            "Extracted {} resume keywords and {} job keywords",
            resume_keywords.len(),
            job_keywords.len()
        );

        let result = self
            .matcher
            .match_keywords(job_keywords.as_slice(), &resume_keywords);
        let near_misses = self.matcher.near_misses(&result.missing, &resume_keywords);

        ScanReport {
            result,
            resume_stats: self.extractor.stats(resume_text),
            job_stats: self.extractor.stats(job_text),
            resume_keywords,
            job_keywords,
            near_misses,
            resume_source: resume_source.to_string(),
            job_source: job_source.to_string(),
            generated_at: Utc::now(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}

impl ScanReport {
    /// "matches N out of M keywords" summary line.
    pub fn summary_line(&self) -> String {
        format!(
            "Your resume matches {} out of {} keywords from the job description.",
            self.result.found.len(),
            self.result.total_required()
        )
    }
}
