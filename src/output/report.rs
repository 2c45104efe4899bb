//! Report structures handed to the formatters

use crate::jobs::JobMatchReport;
use crate::processing::analyzer::ScanReport;
use serde::{Deserialize, Serialize};

/// Anything the CLI can render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Scan(ScanReport),
    JobMatches(JobMatchReport),
    Keywords(KeywordReport),
}

/// Keywords pulled from a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordReport {
    pub source: String,
    pub mode: ExtractionMode,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    FreeText,
    Curated,
}

/// Rating bands used by every output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=100 => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }
}

impl Report {
    /// Name used when suggesting an output file name.
    pub fn source_name(&self) -> &str {
        match self {
            Report::Scan(scan) => &scan.resume_source,
            Report::JobMatches(_) => "job_matches",
            Report::Keywords(keywords) => &keywords.source,
        }
    }
}
