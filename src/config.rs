//! Configuration management for the resume scanner

use crate::error::{Result, ScannerError};
use crate::processing::vocabulary::DEFAULT_MAX_KEYWORDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub vocabulary: VocabularyConfig,
    pub matching: MatchingConfig,
    pub profile: ProfileConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Words dropped in addition to the built-in stopword list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Terms appended after the built-in curated vocabulary
    #[serde(default)]
    pub extra_terms: Vec<String>,
    pub max_keywords: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub near_miss_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub store_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let store_path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner")
            .join("store.json");

        Self {
            extraction: ExtractionConfig::default(),
            vocabulary: VocabularyConfig {
                extra_terms: Vec::new(),
                max_keywords: DEFAULT_MAX_KEYWORDS,
            },
            matching: MatchingConfig {
                near_miss_threshold: 0.88,
            },
            profile: ProfileConfig { store_path },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, creating it with defaults if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScannerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScannerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner")
            .join("config.toml")
    }

    /// Set a value by dotted key, e.g. `vocabulary.max_keywords`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "extraction.extra_stopwords" => self.extraction.extra_stopwords = parse_list(value),
            "vocabulary.extra_terms" => self.vocabulary.extra_terms = parse_list(value),
            "vocabulary.max_keywords" => self.vocabulary.max_keywords = parse_value(key, value)?,
            "matching.near_miss_threshold" => {
                let threshold: f32 = parse_value(key, value)?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(ScannerError::Configuration(format!(
                        "{} must be between 0.0 and 1.0, got {}",
                        key, threshold
                    )));
                }
                self.matching.near_miss_threshold = threshold;
            }
            "profile.store_path" => self.profile.store_path = PathBuf::from(value),
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ScannerError::Configuration)?
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            _ => {
                return Err(ScannerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScannerError::Configuration(format!("Invalid value for {}: {}", key, value)))
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
