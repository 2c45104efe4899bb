//! CLI interface for the resume scanner

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scanner")]
#[command(about = "Resume keyword scanner and job matcher")]
#[command(long_about = "Compare resume keywords with job descriptions, score the overlap and keep a profile of resumes and dream jobs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a resume against a job description
    Scan {
        #[command(flatten)]
        resume: ResumeInput,

        #[command(flatten)]
        job: JobInput,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show extraction details
        #[arg(short, long)]
        detailed: bool,
    },

    /// List the keywords of a single document
    Keywords {
        /// Path to a PDF, TXT or MD file
        file: PathBuf,

        /// Only report terms from the curated vocabulary
        #[arg(long)]
        curated: bool,

        /// Maximum number of keywords to report
        #[arg(long)]
        max: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Match job listings against the resumes in your profile
    Match {
        /// JSON file with an array of job listings (defaults to the active dream job)
        #[arg(long)]
        jobs: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Manage the stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ResumeInput {
    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Resume text given inline
    #[arg(long)]
    pub resume_text: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobInput {
    /// Path to job description file (PDF, TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description text given inline
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,

    /// Add a resume entry
    AddResume {
        #[arg(short, long)]
        name: String,

        /// Comma-separated keywords
        #[arg(short, long)]
        keywords: String,

        /// Resume status: active, draft
        #[arg(short, long, default_value = "active")]
        status: String,
    },

    /// Update a resume entry
    UpdateResume {
        id: u32,

        #[arg(short, long)]
        name: Option<String>,

        /// Comma-separated keywords
        #[arg(short, long)]
        keywords: Option<String>,

        /// Resume status: active, draft
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Remove a resume entry
    RemoveResume { id: u32 },

    /// Recompute a resume's score against the active dream job
    Rescan { id: u32 },

    /// Add a dream job
    AddDreamJob {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,
    },

    /// Update a dream job
    UpdateDreamJob {
        id: u32,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a dream job
    RemoveDreamJob { id: u32 },

    /// Make a dream job the active one
    Activate { id: u32 },

    /// Add a skill
    AddSkill { skill: String },

    /// Remove a skill
    RemoveSkill { skill: String },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "vocabulary.max_keywords")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
