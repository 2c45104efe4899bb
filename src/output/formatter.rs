//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{Result, ScannerError};
use crate::jobs::{JobMatch, JobMatchReport};
use crate::output::report::{ExtractionMode, KeywordReport, Report, ScoreBand};
use crate::processing::analyzer::ScanReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let band = ScoreBand::from_score(score);
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_keyword_list(&self, keywords: &[String], color: Color, empty: &str) -> String {
        if keywords.is_empty() {
            return self.colorize(empty, Color::BrightBlack);
        }
        keywords
            .iter()
            .map(|k| self.colorize(k, color))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn format_scan(&self, report: &ScanReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCAN RESULTS", 1));
        output.push_str(&format!("Resume: {} | Job: {}\n", report.resume_source, report.job_source));
        output.push_str(&format!(
            "\n{}% Match {}\n",
            report.result.score,
            self.format_score_badge(report.result.score)
        ));
        output.push_str(&format!("{}\n", report.summary_line()));
        if report.result.is_complete() {
            output.push_str(&self.colorize("Every job keyword appears in your resume.\n", Color::Green));
        }

        output.push_str(&self.format_header("Found Keywords", 2));
        output.push_str(&self.format_keyword_list(&report.result.found, Color::Green, "None"));
        output.push('\n');

        output.push_str(&self.format_header("Missing Keywords", 2));
        output.push_str(&self.format_keyword_list(&report.result.missing, Color::Red, "None"));
        output.push('\n');

        output.push_str(&self.format_header("Suggestions", 2));
        if report.result.suggestions.is_empty() {
            output.push_str("  • No suggestions. Great match!\n");
        } else {
            for suggestion in &report.result.suggestions {
                output.push_str(&format!("  • {}\n", suggestion));
            }
        }

        if !report.near_misses.is_empty() {
            output.push_str(&self.format_header("Possible Misspellings", 3));
            for hint in &report.near_misses {
                output.push_str(&format!(
                    "  • '{}' in your resume looks like '{}' ({:.0}% similar)\n",
                    hint.candidate,
                    self.colorize(&hint.keyword, Color::Cyan),
                    hint.similarity * 100.0
                ));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!(
                "Resume: {} words, {} sentences, {} keywords\n",
                report.resume_stats.word_count, report.resume_stats.sentence_count, report.resume_stats.keyword_count
            ));
            output.push_str(&format!(
                "Job description: {} words, {} sentences, {} keywords\n",
                report.job_stats.word_count, report.job_stats.sentence_count, report.job_stats.keyword_count
            ));
            output.push_str(&format!("Resume keywords: {}\n", report.resume_keywords.as_slice().join(", ")));
            output.push_str(&format!(
                "Generated: {} | Processing time: {}ms\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms
            ));
        }

        output
    }

    fn format_job_match(&self, job_match: &JobMatch) -> String {
        let mut output = String::new();
        let job = &job_match.job;

        let heading = if job.company.is_empty() {
            job.title.clone()
        } else {
            format!("{} at {}", job.title, job.company)
        };
        output.push_str(&self.format_header(&heading, 2));
        if !job.location.is_empty() {
            output.push_str(&format!("Location: {}\n", job.location));
        }

        output.push_str(&format!(
            "Required Keywords: {}\n",
            self.format_keyword_list(&job_match.required_keywords, Color::Cyan, "None recognised")
        ));

        match &job_match.best_resume_name {
            Some(name) => output.push_str(&format!(
                "Best resume: {} → {}% Match {}\n",
                name,
                job_match.result.score,
                self.format_score_badge(job_match.result.score)
            )),
            None => output.push_str("Best resume: none stored\n"),
        }

        output.push_str(&format!(
            "Pros: {}\n",
            self.format_keyword_list(job_match.pros(), Color::Green, "None")
        ));
        output.push_str(&format!(
            "Cons: {}\n",
            self.format_keyword_list(job_match.cons(), Color::Red, "No major gaps")
        ));

        if self.detailed {
            for suggestion in &job_match.result.suggestions {
                output.push_str(&format!("  • {}\n", suggestion));
            }
        }

        output
    }

    fn format_job_matches(&self, report: &JobMatchReport) -> String {
        let mut output = self.format_header("JOB MATCHES", 1);

        if let Some(title) = &report.dream_job_title {
            output.push_str(&format!("Matching jobs based on your dream job: {}\n", title));
        }
        if report.matches.is_empty() {
            output.push_str("No job listings to match.\n");
        }
        for job_match in &report.matches {
            output.push_str(&self.format_job_match(job_match));
        }

        output
    }

    fn format_keywords(&self, report: &KeywordReport) -> String {
        let title = match report.mode {
            ExtractionMode::FreeText => "KEYWORDS",
            ExtractionMode::Curated => "CURATED KEYWORDS",
        };
        let mut output = self.format_header(title, 1);
        output.push_str(&format!("Source: {} ({} keywords)\n\n", report.source, report.keywords.len()));

        for (i, keyword) in report.keywords.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, keyword));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Scan(scan) => self.format_scan(scan),
            Report::JobMatches(jobs) => self.format_job_matches(jobs),
            Report::Keywords(keywords) => self.format_keywords(keywords),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        json.map_err(|e| ScannerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn bullet_list(items: &[String], empty: &str) -> String {
        if items.is_empty() {
            return format!("- {}\n", empty);
        }
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }

    fn format_scan(&self, report: &ScanReport) -> String {
        let mut output = String::from("# Resume Scan Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}` | **Job:** `{}`\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                display_name(&report.resume_source),
                display_name(&report.job_source)
            ));
        }

        output.push_str(&format!(
            "## {}% Match ({})\n\n{}\n\n",
            report.result.score,
            ScoreBand::from_score(report.result.score).label(),
            report.summary_line()
        ));

        output.push_str("### Found Keywords\n\n");
        output.push_str(&Self::bullet_list(&report.result.found, "None"));
        output.push_str("\n### Missing Keywords\n\n");
        output.push_str(&Self::bullet_list(&report.result.missing, "None"));
        output.push_str("\n### Suggestions\n\n");
        output.push_str(&Self::bullet_list(&report.result.suggestions, "No suggestions. Great match!"));

        if !report.near_misses.is_empty() {
            output.push_str("\n### Possible Misspellings\n\n");
            output.push_str("| In resume | Expected | Similarity |\n");
            output.push_str("|-----------|----------|------------|\n");
            for hint in &report.near_misses {
                output.push_str(&format!(
                    "| {} | {} | {:.0}% |\n",
                    hint.candidate,
                    hint.keyword,
                    hint.similarity * 100.0
                ));
            }
        }

        output
    }

    fn format_job_matches(&self, report: &JobMatchReport) -> String {
        let mut output = String::from("# Job Matches\n\n");

        if let Some(title) = &report.dream_job_title {
            output.push_str(&format!("Matching jobs based on your dream job: **{}**\n\n", title));
        }

        output.push_str("| Job | Best Resume | Score |\n");
        output.push_str("|-----|-------------|-------|\n");
        for job_match in &report.matches {
            output.push_str(&format!(
                "| {} | {} | {}% |\n",
                job_match.job.title,
                job_match.best_resume_name.as_deref().unwrap_or("-"),
                job_match.result.score
            ));
        }

        for job_match in &report.matches {
            output.push_str(&format!("\n## {}\n\n", job_match.job.title));
            output.push_str(&format!(
                "**Required Keywords:** {}\n\n",
                job_match.required_keywords.join(", ")
            ));
            output.push_str("**Pros**\n\n");
            output.push_str(&Self::bullet_list(job_match.pros(), "None"));
            output.push_str("\n**Cons**\n\n");
            output.push_str(&Self::bullet_list(job_match.cons(), "No major gaps"));
        }

        output
    }

    fn format_keywords(&self, report: &KeywordReport) -> String {
        let mut output = format!("# Keywords: `{}`\n\n", display_name(&report.source));
        output.push_str(&Self::bullet_list(&report.keywords, "None"));
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Scan(scan) => self.format_scan(scan),
            Report::JobMatches(jobs) => self.format_job_matches(jobs),
            Report::Keywords(keywords) => self.format_keywords(keywords),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_scan{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_scan{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_scan{}.md", base_name, timestamp_suffix),
    }
}
