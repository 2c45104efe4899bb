//! Resume scanner: resume keyword scanning and job matching tool

use clap::Parser;
use log::{error, info};
use resume_scanner::cli::{self, Cli, Commands, ConfigAction, JobInput, ProfileAction, ResumeInput};
use resume_scanner::config::{Config, OutputFormat};
use resume_scanner::input::file_detector::SUPPORTED_EXTENSIONS;
use resume_scanner::input::InputManager;
use resume_scanner::jobs::{load_job_listings, JobMatchService};
use resume_scanner::output::{
    save_report_to_file, suggest_filename, ExtractionMode, KeywordReport, Report, ReportGenerator,
};
use resume_scanner::processing::analyzer::ScanEngine;
use resume_scanner::profile::{
    parse_keyword_list, JsonFileProfileRepository, Profile, ProfileRepository, ResumeStatus,
};
use resume_scanner::{Result, ScannerError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Scan {
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            info!("Starting resume scan");
            let output_format = resolve_format(output.as_deref(), &config)?;

            let mut input_manager = InputManager::new();
            let (resume_text, resume_source) = read_resume(&mut input_manager, resume).await?;
            let (job_text, job_source) = read_job(&mut input_manager, job).await?;

            let engine = ScanEngine::new(&config)?;
            let report = Report::Scan(engine.scan(&resume_text, &job_text, &resume_source, &job_source));

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let content = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, report.source_name(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Keywords {
            file,
            curated,
            max,
            output,
        } => {
            let output_format = resolve_format(output.as_deref(), &config)?;
            validate_document(&file, "Document")?;

            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text_or_empty(&file).await?;

            let engine = ScanEngine::new(&config)?;
            let (mode, keywords) = if curated {
                let max = max.unwrap_or_else(|| engine.max_curated_keywords());
                (ExtractionMode::Curated, engine.vocabulary().extract(&text, max))
            } else {
                let keywords = match max {
                    Some(max) => engine.extractor().extract_top(&text, max),
                    None => engine.extractor().extract(&text).into_vec(),
                };
                (ExtractionMode::FreeText, keywords)
            };

            let report = Report::Keywords(KeywordReport {
                source: file.to_string_lossy().to_string(),
                mode,
                keywords,
            });
            let generator = ReportGenerator::with_options(config.output.color_output, false, true, true);
            println!("{}", generator.generate_report(&report, &output_format)?);
        }

        Commands::Match { jobs, output } => {
            let output_format = resolve_format(output.as_deref(), &config)?;
            let repository = JsonFileProfileRepository::new(&config.profile.store_path);
            let profile = repository.load_profile(Profile::sample())?;

            let engine = ScanEngine::new(&config)?;
            let service = JobMatchService::new(&engine);

            let report = match jobs {
                Some(path) => {
                    let listings = load_job_listings(&path)?;
                    service.match_listings(&profile, &listings)
                }
                None => service.match_dream_job(&profile)?,
            };

            let generator =
                ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, true);
            println!("{}", generator.generate_report(&Report::JobMatches(report), &output_format)?);
        }

        Commands::Profile { action } => run_profile_action(action, &config)?,

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config File: {}", config_path.display());
                println!("Profile Store: {}", config.profile.store_path.display());
                println!("\nExtraction:");
                println!("  Extra stopwords: {}", display_list(&config.extraction.extra_stopwords));
                println!("\nVocabulary:");
                println!("  Extra terms: {}", display_list(&config.vocabulary.extra_terms));
                println!("  Max keywords: {}", config.vocabulary.max_keywords);
                println!("\nMatching:");
                println!("  Near-miss threshold: {:.2}", config.matching.near_miss_threshold);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                println!("🔧 Setting {}: {}", key, value);
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(&config_path)?;
                println!("✅ Configuration updated!");
            }
        },
    }

    Ok(())
}

fn run_profile_action(action: ProfileAction, config: &Config) -> Result<()> {
    let repository = JsonFileProfileRepository::new(&config.profile.store_path);
    let mut profile = repository.load_profile(Profile::sample())?;

    match action {
        ProfileAction::Show => {
            print_profile(&profile);
            return Ok(());
        }

        ProfileAction::AddResume { name, keywords, status } => {
            let status: ResumeStatus = status.parse()?;
            let id = profile.add_resume(&name, parse_keyword_list(&keywords), status)?;
            println!("✅ Added resume {} ({})", id, name.trim());
        }

        ProfileAction::UpdateResume {
            id,
            name,
            keywords,
            status,
        } => {
            let current = profile
                .resume(id)
                .ok_or_else(|| ScannerError::NotFound(format!("Resume {}", id)))?
                .clone();

            let name = name.unwrap_or(current.name);
            let keywords = keywords.map(|k| parse_keyword_list(&k)).unwrap_or(current.keywords);
            let status = match status {
                Some(status) => status.parse()?,
                None => current.status,
            };

            profile.update_resume(id, &name, keywords, status)?;
            println!("✅ Updated resume {}", id);
        }

        ProfileAction::RemoveResume { id } => {
            let removed = profile.remove_resume(id)?;
            println!("🗑️  Removed resume {} ({})", id, removed.name);
        }

        ProfileAction::Rescan { id } => {
            let engine = ScanEngine::new(config)?;
            let service = JobMatchService::new(&engine);
            let result = service.rescan_resume(&repository, Profile::sample(), id)?;

            println!("🔍 Resume {} scored {}%", id, result.score);
            for suggestion in &result.suggestions {
                println!("  • {}", suggestion);
            }
            return Ok(());
        }

        ProfileAction::AddDreamJob { title, description } => {
            let id = profile.add_dream_job(&title, &description)?;
            println!("✅ Added dream job {} ({})", id, title.trim());
        }

        ProfileAction::UpdateDreamJob { id, title, description } => {
            let current = profile
                .dream_job(id)
                .ok_or_else(|| ScannerError::NotFound(format!("Dream job {}", id)))?
                .clone();

            profile.update_dream_job(
                id,
                &title.unwrap_or(current.title),
                &description.unwrap_or(current.description),
            )?;
            println!("✅ Updated dream job {}", id);
        }

        ProfileAction::RemoveDreamJob { id } => {
            let removed = profile.remove_dream_job(id)?;
            println!("🗑️  Removed dream job {} ({})", id, removed.title);
        }

        ProfileAction::Activate { id } => {
            profile.set_active_dream_job(id)?;
            println!("⭐ Dream job {} is now active", id);
        }

        ProfileAction::AddSkill { skill } => {
            if profile.add_skill(&skill)? {
                println!("✅ Added skill {}", skill.trim());
            } else {
                println!("ℹ️  Skill {} is already listed", skill.trim());
            }
        }

        ProfileAction::RemoveSkill { skill } => {
            if profile.remove_skill(&skill) {
                println!("🗑️  Removed skill {}", skill.trim());
            } else {
                println!("ℹ️  Skill {} was not listed", skill.trim());
            }
        }
    }

    repository.save_profile(&profile)
}

fn print_profile(profile: &Profile) {
    println!("👤 {} | {}", profile.name, profile.title);
    println!("📧 {} | 📍 {} | 📞 {}", profile.email, profile.location, profile.phone);
    println!("\nSkills: {}", display_list(&profile.skills));

    println!("\n📄 Resumes:");
    if profile.resumes.is_empty() {
        println!("  (none)");
    }
    for resume in &profile.resumes {
        let updated = resume
            .last_updated
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {}. {} [{}] score {}% | updated {}",
            resume.id, resume.name, resume.status, resume.score, updated
        );
        println!("     Keywords: {}", display_list(&resume.keywords));
    }

    println!("\n💼 Dream Jobs:");
    if profile.dream_jobs.is_empty() {
        println!("  (none)");
    }
    for job in &profile.dream_jobs {
        let marker = if profile.active_dream_job_id == Some(job.id) { " ⭐" } else { "" };
        println!("  {}. {}{}", job.id, job.title, marker);
        println!("     {}", truncate_text(&job.description, 120));
    }
}

async fn read_resume(manager: &mut InputManager, input: ResumeInput) -> Result<(String, String)> {
    match (input.resume, input.resume_text) {
        (Some(path), _) => {
            validate_document(&path, "Resume file")?;
            info!("Processing resume: {}", path.display());
            let text = manager.extract_text_or_empty(&path).await?;
            Ok((text, path.to_string_lossy().to_string()))
        }
        (None, Some(text)) => Ok((text, "inline resume".to_string())),
        (None, None) => Err(ScannerError::InvalidInput("A resume file or text is required".to_string())),
    }
}

async fn read_job(manager: &mut InputManager, input: JobInput) -> Result<(String, String)> {
    match (input.job, input.job_text) {
        (Some(path), _) => {
            validate_document(&path, "Job description file")?;
            info!("Processing job description: {}", path.display());
            let text = manager.extract_text_or_empty(&path).await?;
            Ok((text, path.to_string_lossy().to_string()))
        }
        (None, Some(text)) => Ok((text, "inline job description".to_string())),
        (None, None) => Err(ScannerError::InvalidInput(
            "A job description file or text is required".to_string(),
        )),
    }
}

fn validate_document(path: &Path, label: &str) -> Result<()> {
    cli::validate_file_extension(path, SUPPORTED_EXTENSIONS)
        .map_err(|e| ScannerError::InvalidInput(format!("{}: {}", label, e)))
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(ScannerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    // Cut at the last word boundary
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}
