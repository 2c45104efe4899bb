//! Integration tests for the resume scanner

use resume_scanner::input::InputManager;
use resume_scanner::jobs::{load_job_listings, JobMatchService};
use resume_scanner::output::{Report, ReportGenerator};
use resume_scanner::config::OutputFormat;
use resume_scanner::processing::analyzer::ScanEngine;
use resume_scanner::profile::{JsonFileProfileRepository, Profile, ProfileRepository, ResumeStatus};
use resume_scanner::ScannerError;
use std::path::Path;
use tempfile::TempDir;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    // Second extraction should use cache
    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_cache_can_be_disabled_and_cleared() {
    let path = Path::new("tests/fixtures/sample_resume.md");

    let mut uncached = InputManager::new().with_cache(false);
    uncached.extract_text(path).await.unwrap();
    assert_eq!(uncached.cache_size(), 0);

    let mut cached = InputManager::new();
    cached.extract_text(path).await.unwrap();
    cached.clear_cache();
    assert_eq!(cached.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text_or_empty(path).await;
    assert!(matches!(result, Err(ScannerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text_or_empty(path).await;
    assert!(matches!(result, Err(ScannerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_corrupt_pdf_degrades_to_empty_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"this is not a pdf").unwrap();

    let mut manager = InputManager::new();
    let text = manager.extract_text_or_empty(&path).await.unwrap();
    assert!(text.is_empty());

    let engine = ScanEngine::with_defaults().unwrap();
    let report = engine.scan(&text, "React developer", "broken.pdf", "inline");
    assert_eq!(report.result.score, 0);
    assert_eq!(report.result.missing, vec!["react", "developer"]);
}

#[tokio::test]
async fn test_scan_resume_against_job_file() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let engine = ScanEngine::with_defaults().unwrap();
    let scan = engine.scan(&resume, &job, "sample_resume.txt", "sample_job.txt");

    for keyword in ["react", "nodejs", "aws", "docker"] {
        assert!(scan.result.found.iter().any(|k| k == keyword), "expected {} found", keyword);
    }
    for keyword in ["kubernetes", "graphql"] {
        assert!(scan.result.missing.iter().any(|k| k == keyword), "expected {} missing", keyword);
    }
    assert!(scan.result.score > 0 && scan.result.score < 100);
    assert_eq!(scan.result.suggestions.len(), scan.result.missing.len());
    assert!(scan
        .result
        .suggestions
        .contains(&"Add or highlight \"kubernetes\" in your resume.".to_string()));

    let json = ReportGenerator::new()
        .generate_report(&Report::Scan(scan), &OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "scan");
    assert_eq!(value["resume_source"], "sample_resume.txt");
}

#[test]
fn test_match_listings_from_file() {
    let listings = load_job_listings(Path::new("tests/fixtures/jobs.json")).unwrap();
    assert_eq!(listings.len(), 2);

    let engine = ScanEngine::with_defaults().unwrap();
    let service = JobMatchService::new(&engine);
    let report = service.match_listings(&Profile::sample(), &listings);

    let full_stack = &report.matches[0];
    assert_eq!(full_stack.required_keywords, vec!["react", "node.js", "aws", "docker"]);
    assert_eq!(full_stack.best_resume_name.as_deref(), Some("Software Engineer Resume"));
    assert_eq!(full_stack.pros(), &["react", "node.js"]);
    assert_eq!(full_stack.cons(), &["aws", "docker"]);
    assert_eq!(full_stack.result.score, 50);

    let analyst = &report.matches[1];
    assert_eq!(analyst.best_resume_name.as_deref(), Some("Data Scientist Resume"));
    assert_eq!(analyst.pros(), &["python", "sql"]);
    assert_eq!(analyst.result.score, 40);
}

#[test]
fn test_profile_lifecycle_on_disk() {
    let dir = TempDir::new().unwrap();
    let repository = JsonFileProfileRepository::new(dir.path().join("store.json"));

    let mut profile = repository.load_profile(Profile::sample()).unwrap();
    let resume_id = profile
        .add_resume("Cloud Resume", vec!["AWS".into(), "Docker".into(), "Kubernetes".into()], ResumeStatus::Draft)
        .unwrap();
    assert_eq!(resume_id, 4);

    let job_id = profile
        .add_dream_job("Platform Engineer", "Kubernetes, Docker, Terraform and AWS at scale.")
        .unwrap();
    profile.set_active_dream_job(job_id).unwrap();
    repository.save_profile(&profile).unwrap();

    let engine = ScanEngine::with_defaults().unwrap();
    let service = JobMatchService::new(&engine);
    let result = service.rescan_resume(&repository, Profile::default(), resume_id).unwrap();

    assert_eq!(result.found, vec!["aws", "docker", "kubernetes"]);
    assert_eq!(result.missing, vec!["terraform"]);
    assert_eq!(result.score, 75);

    let mut stored = repository.load_profile(Profile::default()).unwrap();
    assert_eq!(stored.resume(resume_id).unwrap().score, 75);

    stored.remove_dream_job(job_id).unwrap();
    assert!(stored.active_dream_job_id.is_none());
    assert!(matches!(
        service.match_dream_job(&stored),
        Err(ScannerError::InvalidInput(_))
    ));
}
