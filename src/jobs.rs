//! Job matching against the resumes stored in a profile

use crate::error::{Result, ScannerError};
use crate::processing::analyzer::ScanEngine;
use crate::processing::keyword_set::KeywordSet;
use crate::processing::matcher::{KeywordSource, MatchResult};
use crate::profile::model::{Profile, ResumeEntry};
use crate::profile::repository::ProfileRepository;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
}

/// Best resume for one listing and how well it fits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub job: JobListing,
    /// Curated keywords required by the listing
    pub required_keywords: Vec<String>,
    pub best_resume_id: Option<u32>,
    pub best_resume_name: Option<String>,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatchReport {
    /// Title of the active dream job, if the listings came from it
    pub dream_job_title: Option<String>,
    pub matches: Vec<JobMatch>,
}

/// Resume keywords normalised for comparison with curated terms.
struct NormalizedResume<'a> {
    entry: &'a ResumeEntry,
    keywords: Vec<String>,
}

impl KeywordSource for NormalizedResume<'_> {
    fn name(&self) -> &str {
        &self.entry.name
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl JobMatch {
    /// Strong points of the chosen resume.
    pub fn pros(&self) -> &[String] {
        &self.result.found
    }

    /// Required keywords the chosen resume lacks.
    pub fn cons(&self) -> &[String] {
        &self.result.missing
    }
}

/// Read a JSON array of listings.
pub fn load_job_listings(path: &Path) -> Result<Vec<JobListing>> {
    let content = std::fs::read_to_string(path)?;
    let listings: Vec<JobListing> = serde_json::from_str(&content)?;
    info!("Loaded {} job listings from {}", listings.len(), path.display());
    Ok(listings)
}

pub struct JobMatchService<'e> {
    engine: &'e ScanEngine,
}

impl<'e> JobMatchService<'e> {
    pub fn new(engine: &'e ScanEngine) -> Self {
        Self { engine }
    }

    /// Match one listing against every resume in the profile.
    pub fn match_listing(&self, profile: &Profile, job: &JobListing) -> JobMatch {
        let required = self.engine.curated_keywords(&job.description);
        debug!("Listing '{}' requires {:?}", job.title, required);

        let resumes = normalized_resumes(profile);
        let best = self.engine.matcher().best_candidate(&required, &resumes);

        let result = match best {
            Some(resume) => {
                let candidate: KeywordSet = resume.keywords.iter().cloned().collect();
                self.engine.matcher().match_keywords(&required, &candidate)
            }
            None => MatchResult::empty(),
        };

        JobMatch {
            job: job.clone(),
            required_keywords: required,
            best_resume_id: best.map(|r| r.entry.id),
            best_resume_name: best.map(|r| r.entry.name.clone()),
            result,
        }
    }

    pub fn match_listings(&self, profile: &Profile, jobs: &[JobListing]) -> JobMatchReport {
        JobMatchReport {
            dream_job_title: None,
            matches: jobs.iter().map(|job| self.match_listing(profile, job)).collect(),
        }
    }

    /// Match the profile's active dream job as a single listing.
    pub fn match_dream_job(&self, profile: &Profile) -> Result<JobMatchReport> {
        let dream_job = profile.active_dream_job().ok_or_else(|| {
            ScannerError::InvalidInput(
                "No active dream job; add one and activate it in your profile".to_string(),
            )
        })?;

        let listing = JobListing {
            id: dream_job.id,
            title: dream_job.title.clone(),
            company: String::new(),
            location: String::new(),
            description: dream_job.description.clone(),
        };

        let mut report = self.match_listings(profile, std::slice::from_ref(&listing));
        report.dream_job_title = Some(dream_job.title.clone());
        Ok(report)
    }

    /// Recompute a resume's score against the active dream job and persist it.
    pub fn rescan_resume<R: ProfileRepository + ?Sized>(
        &self,
        repository: &R,
        fallback: Profile,
        resume_id: u32,
    ) -> Result<MatchResult> {
        let mut profile = repository.load_profile(fallback)?;

        let dream_job = profile.active_dream_job().ok_or_else(|| {
            ScannerError::InvalidInput("No active dream job to score against".to_string())
        })?;
        let resume = profile
            .resume(resume_id)
            .ok_or_else(|| ScannerError::NotFound(format!("Resume {}", resume_id)))?;

        let required = self.engine.curated_keywords(&dream_job.description);
        let candidate: KeywordSet = resume.keywords.iter().map(|k| k.to_lowercase()).collect();
        let result = self.engine.matcher().match_keywords(&required, &candidate);

        profile.set_resume_score(resume_id, result.score)?;
        repository.save_profile(&profile)?;

        info!("Rescanned resume {}: score {}", resume_id, result.score);
        Ok(result)
    }
}

fn normalized_resumes(profile: &Profile) -> Vec<NormalizedResume<'_>> {
    profile
        .resumes
        .iter()
        .map(|entry| NormalizedResume {
            entry,
            keywords: entry.keywords.iter().map(|k| k.to_lowercase()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::ResumeStatus;
    use crate::profile::repository::InMemoryProfileRepository;

    fn listing(title: &str, description: &str) -> JobListing {
        JobListing {
            id: 1,
            title: title.to_string(),
            company: "TechCorp Inc.".to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_best_resume_is_chosen_case_insensitively() {
        let engine = ScanEngine::with_defaults().unwrap();
        let service = JobMatchService::new(&engine);
        let profile = Profile::sample();

        let job = listing(
            "Data Scientist",
            "Help us build predictive models. Strong Python, SQL and statistics background required.",
        );
        let matched = service.match_listing(&profile, &job);

        assert_eq!(matched.required_keywords, vec!["python", "sql", "statistics"]);
        assert_eq!(matched.best_resume_name.as_deref(), Some("Data Scientist Resume"));
        assert_eq!(matched.pros(), &["python", "sql"]);
        assert_eq!(matched.cons(), &["statistics"]);
        assert_eq!(matched.result.score, 67);
    }

    #[test]
    fn test_no_resumes_gives_empty_result() {
        let engine = ScanEngine::with_defaults().unwrap();
        let service = JobMatchService::new(&engine);

        let matched = service.match_listing(&Profile::default(), &listing("Dev", "React and AWS"));
        assert!(matched.best_resume_id.is_none());
        assert_eq!(matched.result.score, 0);
        assert_eq!(matched.required_keywords, vec!["react", "aws"]);
    }

    #[test]
    fn test_dream_job_matching_requires_active_job() {
        let engine = ScanEngine::with_defaults().unwrap();
        let service = JobMatchService::new(&engine);

        let mut profile = Profile::sample();
        let report = service.match_dream_job(&profile).unwrap();
        assert_eq!(report.dream_job_title.as_deref(), Some("Lead AI Engineer"));
        assert_eq!(report.matches.len(), 1);

        profile.active_dream_job_id = None;
        assert!(service.match_dream_job(&profile).is_err());
    }

    #[test]
    fn test_rescan_is_deterministic_and_persisted() {
        let engine = ScanEngine::with_defaults().unwrap();
        let service = JobMatchService::new(&engine);

        let mut profile = Profile::sample();
        let job_id = profile
            .add_dream_job("Full Stack Engineer", "React, Node.js, AWS and TypeScript.")
            .unwrap();
        profile.set_active_dream_job(job_id).unwrap();
        let repo = InMemoryProfileRepository::with_profile(profile);

        let first = service.rescan_resume(&repo, Profile::default(), 1).unwrap();
        let second = service.rescan_resume(&repo, Profile::default(), 1).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.found, vec!["react", "node.js"]);
        assert_eq!(first.score, 50);

        let stored = repo.load_profile(Profile::default()).unwrap();
        assert_eq!(stored.resume(1).unwrap().score, 50);
        assert_eq!(stored.resume(1).unwrap().status, ResumeStatus::Active);
    }

    #[test]
    fn test_load_listings_from_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(&path, r#"[{"title": "PM", "description": "Agile analytics"}]"#).unwrap();

        let jobs = load_job_listings(&path).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "");
    }
}
