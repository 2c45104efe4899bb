//! User profile record: resumes, dream jobs and skills

use crate::error::{Result, ScannerError};
use crate::processing::matcher::KeywordSource;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resumes: Vec<ResumeEntry>,
    #[serde(default)]
    pub dream_jobs: Vec<DreamJob>,
    #[serde(default)]
    pub active_dream_job_id: Option<u32>,

    /// Fields this tool does not interpret, kept as-is on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
    #[serde(default)]
    pub score: u8,
    #[serde(default)]
    pub status: ResumeStatus,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeStatus {
    #[default]
    Active,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamJob {
    pub id: u32,
    pub title: String,
    pub description: String,
}

impl fmt::Display for ResumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeStatus::Active => write!(f, "Active"),
            ResumeStatus::Draft => write!(f, "Draft"),
        }
    }
}

impl std::str::FromStr for ResumeStatus {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ResumeStatus::Active),
            "draft" => Ok(ResumeStatus::Draft),
            other => Err(ScannerError::InvalidInput(format!(
                "Invalid resume status: {}. Supported: active, draft",
                other
            ))),
        }
    }
}

impl KeywordSource for ResumeEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Split a comma-separated keyword list, trimming and dropping blanks.
pub fn parse_keyword_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Dashboard fields of the starter profile that this tool only carries along.
fn sample_extra() -> Map<String, Value> {
    let extra = json!({
        "stats": {
            "resumesScanned": 24,
            "jobsMatched": 156,
            "applicationsSubmitted": 12,
            "interviewsScheduled": 3
        },
        "values": ["Innovation", "Teamwork", "Growth"],
        "interests": ["AI", "Web Development", "Startups"],
        "workExperiences": [
            { "role": "Software Engineer", "company": "TechCorp", "years": "2019-2022" },
            { "role": "Frontend Developer", "company": "Webify", "years": "2017-2019" }
        ],
        "dreamOrgs": ["OpenAI", "Google", "Tesla"],
        "webSources": [
            "https://linkedin.com/jobs",
            "https://indeed.com",
            "https://openai.com/careers"
        ],
        "meta": {
            "salaryMin": 120000,
            "salaryMax": 150000,
            "location": "San Francisco, CA",
            "workType": "Hybrid",
            "employerType": "Private",
            "sector": "Technology"
        }
    });

    match extra {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

impl Profile {
    /// Starter profile used when nothing has been stored yet.
    pub fn sample() -> Self {
        let resume = |id, name: &str, date: (i32, u32, u32), score, status, keywords: &[&str]| ResumeEntry {
            id,
            name: name.to_string(),
            last_updated: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            score,
            status,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };

        Self {
            name: "Sarah Johnson".to_string(),
            title: "Senior Software Engineer".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            location: "San Francisco, CA".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            skills: vec!["React".to_string(), "Node.js".to_string(), "Python".to_string()],
            resumes: vec![
                resume(1, "Software Engineer Resume", (2024, 1, 15), 87, ResumeStatus::Active, &["React", "Node.js", "Python"]),
                resume(2, "Product Manager Resume", (2024, 1, 10), 92, ResumeStatus::Active, &["Product", "Agile", "Analytics"]),
                resume(3, "Data Scientist Resume", (2023, 12, 20), 78, ResumeStatus::Draft, &["Python", "ML", "SQL"]),
            ],
            dream_jobs: vec![DreamJob {
                id: 1,
                title: "Lead AI Engineer".to_string(),
                description: "Work on cutting-edge AI products.".to_string(),
            }],
            active_dream_job_id: Some(1),
            extra: sample_extra(),
        }
    }

    pub fn resume(&self, id: u32) -> Option<&ResumeEntry> {
        self.resumes.iter().find(|r| r.id == id)
    }

    pub fn dream_job(&self, id: u32) -> Option<&DreamJob> {
        self.dream_jobs.iter().find(|j| j.id == id)
    }

    pub fn active_dream_job(&self) -> Option<&DreamJob> {
        self.active_dream_job_id.and_then(|id| self.dream_job(id))
    }

    /// Add a resume and return its new id.
    pub fn add_resume(&mut self, name: &str, keywords: Vec<String>, status: ResumeStatus) -> Result<u32> {
        let (name, keywords) = validate_resume(name, keywords)?;
        let id = next_id(self.resumes.iter().map(|r| r.id));

        self.resumes.push(ResumeEntry {
            id,
            name,
            last_updated: Some(today()),
            score: 0,
            status,
            keywords,
        });
        Ok(id)
    }

    pub fn update_resume(&mut self, id: u32, name: &str, keywords: Vec<String>, status: ResumeStatus) -> Result<()> {
        let (name, keywords) = validate_resume(name, keywords)?;
        let resume = self.resume_mut(id)?;

        resume.name = name;
        resume.keywords = keywords;
        resume.status = status;
        resume.last_updated = Some(today());
        Ok(())
    }

    pub fn remove_resume(&mut self, id: u32) -> Result<ResumeEntry> {
        let idx = self
            .resumes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ScannerError::NotFound(format!("Resume {}", id)))?;
        Ok(self.resumes.remove(idx))
    }

    /// Record a freshly computed score for a resume.
    pub fn set_resume_score(&mut self, id: u32, score: u8) -> Result<()> {
        let resume = self.resume_mut(id)?;
        resume.score = score.min(100);
        resume.last_updated = Some(today());
        Ok(())
    }

    pub fn add_dream_job(&mut self, title: &str, description: &str) -> Result<u32> {
        let (title, description) = validate_dream_job(title, description)?;
        let id = next_id(self.dream_jobs.iter().map(|j| j.id));

        self.dream_jobs.push(DreamJob { id, title, description });
        Ok(id)
    }

    pub fn update_dream_job(&mut self, id: u32, title: &str, description: &str) -> Result<()> {
        let (title, description) = validate_dream_job(title, description)?;
        let job = self
            .dream_jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| ScannerError::NotFound(format!("Dream job {}", id)))?;

        job.title = title;
        job.description = description;
        Ok(())
    }

    /// Remove a dream job; removing the active one leaves none active.
    pub fn remove_dream_job(&mut self, id: u32) -> Result<DreamJob> {
        let idx = self
            .dream_jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| ScannerError::NotFound(format!("Dream job {}", id)))?;

        if self.active_dream_job_id == Some(id) {
            self.active_dream_job_id = None;
        }
        Ok(self.dream_jobs.remove(idx))
    }

    pub fn set_active_dream_job(&mut self, id: u32) -> Result<()> {
        if self.dream_job(id).is_none() {
            return Err(ScannerError::NotFound(format!("Dream job {}", id)));
        }
        self.active_dream_job_id = Some(id);
        Ok(())
    }

    /// Returns `false` if the skill was already listed.
    pub fn add_skill(&mut self, skill: &str) -> Result<bool> {
        let skill = skill.trim();
        if skill.is_empty() {
            return Err(ScannerError::InvalidInput("Skill cannot be empty".to_string()));
        }
        if self.skills.iter().any(|s| s == skill) {
            return Ok(false);
        }
        self.skills.push(skill.to_string());
        Ok(true)
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill.trim());
        self.skills.len() != before
    }

    fn resume_mut(&mut self, id: u32) -> Result<&mut ResumeEntry> {
        self.resumes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ScannerError::NotFound(format!("Resume {}", id)))
    }
}

fn validate_resume(name: &str, keywords: Vec<String>) -> Result<(String, Vec<String>)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScannerError::InvalidInput("Resume name cannot be empty".to_string()));
    }

    let keywords: Vec<String> = keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(ScannerError::InvalidInput("A resume needs at least one keyword".to_string()));
    }

    Ok((name.to_string(), keywords))
}

fn validate_dream_job(title: &str, description: &str) -> Result<(String, String)> {
    let (title, description) = (title.trim(), description.trim());
    if title.is_empty() || description.is_empty() {
        return Err(ScannerError::InvalidInput(
            "A dream job needs both a title and a description".to_string(),
        ));
    }
    Ok((title.to_string(), description.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_follow_the_maximum() {
        let mut profile = Profile::sample();
        profile.remove_resume(2).unwrap();

        let id = profile
            .add_resume("Backend Resume", parse_keyword_list("Rust, , Go "), ResumeStatus::Draft)
            .unwrap();

        assert_eq!(id, 4);
        let added = profile.resume(id).unwrap();
        assert_eq!(added.keywords, vec!["Rust", "Go"]);
        assert_eq!(added.score, 0);
        assert_eq!(added.last_updated, Some(today()));

        let mut empty = Profile::default();
        assert_eq!(empty.add_dream_job("SRE", "Keep things up").unwrap(), 1);
    }

    #[test]
    fn test_resume_validation() {
        let mut profile = Profile::default();
        assert!(profile.add_resume("  ", vec!["Rust".to_string()], ResumeStatus::Active).is_err());
        assert!(profile.add_resume("CV", parse_keyword_list(" , "), ResumeStatus::Active).is_err());
        assert!(profile.update_resume(9, "CV", vec!["Go".to_string()], ResumeStatus::Active).is_err());
    }

    #[test]
    fn test_removing_active_dream_job_clears_selection() {
        let mut profile = Profile::sample();
        let second = profile.add_dream_job("Staff Engineer", "Platform work").unwrap();

        profile.remove_dream_job(second).unwrap();
        assert_eq!(profile.active_dream_job_id, Some(1));

        profile.remove_dream_job(1).unwrap();
        assert_eq!(profile.active_dream_job_id, None);
        assert!(profile.active_dream_job().is_none());
    }

    #[test]
    fn test_activate_unknown_dream_job_fails() {
        let mut profile = Profile::sample();
        assert!(matches!(profile.set_active_dream_job(42), Err(ScannerError::NotFound(_))));
        assert_eq!(profile.active_dream_job_id, Some(1));
    }

    #[test]
    fn test_skills() {
        let mut profile = Profile::sample();
        assert!(profile.add_skill(" Kotlin ").unwrap());
        assert!(!profile.add_skill("Kotlin").unwrap());
        assert!(profile.add_skill("   ").is_err());
        assert!(profile.remove_skill("Kotlin"));
        assert!(!profile.remove_skill("Cobol"));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let json = r#"{
            "name": "Sam",
            "resumes": [{"id": 1, "name": "CV", "lastUpdated": "2024-01-15", "score": 87, "status": "Draft", "keywords": ["SQL"]}],
            "dreamJobs": [],
            "activeDreamJobId": null,
            "stats": {"jobsMatched": 156},
            "dreamOrgs": ["OpenAI"]
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.resumes[0].status, ResumeStatus::Draft);
        assert_eq!(profile.resumes[0].last_updated, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert!(profile.extra.contains_key("stats"));

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["stats"]["jobsMatched"], 156);
        assert_eq!(value["dreamOrgs"][0], "OpenAI");
        assert!(value.get("activeDreamJobId").is_some());
    }

    #[test]
    fn test_sample_carries_dashboard_fields() {
        let value = serde_json::to_value(Profile::sample()).unwrap();

        for key in ["stats", "values", "interests", "workExperiences", "dreamOrgs", "webSources", "meta"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["stats"]["jobsMatched"], 156);
        assert_eq!(value["workExperiences"][1]["company"], "Webify");
        assert_eq!(value["meta"]["workType"], "Hybrid");
        assert_eq!(value["activeDreamJobId"], 1);
        assert_eq!(value["resumes"][2]["status"], "Draft");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Draft".parse::<ResumeStatus>().unwrap(), ResumeStatus::Draft);
        assert!("archived".parse::<ResumeStatus>().is_err());
    }
}
