//! Profile persistence behind a small repository interface

use crate::error::{Result, ScannerError};
use crate::profile::model::Profile;
use log::{debug, info};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key under which the profile record is stored.
pub const PROFILE_KEY: &str = "userProfile";

/// Whole-record load/save of the user profile.
pub trait ProfileRepository {
    /// Stored profile, or `fallback` when nothing is stored yet.
    fn load_profile(&self, fallback: Profile) -> Result<Profile>;

    fn save_profile(&self, profile: &Profile) -> Result<()>;
}

/// A JSON file holding a key-value object; the profile lives under [`PROFILE_KEY`].
pub struct JsonFileProfileRepository {
    path: PathBuf,
}

impl JsonFileProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_store(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(ScannerError::Profile(format!(
                "Store {} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl ProfileRepository for JsonFileProfileRepository {
    fn load_profile(&self, fallback: Profile) -> Result<Profile> {
        let mut store = self.read_store()?;

        match store.remove(PROFILE_KEY) {
            Some(Value::Null) | None => {
                debug!("No stored profile in {}, using fallback", self.path.display());
                Ok(fallback)
            }
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    fn save_profile(&self, profile: &Profile) -> Result<()> {
        let mut store = self.read_store()?;
        store.insert(PROFILE_KEY.to_string(), serde_json::to_value(profile)?);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(store))?;
        std::fs::write(&self.path, content)?;

        info!("Saved profile to {}", self.path.display());
        Ok(())
    }
}

/// Repository kept in memory, mostly for tests and dry runs.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    stored: Mutex<Option<Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            stored: Mutex::new(Some(profile)),
        }
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn load_profile(&self, fallback: Profile) -> Result<Profile> {
        let stored = self
            .stored
            .lock()
            .map_err(|_| ScannerError::Profile("Profile store lock poisoned".to_string()))?;
        Ok(stored.clone().unwrap_or(fallback))
    }

    fn save_profile(&self, profile: &Profile) -> Result<()> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| ScannerError::Profile("Profile store lock poisoned".to_string()))?;
        *stored = Some(profile.clone());
        Ok(())
    }
}
