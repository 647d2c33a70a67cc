use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{ProfileError, Result};
use super::profile::PersonalityProfile;

pub const PROFILES_FILE: &str = "profiles.json";

/// Storage for completed quiz profiles: an append-only history plus a
/// "current profile" slot.
pub trait ProfileRepository {
    /// Append to history and make it the current profile
    fn save(&mut self, profile: &PersonalityProfile) -> Result<()>;

    fn current(&self) -> Option<&PersonalityProfile>;

    /// All stored profiles, oldest first
    fn history(&self) -> &[PersonalityProfile];

    fn has_completed_quiz(&self) -> bool;

    /// Forget every stored profile
    fn clear(&mut self) -> Result<()>;

    fn get(&self, id: &str) -> Result<&PersonalityProfile> {
        self.history()
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))
    }

    /// Most recent first
    fn recent(&self, limit: usize) -> Vec<&PersonalityProfile> {
        self.history().iter().rev().take(limit).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileData {
    #[serde(default)]
    current: Option<PersonalityProfile>,
    #[serde(default)]
    history: Vec<PersonalityProfile>,
    #[serde(default)]
    has_completed_quiz: bool,
}

impl ProfileData {
    fn push(&mut self, profile: &PersonalityProfile) -> Result<()> {
        if self.history.iter().any(|p| p.id == profile.id) {
            return Err(ProfileError::DuplicateProfile(profile.id.clone()));
        }
        self.history.push(profile.clone());
        self.current = Some(profile.clone());
        self.has_completed_quiz = true;
        Ok(())
    }
}

/// Profiles kept in process memory only
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    data: ProfileData,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileRepository for InMemoryProfileStore {
    fn save(&mut self, profile: &PersonalityProfile) -> Result<()> {
        self.data.push(profile)
    }

    fn current(&self) -> Option<&PersonalityProfile> {
        self.data.current.as_ref()
    }

    fn history(&self) -> &[PersonalityProfile] {
        &self.data.history
    }

    fn has_completed_quiz(&self) -> bool {
        self.data.has_completed_quiz
    }

    fn clear(&mut self) -> Result<()> {
        self.data = ProfileData::default();
        Ok(())
    }
}

/// Profiles persisted as one JSON document
pub struct JsonProfileStore {
    path: PathBuf,
    data: ProfileData,
}

impl JsonProfileStore {
    /// Open the store in `data_dir`, creating the directory if needed
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(PROFILES_FILE);

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                ProfileData::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            ProfileData::default()
        };

        tracing::debug!(path = %path.display(), profiles = data.history.len(), "loaded profile store");

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.data)?;

        // Write to a sibling temp file, then rename over the original
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl ProfileRepository for JsonProfileStore {
    fn save(&mut self, profile: &PersonalityProfile) -> Result<()> {
        self.data.push(profile)?;
        self.persist()?;
        tracing::info!(id = %profile.id, personality_type = %profile.personality_type, "saved profile");
        Ok(())
    }

    fn current(&self) -> Option<&PersonalityProfile> {
        self.data.current.as_ref()
    }

    fn history(&self) -> &[PersonalityProfile] {
        &self.data.history
    }

    fn has_completed_quiz(&self) -> bool {
        self.data.has_completed_quiz
    }

    fn clear(&mut self) -> Result<()> {
        self.data = ProfileData::default();
        self.persist()?;
        tracing::info!(path = %self.path.display(), "cleared profile store");
        Ok(())
    }
}
