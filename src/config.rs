use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};

use crate::core::{JsonProfileStore, PairMatching, ProfileError};

pub const DATA_DIR_ENV: &str = "LIFESYNC_DATA_DIR";
pub const DEFAULT_RETAKE_AFTER_DAYS: i64 = 90;
pub const MAX_RETAKE_AFTER_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// How dominant pairs are matched to personality types
    #[serde(default)]
    pub pair_matching: PairMatching,
    /// Days after which the current profile is considered stale
    #[serde(default = "default_retake_after_days")]
    pub retake_after_days: i64,
}

fn default_retake_after_days() -> i64 {
    DEFAULT_RETAKE_AFTER_DAYS
}

impl Config {
    /// Load `config.json` from the data directory, writing defaults if absent.
    ///
    /// Directory resolution: explicit argument, then `LIFESYNC_DATA_DIR`,
    /// then `<config dir>/lifesync`.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                tracing::warn!(path = %config_path.display(), "config file is empty, recreating defaults");
            } else {
                let mut config: Config = serde_json::from_str(&config_str)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                config.data_dir = data_dir;
                config.validate()?;
                return Ok(config);
            }
        }

        let config = Self::default_config(data_dir);
        config.save()?;
        tracing::info!(path = %config_path.display(), "created default config");

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.config_file();
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            pair_matching: PairMatching::default(),
            retake_after_days: DEFAULT_RETAKE_AFTER_DAYS,
        }
    }

    fn validate(&self) -> crate::core::Result<()> {
        if !(0..=MAX_RETAKE_AFTER_DAYS).contains(&self.retake_after_days) {
            return Err(ProfileError::Config(format!(
                "retake_after_days must be between 0 and {} (got {})",
                MAX_RETAKE_AFTER_DAYS, self.retake_after_days
            )));
        }
        Ok(())
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn open_store(&self) -> Result<JsonProfileStore> {
        JsonProfileStore::open(&self.data_dir)
            .with_context(|| format!("Failed to open profile store in {}", self.data_dir.display()))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lifesync")
}
