//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hours_core::{
    ConfigError, DEFAULT_FIRST_COMMIT_BONUS_MINUTES, DEFAULT_MAX_SESSION_GAP_MINUTES,
    DEFAULT_WORK_END, DEFAULT_WORK_START, EstimateConfig,
};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub max_session_gap_minutes: u32,
    pub first_commit_bonus_minutes: u32,
    /// Start of the work window, `HH:MM`.
    pub work_start: String,
    /// End of the work window, `HH:MM`.
    pub work_end: String,
    pub skip_weekends: bool,
    /// Repository to read history from.
    pub repo_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_session_gap_minutes: DEFAULT_MAX_SESSION_GAP_MINUTES,
            first_commit_bonus_minutes: DEFAULT_FIRST_COMMIT_BONUS_MINUTES,
            work_start: DEFAULT_WORK_START.to_string(),
            work_end: DEFAULT_WORK_END.to_string(),
            skip_weekends: false,
            repo_path: PathBuf::from("."),
            author: None,
        }
    }
}

/// Values set explicitly on the command line. Unset fields leave the lower
/// layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_session_gap_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_commit_bonus_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_weekends: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Config {
    /// Loads configuration, optionally from a specific file, with
    /// command-line overrides applied last.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (GIT_HOURS_*)
        figment = figment.merge(Env::prefixed("GIT_HOURS_"));

        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract()
    }

    /// Validates the estimation settings.
    pub fn estimate_config(&self) -> Result<EstimateConfig, ConfigError> {
        let config = EstimateConfig::new(
            self.max_session_gap_minutes,
            self.first_commit_bonus_minutes,
            &self.work_start,
            &self.work_end,
            self.skip_weekends,
        )?;
        Ok(config.with_author(self.author.clone()))
    }
}

/// Returns the platform-specific config directory for git-hours.
///
/// On Linux: `~/.config/git-hours`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("git-hours"))
}
