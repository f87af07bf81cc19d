//! Game configuration — reveal timing and file locations.
//!
//! User-level config: `~/.memory-master/config.yaml`
//!
//! Resolution: `--config` path → user config → built-in defaults.
//! A missing file is not an error; a malformed one is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::RevealTiming;
use crate::score::HIGH_SCORE_FILE;

/// Name of the per-user data directory under `$HOME`.
const DATA_DIR_NAME: &str = ".memory-master";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Reveal timing, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    /// How long each digit stays on screen.
    pub digit_on_ms: u64,
    /// Blank gap after each digit.
    pub digit_off_ms: u64,
    /// Pause after a correct answer before the next round.
    pub advance_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            digit_on_ms: 700,
            digit_off_ms: 300,
            advance_delay_ms: 2000,
        }
    }
}

impl From<&TimingConfig> for RevealTiming {
    fn from(t: &TimingConfig) -> Self {
        Self {
            digit_on: Duration::from_millis(t.digit_on_ms),
            digit_off: Duration::from_millis(t.digit_off_ms),
            advance_delay: Duration::from_millis(t.advance_delay_ms),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub timing: TimingConfig,
    /// Override for the high-score file. Defaults to `<data dir>/memory_high_score`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_score_file: Option<PathBuf>,
}

/// Path to `~/.memory-master/`.
pub fn default_data_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(DATA_DIR_NAME))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(DATA_DIR_NAME))
    }
}

impl GameConfig {
    /// Load from an explicit path, or `<data dir>/config.yaml` when `None`.
    /// Falls back to defaults when no file exists.
    pub fn load(explicit: Option<&Path>, data_dir: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => data_dir.join("config.yaml"),
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_yaml(&content),
            // An explicitly named file must exist.
            Err(source) if explicit.is_some() => Err(ConfigError::FileRead { path, source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::FileRead { path, source }),
        }
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // Empty file deserializes as unit, not a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the effective config (for `memory-master config`).
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.digit_on_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.digit_on_ms must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn reveal_timing(&self) -> RevealTiming {
        RevealTiming::from(&self.timing)
    }

    /// Where the high score is stored.
    pub fn high_score_path(&self, data_dir: &Path) -> PathBuf {
        self.high_score_file
            .clone()
            .unwrap_or_else(|| data_dir.join(HIGH_SCORE_FILE))
    }
}
