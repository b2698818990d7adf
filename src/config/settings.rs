//! Configuration management for PistaSecure.

use crate::detection::profile::ProfileChecker;
use crate::detection::scorer::{ScoringConfig, ScoringConfigError};
use crate::detection::tier::Tier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid [{section}] settings: {source}")]
    InvalidScoring {
        section: &'static str,
        #[source]
        source: ScoringConfigError,
    },

    #[error("Invalid [report_log] settings: {0}")]
    InvalidReportLog(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub profile: ProfileConfig,
    pub output: OutputConfig,
    pub report_log: ReportLogSettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` (or the default location), falling back to defaults
    /// when no file exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pistasecure")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .validate()
            .map_err(|source| ConfigError::InvalidScoring {
                section: "scoring",
                source,
            })?;
        self.profile_scoring()
            .validate()
            .map_err(|source| ConfigError::InvalidScoring {
                section: "profile",
                source,
            })?;
        if self.report_log.max_file_bytes == 0 {
            return Err(ConfigError::InvalidReportLog(
                "max_file_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Scoring parameters for usernames: shared thresholds, own amplification.
    pub fn profile_scoring(&self) -> ScoringConfig {
        ScoringConfig {
            amplification_factor: self.profile.amplification_factor,
            ..self.scoring.clone()
        }
    }

    /// Whether a result of this tier should produce a failing exit code.
    pub fn is_failing(&self, tier: Tier) -> bool {
        tier >= self.output.fail_on
    }

    /// Report log location: configured path or the per-user data directory.
    pub fn report_log_path(&self) -> PathBuf {
        match &self.report_log.path {
            Some(p) => PathBuf::from(p),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pistasecure")
                .join("reports.jsonl"),
        }
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Profile checker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub amplification_factor: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            amplification_factor: ProfileChecker::default_config().amplification_factor,
        }
    }
}

/// CLI output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Lowest tier that makes the CLI exit non-zero
    pub fail_on: Tier,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fail_on: Tier::Suspicious,
        }
    }
}

/// Report log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLogSettings {
    /// Log file path; defaults to the user data directory
    pub path: Option<String>,
    /// Rotate once the file reaches this many bytes
    pub max_file_bytes: u64,
    /// Rotated files to keep
    pub max_rotated_files: u32,
}

impl Default for ReportLogSettings {
    fn default() -> Self {
        Self {
            path: None,
            max_file_bytes: 5 * 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}
