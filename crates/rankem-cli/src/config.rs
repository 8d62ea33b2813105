//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use rankem_domain::rating::K_FACTOR;
use rankem_domain::{RatingEngine, DEFAULT_SCORE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database file; defaults to `~/.rankem/rankem.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Rating engine parameters
    #[serde(default)]
    pub rating: RatingSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Rating engine parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSettings {
    /// Elo adjustment factor
    #[serde(default = "default_k_factor")]
    pub k_factor: f64,

    /// Score every item is reset to before a rating pass
    #[serde(default = "default_baseline")]
    pub baseline: f64,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file, the database and the REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".rankem"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Database file to open.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("rankem.db")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: K_FACTOR,
            baseline: DEFAULT_SCORE,
        }
    }
}

impl RatingSettings {
    /// Build the rating engine these settings describe.
    pub fn engine(&self) -> Result<RatingEngine> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(CliError::Config(format!(
                "rating.k_factor must be a positive number, got {}",
                self.k_factor
            )));
        }
        if !self.baseline.is_finite() {
            return Err(CliError::Config("rating.baseline must be finite".into()));
        }
        Ok(RatingEngine::new(self.k_factor, self.baseline))
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_k_factor() -> f64 {
    K_FACTOR
}

fn default_baseline() -> f64 {
    DEFAULT_SCORE
}
