//! Configuration management for the fraud detection problem

use crate::data::DataRoot;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub cv: CvConfig,
    pub submission: SubmissionConfig,
    pub logging: LoggingConfig,
}

/// Dataset location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding `data/` and `kaggle_data/`
    pub base_path: PathBuf,
    /// Which data directory to read. Falls back to `RAMP_TEST_MODE` when unset.
    pub root: Option<DataRoot>,
}

impl DataConfig {
    /// Resolve the data root, consulting the environment only when the
    /// configuration leaves it open.
    pub fn resolved_root(&self) -> DataRoot {
        self.root.unwrap_or_else(DataRoot::from_env)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            root: None,
        }
    }
}

/// Cross-validation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CvConfig {
    /// Number of independent shuffle splits
    pub n_splits: usize,
    /// Fraction of rows held out for validation in each split
    pub test_size: f64,
    /// Seed for the split generator
    pub random_state: u64,
}

impl Default for CvConfig {
    fn default() -> Self {
        Self {
            n_splits: 8,
            test_size: 0.5,
            random_state: 57,
        }
    }
}

/// Submission output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Directory receiving `submission_<suffix>.csv`
    pub output_path: PathBuf,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("."),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, if it exists
    pub fn load() -> Result<Self> {
        Self::build(File::with_name(DEFAULT_CONFIG_PATH).required(false))
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::build(File::from(path).required(true))
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("FRAUD_RAMP").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cv.n_splits, 8);
        assert_eq!(config.cv.test_size, 0.5);
        assert_eq!(config.cv.random_state, 57);
        assert_eq!(config.data.base_path, PathBuf::from("."));
        assert!(config.data.root.is_none());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[data]
base_path = "/srv/fraud"
root = "sample"

[cv]
n_splits = 3

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.data.base_path, PathBuf::from("/srv/fraud"));
        assert_eq!(config.data.root, Some(DataRoot::Sample));
        assert_eq!(config.data.resolved_root(), DataRoot::Sample);
        assert_eq!(config.cv.n_splits, 3);
        // untouched keys keep their defaults
        assert_eq!(config.cv.random_state, 57);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from_path(dir.path().join("absent.toml")).is_err());
    }
}
