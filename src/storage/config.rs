//! Configuration handling for the Douay reader
//!
//! Configuration is stored in `config.toml` under the platform config
//! directory (e.g. `~/.config/douay-reader/config.toml`) unless a path is
//! given explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Directory holding `haydock.tsv`, `lapide.tsv` and `douai-1609.tsv`
    pub commentary_dir: Option<PathBuf>,

    /// JSON file recording reading plan progress
    pub progress_file: Option<PathBuf>,
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "douay", "douay-reader")
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the directory for bundled and user data
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Loads configuration from `path`, or the default location
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.commentary_dir.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("commentary_dir must not be empty".to_string()));
        }
        if self.progress_file.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("progress_file must not be empty".to_string()));
        }
        Ok(())
    }

    /// Directory the commentary loader reads from
    pub fn commentary_dir(&self) -> PathBuf {
        self.commentary_dir.clone().unwrap_or_else(|| {
            Self::data_dir()
                .map(|dir| dir.join("commentary"))
                .unwrap_or_else(|| PathBuf::from("commentary"))
        })
    }

    /// File the progress store reads and writes
    pub fn progress_file(&self) -> PathBuf {
        self.progress_file.clone().unwrap_or_else(|| {
            Self::data_dir()
                .map(|dir| dir.join("progress.json"))
                .unwrap_or_else(|| PathBuf::from("progress.json"))
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.default_format, OutputFormat::Text);
        assert!(config.commentary_dir.is_none());
        assert!(config.commentary_dir().ends_with("commentary"));
        assert!(config.progress_file().ends_with("progress.json"));
    }

    #[test]
    fn parse_config() {
        let toml = r#"
default_format = "json"
commentary_dir = "/usr/share/douay/commentary"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(
            config.commentary_dir(),
            PathBuf::from("/usr/share/douay/commentary")
        );
        assert!(config.progress_file.is_none());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_format = [").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn empty_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "commentary_dir = \"\"").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("commentary_dir"));
    }
}
