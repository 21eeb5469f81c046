//! CLI configuration
//!
//! Loaded from TOML. Lookup order: an explicit `--config` path (which must
//! exist), `./keyward.toml`, `~/.keyward/config.toml`, then defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("log_filter must not be empty")]
    EmptyLogFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywardConfig {
    /// Tracing filter used when neither `RUST_LOG` nor `--verbose` is set
    pub log_filter: String,
    pub output: OutputFormat,
    /// Exit non-zero when any attribute ends up unrated
    pub fail_on_unrated: bool,
}

impl Default for KeywardConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            output: OutputFormat::Text,
            fail_on_unrated: false,
        }
    }
}

impl KeywardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        Ok(())
    }

    /// Parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: KeywardConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the configuration, returning the file it came from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in default_config_paths() {
            if candidate.exists() {
                let config = Self::from_file(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }
}

/// Implicit config locations, most specific first.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("keyward.toml")];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".keyward").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: KeywardConfig = toml::from_str("output = \"json\"").unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_filter, "info");
        assert!(!config.fail_on_unrated);
    }

    #[test]
    fn empty_log_filter_is_rejected() {
        let config = KeywardConfig {
            log_filter: " ".to_string(),
            ..KeywardConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyLogFilter));
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        assert!(toml::from_str::<KeywardConfig>("output = \"yaml\"").is_err());
    }
}
