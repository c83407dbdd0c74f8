//! Configuration types and parsing for ptools.yml

use crate::cli::{OutputFormat, OutputMode};
use pt_sql::SqlDialect;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file names, looked up in the working directory
const CONFIG_FILE_NAMES: [&str; 2] = ["ptools.yml", "ptools.yaml"];

/// Configuration errors
#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    /// C001: Config file named on the command line does not exist
    #[error("[C001] Config file not found: {path}")]
    NotFound { path: String },

    /// C002: Config file is not valid YAML or has unknown keys
    #[error("[C002] Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    /// C003: Config file could not be read
    #[error("[C003] Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Defaults for every extraction command
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// SQL dialect used to parse input
    #[serde(default)]
    pub dialect: SqlDialect,

    /// Output format
    #[serde(default)]
    pub output: OutputFormat,

    /// Result shape
    #[serde(default)]
    pub mode: OutputMode,
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse configuration from YAML text; an empty document means defaults
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load ptools.yml or ptools.yaml from a directory, or defaults if neither exists
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Resolve the effective configuration: `--config` if given, else the working directory
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(Path::new(path)),
            None => Self::load_from_dir(Path::new(".")),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
