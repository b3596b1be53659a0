//! Configuration file handling for Decaf projects.

use anyhow::{Context, Result};
use decaf_core::AnalysisOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "decaf.toml";

/// Represents the decaf.toml configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub package: Package,
    #[serde(default)]
    pub analysis: AnalysisOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
}

impl Config {
    /// Creates a new default configuration with the given project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            package: Package {
                name: name.into(),
                version: "0.1.0".to_string(),
            },
            analysis: AnalysisOptions::default(),
        }
    }

    /// Loads configuration from a decaf.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves configuration to a decaf.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }

    /// Finds the decaf.toml file starting from the current directory.
    ///
    /// # Errors
    /// Returns an error if no decaf.toml is found in the current or parent directories.
    pub fn find() -> Result<(Self, PathBuf)> {
        let current_dir =
            std::env::current_dir().with_context(|| "Failed to get current directory")?;
        Self::find_from(current_dir)
    }

    /// Finds the decaf.toml file starting from `start` and walking up.
    ///
    /// Returns the configuration together with the directory it was found in.
    ///
    /// # Errors
    /// Returns an error if no decaf.toml is found in `start` or any parent, or
    /// if the one found cannot be loaded.
    pub fn find_from(start: impl Into<PathBuf>) -> Result<(Self, PathBuf)> {
        let mut dir = start.into();

        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load(&config_path)?;
                return Ok((config, dir));
            }

            if !dir.pop() {
                anyhow::bail!(
                    "Could not find {CONFIG_FILE} in current directory or any parent directory"
                );
            }
        }
    }
}
