//! Scan configuration.
//!
//! Defaults can be overridden by a `depscan.toml` file in the project root
//! (or an explicit path), and then by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reader::DEFAULT_EXCLUDED_DIRS;

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "depscan.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves the choice given whether stdout is a terminal.
    pub fn is_enabled(self, stdout_is_terminal: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stdout_is_terminal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Project root containing `package.json`.
    pub root: PathBuf,
    /// Directory names pruned during discovery.
    pub exclude_dirs: Vec<String>,
    /// Report unused development dependencies as well.
    pub include_dev: bool,
    /// Also write the report to `depscan.txt`.
    pub report_file: bool,
    /// Render one line per section.
    pub summary: bool,
    pub color: ColorChoice,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            include_dev: false,
            report_file: false,
            summary: false,
            color: ColorChoice::Auto,
        }
    }
}

impl ScanConfig {
    /// Loads config from a specific file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `depscan.toml` from `root` if present, defaults otherwise.
    ///
    /// The returned config always scans `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        let mut config = if path.is_file() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Path of the manifest under the root.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("package.json")
    }
}
