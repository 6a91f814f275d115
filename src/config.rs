use crate::analyzer::ScanMode;
use crate::error::{CalverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the repository path and the user config directory
pub const CONFIG_FILE_NAME: &str = "calver.toml";

/// Represents the complete configuration file for git-calver.
///
/// Every key is optional; command-line flags take precedence over it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_prefix() -> String {
    "v".to_string()
}

fn default_separator() -> String {
    ".".to_string()
}

/// How versions are rendered.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FormatConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_separator")]
    pub separator: String,

    /// Drop a trailing zero ordinal
    #[serde(default)]
    pub short: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            prefix: default_prefix(),
            separator: default_separator(),
            short: false,
        }
    }
}

/// How history is interpreted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HistoryConfig {
    /// Baseline year; detected from the oldest root commit when absent
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub scan: ScanMode,
}

/// Settings for a single invocation
///
/// Built from the configuration file and then overridden by command-line
/// flags. Nothing in the core reads process-wide state; everything it needs
/// travels in this structure.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionOptions {
    /// Revision to version
    pub rev: String,
    /// Explicit baseline year, still unparsed
    pub year: Option<String>,
    pub prefix: String,
    pub separator: String,
    pub short: bool,
    /// Version string to map back to a commit
    pub inverse: Option<String>,
    pub scan: ScanMode,
}

impl Default for VersionOptions {
    fn default() -> Self {
        VersionOptions::from_config(&Config::default())
    }
}

impl VersionOptions {
    /// Options seeded from a configuration file
    pub fn from_config(config: &Config) -> Self {
        VersionOptions {
            rev: "HEAD".to_string(),
            year: config.history.year.map(|year| year.to_string()),
            prefix: config.format.prefix.clone(),
            separator: config.format.separator.clone(),
            short: config.format.short,
            inverse: None,
            scan: config.history.scan,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `calver.toml` in the repository path
/// 3. `calver.toml` in the `git-calver` user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_path` - Directory the version is computed for
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_path: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(CalverError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match discover_config(repo_path) {
            Some(path) => path,
            None => {
                debug!("no configuration file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

fn discover_config(repo_path: &Path) -> Option<PathBuf> {
    let local = repo_path.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("git-calver").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}
