use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::PreReleaseStyle;
use crate::error::{GitReleaseError, Result};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "gitrelease.toml";

/// Represents the complete configuration for git-release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote fetched before the safety check and pushed to afterwards
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub pre_release_style: PreReleaseStyle,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior of git-release without affecting version computation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Release even with uncommitted changes, like `--force`
    #[serde(default)]
    pub allow_dirty: bool,

    /// Ask for confirmation before tagging and pushing
    #[serde(default)]
    pub confirm_before_push: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            pre_release_style: PreReleaseStyle::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| GitReleaseError::config(e.to_string()))
}

/// Locates the configuration file to use, if any.
///
/// Lookup order:
/// 1. `./gitrelease.toml`
/// 2. `.gitrelease.toml` in the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file; when given it must exist
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(GitReleaseError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => match find_config_file() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        GitReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&content).map_err(|e| match e {
        GitReleaseError::Config(msg) => {
            GitReleaseError::config(format!("Invalid {}: {}", path.display(), msg))
        }
        other => other,
    })
}
