use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

/// One `[[agents]]` table
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AgentEntry {
    pub(crate) name: String,
    pub(crate) file: String,
    #[serde(default)]
    pub(crate) summary: Option<String>,
    #[serde(default)]
    pub(crate) interpreter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) required_env: Option<String>,
    #[serde(default)]
    pub(crate) logs_dir: Option<String>,
    #[serde(default)]
    pub(crate) agents_dir: Option<String>,
    #[serde(default)]
    pub(crate) root_dir: Option<String>,
    #[serde(default)]
    pub(crate) interpreter: Option<String>,
    #[serde(default)]
    pub(crate) no_banner: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) log_screens: Option<bool>,
    #[serde(default)]
    pub(crate) agents: Vec<AgentEntry>,
}

impl Config {
    /// Load an explicitly requested config file; any failure is fatal.
    pub(crate) fn load_from(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the first discovered config file, falling back to defaults.
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(config) => {
                        debug!(path = %path.display(), "loaded config");
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/dojo/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("dojo").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/dojo/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("dojo").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.dojo.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".dojo.toml"));
        }

        paths
    }
}
