//! Configuration for digilib.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (DIGILIB_DEFAULT_CATEGORY)
//! 2. Config file (explicit path, else .digilib/config.yaml in the current
//!    directory or a parent, else ~/.digilib/config.yaml)
//! 3. Built-in defaults
//!
//! Configuration only shapes defaults and console text. Catalog contents are
//! never read from or written to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::library::DEFAULT_CATEGORY;

/// Environment variable overriding the default category
pub const DEFAULT_CATEGORY_ENV: &str = "DIGILIB_DEFAULT_CATEGORY";

const CONFIG_DIR: &str = ".digilib";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Category for items added without one
    pub default_category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleConfig {
    /// Heading printed above the menu
    pub heading: Option<String>,
    /// Prompt printed after the menu
    pub prompt: Option<String>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub default_category: String,
    pub console: ConsoleSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleSettings {
    pub heading: String,
    pub prompt: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            heading: "Library Catalog".to_string(),
            prompt: "Enter your choice: ".to_string(),
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            console: ConsoleSettings::default(),
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    fn from_file(config: ConfigFile, path: PathBuf) -> Self {
        let defaults = Self::default();

        Self {
            default_category: config
                .catalog
                .default_category
                .unwrap_or(defaults.default_category),
            console: ConsoleSettings {
                heading: config.console.heading.unwrap_or(defaults.console.heading),
                prompt: config.console.prompt.unwrap_or(defaults.console.prompt),
            },
            config_file: Some(path),
        }
    }

    fn apply_env(mut self, default_category: Option<String>) -> Self {
        if let Some(category) = default_category.filter(|c| !c.trim().is_empty()) {
            self.default_category = category;
        }
        self
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Config file in the user's home directory, if present
fn home_config_file() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources.
///
/// An explicit path must exist; discovered files are optional.
pub fn load_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().ok();
    load_config_from(explicit, cwd.as_deref())
}

/// Pick the config file: explicit path, else discovery from `cwd`, else home
fn select_config_file(explicit: Option<&Path>, cwd: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => cwd.and_then(find_config_file).or_else(home_config_file),
    }
}

fn load_config_from(explicit: Option<&Path>, cwd: Option<&Path>) -> Result<ResolvedConfig> {
    let config = match select_config_file(explicit, cwd) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            ResolvedConfig::from_file(load_config_file(&path)?, path)
        }
        None => ResolvedConfig::default(),
    };

    Ok(config.apply_env(std::env::var(DEFAULT_CATEGORY_ENV).ok()))
}
