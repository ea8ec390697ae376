// File: ./src/config.rs
use crate::error::{Error, Result};
use crate::selection::SelectionFormat;
use crate::storage::LocalStorage;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Overrides the config directory. Used by the integration tests.
pub const CONFIG_DIR_ENV: &str = "RUNNING_ORDER_CONFIG_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lineup_path: Option<PathBuf>,
    pub selection_path: Option<PathBuf>,
    pub alias_path: Option<PathBuf>,
    pub selection_format: SelectionFormat,
    pub disabled_stages: Vec<String>,
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("org", "running-order", "running-order")
            .map(|proj| proj.config_dir().to_path_buf())
    }

    pub fn get_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads the config file. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
                Ok(toml::from_str(&content)?)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::get_path() {
            let content = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(path, content)?;
        }
        Ok(())
    }
}
