//! Optional `config.toml` in the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::repository::default_data_dir;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATA_DIR_ENV: &str = "PARCELCAL_DATA_DIR";

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    pub storage: Option<StorageConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct DisplayConfig {
    pub show_weekly: Option<bool>,
}

impl Config {
    /// Missing file means defaults; a malformed one is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage.as_ref().and_then(|s| s.data_dir.clone())
    }

    pub fn show_weekly(&self) -> bool {
        self.display
            .as_ref()
            .and_then(|d| d.show_weekly)
            .unwrap_or(true)
    }
}

/// Flag (or env, resolved by the caller) wins, then the config file, then
/// `~/.parcelcal`. The config is read from the explicit or default dir.
pub fn resolve(explicit_dir: Option<PathBuf>) -> Result<(PathBuf, Config)> {
    if let Some(dir) = explicit_dir {
        let config = Config::load(&dir)?;
        return Ok((dir, config));
    }
    let base = default_data_dir()?;
    let config = Config::load(&base)?;
    let dir = config.data_dir().unwrap_or(base);
    Ok((dir, config))
}
