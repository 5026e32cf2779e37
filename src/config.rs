use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const CONFIG_ENV: &str = "ORDER_SHEET_CONFIG";
pub const DATABASE_ENV: &str = "ORDER_SHEET_DB";
const DATABASE_FILE: &str = "order_sheet.db";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join("order-sheet"))
            .unwrap_or_else(|| PathBuf::from("."));

        Config {
            database_path: data_dir.join(DATABASE_FILE),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Explicit path first, then `ORDER_SHEET_CONFIG`, then the user config
    /// directory. Falls back to defaults when no file exists. The database
    /// path can still be overridden by `ORDER_SHEET_DB`.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_path(path)?,
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::from_path(Path::new(&path))?,
                None => match Self::default_path().filter(|p| p.exists()) {
                    Some(path) => Self::from_path(&path)?,
                    None => Config::default(),
                },
            },
        };

        if let Some(db) = std::env::var_os(DATABASE_ENV) {
            config.database_path = PathBuf::from(db);
        }

        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("order-sheet").join("config.json"))
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }
}
