use crate::error::{BasketError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EXPORT_DIR: &str = ".";
const DEFAULT_ROWS_PER_PAGE: usize = 25;

/// Configuration for basket, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasketConfig {
    /// Directory export documents are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Table rows per page in exported documents
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,

    /// Whether `show` lists items that were already purchased
    #[serde(default = "default_show_purchased")]
    pub show_purchased: bool,
}

fn default_export_dir() -> String {
    DEFAULT_EXPORT_DIR.to_string()
}

fn default_rows_per_page() -> usize {
    DEFAULT_ROWS_PER_PAGE
}

fn default_show_purchased() -> bool {
    true
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            rows_per_page: default_rows_per_page(),
            show_purchased: default_show_purchased(),
        }
    }
}

impl BasketConfig {
    pub const KEYS: [&'static str; 3] = ["export-dir", "rows-per-page", "show-purchased"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BasketError::Io)?;
        let config: BasketConfig =
            serde_json::from_str(&content).map_err(BasketError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BasketError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BasketError::Serialization)?;
        fs::write(config_path, content).map_err(BasketError::Io)?;
        Ok(())
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.export_dir)
    }

    /// Get a value by its CLI key (`export-dir`, `rows-per-page`, `show-purchased`).
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "export-dir" => Some(self.export_dir.clone()),
            "rows-per-page" => Some(self.rows_per_page.to_string()),
            "show-purchased" => Some(self.show_purchased.to_string()),
            _ => None,
        }
    }

    /// Set a value by its CLI key, validating it first.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "export-dir" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("export-dir cannot be empty".to_string());
                }
                self.export_dir = value.to_string();
            }
            "rows-per-page" => {
                let rows: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("rows-per-page must be a number, got '{}'", value))?;
                if rows == 0 {
                    return Err("rows-per-page must be at least 1".to_string());
                }
                self.rows_per_page = rows;
            }
            "show-purchased" => {
                self.show_purchased = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(format!("show-purchased must be true or false, got '{}'", value)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (key.to_string(), v)))
            .collect()
    }
}
