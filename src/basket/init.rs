use crate::api::BasketApi;
use crate::config::BasketConfig;
use crate::error::{BasketError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the data directory; used by tests and portable setups.
pub const HOME_ENV: &str = "BASKET_HOME";

pub struct BasketContext {
    pub api: BasketApi<FileStore>,
    pub config: BasketConfig,
}

/// `$BASKET_HOME` when set and non-empty, otherwise the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "basket", "basket")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BasketError::Api("Could not determine data directory".to_string()))
}

pub fn initialize() -> Result<BasketContext> {
    let dir = data_dir()?;
    tracing::debug!(data_dir = %dir.display(), "initializing");

    let config = BasketConfig::load(&dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config, using defaults");
        BasketConfig::default()
    });
    let store = FileStore::new(dir.clone());
    let api = BasketApi::load(store, dir)?;

    Ok(BasketContext { api, config })
}
