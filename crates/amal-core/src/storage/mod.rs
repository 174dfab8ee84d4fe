pub mod kv;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Named keys for the four persisted collections.
pub mod keys {
    pub const CATALOG: &str = "catalog";
    pub const LOGS: &str = "logs";
    pub const EXCLUSIONS: &str = "exclusions";
    pub const SETTINGS: &str = "settings";
}

/// Returns `~/.config/amal[-dev]/` based on AMAL_ENV.
///
/// Set AMAL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("AMAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("amal-dev")
    } else {
        base_dir.join("amal")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
