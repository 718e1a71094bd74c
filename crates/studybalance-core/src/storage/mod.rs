//! Persistent storage: mood log database and TOML configuration.

pub mod config;
pub mod database;

pub use config::Config;
pub use database::{MoodDb, MoodRecord, StoredMood};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/studybalance[-dev]/` based on STUDYBALANCE_ENV.
///
/// Set STUDYBALANCE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYBALANCE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studybalance-dev")
    } else {
        base_dir.join("studybalance")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
