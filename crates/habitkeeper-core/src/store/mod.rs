mod habits;

pub use habits::{CompletionEntry, DurationRecord, HabitStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/habitkeeper[-dev]/` based on HABITKEEPER_ENV.
///
/// Set HABITKEEPER_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITKEEPER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitkeeper-dev")
    } else {
        base_dir.join("habitkeeper")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
