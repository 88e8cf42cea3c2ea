mod config;
pub mod database;
pub mod memory;

pub use config::{Config, PolicyConfig};
pub use database::Database;
pub use memory::{MemoryRecorder, MemoryStore};

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ConfigError, Result};

/// Key-value persistence slot used for the engine snapshot.
pub trait StateStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Receives focus time as intervals complete.
pub trait FocusRecorder {
    fn add_focus_minutes(&self, minutes: u32) -> Result<()>;
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

impl<T: FocusRecorder + ?Sized> FocusRecorder for Arc<T> {
    fn add_focus_minutes(&self, minutes: u32) -> Result<()> {
        (**self).add_focus_minutes(minutes)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSPLAN_HOME` overrides the location entirely. Otherwise it is
/// `~/.config/focusplan[-dev]/`, with `FOCUSPLAN_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FOCUSPLAN_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusplan-dev")
            } else {
                base_dir.join("focusplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
