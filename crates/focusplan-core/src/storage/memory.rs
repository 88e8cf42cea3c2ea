//! In-memory stand-ins for the SQLite store, for tests and dry runs.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{FocusRecorder, StateStore};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Keeps every recorded amount in order.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    minutes: Mutex<Vec<u32>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<u32> {
        self.minutes
            .lock()
            .map(|m| m.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn total(&self) -> u32 {
        self.recorded().iter().sum()
    }
}

impl FocusRecorder for MemoryRecorder {
    fn add_focus_minutes(&self, minutes: u32) -> Result<()> {
        self.minutes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(minutes);
        Ok(())
    }
}
