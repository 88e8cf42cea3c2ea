//! TOML-based application configuration.
//!
//! Stores:
//! - The requested session (total focus minutes, break toggle)
//! - The chunking policy used to split long sessions
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::session::SessionConfig;
use crate::timer::{SequencePolicy, DEFAULT_BASE_BREAK_MINUTES, DEFAULT_BASE_FOCUS_MINUTES};

/// Chunking policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_base_focus_unit")]
    pub base_focus_unit: u32,
    #[serde(default = "default_base_break_unit")]
    pub base_break_unit: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

fn default_base_focus_unit() -> u32 {
    DEFAULT_BASE_FOCUS_MINUTES
}
fn default_base_break_unit() -> u32 {
    DEFAULT_BASE_BREAK_MINUTES
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            base_focus_unit: default_base_focus_unit(),
            base_break_unit: default_base_break_unit(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u32>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot assign to a table".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file inside the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed or is
    /// invalid, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// # Errors
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// # Errors
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// # Errors
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy()?;
        self.session
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "session.focus_minutes".into(),
                message: e.to_string(),
            })
    }

    /// # Errors
    /// Returns an error if either policy unit is zero.
    pub fn policy(&self) -> Result<SequencePolicy, ConfigError> {
        SequencePolicy::new(self.policy.base_focus_unit, self.policy.base_break_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.focus_minutes, 25);
        assert!(!parsed.session.break_enabled);
        assert_eq!(parsed.policy.base_focus_unit, 25);
        assert_eq!(parsed.policy.base_break_unit, 5);
    }

    #[test]
    fn missing_tables_use_defaults() {
        let parsed: Config = toml::from_str("[session]\nfocus_minutes = 60\n").unwrap();
        assert_eq!(parsed.session.focus_minutes, 60);
        assert!(!parsed.session.break_enabled);
        assert_eq!(parsed.policy.base_focus_unit, 25);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.focus_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("session.break_enabled").as_deref(), Some("false"));
        assert!(cfg.get("session.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("session.break_enabled", "true").unwrap();
        cfg.set("policy.base_focus_unit", "3").unwrap();
        assert!(cfg.session.break_enabled);
        assert_eq!(cfg.policy.base_focus_unit, 3);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("session.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("session.break_enabled", "maybe").is_err());
        assert!(cfg.set("session.focus_minutes", "-5").is_err());
        assert!(cfg.set("session", "1").is_err());
    }

    #[test]
    fn set_rejects_zero_values_and_keeps_old() {
        let mut cfg = Config::default();
        assert!(cfg.set("session.focus_minutes", "0").is_err());
        assert!(cfg.set("policy.base_break_unit", "0").is_err());
        assert_eq!(cfg.session.focus_minutes, 25);
        assert_eq!(cfg.policy.base_break_unit, 5);
    }

    #[test]
    fn set_rejects_oversized_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("session.focus_minutes", "100000000").is_err());
        assert!(cfg.set("policy.base_focus_unit", "5000").is_err());
        assert_eq!(cfg.session.focus_minutes, 25);
        assert_eq!(cfg.policy.base_focus_unit, 25);
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.session.focus_minutes, 25);
        assert!(path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("session.focus_minutes", "90").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.focus_minutes, 90);
    }

    #[test]
    fn load_rejects_zero_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[policy]\nbase_focus_unit = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
