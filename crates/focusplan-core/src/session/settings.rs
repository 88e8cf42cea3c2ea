use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::{Plan, SequencePolicy, DEFAULT_FOCUS_MINUTES, MAX_FOCUS_MINUTES};

/// What the user asked for: total focus time and whether to take breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default)]
    pub break_enabled: bool,
}

fn default_focus_minutes() -> u32 {
    DEFAULT_FOCUS_MINUTES
}

impl SessionConfig {
    /// # Errors
    /// See [`SessionConfig::validate`].
    pub fn new(focus_minutes: u32, break_enabled: bool) -> Result<Self, ValidationError> {
        let config = Self {
            focus_minutes,
            break_enabled,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse raw user input.
    ///
    /// # Errors
    /// Rejects non-numeric and non-positive focus durations.
    pub fn parse(focus_minutes: &str, break_enabled: bool) -> Result<Self, ValidationError> {
        let trimmed = focus_minutes.trim();
        let minutes = trimmed
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidValue {
                field: "focus_minutes".into(),
                message: format!("'{trimmed}' is not a whole number of minutes"),
            })?;
        Self::new(minutes, break_enabled)
    }

    /// # Errors
    /// Rejects a zero focus duration and anything above
    /// [`MAX_FOCUS_MINUTES`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.focus_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "focus_minutes".into(),
                message: "must be a positive number of minutes".into(),
            });
        }
        if self.focus_minutes > MAX_FOCUS_MINUTES {
            return Err(ValidationError::InvalidValue {
                field: "focus_minutes".into(),
                message: format!("must be at most {MAX_FOCUS_MINUTES} minutes"),
            });
        }
        Ok(())
    }

    /// The engine configuration this request maps to under `policy`.
    pub fn plan(&self, policy: &SequencePolicy) -> Plan {
        policy.plan(self.focus_minutes, self.break_enabled)
    }

    /// Whether breaks actually apply, after the short-session rule.
    pub fn effective_break(&self, policy: &SequencePolicy) -> bool {
        self.break_enabled && policy.breaks_allowed(self.focus_minutes)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_enabled: false,
        }
    }
}
