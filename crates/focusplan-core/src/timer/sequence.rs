//! Interval sequencing.
//!
//! Turns a requested total focus time and a break toggle into the ordered
//! list of focus/break intervals the engine counts down through. Long focus
//! requests are split into chunks of `base_focus_minutes` with a
//! `base_break_minutes` break between chunks; the remainder becomes a final
//! shorter chunk.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};

pub const DEFAULT_BASE_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BASE_BREAK_MINUTES: u32 = 5;
/// Longest focus request or chunk size accepted, one day.
pub const MAX_FOCUS_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    Focus,
    Break,
}

/// One countdown unit. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    kind: IntervalKind,
    duration_secs: u32,
}

impl Interval {
    pub fn new(kind: IntervalKind, duration_secs: u32) -> Self {
        Self {
            kind,
            duration_secs,
        }
    }

    pub fn focus_minutes(minutes: u32) -> Self {
        Self::new(IntervalKind::Focus, minutes_to_secs(minutes))
    }

    pub fn break_minutes(minutes: u32) -> Self {
        Self::new(IntervalKind::Break, minutes_to_secs(minutes))
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_focus(&self) -> bool {
        self.kind == IntervalKind::Focus
    }
}

/// Ordered, non-empty list of intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct Sequence {
    intervals: Vec<Interval>,
}

impl Sequence {
    /// # Errors
    /// Returns an error if `intervals` is empty or any interval has zero
    /// length.
    pub fn new(intervals: Vec<Interval>) -> Result<Self, ValidationError> {
        if intervals.is_empty() {
            return Err(ValidationError::EmptyCollection("sequence".into()));
        }
        if let Some(index) = intervals.iter().position(|i| i.duration_secs == 0) {
            return Err(ValidationError::InvalidValue {
                field: "sequence".into(),
                message: format!("interval {index} has zero duration"),
            });
        }
        Ok(Self { intervals })
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    pub fn first(&self) -> &Interval {
        &self.intervals[0]
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn total_focus_secs(&self) -> u32 {
        self.intervals
            .iter()
            .filter(|i| i.is_focus())
            .map(|i| i.duration_secs)
            .fold(0, u32::saturating_add)
    }

    pub fn has_break(&self) -> bool {
        self.intervals.iter().any(|i| !i.is_focus())
    }
}

impl TryFrom<Vec<Interval>> for Sequence {
    type Error = ValidationError;

    fn try_from(intervals: Vec<Interval>) -> Result<Self, Self::Error> {
        Self::new(intervals)
    }
}

impl From<Sequence> for Vec<Interval> {
    fn from(sequence: Sequence) -> Self {
        sequence.intervals
    }
}

/// How the engine should be configured for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Plan {
    Simple { focus_secs: u32, break_secs: u32 },
    Sequenced { sequence: Sequence },
}

/// Chunk sizes used when splitting long focus requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencePolicy {
    base_focus_minutes: u32,
    base_break_minutes: u32,
}

impl SequencePolicy {
    /// # Errors
    /// Both units must be between one minute and [`MAX_FOCUS_MINUTES`].
    pub fn new(base_focus_minutes: u32, base_break_minutes: u32) -> Result<Self, ConfigError> {
        check_unit("policy.base_focus_unit", base_focus_minutes)?;
        check_unit("policy.base_break_unit", base_break_minutes)?;
        Ok(Self {
            base_focus_minutes,
            base_break_minutes,
        })
    }

    pub fn base_focus_minutes(&self) -> u32 {
        self.base_focus_minutes
    }

    pub fn base_break_minutes(&self) -> u32 {
        self.base_break_minutes
    }

    /// Breaks can only be toggled on for requests longer than one chunk.
    pub fn breaks_allowed(&self, total_focus_minutes: u32) -> bool {
        total_focus_minutes > self.base_focus_minutes
    }

    /// Build the interval sequence for a request.
    ///
    /// `total_focus_minutes` is expected to be validated already
    /// (see [`crate::session::SessionConfig::validate`]).
    pub fn build(&self, total_focus_minutes: u32, break_enabled: bool) -> Sequence {
        if !self.breaks_allowed(total_focus_minutes) || !break_enabled {
            return Sequence {
                intervals: vec![Interval::focus_minutes(total_focus_minutes)],
            };
        }

        let mut intervals = Vec::new();
        let mut remaining = total_focus_minutes;
        while remaining >= self.base_focus_minutes {
            intervals.push(Interval::focus_minutes(self.base_focus_minutes));
            remaining -= self.base_focus_minutes;
            if remaining > 0 {
                intervals.push(Interval::break_minutes(self.base_break_minutes));
            }
        }
        if remaining > 0 {
            intervals.push(Interval::focus_minutes(remaining));
        }
        Sequence { intervals }
    }

    /// Decide between simple and sequenced mode for a request.
    ///
    /// Only a request that is longer than one chunk *and* has breaks enabled
    /// gets a sequence; everything else is a plain focus countdown with no
    /// break.
    pub fn plan(&self, total_focus_minutes: u32, break_enabled: bool) -> Plan {
        if self.breaks_allowed(total_focus_minutes) && break_enabled {
            Plan::Sequenced {
                sequence: self.build(total_focus_minutes, true),
            }
        } else {
            Plan::Simple {
                focus_secs: minutes_to_secs(total_focus_minutes),
                break_secs: 0,
            }
        }
    }
}

impl Default for SequencePolicy {
    fn default() -> Self {
        Self {
            base_focus_minutes: DEFAULT_BASE_FOCUS_MINUTES,
            base_break_minutes: DEFAULT_BASE_BREAK_MINUTES,
        }
    }
}

fn check_unit(key: &str, minutes: u32) -> Result<(), ConfigError> {
    if minutes == 0 || minutes > MAX_FOCUS_MINUTES {
        return Err(ConfigError::InvalidValue {
            key: key.into(),
            message: format!("must be between 1 and {MAX_FOCUS_MINUTES} minutes"),
        });
    }
    Ok(())
}

pub(crate) fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}
