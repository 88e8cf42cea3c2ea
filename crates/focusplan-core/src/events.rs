use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{IntervalKind, Phase};

/// Everything observable that the timer does is reported as an Event.
/// Engine operations return them; the session controller reacts to them
/// and then broadcasts them to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Once per second while running, and once after reset/restore.
    Tick {
        remaining_secs: u32,
        phase: Phase,
        at: DateTime<Utc>,
    },
    /// Exactly once per interval that counts down to zero.
    IntervalCompleted {
        was_focusing: bool,
        kind: IntervalKind,
        /// Configured length of the interval that just finished.
        duration_secs: u32,
        /// Position in the active sequence, `None` in simple mode.
        index: Option<usize>,
        at: DateTime<Utc>,
    },
    /// Exactly once when the last interval of a sequence completes.
    SequenceCompleted {
        intervals: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn tick(remaining_secs: u32, phase: Phase) -> Self {
        Event::Tick {
            remaining_secs,
            phase,
            at: Utc::now(),
        }
    }

    pub fn is_tick(&self) -> bool {
        matches!(self, Event::Tick { .. })
    }
}
