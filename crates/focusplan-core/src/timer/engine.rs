//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It owns no thread or timer:
//! the caller invokes `tick()` once per second while the engine is running
//! (see [`crate::session::SessionRunner`]).
//!
//! ## State Transitions
//!
//! ```text
//! run status:  Paused <-> Running      (start / pause, and at every interval end)
//! mode:        Simple <-> Sequenced    (configure_simple / configure_sequence,
//!                                       and Sequenced -> Simple on exhaustion)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.configure_sequence(policy.build(60, true));
//! engine.start();
//! // once per second:
//! for event in engine.tick() { /* ... */ }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::sequence::{Interval, IntervalKind, Plan, Sequence, minutes_to_secs};
use crate::error::SnapshotError;
use crate::events::Event;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focusing,
    Breaking,
}

impl Phase {
    pub fn kind(self) -> IntervalKind {
        match self {
            Phase::Focusing => IntervalKind::Focus,
            Phase::Breaking => IntervalKind::Break,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Phase::Focusing => Phase::Breaking,
            Phase::Breaking => Phase::Focusing,
        }
    }
}

impl From<IntervalKind> for Phase {
    fn from(kind: IntervalKind) -> Self {
        match kind {
            IntervalKind::Focus => Phase::Focusing,
            IntervalKind::Break => Phase::Breaking,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Simple,
    Sequenced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Durations {
    focus_secs: u32,
    break_secs: u32,
}

impl Durations {
    fn for_phase(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focusing => self.focus_secs,
            Phase::Breaking => self.break_secs,
        }
    }
}

/// Serializable engine state, persisted between application runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub remaining_secs: u32,
    pub phase: Phase,
    pub running: bool,
    pub focus_duration_secs: u32,
    pub break_duration_secs: u32,
    /// Simple-mode durations waiting for the next phase change.
    /// Absent means "same as the active pair".
    #[serde(default)]
    pub configured_focus_secs: Option<u32>,
    #[serde(default)]
    pub configured_break_secs: Option<u32>,
    #[serde(default)]
    pub sequence: Option<Sequence>,
    pub cursor: usize,
    pub elapsed_focus_secs: u32,
}

/// Read-only view for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerStatus {
    pub phase: Phase,
    pub running: bool,
    pub mode: Mode,
    pub remaining_secs: u32,
    pub interval_total_secs: u32,
    /// Share of the current interval still left, 0.0 ..= 100.0.
    pub remaining_pct: f64,
    pub cursor: Option<usize>,
    pub sequence_len: Option<usize>,
    pub elapsed_focus_secs: u32,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    phase: Phase,
    remaining_secs: u32,
    interval_total_secs: u32,
    running: bool,
    active: Durations,
    configured: Durations,
    sequence: Option<Sequence>,
    cursor: usize,
    elapsed_focus_secs: u32,
}

impl TimerEngine {
    /// 25 minute focus / 5 minute break, simple mode, paused.
    pub fn new() -> Self {
        let durations = Durations {
            focus_secs: minutes_to_secs(DEFAULT_FOCUS_MINUTES),
            break_secs: minutes_to_secs(DEFAULT_BREAK_MINUTES),
        };
        Self {
            phase: Phase::Focusing,
            remaining_secs: durations.focus_secs,
            interval_total_secs: durations.focus_secs,
            running: false,
            active: durations,
            configured: durations,
            sequence: None,
            cursor: 0,
            elapsed_focus_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn interval_total_secs(&self) -> u32 {
        self.interval_total_secs
    }

    pub fn elapsed_focus_secs(&self) -> u32 {
        self.elapsed_focus_secs
    }

    pub fn sequence(&self) -> Option<&Sequence> {
        self.sequence.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        if self.sequence.is_some() {
            Mode::Sequenced
        } else {
            Mode::Simple
        }
    }

    /// 0.0 .. 100.0 share of the current interval still to run.
    pub fn remaining_pct(&self) -> f64 {
        if self.interval_total_secs == 0 {
            return 0.0;
        }
        f64::from(self.remaining_secs) / f64::from(self.interval_total_secs) * 100.0
    }

    /// The configuration the engine was last given, in the same shape the
    /// sequencer produces for a request.
    pub fn plan(&self) -> Plan {
        match &self.sequence {
            Some(sequence) => Plan::Sequenced {
                sequence: sequence.clone(),
            },
            None => Plan::Simple {
                focus_secs: self.configured.focus_secs,
                break_secs: self.configured.break_secs,
            },
        }
    }

    pub fn status(&self) -> TimerStatus {
        TimerStatus {
            phase: self.phase,
            running: self.running,
            mode: self.mode(),
            remaining_secs: self.remaining_secs,
            interval_total_secs: self.interval_total_secs,
            remaining_pct: self.remaining_pct(),
            cursor: self.sequence.as_ref().map(|_| self.cursor),
            sequence_len: self.sequence.as_ref().map(Sequence::len),
            elapsed_focus_secs: self.elapsed_focus_secs,
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Switch to simple mode with the given durations.
    ///
    /// While paused the current phase is reloaded immediately. While running
    /// the countdown in flight is left alone and the new durations are
    /// picked up at the next phase change.
    pub fn configure_simple(&mut self, focus_secs: u32, break_secs: u32) {
        self.sequence = None;
        self.cursor = 0;
        self.configured = Durations {
            focus_secs,
            break_secs,
        };
        if !self.running {
            self.active = self.configured;
            if self.active.for_phase(self.phase) == 0 {
                self.phase = Phase::Focusing;
            }
            self.load_phase(self.phase);
        }
        debug!(focus_secs, break_secs, running = self.running, "configured simple mode");
    }

    /// Install a sequence and rewind to its first interval. Always pauses.
    pub fn configure_sequence(&mut self, sequence: Sequence) {
        self.running = false;
        self.cursor = 0;
        let first = *sequence.first();
        debug!(intervals = sequence.len(), "configured sequence");
        self.sequence = Some(sequence);
        self.load_interval(first);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Returns `true` if the engine went from paused to running.
    ///
    /// A countdown with nothing left never starts.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_secs == 0 {
            return false;
        }
        self.running = true;
        debug!(remaining_secs = self.remaining_secs, "timer started");
        true
    }

    /// Returns `true` if the engine went from running to paused.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        debug!(remaining_secs = self.remaining_secs, "timer paused");
        true
    }

    /// Pause and rewind to the beginning of the current configuration.
    pub fn reset(&mut self) -> Vec<Event> {
        self.running = false;
        self.elapsed_focus_secs = 0;
        self.cursor = 0;
        match self.sequence.as_ref().map(|s| *s.first()) {
            Some(first) => self.load_interval(first),
            None => {
                self.active = self.configured;
                self.load_phase(Phase::Focusing);
            }
        }
        debug!(remaining_secs = self.remaining_secs, "timer reset");
        vec![Event::tick(self.remaining_secs, self.phase)]
    }

    /// Advance one second. No-op while paused.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        self.check_cursor();

        let mut events = Vec::with_capacity(3);
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.phase == Phase::Focusing {
            self.elapsed_focus_secs = self.elapsed_focus_secs.saturating_add(1);
        }
        events.push(Event::tick(self.remaining_secs, self.phase));

        if self.remaining_secs == 0 {
            self.complete_interval(&mut events);
        }
        events
    }

    /// Zero the focus accumulator once its time has been recorded.
    pub fn clear_elapsed_focus(&mut self) {
        self.elapsed_focus_secs = 0;
    }

    // ── Persistence ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            remaining_secs: self.remaining_secs,
            phase: self.phase,
            running: self.running,
            focus_duration_secs: self.active.focus_secs,
            break_duration_secs: self.active.break_secs,
            configured_focus_secs: Some(self.configured.focus_secs),
            configured_break_secs: Some(self.configured.break_secs),
            sequence: self.sequence.clone(),
            cursor: self.cursor,
            elapsed_focus_secs: self.elapsed_focus_secs,
        }
    }

    /// Load a snapshot. The engine is always left paused; whether to resume
    /// is the caller's decision based on `snapshot.running`.
    ///
    /// # Errors
    /// Rejects snapshots that break the engine invariants. The engine is
    /// unchanged on error.
    pub fn restore(&mut self, snapshot: &EngineSnapshot) -> Result<(), SnapshotError> {
        let (phase, total_secs) = match &snapshot.sequence {
            Some(sequence) => {
                if sequence.is_empty() {
                    return Err(SnapshotError::EmptySequence);
                }
                let interval =
                    sequence
                        .get(snapshot.cursor)
                        .ok_or(SnapshotError::CursorOutOfRange {
                            cursor: snapshot.cursor,
                            len: sequence.len(),
                        })?;
                if interval.duration_secs() == 0 {
                    return Err(SnapshotError::ZeroDuration {
                        index: snapshot.cursor,
                    });
                }
                (Phase::from(interval.kind()), interval.duration_secs())
            }
            None => {
                let total = match snapshot.phase {
                    Phase::Focusing => snapshot.focus_duration_secs,
                    Phase::Breaking => snapshot.break_duration_secs,
                };
                (snapshot.phase, total)
            }
        };
        if snapshot.remaining_secs > total_secs {
            return Err(SnapshotError::RemainingExceedsTotal {
                remaining_secs: snapshot.remaining_secs,
                total_secs,
            });
        }

        let active = Durations {
            focus_secs: snapshot.focus_duration_secs,
            break_secs: snapshot.break_duration_secs,
        };
        self.phase = phase;
        self.remaining_secs = snapshot.remaining_secs;
        self.interval_total_secs = total_secs;
        self.running = false;
        self.active = active;
        self.configured = Durations {
            focus_secs: snapshot.configured_focus_secs.unwrap_or(active.focus_secs),
            break_secs: snapshot.configured_break_secs.unwrap_or(active.break_secs),
        };
        self.sequence = snapshot.sequence.clone();
        self.cursor = if self.sequence.is_some() {
            snapshot.cursor
        } else {
            0
        };
        self.elapsed_focus_secs = snapshot.elapsed_focus_secs;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_interval(&mut self, events: &mut Vec<Event>) {
        self.running = false;
        let was_focusing = self.phase == Phase::Focusing;
        events.push(Event::IntervalCompleted {
            was_focusing,
            kind: self.phase.kind(),
            duration_secs: self.interval_total_secs,
            index: self.sequence.as_ref().map(|_| self.cursor),
            at: chrono::Utc::now(),
        });

        match self.sequence.take() {
            Some(sequence) => {
                let next = self.cursor + 1;
                match sequence.get(next).copied() {
                    Some(interval) => {
                        self.sequence = Some(sequence);
                        self.cursor = next;
                        self.load_interval(interval);
                        // Chain straight into the next interval.
                        self.running = true;
                    }
                    None => {
                        self.cursor = 0;
                        events.push(Event::SequenceCompleted {
                            intervals: sequence.len(),
                            at: chrono::Utc::now(),
                        });
                    }
                }
            }
            None => {
                self.active = self.configured;
                let mut next = self.phase.flipped();
                // Never enter a zero-length phase; run focus again instead.
                if self.active.for_phase(next) == 0 {
                    next = Phase::Focusing;
                }
                self.load_phase(next);
            }
        }
    }

    fn load_interval(&mut self, interval: Interval) {
        self.phase = Phase::from(interval.kind());
        self.remaining_secs = interval.duration_secs();
        self.interval_total_secs = interval.duration_secs();
    }

    fn load_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining_secs = self.active.for_phase(phase);
        self.interval_total_secs = self.remaining_secs;
    }

    fn check_cursor(&mut self) {
        if let Some(sequence) = &self.sequence {
            if self.cursor >= sequence.len() {
                warn!(
                    cursor = self.cursor,
                    len = sequence.len(),
                    "sequence cursor out of range, reverting to simple mode"
                );
                self.sequence = None;
                self.cursor = 0;
            }
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::SequencePolicy;

    fn run_until_paused(engine: &mut TimerEngine) -> Vec<Event> {
        let mut events = Vec::new();
        while engine.is_running() {
            events.extend(engine.tick());
        }
        events
    }

    fn sequence(intervals: &[(IntervalKind, u32)]) -> Sequence {
        Sequence::new(
            intervals
                .iter()
                .map(|&(kind, secs)| Interval::new(kind, secs))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn defaults() {
        let engine = TimerEngine::new();
        assert_eq!(engine.phase(), Phase::Focusing);
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.interval_total_secs(), 1500);
        assert_eq!(engine.mode(), Mode::Simple);
        assert!(!engine.is_running());
    }

    #[test]
    fn start_pause_are_idempotent() {
        let mut engine = TimerEngine::new();
        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.pause());
        assert!(!engine.pause());
    }

    #[test]
    fn tick_while_paused_does_nothing() {
        let mut engine = TimerEngine::new();
        assert!(engine.tick().is_empty());
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn tick_counts_down_and_accumulates_focus() {
        let mut engine = TimerEngine::new();
        engine.start();
        let events = engine.tick();
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::Tick {
                remaining_secs,
                phase,
                ..
            } => {
                assert_eq!(*remaining_secs, 1499);
                assert_eq!(*phase, Phase::Focusing);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(engine.elapsed_focus_secs(), 1);
    }

    #[test]
    fn simple_mode_flips_to_break_and_stays_paused() {
        let mut engine = TimerEngine::new();
        engine.configure_simple(3, 2);
        engine.start();
        let events = run_until_paused(&mut engine);
        assert!(matches!(
            events.last(),
            Some(Event::IntervalCompleted {
                was_focusing: true,
                index: None,
                duration_secs: 3,
                ..
            })
        ));
        assert_eq!(engine.phase(), Phase::Breaking);
        assert_eq!(engine.remaining_secs(), 2);
        assert!(!engine.is_running());
        assert_eq!(engine.elapsed_focus_secs(), 3);
    }

    #[test]
    fn simple_mode_without_break_restarts_focus() {
        let mut engine = TimerEngine::new();
        engine.configure_simple(2, 0);
        engine.start();
        run_until_paused(&mut engine);
        assert_eq!(engine.phase(), Phase::Focusing);
        assert_eq!(engine.remaining_secs(), 2);
        assert_eq!(engine.interval_total_secs(), 2);
    }

    #[test]
    fn configure_simple_while_running_waits_for_phase_change() {
        let mut engine = TimerEngine::new();
        engine.configure_simple(4, 2);
        engine.start();
        engine.tick();
        engine.configure_simple(10, 6);
        assert_eq!(engine.remaining_secs(), 3);
        assert_eq!(engine.interval_total_secs(), 4);
        run_until_paused(&mut engine);
        assert_eq!(engine.phase(), Phase::Breaking);
        assert_eq!(engine.remaining_secs(), 6);
    }

    #[test]
    fn configure_sequence_forces_pause() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.configure_sequence(sequence(&[(IntervalKind::Break, 5), (IntervalKind::Focus, 7)]));
        assert!(!engine.is_running());
        assert_eq!(engine.phase(), Phase::Breaking);
        assert_eq!(engine.remaining_secs(), 5);
        assert_eq!(engine.cursor(), 0);
    }

    #[test]
    fn sequence_runs_to_completion_once() {
        let mut engine = TimerEngine::new();
        engine.configure_sequence(sequence(&[
            (IntervalKind::Focus, 2),
            (IntervalKind::Break, 1),
            (IntervalKind::Focus, 2),
        ]));
        engine.start();
        let events = run_until_paused(&mut engine);

        let completions: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::IntervalCompleted {
                    was_focusing,
                    index,
                    ..
                } => Some((*was_focusing, *index)),
                _ => None,
            })
            .collect();
        assert_eq!(
            completions,
            vec![(true, Some(0)), (false, Some(1)), (true, Some(2))]
        );
        let finished = events
            .iter()
            .filter(|e| matches!(e, Event::SequenceCompleted { .. }))
            .count();
        assert_eq!(finished, 1);
        assert!(matches!(events.last(), Some(Event::SequenceCompleted { intervals: 3, .. })));
        assert_eq!(engine.mode(), Mode::Simple);
        assert_eq!(engine.cursor(), 0);
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn ticks_count_down_by_one_and_complete_before_next_tick() {
        let totals = [2, 1, 2];
        let mut engine = TimerEngine::new();
        engine.configure_sequence(sequence(&[
            (IntervalKind::Focus, 2),
            (IntervalKind::Break, 1),
            (IntervalKind::Focus, 2),
        ]));
        engine.start();
        let events = run_until_paused(&mut engine);

        let mut interval = 0;
        let mut expected = totals[0] - 1;
        let mut awaiting_completion = false;
        for event in &events {
            match event {
                Event::Tick { remaining_secs, .. } => {
                    assert!(!awaiting_completion, "tick after reaching zero");
                    assert_eq!(*remaining_secs, expected);
                    if *remaining_secs == 0 {
                        awaiting_completion = true;
                    } else {
                        expected -= 1;
                    }
                }
                Event::IntervalCompleted { index, .. } => {
                    assert!(awaiting_completion);
                    assert_eq!(*index, Some(interval));
                    awaiting_completion = false;
                    interval += 1;
                    if let Some(total) = totals.get(interval) {
                        expected = total - 1;
                    }
                }
                Event::SequenceCompleted { .. } => assert_eq!(interval, totals.len()),
            }
        }
        assert_eq!(interval, 3);
    }

    #[test]
    fn reset_rewinds_sequence() {
        let mut engine = TimerEngine::new();
        engine.configure_sequence(SequencePolicy::default().build(60, true));
        engine.start();
        for _ in 0..1501 {
            engine.tick();
        }
        assert_eq!(engine.cursor(), 1);
        let events = engine.reset();
        assert_eq!(events.len(), 1);
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.elapsed_focus_secs(), 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_in_simple_mode_returns_to_focus() {
        let mut engine = TimerEngine::new();
        engine.configure_simple(2, 3);
        engine.start();
        run_until_paused(&mut engine);
        assert_eq!(engine.phase(), Phase::Breaking);
        engine.reset();
        assert_eq!(engine.phase(), Phase::Focusing);
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn zero_countdown_never_starts() {
        let mut engine = TimerEngine::new();
        engine.configure_sequence(sequence(&[(IntervalKind::Focus, 1)]));
        engine.start();
        run_until_paused(&mut engine);
        assert_eq!(engine.remaining_secs(), 0);
        assert!(!engine.start());
    }

    #[test]
    fn snapshot_roundtrip_sequenced_running() {
        let mut engine = TimerEngine::new();
        engine.configure_sequence(SequencePolicy::default().build(60, true));
        engine.start();
        for _ in 0..1600 {
            engine.tick();
        }
        let snapshot = engine.snapshot();
        assert!(snapshot.running);

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: EngineSnapshot = serde_json::from_str(&json).unwrap();
        let mut restored = TimerEngine::new();
        restored.restore(&parsed).unwrap();

        assert_eq!(restored.phase(), engine.phase());
        assert_eq!(restored.remaining_secs(), engine.remaining_secs());
        assert_eq!(restored.interval_total_secs(), engine.interval_total_secs());
        assert_eq!(restored.sequence(), engine.sequence());
        assert_eq!(restored.cursor(), engine.cursor());
        assert_eq!(restored.elapsed_focus_secs(), engine.elapsed_focus_secs());
        assert!(!restored.is_running());
    }

    #[test]
    fn restore_rejects_bad_cursor() {
        let mut engine = TimerEngine::new();
        engine.configure_sequence(SequencePolicy::default().build(30, true));
        let mut snapshot = engine.snapshot();
        snapshot.cursor = 9;
        let mut other = TimerEngine::new();
        assert_eq!(
            other.restore(&snapshot),
            Err(SnapshotError::CursorOutOfRange { cursor: 9, len: 3 })
        );
        assert_eq!(other.remaining_secs(), 1500);
        assert_eq!(other.mode(), Mode::Simple);
    }

    #[test]
    fn restore_rejects_remaining_beyond_interval() {
        let mut snapshot = TimerEngine::new().snapshot();
        snapshot.remaining_secs = 5000;
        assert!(matches!(
            TimerEngine::new().restore(&snapshot),
            Err(SnapshotError::RemainingExceedsTotal { .. })
        ));
    }

    #[test]
    fn restore_defaults_configured_pair_to_active() {
        let json = r#"{
            "remaining_secs": 100,
            "phase": "breaking",
            "running": false,
            "focus_duration_secs": 600,
            "break_duration_secs": 120,
            "cursor": 0,
            "elapsed_focus_secs": 0
        }"#;
        let snapshot: EngineSnapshot = serde_json::from_str(json).unwrap();
        let mut engine = TimerEngine::new();
        engine.restore(&snapshot).unwrap();
        assert_eq!(engine.interval_total_secs(), 120);
        assert_eq!(
            engine.plan(),
            Plan::Simple {
                focus_secs: 600,
                break_secs: 120
            }
        );
    }

    #[test]
    fn snapshot_missing_position_fields_is_rejected() {
        let json = r#"{
            "remaining_secs": 100,
            "phase": "focusing",
            "running": false,
            "focus_duration_secs": 1500,
            "break_duration_secs": 300,
            "sequence": [
                {"kind": "focus", "duration_secs": 1500},
                {"kind": "break", "duration_secs": 300},
                {"kind": "focus", "duration_secs": 600}
            ]
        }"#;
        assert!(serde_json::from_str::<EngineSnapshot>(json).is_err());

        let with_cursor_only = json.replace(
            r#""sequence": ["#,
            r#""cursor": 2, "sequence": ["#,
        );
        assert!(serde_json::from_str::<EngineSnapshot>(&with_cursor_only).is_err());
    }

    #[test]
    fn remaining_pct_tracks_interval() {
        let mut engine = TimerEngine::new();
        engine.configure_simple(4, 0);
        assert_eq!(engine.remaining_pct(), 100.0);
        engine.start();
        engine.tick();
        assert_eq!(engine.remaining_pct(), 75.0);
    }
}
