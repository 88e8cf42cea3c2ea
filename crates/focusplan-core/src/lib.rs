//! # Focusplan Core Library
//!
//! Core logic for the focusplan session timer. The CLI binary is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: Splits a requested focus time into focus/break intervals and
//!   counts them down one caller-driven `tick()` at a time
//! - **Session**: Start/stop/reset control, settings changes, focus-time
//!   recording and crash-safe snapshots, plus an async one-second driver
//! - **Storage**: SQLite key-value and focus-record persistence and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SequencePolicy`]: Builds the interval sequence for a session
//! - [`TimerEngine`]: Countdown state machine
//! - [`SessionController`]: Session commands over an engine
//! - [`SessionRunner`]: Tokio tick loop around a controller
//! - [`Database`]: Timer state and daily focus totals
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, SnapshotError, ValidationError};
pub use events::Event;
pub use session::{Command, SessionConfig, SessionController, SessionRunner};
pub use storage::{Config, Database, FocusRecorder, StateStore};
pub use timer::{
    EngineSnapshot, Interval, IntervalKind, Mode, Phase, Plan, Sequence, SequencePolicy,
    TimerEngine, TimerStatus,
};
