mod engine;
mod sequence;

pub use engine::{
    EngineSnapshot, Mode, Phase, TimerEngine, TimerStatus, DEFAULT_BREAK_MINUTES,
    DEFAULT_FOCUS_MINUTES,
};
pub use sequence::{
    Interval, IntervalKind, Plan, Sequence, SequencePolicy, DEFAULT_BASE_BREAK_MINUTES,
    DEFAULT_BASE_FOCUS_MINUTES, MAX_FOCUS_MINUTES,
};
