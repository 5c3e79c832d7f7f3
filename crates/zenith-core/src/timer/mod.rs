mod engine;

pub use engine::{
    DurationBounds, Phase, TimerEngine, TimerLimits, TimerSnapshot, TimerState,
};
