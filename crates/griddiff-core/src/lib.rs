#![forbid(unsafe_code)]

//! Network snapshot diff model + severity-level classification (headless).
//!
//! Design goals:
//! - pure, stateless computation from (differ result, level configuration)
//!   to style decisions; no I/O, no persisted state
//! - deterministic, testable outputs (generated stylesheet included)
//! - fail fast on malformed differ input, default locally everywhere else

pub mod classify;
pub mod diff;
pub mod error;
pub mod levels;

pub use classify::{
    ARROW_ACTIVE_CLASS, ARROW_REACTIVE_CLASS, CONSTANT_COLOR_CLASS, DeltaMode, LEVEL_0_SUFFIX,
    LEVEL_PREFIX, LevelClassifier,
};
pub use diff::{BranchSide, DiffData, TerminalDelta};
pub use error::{Error, Result};
pub use levels::{DEFAULT_LEVELS_JSON, LevelBand, LevelsData};
