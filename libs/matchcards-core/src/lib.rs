//! Core matching game library.
//!
//! Provides:
//! - Dataset and column selection types
//! - Pair derivation (whole dataset or a row range)
//! - The matching session engine with threshold and page refills
//! - Checkpoint milestones and completion reports
//! - Study log records and resume instructions

pub mod checkpoint;
pub mod columns;
pub mod config;
pub mod error;
pub mod log;
pub mod pairs;
pub mod range;
pub mod report;
pub mod session;
pub mod shuffle;
pub mod types;

pub use checkpoint::{Checkpoints, Milestone};
pub use columns::{ColumnChange, ColumnSelection, MIN_ACTIVE_COLUMNS};
pub use config::{EngineConfig, RefillStrategy, Timings};
pub use error::{GameError, Result};
pub use log::{ResumeInstruction, SessionDescriptors, StudyLogEntry};
pub use pairs::{derive_pairs, PairSet};
pub use range::{encode_ranges, parse_ranges};
pub use report::{AttemptRecord, AttemptTracker, CompletionReport};
pub use session::{
    BoardSnapshot, CardSnapshot, ClickEvent, ClickOutcome, IgnoreReason, LaneSnapshot,
    MatchingSession, Progress, ScheduledTimer, SessionId, SessionSetup, TimerKind, TimerOutcome,
    TimerToken,
};
pub use types::{Card, CardRef, Dataset, Pair, PairId};
