//! # 75 Strong Kids Core Library
//!
//! Business logic for the 75 Strong Kids habit challenge: a daily checklist
//! across five categories, a day counter that advances when every item is
//! done, and a strike counter that restarts the challenge after three
//! incomplete days. The `strongkids` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Challenge**: [`ChallengeState`] with pure transitions, wrapped by the
//!   [`ChallengeEngine`] that models the celebration pause as an explicit
//!   `PendingAdvance` phase driven by `tick()`
//! - **Session**: [`ChallengeSession`] reads the snapshot once and writes it
//!   after every intent
//! - **Storage**: SQLite key-value slots and TOML configuration

pub mod challenge;
pub mod clock;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use challenge::{
    Category, ChallengeEngine, ChallengeState, DayOutcome, Milestone, Phase, TaskBoard, TaskKey,
    MILESTONES, STRIKE_LIMIT,
};
pub use clock::Clock;
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::{Event, ResetReason};
pub use session::ChallengeSession;
pub use storage::{Config, Database, MemoryStore, SnapshotStore};
