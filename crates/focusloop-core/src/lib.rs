//! # Focusloop Core Library
//!
//! This library provides the core business logic for Focusloop, a Pomodoro
//! productivity tracker. It implements a CLI-first philosophy: all
//! operations are available through a standalone CLI binary, and any GUI
//! shell is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Session Clock**: A tick-driven state machine that requires the
//!   caller to invoke `tick()` once per elapsed second
//! - **Progress Ledger**: Completion history, daily goal, streak, and
//!   write-once achievement unlocks
//! - **Storage**: SQLite key-value state store and TOML-based preferences
//! - **Stats**: Calendar heatmap and weekday-profile derivations
//!
//! ## Key Components
//!
//! - [`SessionClock`]: Core countdown state machine
//! - [`ProgressLedger`]: Completion bookkeeping and achievement evaluation
//! - [`App`]: Controller owning all state, wiring clock to ledger
//! - [`StateDb`]: Persistent state storage
//! - [`Config`]: Application preferences

pub mod app;
pub mod error;
pub mod events;
pub mod ledger;
pub mod stats;
pub mod storage;
pub mod timer;

pub use app::{local_now, App};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use ledger::{AchievementId, AchievementSet, DailyGoal, DailyHistory, ProgressLedger, Stats};
pub use stats::{ActivityHeatmap, WeekdayProfile};
pub use storage::{Config, MemoryStore, StateDb, StateSnapshot, StateStore, WriteBehind};
pub use timer::{Phase, SessionClock, TimerSettings};
