use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ledger::AchievementId;
use crate::timer::Phase;

/// Every state change in the system produces an Event.
/// The frontend (CLI, or any GUI shell) renders events; the core never
/// touches a display, a speaker, or a notification API directly.
///
/// Timestamps are local wall-clock time, injected by the caller so that
/// tests stay deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ClockStarted {
        phase: Phase,
        seconds_remaining: u32,
        at: NaiveDateTime,
    },
    ClockPaused {
        seconds_remaining: u32,
        at: NaiveDateTime,
    },
    ClockReset {
        at: NaiveDateTime,
    },
    /// A phase ran down to zero. For work phases this is emitted before the
    /// next phase is committed, so consumers see the just-incremented cycle
    /// count.
    PhaseCompleted {
        phase: Phase,
        cycles_in_set: u32,
        at: NaiveDateTime,
    },
    /// The clock rolled into the next phase and kept running.
    PhaseStarted {
        phase: Phase,
        duration_secs: u32,
        at: NaiveDateTime,
    },
    /// The daily goal target was hit exactly (fires once per crossing).
    GoalReached {
        target: u32,
        at: NaiveDateTime,
    },
    AchievementUnlocked {
        id: AchievementId,
        title: String,
        at: NaiveDateTime,
    },
    /// Load-time streak invalidation: the last session is too far in the
    /// past and no completion has happened yet today.
    StreakExpired {
        previous: u32,
        at: NaiveDateTime,
    },
    /// One or more persisted entities were unreadable and were replaced by
    /// defaults. Emitted at most once per load.
    DefaultsApplied {
        at: NaiveDateTime,
    },
    StateSnapshot {
        phase: Phase,
        running: bool,
        seconds_remaining: u32,
        cycles_in_set: u32,
        total_completions: u64,
        current_streak: u32,
        completed_today: u32,
        goal_target: u32,
        at: NaiveDateTime,
    },
}
