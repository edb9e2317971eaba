//! Progress ledger: cumulative statistics, daily history, daily goal,
//! streak, and achievement unlocks.
//!
//! The ledger consumes work-phase completions from the session clock. Each
//! completion runs one fixed pipeline: bump totals, record history, advance
//! the daily goal, recompute the streak, then evaluate achievement
//! predicates against the updated state. Persistence is the controller's
//! job; the ledger itself is pure state.

mod achievements;
mod history;
mod streak;

pub use achievements::{AchievementId, AchievementSet};
pub use history::DailyHistory;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Cumulative counters. `total_completions` only ever grows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_completions: u64,
    #[serde(default)]
    pub last_session_date: Option<NaiveDate>,
    #[serde(default)]
    pub current_streak: u32,
}

/// Daily completion target and progress toward it.
///
/// `completed_today` has no automatic midnight rollover; it only resets
/// through an explicit user edit, which also re-arms the celebration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyGoal {
    #[serde(default = "default_goal_target")]
    pub target: u32,
    #[serde(default)]
    pub completed_today: u32,
}

fn default_goal_target() -> u32 {
    8
}

impl Default for DailyGoal {
    fn default() -> Self {
        Self {
            target: default_goal_target(),
            completed_today: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressLedger {
    stats: Stats,
    history: DailyHistory,
    achievements: AchievementSet,
    goal: DailyGoal,
}

impl ProgressLedger {
    pub fn new(
        stats: Stats,
        history: DailyHistory,
        achievements: AchievementSet,
        goal: DailyGoal,
    ) -> Self {
        Self {
            stats,
            history,
            achievements,
            goal,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn history(&self) -> &DailyHistory {
        &self.history
    }

    pub fn achievements(&self) -> &AchievementSet {
        &self.achievements
    }

    pub fn goal(&self) -> &DailyGoal {
        &self.goal
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record one work-phase completion at local wall time `now`.
    ///
    /// Returns the celebration and unlock events this completion produced.
    /// Call exactly once per completion; the caller persists afterwards.
    pub fn record_completion(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let today = now.date();
        let mut events = Vec::new();

        self.stats.total_completions += 1;
        self.history.record(today);

        self.goal.completed_today += 1;
        if self.goal.completed_today == self.goal.target {
            events.push(Event::GoalReached {
                target: self.goal.target,
                at: now,
            });
        }

        streak::update_on_completion(&mut self.stats, today);

        for id in achievements::evaluate(&self.stats, &self.history, &mut self.achievements, now)
        {
            events.push(Event::AchievementUnlocked {
                id,
                title: id.title().to_string(),
                at: now,
            });
        }

        events
    }

    /// Startup streak check; never credits a session. Returns the expiry
    /// event when a stale streak was voided.
    pub fn check_streak_on_load(&mut self, now: NaiveDateTime) -> Option<Event> {
        let previous = self.stats.current_streak;
        if streak::check_on_load(&mut self.stats, now.date()) {
            Some(Event::StreakExpired { previous, at: now })
        } else {
            None
        }
    }

    /// Change the daily target. Progress so far today is kept.
    pub fn set_goal_target(&mut self, target: u32) {
        self.goal.target = target;
    }

    /// Zero today's progress, re-arming the goal celebration.
    pub fn reset_today(&mut self) {
        self.goal.completed_today = 0;
    }
}
