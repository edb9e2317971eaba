//! Achievement catalog and unlock evaluation.
//!
//! Every predicate is evaluated independently on each recorded completion.
//! Unlocks are write-once: an id that is already in the set is never
//! re-stamped, so evaluation is idempotent.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::history::DailyHistory;
use super::Stats;

const WEEKLY_GOAL_COMPLETIONS: u64 = 35;
const MONTHLY_GOAL_COMPLETIONS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_step")]
    FirstStep,
    #[serde(rename = "pomodoro_beginner")]
    PomodoroBeginner,
    #[serde(rename = "pomodoro_enthusiast")]
    PomodoroEnthusiast,
    #[serde(rename = "pomodoro_master")]
    PomodoroMaster,
    #[serde(rename = "3_day_streak")]
    ThreeDayStreak,
    #[serde(rename = "7_day_streak")]
    SevenDayStreak,
    #[serde(rename = "weekend_warrior")]
    WeekendWarrior,
    #[serde(rename = "night_owl")]
    NightOwl,
    #[serde(rename = "weekly_goal_achiever")]
    WeeklyGoalAchiever,
    #[serde(rename = "monthly_goal_achiever")]
    MonthlyGoalAchiever,
}

impl AchievementId {
    pub const ALL: [AchievementId; 10] = [
        AchievementId::FirstStep,
        AchievementId::PomodoroBeginner,
        AchievementId::PomodoroEnthusiast,
        AchievementId::PomodoroMaster,
        AchievementId::ThreeDayStreak,
        AchievementId::SevenDayStreak,
        AchievementId::WeekendWarrior,
        AchievementId::NightOwl,
        AchievementId::WeeklyGoalAchiever,
        AchievementId::MonthlyGoalAchiever,
    ];

    /// Stable identifier, used as the persistence key.
    pub fn id(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "first_step",
            AchievementId::PomodoroBeginner => "pomodoro_beginner",
            AchievementId::PomodoroEnthusiast => "pomodoro_enthusiast",
            AchievementId::PomodoroMaster => "pomodoro_master",
            AchievementId::ThreeDayStreak => "3_day_streak",
            AchievementId::SevenDayStreak => "7_day_streak",
            AchievementId::WeekendWarrior => "weekend_warrior",
            AchievementId::NightOwl => "night_owl",
            AchievementId::WeeklyGoalAchiever => "weekly_goal_achiever",
            AchievementId::MonthlyGoalAchiever => "monthly_goal_achiever",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "First Step",
            AchievementId::PomodoroBeginner => "Pomodoro Beginner",
            AchievementId::PomodoroEnthusiast => "Pomodoro Enthusiast",
            AchievementId::PomodoroMaster => "Pomodoro Master",
            AchievementId::ThreeDayStreak => "3-Day Streak",
            AchievementId::SevenDayStreak => "7-Day Streak",
            AchievementId::WeekendWarrior => "Weekend Warrior",
            AchievementId::NightOwl => "Night Owl",
            AchievementId::WeeklyGoalAchiever => "Weekly Goal Achiever",
            AchievementId::MonthlyGoalAchiever => "Monthly Goal Achiever",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "Complete your first work session",
            AchievementId::PomodoroBeginner => "Complete 10 work sessions",
            AchievementId::PomodoroEnthusiast => "Complete 50 work sessions",
            AchievementId::PomodoroMaster => "Complete 100 work sessions",
            AchievementId::ThreeDayStreak => "Keep a 3-day streak going",
            AchievementId::SevenDayStreak => "Keep a 7-day streak going",
            AchievementId::WeekendWarrior => "Complete a session on a weekend",
            AchievementId::NightOwl => "Complete a session late at night",
            AchievementId::WeeklyGoalAchiever => "35 sessions within one week",
            AchievementId::MonthlyGoalAchiever => "150 sessions within one month",
        }
    }

    /// Unlock predicate against the already-updated ledger state.
    pub(crate) fn satisfied(
        &self,
        stats: &Stats,
        history: &DailyHistory,
        now: NaiveDateTime,
    ) -> bool {
        match self {
            AchievementId::FirstStep => stats.total_completions >= 1,
            AchievementId::PomodoroBeginner => stats.total_completions >= 10,
            AchievementId::PomodoroEnthusiast => stats.total_completions >= 50,
            AchievementId::PomodoroMaster => stats.total_completions >= 100,
            AchievementId::ThreeDayStreak => stats.current_streak >= 3,
            AchievementId::SevenDayStreak => stats.current_streak >= 7,
            AchievementId::WeekendWarrior => {
                matches!(now.weekday(), Weekday::Sat | Weekday::Sun)
            }
            AchievementId::NightOwl => now.hour() >= 22 || now.hour() < 5,
            AchievementId::WeeklyGoalAchiever => {
                let date = now.date();
                history.sum_inclusive(week_start(date), date) >= WEEKLY_GOAL_COMPLETIONS
            }
            AchievementId::MonthlyGoalAchiever => {
                let date = now.date();
                history.sum_inclusive(month_start(date), date) >= MONTHLY_GOAL_COMPLETIONS
            }
        }
    }
}

/// Monday of the week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// First day of the month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Unlocked achievements, id -> unlock timestamp. Write-once per id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementSet(BTreeMap<AchievementId, NaiveDateTime>);

impl AchievementSet {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<NaiveDateTime> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AchievementId, &NaiveDateTime)> {
        self.0.iter()
    }

    /// Record an unlock unless the id is already present. Returns whether
    /// the unlock was new.
    fn unlock(&mut self, id: AchievementId, at: NaiveDateTime) -> bool {
        if self.0.contains_key(&id) {
            return false;
        }
        self.0.insert(id, at);
        true
    }
}

/// Evaluate every predicate; stamp and return the newly unlocked ids.
pub(crate) fn evaluate(
    stats: &Stats,
    history: &DailyHistory,
    unlocked: &mut AchievementSet,
    now: NaiveDateTime,
) -> Vec<AchievementId> {
    let mut newly = Vec::new();
    for id in AchievementId::ALL {
        if id.satisfied(stats, history, now) && unlocked.unlock(id, now) {
            newly.push(id);
        }
    }
    newly
}
