//! Application controller.
//!
//! Owns the session clock, the progress ledger, and the preferences as one
//! explicit state struct - no ambient globals. All mutation funnels through
//! the methods here, which run to completion one at a time on the caller's
//! thread; every mutation of persisted state issues exactly one
//! write-behind persist call afterwards.

use chrono::{Local, NaiveDateTime};

use crate::error::{ConfigError, CoreError, ValidationError};
use crate::events::Event;
use crate::ledger::ProgressLedger;
use crate::storage::{Config, StateSnapshot, StateStore, WriteBehind};
use crate::timer::{Phase, SessionClock, TimerSettings};

/// Current local wall time. Commands take the timestamp as an argument so
/// tests can pin it; production callers pass this.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct App<S: StateStore + 'static> {
    clock: SessionClock,
    ledger: ProgressLedger,
    config: Config,
    store: WriteBehind<S>,
}

impl<S: StateStore + 'static> App<S> {
    /// Load persisted state from `store` and assemble the controller.
    ///
    /// Returns the startup events: a defaults-applied notice when any
    /// stored entity was unreadable, and a streak expiry when the last
    /// session is too far in the past.
    pub fn load(store: S, now: NaiveDateTime) -> Result<(Self, Vec<Event>), CoreError> {
        Self::load_with_config(store, Config::load_or_default(), now)
    }

    /// Like [`App::load`] with an explicit preferences value (for tests and
    /// shells that manage their own config).
    pub fn load_with_config(
        store: S,
        config: Config,
        now: NaiveDateTime,
    ) -> Result<(Self, Vec<Event>), CoreError> {
        let store = WriteBehind::new(store);
        let loaded = store.load()?;
        let StateSnapshot {
            settings,
            stats,
            history,
            achievements,
            goal,
        } = loaded.snapshot;

        let mut events = Vec::new();
        if loaded.defaults_applied {
            events.push(Event::DefaultsApplied { at: now });
        }

        let mut app = Self {
            clock: SessionClock::new(settings),
            ledger: ProgressLedger::new(stats, history, achievements, goal),
            config,
            store,
        };
        if let Some(event) = app.ledger.check_streak_on_load(now) {
            events.push(event);
            app.persist();
        }
        Ok((app, events))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// Full state snapshot event for rendering.
    pub fn snapshot_event(&self, now: NaiveDateTime) -> Event {
        Event::StateSnapshot {
            phase: self.clock.phase(),
            running: self.clock.is_running(),
            seconds_remaining: self.clock.seconds_remaining(),
            cycles_in_set: self.clock.completed_cycles_in_set(),
            total_completions: self.ledger.stats().total_completions,
            current_streak: self.ledger.stats().current_streak,
            completed_today: self.ledger.goal().completed_today,
            goal_target: self.ledger.goal().target,
            at: now,
        }
    }

    // ── Clock commands ───────────────────────────────────────────────

    pub fn start(&mut self, now: NaiveDateTime) -> Option<Event> {
        self.clock.start(now)
    }

    pub fn pause(&mut self, now: NaiveDateTime) -> Option<Event> {
        self.clock.pause(now)
    }

    pub fn reset(&mut self, now: NaiveDateTime) -> Event {
        self.clock.reset(now)
    }

    /// Advance the clock by one second. A completed work phase feeds the
    /// progress ledger and persists the result; the clock keeps running
    /// into the next phase either way.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = self.clock.tick(now);
        let work_completed = events
            .iter()
            .any(|e| matches!(e, Event::PhaseCompleted { phase: Phase::Work, .. }));
        if work_completed {
            let ledger_events = self.ledger.record_completion(now);
            // Celebration/unlock events follow the completion they belong
            // to, ahead of the next phase start.
            let phase_started = events.pop();
            events.extend(ledger_events);
            events.extend(phase_started);
            self.persist();
        }
        events
    }

    // ── Ledger and settings commands ─────────────────────────────────

    /// Atomically replace all four timer settings. Takes effect at the next
    /// `reset()`; the persisted settings update immediately.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Result<(), ValidationError> {
        self.clock.update_settings(settings)?;
        self.persist();
        Ok(())
    }

    pub fn set_goal_target(&mut self, target: u32) {
        self.ledger.set_goal_target(target);
        self.persist();
    }

    /// Zero today's goal progress, re-arming the celebration.
    pub fn reset_today(&mut self) {
        self.ledger.reset_today();
        self.persist();
    }

    // ── Preferences commands ─────────────────────────────────────────

    pub fn set_theme(&mut self, theme: &str) -> Result<(), ConfigError> {
        self.config.theme = theme.to_string();
        self.config.save()
    }

    pub fn set_sound_volume(&mut self, sound: &str, volume: f32) -> Result<(), ConfigError> {
        self.config.set_volume(sound, volume);
        self.config.save()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist(&self) {
        let snapshot = StateSnapshot {
            settings: *self.clock.latest_settings(),
            stats: self.ledger.stats().clone(),
            history: self.ledger.history().clone(),
            achievements: self.ledger.achievements().clone(),
            goal: self.ledger.goal().clone(),
        };
        self.store.persist(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::AchievementId;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn dt(h: u32, min: u32) -> NaiveDateTime {
        // A Tuesday at daytime hours unless overridden.
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn minute_app() -> App<MemoryStore> {
        let mut snapshot = StateSnapshot::default();
        snapshot.settings = TimerSettings {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 1,
            cycles_per_long_break: 4,
        };
        let store = MemoryStore::with_snapshot(snapshot);
        let (app, events) = App::load_with_config(store, Config::default(), dt(9, 0)).unwrap();
        assert!(events.is_empty());
        app
    }

    #[test]
    fn work_completion_flows_into_ledger_and_store() {
        let mut app = minute_app();
        app.start(dt(9, 0));
        let mut completion_events = Vec::new();
        for _ in 0..60 {
            completion_events = app.tick(dt(9, 1));
        }
        assert!(completion_events
            .iter()
            .any(|e| matches!(e, Event::PhaseCompleted { phase: Phase::Work, .. })));
        assert!(completion_events.iter().any(|e| matches!(
            e,
            Event::AchievementUnlocked { id: AchievementId::FirstStep, .. }
        )));
        // The next phase start comes after the ledger's events.
        assert!(matches!(
            completion_events.last(),
            Some(Event::PhaseStarted { phase: Phase::ShortBreak, .. })
        ));

        assert_eq!(app.ledger().stats().total_completions, 1);
        // No runtime in unit tests: the persist landed synchronously.
        assert_eq!(app.store().write_count(), 1);
        let stored = app.store().snapshot().unwrap();
        assert_eq!(stored.stats.total_completions, 1);
    }

    #[test]
    fn break_completion_does_not_touch_ledger() {
        let mut app = minute_app();
        app.start(dt(9, 0));
        for _ in 0..60 {
            app.tick(dt(9, 1));
        }
        let writes = app.store().write_count();
        // Run the short break down.
        for _ in 0..60 {
            app.tick(dt(9, 2));
        }
        assert_eq!(app.ledger().stats().total_completions, 1);
        assert_eq!(app.store().write_count(), writes);
        assert_eq!(app.clock().phase(), Phase::Work);
    }

    #[test]
    fn settings_update_persists_immediately() {
        let mut app = minute_app();
        let updated = TimerSettings {
            work_minutes: 30,
            ..TimerSettings::default()
        };
        app.update_settings(updated).unwrap();
        let stored = app.store().snapshot().unwrap();
        assert_eq!(stored.settings.work_minutes, 30);
        // The running countdown still uses the old settings until reset.
        assert_eq!(app.clock().settings().work_minutes, 1);
    }

    #[test]
    fn load_voids_stale_streak_and_persists() {
        let mut snapshot = StateSnapshot::default();
        snapshot.stats.current_streak = 5;
        snapshot.stats.last_session_date = NaiveDate::from_ymd_opt(2026, 3, 1);
        let store = MemoryStore::with_snapshot(snapshot);
        let (app, events) = App::load_with_config(store, Config::default(), dt(9, 0)).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::StreakExpired { previous: 5, .. })));
        assert_eq!(app.ledger().stats().current_streak, 0);
        assert_eq!(app.store().write_count(), 1);
    }
}
