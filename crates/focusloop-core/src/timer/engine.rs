//! Session clock implementation.
//!
//! The clock is a tick-driven state machine. It owns no thread and reads no
//! clock of its own - the caller invokes `tick()` once per elapsed second
//! and passes the current wall time into every command.
//!
//! ## Phase cycle
//!
//! ```text
//! Work -> (ShortBreak | LongBreak) -> Work -> ...
//! ```
//!
//! When a phase runs out the clock rolls straight into the next one and
//! keeps running; uninterrupted flow is deliberate, no user action is
//! required between phases.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::settings::TimerSettings;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

/// Core countdown state machine.
///
/// `completed_cycles_in_set` counts work completions since the last explicit
/// `reset()`. It is intentionally NOT cleared when a long break begins, so
/// after a long break the count keeps climbing until the user resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClock {
    settings: TimerSettings,
    /// Settings staged by `update_settings`, latched at the next `reset()`.
    #[serde(default)]
    pending_settings: Option<TimerSettings>,
    phase: Phase,
    seconds_remaining: u32,
    completed_cycles_in_set: u32,
    running: bool,
}

impl SessionClock {
    /// Create a stopped clock at the top of a work phase.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            seconds_remaining: settings.work_secs(),
            settings,
            pending_settings: None,
            phase: Phase::Work,
            completed_cycles_in_set: 0,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn completed_cycles_in_set(&self) -> u32 {
        self.completed_cycles_in_set
    }

    /// Settings currently driving phase durations.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Most recently requested settings: the staged update if one is
    /// pending, otherwise the active settings. This is what gets persisted.
    pub fn latest_settings(&self) -> &TimerSettings {
        self.pending_settings.as_ref().unwrap_or(&self.settings)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin ticking. No-op when already running.
    pub fn start(&mut self, now: NaiveDateTime) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::ClockStarted {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            at: now,
        })
    }

    /// Stop ticking; `seconds_remaining` is retained for resume.
    pub fn pause(&mut self, now: NaiveDateTime) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::ClockPaused {
            seconds_remaining: self.seconds_remaining,
            at: now,
        })
    }

    /// Stop and return to a fresh work phase. Latches any staged settings.
    pub fn reset(&mut self, now: NaiveDateTime) -> Event {
        if let Some(next) = self.pending_settings.take() {
            self.settings = next;
        }
        self.running = false;
        self.phase = Phase::Work;
        self.completed_cycles_in_set = 0;
        self.seconds_remaining = self.settings.work_secs();
        Event::ClockReset { at: now }
    }

    /// Stage a settings update. All four fields are replaced together; the
    /// new durations apply from the next `reset()`, never mid-countdown.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Result<(), ValidationError> {
        settings.validate()?;
        self.pending_settings = Some(settings);
        Ok(())
    }

    /// Call once per elapsed second. Returns the phase transition events
    /// when the current phase runs out; the clock keeps running in the new
    /// phase.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        if self.seconds_remaining > 0 {
            self.seconds_remaining -= 1;
        }
        if self.seconds_remaining > 0 {
            return Vec::new();
        }
        self.advance_phase(now)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Completion is emitted before the next phase is committed, so the
    /// progress ledger sees the just-incremented cycle count.
    fn advance_phase(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = Vec::with_capacity(2);
        match self.phase {
            Phase::Work => {
                self.completed_cycles_in_set += 1;
                events.push(Event::PhaseCompleted {
                    phase: Phase::Work,
                    cycles_in_set: self.completed_cycles_in_set,
                    at: now,
                });
                let next = if self.completed_cycles_in_set % self.settings.cycles_per_long_break
                    == 0
                {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                self.enter(next);
            }
            Phase::ShortBreak | Phase::LongBreak => {
                events.push(Event::PhaseCompleted {
                    phase: self.phase,
                    cycles_in_set: self.completed_cycles_in_set,
                    at: now,
                });
                self.enter(Phase::Work);
            }
        }
        events.push(Event::PhaseStarted {
            phase: self.phase,
            duration_secs: self.seconds_remaining,
            at: now,
        });
        events
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.seconds_remaining = match phase {
            Phase::Work => self.settings.work_secs(),
            Phase::ShortBreak => self.settings.short_break_secs(),
            Phase::LongBreak => self.settings.long_break_secs(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    /// Run the current phase down to its transition; returns its events.
    fn finish_phase(clock: &mut SessionClock) -> Vec<Event> {
        loop {
            let events = clock.tick(at());
            if !events.is_empty() {
                return events;
            }
        }
    }

    #[test]
    fn start_pause_retains_remaining() {
        let mut clock = SessionClock::new(TimerSettings::default());
        assert!(!clock.is_running());

        assert!(clock.start(at()).is_some());
        assert!(clock.is_running());
        clock.tick(at());
        clock.tick(at());
        assert_eq!(clock.seconds_remaining(), 1500 - 2);

        assert!(clock.pause(at()).is_some());
        assert!(!clock.is_running());
        assert_eq!(clock.seconds_remaining(), 1500 - 2);

        // Ticks while paused do nothing.
        assert!(clock.tick(at()).is_empty());
        assert_eq!(clock.seconds_remaining(), 1500 - 2);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut clock = SessionClock::new(TimerSettings::default());
        assert!(clock.start(at()).is_some());
        assert!(clock.start(at()).is_none());
    }

    #[test]
    fn work_phase_rolls_into_short_break_and_keeps_running() {
        let settings = TimerSettings {
            work_minutes: 1,
            ..TimerSettings::default()
        };
        let mut clock = SessionClock::new(settings);
        clock.start(at());

        for _ in 0..59 {
            assert!(clock.tick(at()).is_empty());
        }
        let events = clock.tick(at());
        assert!(matches!(
            events[0],
            Event::PhaseCompleted { phase: Phase::Work, cycles_in_set: 1, .. }
        ));
        assert!(matches!(
            events[1],
            Event::PhaseStarted { phase: Phase::ShortBreak, duration_secs: 300, .. }
        ));
        assert!(clock.is_running());
    }

    #[test]
    fn fourth_completion_enters_long_break() {
        let mut clock = SessionClock::new(TimerSettings::default());
        clock.start(at());

        let mut phases = vec![clock.phase()];
        for _ in 0..7 {
            finish_phase(&mut clock);
            phases.push(clock.phase());
        }
        assert_eq!(
            phases,
            vec![
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::LongBreak,
            ]
        );
        assert_eq!(clock.completed_cycles_in_set(), 4);
    }

    #[test]
    fn cycle_count_survives_long_break() {
        let mut clock = SessionClock::new(TimerSettings::default());
        clock.start(at());

        // 4 work completions -> long break entered, count stays at 4.
        for _ in 0..7 {
            finish_phase(&mut clock);
        }
        assert_eq!(clock.phase(), Phase::LongBreak);
        assert_eq!(clock.completed_cycles_in_set(), 4);

        // Finish the long break and the 5th work phase: count climbs to 5.
        finish_phase(&mut clock);
        assert_eq!(clock.phase(), Phase::Work);
        finish_phase(&mut clock);
        assert_eq!(clock.completed_cycles_in_set(), 5);
        assert_eq!(clock.phase(), Phase::ShortBreak);
    }

    #[test]
    fn reset_returns_to_fresh_work_phase() {
        let mut clock = SessionClock::new(TimerSettings::default());
        clock.start(at());
        for _ in 0..3 {
            finish_phase(&mut clock);
        }
        clock.reset(at());
        assert!(!clock.is_running());
        assert_eq!(clock.phase(), Phase::Work);
        assert_eq!(clock.completed_cycles_in_set(), 0);
        assert_eq!(clock.seconds_remaining(), 1500);
    }

    #[test]
    fn settings_update_applies_only_after_reset() {
        let mut clock = SessionClock::new(TimerSettings::default());
        clock.start(at());
        clock.tick(at());

        let updated = TimerSettings {
            work_minutes: 50,
            ..TimerSettings::default()
        };
        clock.update_settings(updated).unwrap();

        // Current countdown is untouched.
        assert_eq!(clock.seconds_remaining(), 1499);
        assert_eq!(clock.settings().work_minutes, 25);
        assert_eq!(clock.latest_settings().work_minutes, 50);

        clock.reset(at());
        assert_eq!(clock.seconds_remaining(), 3000);
        assert_eq!(clock.settings().work_minutes, 50);
    }

    #[test]
    fn invalid_settings_update_is_rejected() {
        let mut clock = SessionClock::new(TimerSettings::default());
        let bad = TimerSettings {
            cycles_per_long_break: 0,
            ..TimerSettings::default()
        };
        assert!(clock.update_settings(bad).is_err());
        clock.reset(at());
        assert_eq!(clock.settings().cycles_per_long_break, 4);
    }

    proptest! {
        /// The nth work completion enters a long break iff n mod c == 0.
        #[test]
        fn long_break_iff_completion_count_divisible(
            cycles in 1u32..8,
            completions in 1u32..30,
        ) {
            let settings = TimerSettings {
                work_minutes: 1,
                short_break_minutes: 1,
                long_break_minutes: 1,
                cycles_per_long_break: cycles,
            };
            let mut clock = SessionClock::new(settings);
            clock.start(at());

            for n in 1..=completions {
                // Finish the current work phase.
                loop {
                    let events = clock.tick(at());
                    if !events.is_empty() {
                        break;
                    }
                }
                let expect_long = n % cycles == 0;
                prop_assert_eq!(clock.phase() == Phase::LongBreak, expect_long);
                prop_assert_eq!(clock.completed_cycles_in_set(), n);
                // Finish the break to get back to work.
                loop {
                    let events = clock.tick(at());
                    if !events.is_empty() {
                        break;
                    }
                }
                prop_assert_eq!(clock.phase(), Phase::Work);
            }
        }
    }
}
