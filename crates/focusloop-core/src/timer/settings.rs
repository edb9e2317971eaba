//! Countdown durations and cycle cadence.
//!
//! Settings are updated atomically (all four fields together) and take
//! effect at the next `reset()`, never mid-countdown.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Phase durations and the long-break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_cycles_per_long_break")]
    pub cycles_per_long_break: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_cycles_per_long_break() -> u32 {
    4
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            cycles_per_long_break: default_cycles_per_long_break(),
        }
    }
}

impl TimerSettings {
    /// Reject any zero field. The clock must never hold a zero-length phase,
    /// and a failed update leaves the prior settings in force.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("work_minutes", self.work_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
            ("cycles_per_long_break", self.cycles_per_long_break),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: name.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn work_secs(&self) -> u32 {
        self.work_minutes.saturating_mul(60)
    }

    pub fn short_break_secs(&self) -> u32 {
        self.short_break_minutes.saturating_mul(60)
    }

    pub fn long_break_secs(&self) -> u32 {
        self.long_break_minutes.saturating_mul(60)
    }
}
