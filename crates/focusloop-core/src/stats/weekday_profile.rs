//! Average completions per weekday.
//!
//! Groups every recorded date by weekday and averages the counts:
//! `total[weekday] / dates_with_entries[weekday]`. Dates with no entry do
//! not drag the average down.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::ledger::DailyHistory;

/// Averages indexed Sunday-first (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekdayProfile {
    pub averages: [f64; 7],
}

impl WeekdayProfile {
    pub fn build(history: &DailyHistory) -> Self {
        let mut totals = [0u64; 7];
        let mut days = [0u64; 7];
        for (date, count) in history.iter() {
            let idx = date.weekday().num_days_from_sunday() as usize;
            totals[idx] += u64::from(*count);
            days[idx] += 1;
        }
        let mut averages = [0.0; 7];
        for idx in 0..7 {
            if days[idx] > 0 {
                averages[idx] = totals[idx] as f64 / days[idx] as f64;
            }
        }
        Self { averages }
    }

    pub fn average_for(&self, weekday: Weekday) -> f64 {
        self.averages[weekday.num_days_from_sunday() as usize]
    }

    /// Terminal rendering: one bar per weekday.
    pub fn render_ascii(&self) -> String {
        const LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        let mut out = String::new();
        for (idx, label) in LABELS.iter().enumerate() {
            let bar = "█".repeat(self.averages[idx].round() as usize);
            out.push_str(&format!("{label} {bar} {:.1}\n", self.averages[idx]));
        }
        out
    }
}
