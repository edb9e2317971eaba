//! Calendar activity heatmap.
//!
//! A 1-year trailing window of the daily history, bucketed into calendar
//! weeks starting Sunday. Cell intensity scales linearly between a minimum
//! and maximum opacity by `count / max_count_in_window`; empty days stay at
//! zero intensity.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::DailyHistory;

/// Opacity floor for days with at least one completion.
pub const MIN_OPACITY: f64 = 0.15;
/// Opacity of the busiest day in the window.
pub const MAX_OPACITY: f64 = 1.0;

const WINDOW_DAYS: u64 = 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
    /// 0.0 for empty days, otherwise in [MIN_OPACITY, MAX_OPACITY].
    pub intensity: f64,
}

impl HeatmapCell {
    /// Shade character for terminal rendering.
    pub fn shade_char(&self) -> char {
        if self.count == 0 {
            '·'
        } else if self.intensity < 0.4 {
            '░'
        } else if self.intensity < 0.7 {
            '▒'
        } else {
            '█'
        }
    }
}

/// Trailing-year heatmap, one row of cells per Sunday-starting week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    pub weeks: Vec<Vec<HeatmapCell>>,
    pub max_count: u32,
}

impl ActivityHeatmap {
    /// Build the heatmap for the year ending at `today` (inclusive).
    pub fn build(history: &DailyHistory, today: NaiveDate) -> Self {
        let window_start = today
            .checked_sub_days(Days::new(WINDOW_DAYS - 1))
            .unwrap_or(today);
        // Align back to the Sunday on or before the window start.
        let lead = u64::from(window_start.weekday().num_days_from_sunday());
        let grid_start = window_start
            .checked_sub_days(Days::new(lead))
            .unwrap_or(window_start);

        let mut max_count = 0;
        let mut date = grid_start;
        while date <= today {
            max_count = max_count.max(history.count(date));
            date = date.succ_opt().unwrap_or(date);
        }

        let mut weeks = Vec::new();
        let mut week = Vec::with_capacity(7);
        let mut date = grid_start;
        while date <= today {
            let count = history.count(date);
            week.push(HeatmapCell {
                date,
                count,
                intensity: intensity(count, max_count),
            });
            if week.len() == 7 {
                weeks.push(std::mem::take(&mut week));
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        if !week.is_empty() {
            weeks.push(week);
        }

        Self { weeks, max_count }
    }

    /// Terminal rendering: one text row per weekday, one column per week.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        for weekday in 0..7 {
            for week in &self.weeks {
                out.push(week.get(weekday).map(HeatmapCell::shade_char).unwrap_or(' '));
            }
            out.push('\n');
        }
        out
    }
}

fn intensity(count: u32, max_count: u32) -> f64 {
    if count == 0 || max_count == 0 {
        return 0.0;
    }
    MIN_OPACITY + (MAX_OPACITY - MIN_OPACITY) * f64::from(count) / f64::from(max_count)
}
