//! Daily streak arithmetic.
//!
//! A streak is the count of consecutive calendar days containing at least
//! one completed work phase. Two rules apply, and they are asymmetric on
//! purpose:
//!
//! - On a completion, a broken streak restarts at 1 (today's session counts).
//! - At load time, a broken streak drops to 0 (nothing has been earned yet
//!   today).

use chrono::NaiveDate;

use super::Stats;

/// Whole-day distance between the last session's date and `today`.
fn day_gap(last: NaiveDate, today: NaiveDate) -> i64 {
    (today - last).num_days()
}

/// Apply a completion on `today`. Returns the new streak value.
pub(crate) fn update_on_completion(stats: &mut Stats, today: NaiveDate) -> u32 {
    match stats.last_session_date {
        None => stats.current_streak = 1,
        Some(last) => match day_gap(last, today) {
            1 => stats.current_streak += 1,
            gap if gap > 1 => stats.current_streak = 1,
            _ => {} // Same day: unchanged.
        },
    }
    stats.last_session_date = Some(today);
    stats.current_streak
}

/// Startup check, before any completion has been recorded today: a gap of
/// two or more days voids the streak outright. `last_session_date` is left
/// untouched.
pub(crate) fn check_on_load(stats: &mut Stats, today: NaiveDate) -> bool {
    if stats.current_streak == 0 {
        return false;
    }
    match stats.last_session_date {
        Some(last) if last != today && day_gap(last, today) > 1 => {
            stats.current_streak = 0;
            true
        }
        _ => false,
    }
}
