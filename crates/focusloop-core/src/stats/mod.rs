//! Statistics derivations over the daily history.
//!
//! Read-only reporting: a trailing-year calendar heatmap and a per-weekday
//! average profile. Nothing in here mutates ledger state.

mod activity_heatmap;
mod weekday_profile;

pub use activity_heatmap::{ActivityHeatmap, HeatmapCell, MAX_OPACITY, MIN_OPACITY};
pub use weekday_profile::WeekdayProfile;
