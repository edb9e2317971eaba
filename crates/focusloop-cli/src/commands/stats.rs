use clap::Subcommand;
use focusloop_core::{local_now, ActivityHeatmap, WeekdayProfile};

use crate::common;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print cumulative statistics as JSON
    Summary,
    /// Render the trailing-year activity heatmap
    Heatmap,
    /// Render average completions per weekday
    Weekdays,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = common::load_app()?;
    match action {
        StatsAction::Summary => {
            println!("{}", serde_json::to_string_pretty(app.ledger().stats())?);
        }
        StatsAction::Heatmap => {
            let map = ActivityHeatmap::build(app.ledger().history(), local_now().date());
            print!("{}", map.render_ascii());
            println!("busiest day: {} completions", map.max_count);
        }
        StatsAction::Weekdays => {
            let profile = WeekdayProfile::build(app.ledger().history());
            print!("{}", profile.render_ascii());
        }
    }
    Ok(())
}
