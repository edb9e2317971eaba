use clap::Subcommand;

use crate::common;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Print the daily goal and today's progress
    Show,
    /// Change the daily target (progress so far today is kept)
    Set {
        target: u32,
    },
    /// Zero today's progress, re-arming the goal celebration
    ResetToday,
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = common::load_app()?;
    match action {
        GoalAction::Show => {}
        GoalAction::Set { target } => app.set_goal_target(target),
        GoalAction::ResetToday => app.reset_today(),
    }
    println!("{}", serde_json::to_string_pretty(app.ledger().goal())?);
    Ok(())
}
