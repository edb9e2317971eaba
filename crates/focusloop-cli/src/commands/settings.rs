use clap::Subcommand;
use focusloop_core::TimerSettings;

use crate::common;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current timer settings as JSON
    Show,
    /// Replace all four settings atomically. The new durations apply from
    /// the next reset.
    Set {
        /// Work phase length in minutes
        #[arg(long)]
        work: u32,
        /// Short break length in minutes
        #[arg(long)]
        short_break: u32,
        /// Long break length in minutes
        #[arg(long)]
        long_break: u32,
        /// Work completions per long break
        #[arg(long)]
        cycles: u32,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = common::load_app()?;
    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(app.clock().latest_settings())?);
        }
        SettingsAction::Set {
            work,
            short_break,
            long_break,
            cycles,
        } => {
            let settings = TimerSettings {
                work_minutes: work,
                short_break_minutes: short_break,
                long_break_minutes: long_break,
                cycles_per_long_break: cycles,
            };
            app.update_settings(settings)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
