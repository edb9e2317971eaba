use clap::Subcommand;
use focusloop_core::AchievementId;

use crate::common;

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// List the achievement catalog with unlock status
    List {
        /// Print the raw unlock map as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = common::load_app()?;
    match action {
        AchievementsAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(app.ledger().achievements())?);
                return Ok(());
            }
            for id in AchievementId::ALL {
                match app.ledger().achievements().unlocked_at(id) {
                    Some(at) => {
                        println!("[x] {:<22} {} (unlocked {})", id.title(), id.description(), at)
                    }
                    None => println!("[ ] {:<22} {}", id.title(), id.description()),
                }
            }
        }
    }
    Ok(())
}
