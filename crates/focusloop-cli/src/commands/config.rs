use clap::Subcommand;
use focusloop_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current preferences
    Show,
    /// Set the theme
    Theme {
        name: String,
    },
    /// Set a sound's volume (clamped to 0.0..=1.0)
    Volume {
        sound: String,
        value: f32,
    },
    /// Enable or disable notifications
    Notifications {
        enabled: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    match action {
        ConfigAction::Show => {}
        ConfigAction::Theme { name } => {
            config.theme = name;
            config.save()?;
        }
        ConfigAction::Volume { sound, value } => {
            config.set_volume(&sound, value);
            config.save()?;
        }
        ConfigAction::Notifications { enabled } => {
            config.notifications.enabled = enabled;
            config.save()?;
        }
    }
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
