mod engine;
mod settings;

pub use engine::{Phase, SessionClock};
pub use settings::TimerSettings;
