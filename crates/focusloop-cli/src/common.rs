//! Shared helpers for CLI commands.

use focusloop_core::{local_now, App, Event, StateDb};

/// Open the state database and assemble the controller. Startup events
/// (defaults notice, streak expiry) are printed before the command runs.
pub fn load_app() -> Result<App<StateDb>, Box<dyn std::error::Error>> {
    let db = StateDb::open()?;
    let (app, events) = App::load(db, local_now())?;
    print_events(&events)?;
    Ok(app)
}

/// Print events as JSON lines.
pub fn print_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
