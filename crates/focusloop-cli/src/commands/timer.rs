use std::time::Duration;

use clap::Subcommand;
use focusloop_core::local_now;

use crate::common;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown loop in the foreground, printing events as JSON
    /// lines. The clock rolls through phases on its own; stop with Ctrl-C.
    Run {
        /// Stop after this many ticks (runs indefinitely when omitted)
        #[arg(long)]
        ticks: Option<u64>,
        /// Milliseconds between ticks
        #[arg(long, default_value = "1000")]
        interval_ms: u64,
    },
    /// Print the current state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { ticks, interval_ms } => run_loop(ticks, interval_ms),
        TimerAction::Status => {
            let app = common::load_app()?;
            let snapshot = app.snapshot_event(local_now());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}

fn run_loop(ticks: Option<u64>, interval_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = common::load_app()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        if let Some(event) = app.start(local_now()) {
            common::print_events(&[event])?;
        }
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
        // The first interval tick fires immediately; consume it so every
        // loop iteration below represents one elapsed interval.
        interval.tick().await;

        let mut elapsed: u64 = 0;
        loop {
            interval.tick().await;
            let events = app.tick(local_now());
            common::print_events(&events)?;
            elapsed += 1;
            if let Some(limit) = ticks {
                if elapsed >= limit {
                    break;
                }
            }
        }
        let snapshot = app.snapshot_event(local_now());
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    })
}
