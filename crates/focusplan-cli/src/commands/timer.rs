use std::sync::Arc;

use clap::Subcommand;
use focusplan_core::storage::Database;
use focusplan_core::{Command, Config, Event, SessionController, SessionRunner};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::warn;

type Controller = SessionController<Arc<Database>, Arc<Database>>;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume and run in the foreground, printing events as JSON lines
    Start,
    /// Pause, keeping the remaining time
    Stop,
    /// Rewind to the beginning of the configured session
    Reset,
    /// Print current timer state as JSON
    Status,
}

fn load_controller() -> Result<Controller, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let policy = config.policy()?;
    let db = Arc::new(Database::open()?);
    Ok(SessionController::restore(
        db.clone(),
        db,
        policy,
        config.session,
    ))
}

fn print_status(controller: &Controller) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&controller.status())?);
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

/// The foreground run is over once the engine stops by itself.
fn ends_run(event: &Event) -> bool {
    matches!(
        event,
        Event::SequenceCompleted { .. } | Event::IntervalCompleted { index: None, .. }
    )
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = load_controller()?;

    match action {
        TimerAction::Start => run_foreground(controller)?,
        TimerAction::Stop => {
            controller.stop();
            print_status(&controller)?;
        }
        TimerAction::Reset => {
            controller.reset();
            print_status(&controller)?;
        }
        TimerAction::Status => print_status(&controller)?,
    }
    Ok(())
}

fn run_foreground(controller: Controller) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut events = controller.subscribe();
        let (tx, rx) = mpsc::channel(16);
        tx.send(Command::Start).await?;

        let runner = SessionRunner::new(controller, rx).run();
        tokio::pin!(runner);

        let mut shutting_down = false;
        let controller = loop {
            tokio::select! {
                biased;

                controller = &mut runner => break controller,

                _ = tokio::signal::ctrl_c(), if !shutting_down => {
                    shutting_down = true;
                    tx.send(Command::Stop).await?;
                    tx.send(Command::Shutdown).await?;
                }

                event = events.recv() => match event {
                    Ok(event) => {
                        print_event(&event)?;
                        if ends_run(&event) && !shutting_down {
                            shutting_down = true;
                            tx.send(Command::Shutdown).await?;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "event output fell behind"),
                    Err(RecvError::Closed) => {
                        if !shutting_down {
                            shutting_down = true;
                            tx.send(Command::Shutdown).await?;
                        }
                    }
                },
            }
        };

        while let Ok(event) = events.try_recv() {
            print_event(&event)?;
        }
        print_status(&controller)
    })
}
