//! One-second tick loop.
//!
//! `SessionRunner` owns a [`SessionController`] and serializes everything
//! that can touch it: user commands arrive over an mpsc channel, ticks come
//! from a `tokio::time::Interval` that only exists while the engine runs.
//! Run it on a current-thread runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use super::controller::SessionController;
use super::settings::SessionConfig;
use crate::storage::{FocusRecorder, StateStore};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    UpdateSettings(SessionConfig),
    /// Persist and leave the loop.
    Shutdown,
}

pub struct SessionRunner<S, R> {
    controller: SessionController<S, R>,
    commands: mpsc::Receiver<Command>,
}

impl<S: StateStore, R: FocusRecorder> SessionRunner<S, R> {
    pub fn new(controller: SessionController<S, R>, commands: mpsc::Receiver<Command>) -> Self {
        Self {
            controller,
            commands,
        }
    }

    /// Drive the session until `Shutdown` arrives or every sender is gone.
    /// Returns the controller so callers can inspect the final state.
    ///
    /// Subscribers attached before this is called first receive one tick
    /// with the current countdown.
    pub async fn run(mut self) -> SessionController<S, R> {
        self.controller.announce();
        let mut ticker = new_ticker();
        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    if command == Command::Shutdown {
                        break;
                    }
                    let was_running = self.controller.is_running();
                    self.apply(command);
                    if !was_running && self.controller.is_running() {
                        // First tick a full period after (re)starting.
                        ticker = new_ticker();
                    }
                }

                _ = ticker.tick(), if self.controller.is_running() => {
                    self.controller.tick();
                }
            }
        }
        debug!("session runner stopping");
        self.controller.persist();
        self.controller
    }

    fn apply(&mut self, command: Command) {
        debug!(?command, "session command");
        match command {
            Command::Start => {
                self.controller.start();
            }
            Command::Stop => {
                self.controller.stop();
            }
            Command::Reset => self.controller.reset(),
            Command::UpdateSettings(config) => {
                if let Err(e) = self.controller.update_settings(config) {
                    warn!(error = %e, "ignoring invalid session settings");
                }
            }
            Command::Shutdown => {}
        }
    }
}

fn new_ticker() -> Interval {
    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
