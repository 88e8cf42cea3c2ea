mod controller;
mod runner;
mod settings;

pub use controller::{SessionController, STATE_KEY};
pub use runner::{Command, SessionRunner, TICK_PERIOD};
pub use settings::SessionConfig;
