//! Session control.
//!
//! `SessionController` sits between the user and the [`TimerEngine`]: it
//! turns start/stop/reset requests into engine operations, rebuilds the
//! engine configuration when the requested session changed, records
//! completed focus time, and persists an engine snapshot after every
//! state-changing action so a restarted process can pick up mid-countdown.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::settings::SessionConfig;
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::storage::{FocusRecorder, StateStore};
use crate::timer::{EngineSnapshot, Plan, SequencePolicy, TimerEngine, TimerStatus};

/// Key of the engine snapshot in the state store.
pub const STATE_KEY: &str = "timer_state";

const EVENT_CAPACITY: usize = 1024;

pub struct SessionController<S, R> {
    engine: TimerEngine,
    policy: SequencePolicy,
    requested: SessionConfig,
    store: S,
    recorder: R,
    events: broadcast::Sender<Event>,
}

impl<S: StateStore, R: FocusRecorder> SessionController<S, R> {
    /// A controller with a fresh engine built from `requested`.
    /// Nothing is loaded or saved.
    pub fn new(store: S, recorder: R, policy: SequencePolicy, requested: SessionConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut controller = Self {
            engine: TimerEngine::new(),
            policy,
            requested,
            store,
            recorder,
            events,
        };
        controller.apply_plan();
        controller
    }

    /// Build a controller from the saved snapshot, if there is a usable one.
    ///
    /// A missing, unreadable or inconsistent snapshot falls back to a fresh
    /// session built from `requested`. A snapshot that was running when it
    /// was saved resumes running. Nobody can be subscribed yet, so the
    /// restored countdown is published later by [`Self::announce`].
    pub fn restore(store: S, recorder: R, policy: SequencePolicy, requested: SessionConfig) -> Self {
        let mut controller = Self::new(store, recorder, policy, requested);
        match controller.load_snapshot() {
            Ok(Some(snapshot)) => match controller.engine.restore(&snapshot) {
                Ok(()) => {
                    if snapshot.running && controller.engine.start() {
                        info!(
                            remaining_secs = controller.engine.remaining_secs(),
                            "resuming saved timer"
                        );
                    }
                    return controller;
                }
                Err(e) => warn!(error = %e, "saved timer state rejected, starting fresh"),
            },
            Ok(None) => debug!("no saved timer state"),
            Err(e) => warn!(error = %e, "saved timer state unreadable, starting fresh"),
        }
        controller.reset();
        controller
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn status(&self) -> TimerStatus {
        self.engine.status()
    }

    pub fn requested(&self) -> SessionConfig {
        self.requested
    }

    pub fn policy(&self) -> SequencePolicy {
        self.policy
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. Rebuilds first when the requested session no longer
    /// matches the engine, or when the current countdown is used up.
    ///
    /// Returns `true` if the engine is now running and was not before.
    pub fn start(&mut self) -> bool {
        if self.engine.is_running() {
            return false;
        }
        let wanted = self.requested.plan(&self.policy);
        if self.engine.plan() != wanted || self.engine.remaining_secs() == 0 {
            debug!("session changed or exhausted, rebuilding before start");
            self.reset();
        }
        let started = self.engine.start();
        self.persist();
        started
    }

    /// Returns `true` if the engine was running.
    pub fn stop(&mut self) -> bool {
        if !self.engine.pause() {
            return false;
        }
        self.persist();
        true
    }

    /// Rewind and rebuild from the requested session. Listeners get one
    /// tick with the rebuilt countdown.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.apply_plan();
        self.publish_tick();
        self.persist();
    }

    /// Change the requested session.
    ///
    /// Applied immediately while paused. While running, the countdown in
    /// flight is left alone and the request is picked up by the next
    /// `start()` after a stop.
    ///
    /// # Errors
    /// Invalid settings are rejected and nothing changes.
    pub fn update_settings(&mut self, config: SessionConfig) -> Result<(), ValidationError> {
        config.validate()?;
        self.requested = config;
        if self.engine.is_running() {
            self.persist();
        } else {
            self.reset();
        }
        Ok(())
    }

    /// Advance the engine one second and react to what happened.
    pub fn tick(&mut self) {
        let events = self.engine.tick();
        for event in events {
            match event {
                Event::IntervalCompleted {
                    was_focusing,
                    duration_secs,
                    ..
                } => {
                    self.on_interval_complete(was_focusing, duration_secs);
                    self.persist();
                    self.publish(event);
                }
                Event::SequenceCompleted { intervals, .. } => {
                    info!(intervals, "sequence complete");
                    self.publish(event);
                    self.reset();
                }
                Event::Tick { .. } => self.publish(event),
            }
        }
    }

    /// Write the engine snapshot to the store. Failures are logged.
    pub fn persist(&self) {
        let snapshot = self.engine.snapshot();
        let result = serde_json::to_string(&snapshot)
            .map_err(CoreError::from)
            .and_then(|json| self.store.save(STATE_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "failed to save timer state");
        }
    }

    /// Publish the current countdown as a tick. The runner calls this once
    /// on entry so late subscribers see the restored state.
    pub fn announce(&self) {
        self.publish_tick();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_interval_complete(&mut self, was_focusing: bool, duration_secs: u32) {
        if !was_focusing {
            debug!("break complete");
            return;
        }
        let minutes = duration_secs / 60;
        if minutes > 0 {
            match self.recorder.add_focus_minutes(minutes) {
                Ok(()) => info!(minutes, "recorded focus time"),
                Err(e) => warn!(error = %e, minutes, "failed to record focus time"),
            }
        }
        self.engine.clear_elapsed_focus();
    }

    fn apply_plan(&mut self) {
        match self.requested.plan(&self.policy) {
            Plan::Sequenced { sequence } => self.engine.configure_sequence(sequence),
            Plan::Simple {
                focus_secs,
                break_secs,
            } => self.engine.configure_simple(focus_secs, break_secs),
        }
    }

    fn load_snapshot(&self) -> Result<Option<EngineSnapshot>> {
        match self.store.load(STATE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn publish_tick(&self) {
        self.publish(Event::tick(
            self.engine.remaining_secs(),
            self.engine.phase(),
        ));
    }

    fn publish(&self, event: Event) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
