use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::reducer::{reduce, ReduceError};
use crate::state::AppState;

/// Store - holds application state and manages the Redux loop
///
/// All reducer invocations happen on the thread that owns the store, one at a
/// time. Follow-up actions from middleware and async tasks are queued on the
/// dispatcher channel and reduced when the store drains it.
pub struct Store {
    state: AppState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    action_rx: Receiver<Action>,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        let (action_tx, action_rx) = mpsc::channel();
        Self {
            state: initial_state,
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(action_tx),
            action_rx,
        }
    }

    /// Add middleware to the store
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process an action through middleware chain and reducer, then any
    /// follow-up actions it queued
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<(), ReduceError> {
        self.run(action.into())?;
        self.process_pending()?;
        Ok(())
    }

    /// Reduce every queued action without blocking.
    ///
    /// Returns the number of actions processed.
    pub fn process_pending(&mut self) -> Result<usize, ReduceError> {
        let mut processed = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.run(action)?;
            processed += 1;
        }
        Ok(processed)
    }

    /// Wait up to `timeout` for a queued action and reduce it together with
    /// anything queued behind it.
    ///
    /// Returns false if nothing arrived in time.
    pub fn process_next(&mut self, timeout: Duration) -> Result<bool, ReduceError> {
        match self.action_rx.recv_timeout(timeout) {
            Ok(action) => {
                self.run(action)?;
                self.process_pending()?;
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => {
                // The store holds a sender itself, so this cannot happen
                log::error!("Action channel disconnected");
                Ok(false)
            }
        }
    }

    fn run(&mut self, action: Action) -> Result<(), ReduceError> {
        // Pass through middleware chain
        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                return Ok(());
            }
        }

        reduce(&mut self.state, action)
    }
}
