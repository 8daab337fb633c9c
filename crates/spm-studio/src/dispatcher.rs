//! Dispatcher for middleware action dispatch
//!
//! When middleware (or a task it spawned) needs to dispatch follow-up actions,
//! it uses the Dispatcher. Actions dispatched here are queued on a channel and
//! run through the full middleware chain and reducer when the store drains
//! the queue on the UI thread.

use crate::actions::Action;
use std::sync::mpsc::Sender;

/// Dispatcher for sending actions back into the store
///
/// Cheap to clone; async tasks keep their own copy.
#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    /// Queue an action for the store
    pub fn dispatch(&self, action: impl Into<Action>) {
        if let Err(e) = self.action_tx.send(action.into()) {
            log::error!("Dispatcher: failed to send action: {}", e.0.name());
        }
    }
}
