use crate::actions::{Action, GlobalAction, ModelAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

/// LoggingMiddleware - logs all actions passing through
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, _dispatcher: &Dispatcher) -> bool {
        match action {
            // Ticks fire several times a second
            Action::Global(GlobalAction::Tick) => {}
            // Buffers and source text are too large for the log
            Action::Model(ModelAction::Compiled(model)) => {
                log::debug!("Action: Compiled({})", model.generation);
            }
            Action::Model(ModelAction::SetCode { code, generation }) => {
                log::debug!("Action: SetCode({} bytes, {:?})", code.len(), generation);
            }
            _ => log::debug!("Action: {:?}", action),
        }

        true // Always pass action through
    }
}
