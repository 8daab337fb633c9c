use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod compile_middleware;
pub mod editor_middleware;
pub mod keyboard_middleware;
pub mod logging_middleware;

pub use compile_middleware::CompileMiddleware;
pub use editor_middleware::EditorMiddleware;
pub use keyboard_middleware::KeyboardMiddleware;
pub use logging_middleware::LoggingMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs on the UI thread and must not block. Slow work (HTTP,
/// model compilation) is spawned onto a runtime and reports back through
/// the dispatcher.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current application state (read-only)
    /// - `dispatcher`: Use to queue follow-up actions
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
