//! Editor Middleware
//!
//! Translates `TextInput` keystrokes into a model edit and a cursor move.
//! User edits are dispatched as untagged `SetCode`, so they are never
//! discarded as stale.

use crate::actions::{Action, ModelAction, UiAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{apply_edit, AppState};

pub struct EditorMiddleware;

impl EditorMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EditorMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for EditorMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        let Action::TextInput(input) = action else {
            return true;
        };

        if !state.ui.editing {
            log::debug!("EditorMiddleware: not editing, dropping {:?}", input);
            return false;
        }

        let cursor = state.ui.editor_cursor;
        let (code, next) = apply_edit(&state.model.code, cursor, *input);
        if let Some(code) = code {
            dispatcher.dispatch(ModelAction::SetCode {
                code,
                generation: None,
            });
        }
        if next != cursor {
            dispatcher.dispatch(UiAction::SetEditorCursor(next));
        }

        // Consume the keystroke
        false
    }
}
