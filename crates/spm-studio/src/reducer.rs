use thiserror::Error;

use crate::actions::{Action, GlobalAction};
use crate::reducers::{model_reducer, ui_reducer};
use crate::state::AppState;

/// Unrecoverable reducer failure: an action was dispatched whose
/// preconditions can never hold in a correctly wired application.
#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("{action} dispatched before any model was compiled")]
    NotCompiled { action: &'static str },
}

/// Reducer - produces the next state from current state + action
/// This is the root reducer that orchestrates all sub-reducers
pub fn reduce(state: &mut AppState, action: Action) -> Result<(), ReduceError> {
    match action {
        Action::Global(GlobalAction::Quit) => {
            state.running = false;
        }
        Action::Global(GlobalAction::Tick) => {
            state.ui.tick = state.ui.tick.wrapping_add(1);
        }
        Action::Global(GlobalAction::KeyPressed(_)) => {
            // Translated by KeyboardMiddleware, never reduced
        }
        Action::Model(action) => {
            model_reducer::reduce_model(&mut state.model, action)?;
            // Lists and parameter counts may have shrunk
            ui_reducer::clamp_cursors(&mut state.ui, &state.model);
        }
        Action::Ui(action) => {
            ui_reducer::reduce_ui(&mut state.ui, &state.model, &action);
        }
        Action::TextInput(_) => {
            // Translated by EditorMiddleware, never reduced
        }
    }

    Ok(())
}
