//! Application State Module
//!
//! Contains all state types used by the application, organized by feature.

mod app;
mod editor;
mod model;
mod solver_session;
mod ui;

pub use app::AppState;
pub use editor::{apply_edit, code_lines, visible_scroll, EditorCursor};
pub use model::{CompileGeneration, ModelState, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND};
pub use solver_session::SolverSession;
#[cfg(test)]
pub use solver_session::{DEFAULT_END_TIME, TIMEPOINT_COUNT};
pub use ui::{Panel, UiState, VariableList};
