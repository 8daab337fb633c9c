//! Actions module
//!
//! Actions are tagged by the part of the application they affect:
//! - Global actions (raw input, quit, animation ticks)
//! - Model actions: the session intents (compile, inputs, bounds, errors)
//! - UI actions: focus and cursor movement inside the panels
//! - Text input: editing keystrokes for the model code

pub mod global;
pub mod model;
pub mod text_input;
pub mod ui;

pub use global::GlobalAction;
pub use model::{CompiledModel, ModelAction};
pub use text_input::TextInputAction;
pub use ui::UiAction;

/// Root action enum - tagged by domain
#[derive(Debug)]
pub enum Action {
    /// Global application actions
    Global(GlobalAction),
    /// Session intents, reduced into `ModelState`
    Model(ModelAction),
    /// Panel focus and cursor actions, reduced into `UiState`
    Ui(UiAction),
    /// Editing keystroke, translated by `EditorMiddleware`
    TextInput(TextInputAction),
}

impl Action {
    /// Short name for log lines and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Action::Global(action) => action.name(),
            Action::Model(action) => action.name(),
            Action::Ui(_) => "Ui",
            Action::TextInput(_) => "TextInput",
        }
    }
}

impl From<ModelAction> for Action {
    fn from(action: ModelAction) -> Self {
        Action::Model(action)
    }
}

impl From<UiAction> for Action {
    fn from(action: UiAction) -> Self {
        Action::Ui(action)
    }
}

impl From<TextInputAction> for Action {
    fn from(action: TextInputAction) -> Self {
        Action::TextInput(action)
    }
}

impl From<GlobalAction> for Action {
    fn from(action: GlobalAction) -> Self {
        Action::Global(action)
    }
}
