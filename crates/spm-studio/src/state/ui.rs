//! UI State
//!
//! Focus and cursor positions of the panels. Nothing here affects the model.

use strum::{Display, EnumIter, IntoEnumIterator};

use super::EditorCursor;

/// Panels that can receive keyboard focus, in Tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, Display)]
pub enum Panel {
    #[default]
    #[strum(to_string = "Model code")]
    Editor,
    #[strum(to_string = "Variables")]
    Variables,
    #[strum(to_string = "Parameters")]
    Sliders,
    #[strum(to_string = "Solution")]
    Chart,
}

impl Panel {
    pub fn next(self) -> Self {
        let panels: Vec<Panel> = Panel::iter().collect();
        let idx = panels.iter().position(|p| *p == self).unwrap_or(0);
        panels[(idx + 1) % panels.len()]
    }

    pub fn previous(self) -> Self {
        let panels: Vec<Panel> = Panel::iter().collect();
        let idx = panels.iter().position(|p| *p == self).unwrap_or(0);
        panels[(idx + panels.len() - 1) % panels.len()]
    }
}

/// Which list the variable panel shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum VariableList {
    #[default]
    Inputs,
    Outputs,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Panel,
    /// First visible line of the code view
    pub code_scroll: u16,
    /// Keys are routed to the code editor
    pub editing: bool,
    pub editor_cursor: EditorCursor,
    pub variable_list: VariableList,
    pub variable_cursor: usize,
    pub slider_cursor: usize,
    /// Animation frame counter
    pub tick: u64,
}
