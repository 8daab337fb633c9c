//! Panel focus and cursor actions

use crate::state::{EditorCursor, VariableList};

/// Actions that only move the UI around; they never touch the model
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Move focus to the next panel
    FocusNext,
    /// Move focus to the previous panel
    FocusPrevious,
    /// Move the cursor of the focused panel down
    CursorNext,
    /// Move the cursor of the focused panel up
    CursorPrevious,
    /// Switch the variable panel between the input and output lists
    ShowVariables(VariableList),
    /// Scroll the code view by the given number of lines
    ScrollCode(i32),
    /// Focus the code view and route typing into it
    StartEditing,
    StopEditing,
    SetEditorCursor(EditorCursor),
}
