//! Text input actions for the model code editor
//!
//! Produced by the keyboard middleware while the editor is in edit mode and
//! translated into model and cursor actions by `EditorMiddleware`.

/// Editing keystrokes, independent of the code they apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    /// Character typed at the cursor
    Char(char),
    /// Split the line at the cursor
    Newline,
    /// Remove the character before the cursor, joining lines at column 0
    Backspace,
    /// Remove the character under the cursor, joining lines at line end
    Delete,
    Left,
    Right,
    Up,
    Down,
    /// Start of the line
    Home,
    /// End of the line
    End,
}
