//! Global actions - not tied to any specific panel

use ratatui::crossterm::event::KeyEvent;

/// Global actions that affect the entire application
#[derive(Debug, Clone)]
pub enum GlobalAction {
    /// Raw key pressed (before translation)
    KeyPressed(KeyEvent),
    /// Quit the application
    Quit,
    /// Periodic tick for animations
    Tick,
}

impl GlobalAction {
    pub fn name(&self) -> &'static str {
        match self {
            GlobalAction::KeyPressed(_) => "KeyPressed",
            GlobalAction::Quit => "Quit",
            GlobalAction::Tick => "Tick",
        }
    }
}
