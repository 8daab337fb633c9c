//! Application State

use spm_config::AppConfig;

use super::{ModelState, UiState};
use crate::theme::Theme;

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    /// The model session: code, solver, buffers, selections and errors
    pub model: ModelState,
    pub ui: UiState,
    pub theme: Theme,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            model: ModelState::new(
                config.default_inputs.clone(),
                config.default_outputs.clone(),
            ),
            ui: UiState::default(),
            theme: Theme::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
