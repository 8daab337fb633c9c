//! Header line: application name, compile status and focused panel

use crate::state::AppState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Status text shown in the header badge
pub fn status_text(state: &AppState) -> String {
    let model = &state.model;
    if model.compiling {
        let frame = SPINNER[(state.ui.tick % SPINNER.len() as u64) as usize];
        format!("{} compiling {}", frame, model.compile_generation)
    } else if model.compile_error.is_some() || model.server_error.is_some() {
        "error".to_string()
    } else if model.session.is_some() {
        "ready".to_string()
    } else {
        "no model".to_string()
    }
}

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let model = &state.model;

    let badge_color = if model.compiling {
        theme.status_busy
    } else if model.compile_error.is_some() || model.server_error.is_some() {
        theme.status_error
    } else if model.session.is_some() {
        theme.status_ready
    } else {
        theme.text_muted
    };

    let line = Line::from(vec![
        Span::styled(" SPM Studio ", theme.badge(theme.border_focused)),
        Span::raw(" "),
        Span::styled(format!(" {} ", status_text(state)), theme.badge(badge_color)),
        Span::raw("  "),
        Span::styled(format!("focus: {}", state.ui.focus), theme.muted()),
    ]);

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.bg_primary)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let mut state = AppState::default();
        assert_eq!(status_text(&state), "no model");

        state.model.compiling = true;
        assert!(status_text(&state).contains("compiling #0"));

        state.model.compiling = false;
        state.model.server_error = Some("down".to_string());
        assert_eq!(status_text(&state), "error");
    }
}
