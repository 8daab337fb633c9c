//! Compile and solve error panes

use super::panel_block;
use crate::state::AppState;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Paragraph, Wrap},
    Frame,
};

fn render_error(state: &AppState, title: &str, error: Option<&str>, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let body = match error {
        Some(message) => Span::styled(message.to_string(), theme.error()),
        None => Span::styled("none", theme.muted()),
    };
    f.render_widget(
        Paragraph::new(body)
            .block(panel_block(title, false, theme))
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_compile_error(state: &AppState, area: Rect, f: &mut Frame) {
    render_error(
        state,
        "Compile error",
        state.model.compile_error.as_deref(),
        area,
        f,
    );
}

pub fn render_solve_error(state: &AppState, area: Rect, f: &mut Frame) {
    render_error(
        state,
        "Solve error",
        state.model.solve_error.as_deref(),
        area,
        f,
    );
}
