//! Views
//!
//! Each panel renders a slice of `AppState`; none of them mutate it.
//! Layout: header on top, then a left column (code, variables, help, errors)
//! and a right column (parameter sliders above the chart). The server error
//! dialog is drawn last, over everything else.

use crate::state::{AppState, Panel};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders},
    Frame,
};

pub mod chart_view;
pub mod editor_view;
pub mod errors_view;
pub mod header;
pub mod help_view;
pub mod server_error_dialog;
pub mod sliders_view;
pub mod variables_view;

/// Bordered block for a panel, highlighted when focused
pub(crate) fn panel_block<'a>(title: impl Into<String>, focused: bool, theme: &Theme) -> Block<'a> {
    styled_panel_block(title, theme.panel_title(focused), focused, theme)
}

/// Panel block whose title uses `title_style` instead of the focus style
pub(crate) fn styled_panel_block<'a>(
    title: impl Into<String>,
    title_style: Style,
    focused: bool,
    theme: &Theme,
) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", title.into()), title_style))
        .border_style(theme.panel_border(focused))
        .style(theme.panel_background())
}

/// Whether `panel` currently has keyboard focus
pub(crate) fn is_focused(state: &AppState, panel: Panel) -> bool {
    state.ui.focus == panel
}

/// Render the entire application UI
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    header::render(state, rows[0], f);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(37), // Model code
            Constraint::Percentage(13), // Variables
            Constraint::Percentage(36), // Help
            Constraint::Percentage(7),  // Compile error
            Constraint::Percentage(7),  // Solve error
        ])
        .split(columns[0]);

    editor_view::render(state, left[0], f);
    variables_view::render(state, left[1], f);
    help_view::render(state, left[2], f);
    errors_view::render_compile_error(state, left[3], f);
    errors_view::render_solve_error(state, left[4], f);

    let slider_rows = state.model.parameter_count().max(1) as u16;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(slider_rows.saturating_add(2).min(columns[1].height / 2)),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    sliders_view::render(state, right[0], f);
    chart_view::render(state, right[1], f);

    server_error_dialog::render(state, area, f);
}
