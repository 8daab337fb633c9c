//! Modal dialog shown while `server_error` is set

use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Centered popup area: 60% wide (40..80 columns), fixed height
fn popup_area(area: Rect) -> Rect {
    let width = (area.width * 60 / 100).clamp(40, 80).min(area.width);
    let height = 9.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let Some(error) = state.model.server_error.as_deref() else {
        return;
    };
    let theme = &state.theme;

    // Dim everything underneath
    f.render_widget(
        Block::default().style(Style::default().bg(Color::Black).add_modifier(Modifier::DIM)),
        area,
    );

    let popup = popup_area(area);
    f.render_widget(Clear, popup);

    let footer = Line::from(vec![
        Span::styled(" Esc", theme.key_hint()),
        Span::styled(" dismiss ", theme.muted()),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Server error ", theme.error()))
        .title_bottom(footer)
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(theme.status_error))
        .style(Style::default().bg(theme.bg_dialog));
    f.render_widget(block, popup);

    let inner = popup.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    f.render_widget(
        Paragraph::new(Span::styled(error.to_string(), theme.text()))
            .wrap(Wrap { trim: true }),
        inner,
    );
}
