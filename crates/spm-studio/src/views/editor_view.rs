//! Scrollable model source with an edit mode cursor

use super::{is_focused, panel_block};
use crate::state::{code_lines, visible_scroll, AppState, EditorCursor, Panel};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split `text` around char `column` and highlight the char under the cursor
fn cursor_line<'a>(text: &'a str, column: usize, theme: &Theme) -> Vec<Span<'a>> {
    let at = text
        .char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (before, rest) = text.split_at(at);
    let mut chars = rest.chars();
    let under = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());

    vec![
        Span::styled(before, theme.text()),
        Span::styled(under, theme.selected()),
        Span::styled(chars.as_str(), theme.text()),
    ]
}

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let code = &state.model.code;
    let editing = state.ui.editing;
    let title = if editing {
        format!("{} (editing, Esc to stop)", Panel::Editor)
    } else {
        Panel::Editor.to_string()
    };
    let block = panel_block(title, is_focused(state, Panel::Editor), theme);

    if code.is_empty() && !editing {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No model yet. Select variables and press c to compile, or e to write one.",
            theme.muted(),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let source = code_lines(code);
    let cursor = state.ui.editor_cursor;
    let width = source.len().to_string().len();
    let lines: Vec<Line> = source
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", i + 1, width = width),
                theme.line_number(),
            )];
            if editing && i == cursor.line {
                spans.extend(cursor_line(*text, cursor.column, theme));
            } else {
                spans.push(Span::styled(*text, theme.text()));
            }
            Line::from(spans)
        })
        .collect();

    let scroll = if editing {
        let EditorCursor { line, .. } = cursor;
        let height = usize::from(block.inner(area).height);
        let top = visible_scroll(usize::from(state.ui.code_scroll), line, height);
        u16::try_from(top).unwrap_or(u16::MAX)
    } else {
        state.ui.code_scroll
    };

    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}
