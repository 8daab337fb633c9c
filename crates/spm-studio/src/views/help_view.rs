//! Key reference for the focused panel

use super::panel_block;
use crate::state::{AppState, Panel};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("Tab", "next panel"),
    ("c", "compile"),
    ("x", "cancel compile"),
    ("o", "reload variable options"),
    ("Esc", "dismiss error"),
    ("q", "quit"),
];

/// Keys while the code editor has edit mode on; global keys are text then
const EDITING_KEYS: &[(&str, &str)] = &[
    ("type", "insert text"),
    ("arrows", "move cursor"),
    ("Home/End", "line start / end"),
    ("Enter", "new line"),
    ("Esc", "stop editing"),
    ("Ctrl+C", "quit"),
];

/// Keys that only apply to `panel`
pub fn panel_keys(panel: Panel) -> &'static [(&'static str, &'static str)] {
    match panel {
        Panel::Editor => &[
            ("e/Enter", "edit code"),
            ("j/k", "scroll"),
            ("PgUp/PgDn", "scroll page"),
        ],
        Panel::Variables => &[
            ("h/l", "inputs / outputs"),
            ("j/k", "move"),
            ("Space", "toggle variable"),
        ],
        Panel::Sliders => &[
            ("j/k", "choose parameter"),
            ("h/l", "decrease / increase"),
            ("[ ]", "move lower bound"),
            ("{ }", "move upper bound"),
        ],
        Panel::Chart => &[("+", "double end time"), ("-", "halve end time")],
    }
}

fn key_line<'a>(key: &'a str, description: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>10} ", key), theme.key_hint()),
        Span::styled(description, theme.key_description()),
    ])
}

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let focus = state.ui.focus;

    let mut lines: Vec<Line> = Vec::new();
    if state.ui.editing {
        lines.push(Line::from(Span::styled("Editing", theme.panel_title(true))));
        lines.extend(
            EDITING_KEYS
                .iter()
                .map(|(key, description)| key_line(key, description, theme)),
        );
        f.render_widget(
            Paragraph::new(lines)
                .block(panel_block("Help", false, theme))
                .wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    lines.push(Line::from(Span::styled(focus.to_string(), theme.panel_title(true))));
    lines.extend(
        panel_keys(focus)
            .iter()
            .map(|(key, description)| key_line(key, description, theme)),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Global", theme.panel_title(true))));
    lines.extend(
        GLOBAL_KEYS
            .iter()
            .map(|(key, description)| key_line(key, description, theme)),
    );

    f.render_widget(
        Paragraph::new(lines)
            .block(panel_block("Help", false, theme))
            .wrap(Wrap { trim: false }),
        area,
    );
}
