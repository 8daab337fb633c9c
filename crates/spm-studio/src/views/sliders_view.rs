//! Parameter sliders: one gauge per model input

use super::panel_block;
use crate::state::{AppState, Panel};
use crate::view_models::SlidersViewModel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{LineGauge, Paragraph},
    Frame,
};

/// Columns reserved for the parameter name
const NAME_WIDTH: u16 = 24;
/// Appended to parameters that seed the sensitivity plot
const SEED_MARKER: &str = " \u{2202}";

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let vm = SlidersViewModel::from_state(state);
    let block = panel_block(Panel::Sliders.to_string(), vm.focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if vm.rows.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("Compile a model to adjust its parameters", theme.muted())),
            inner,
        );
        return;
    }

    for (i, row) in vm.rows.iter().enumerate() {
        let Ok(offset) = u16::try_from(i) else {
            break;
        };
        if offset >= inner.height {
            break;
        }
        let line_area = Rect {
            y: inner.y + offset,
            height: 1,
            ..inner
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(NAME_WIDTH), Constraint::Min(0)])
            .split(line_area);

        let name_style = if row.selected {
            theme.selected()
        } else {
            theme.text()
        };
        let mut name = vec![Span::styled(row.name.clone(), name_style)];
        if row.seeded {
            name.push(Span::styled(SEED_MARKER, theme.key_hint()));
        }
        f.render_widget(Paragraph::new(Line::from(name)), columns[0]);

        let gauge = LineGauge::default()
            .ratio(row.ratio)
            .label(Span::styled(row.label.clone(), theme.key_description()))
            .line_set(symbols::line::THICK)
            .filled_style(Style::default().fg(theme.gauge_fill))
            .unfilled_style(Style::default().fg(theme.gauge_track));
        f.render_widget(gauge, columns[1]);
    }
}
