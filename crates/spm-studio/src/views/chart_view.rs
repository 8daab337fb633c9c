//! Solution chart: outputs over time, with their sensitivities below

use super::{is_focused, panel_block, styled_panel_block};
use crate::state::{AppState, Panel};
use crate::theme::Theme;
use crate::view_models::{ChartViewModel, PlotViewModel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

fn plot<'a>(vm: &'a PlotViewModel, theme: &Theme, title: String, focused: bool) -> Chart<'a> {
    let datasets: Vec<Dataset> = vm
        .series
        .iter()
        .map(|series| {
            Dataset::default()
                .name(series.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series.color))
                .data(&series.points)
        })
        .collect();

    let block = if vm.stale {
        let warning = Style::default()
            .fg(theme.status_warning)
            .add_modifier(Modifier::BOLD);
        styled_panel_block(title, warning, focused, theme)
    } else {
        panel_block(title, focused, theme)
    };

    Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("t [s]", theme.muted()))
                .style(theme.muted())
                .bounds(vm.x_bounds)
                .labels(vm.x_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .style(theme.muted())
                .bounds(vm.y_bounds)
                .labels(vm.y_labels.clone()),
        )
        .legend_position(Some(LegendPosition::TopRight))
}

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let focused = is_focused(state, Panel::Chart);

    let Some(vm) = ChartViewModel::from_state(&state.model, theme) else {
        f.render_widget(
            Paragraph::new(Span::styled("No solution yet", theme.muted()))
                .block(panel_block(Panel::Chart.to_string(), focused, theme)),
            area,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let title = format!("{}: {}", Panel::Chart, vm.solution.title);
    f.render_widget(plot(&vm.solution, theme, title, focused), rows[0]);
    let title = vm.sensitivity.title.clone();
    f.render_widget(plot(&vm.sensitivity, theme, title, focused), rows[1]);
}
