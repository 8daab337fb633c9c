//! Variable selection: the input or output names the service accepts

use crate::state::{AppState, VariableList};
use crate::view_models::VariablesViewModel;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let vm = VariablesViewModel::from_state(state);

    let tab = |list: VariableList| {
        if vm.list == list {
            Span::styled(format!("[{}]", list), theme.panel_title(vm.focused))
        } else {
            Span::styled(format!(" {} ", list), theme.muted())
        }
    };
    let title = Line::from(vec![
        Span::raw(" "),
        tab(VariableList::Inputs),
        Span::raw(" "),
        tab(VariableList::Outputs),
        Span::raw(" "),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.panel_border(vm.focused))
        .style(theme.panel_background());

    let mut items: Vec<ListItem> = vm
        .rows
        .iter()
        .map(|row| {
            let mark = if row.checked { "[x] " } else { "[ ] " };
            let style = if row.selected {
                theme.selected()
            } else if row.checked {
                theme.text().fg(theme.checked)
            } else {
                theme.text()
            };
            ListItem::new(Line::from(Span::styled(format!("{}{}", mark, row.name), style)))
        })
        .collect();

    items.extend(vm.unlisted.iter().map(|name| {
        ListItem::new(Line::from(Span::styled(
            format!("[x] {} (not offered)", name),
            theme.muted(),
        )))
    }));

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            "No options loaded (press o to fetch)",
            theme.muted(),
        )));
    }

    f.render_widget(List::new(items).block(block), area);
}
