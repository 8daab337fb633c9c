//! Variables View Model
//!
//! Lists the variable names the service accepts, marking the selected ones.

use crate::state::{AppState, Panel, VariableList};

#[derive(Debug, Clone, PartialEq)]
pub struct VariableRowViewModel {
    pub name: String,
    pub checked: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariablesViewModel {
    pub list: VariableList,
    pub rows: Vec<VariableRowViewModel>,
    /// Selected names the service did not list (e.g. from the config file)
    pub unlisted: Vec<String>,
    pub focused: bool,
}

impl VariablesViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let list = state.ui.variable_list;
        let focused = state.ui.focus == Panel::Variables;
        let options = state.model.options(list);
        let selected = state.model.selected(list);

        let rows = options
            .iter()
            .enumerate()
            .map(|(i, name)| VariableRowViewModel {
                name: name.clone(),
                checked: selected.contains(name),
                selected: focused && i == state.ui.variable_cursor,
            })
            .collect();

        let unlisted = selected
            .iter()
            .filter(|name| !options.contains(*name))
            .cloned()
            .collect();

        Self {
            list,
            rows,
            unlisted,
            focused,
        }
    }
}
