use crate::actions::{Action, GlobalAction, ModelAction, TextInputAction, UiAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, Panel, VariableList};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Number of slider steps between the lower and upper bound
const SLIDER_STEPS: f64 = 100.0;
/// Lines moved by PageUp/PageDown in the code view
const CODE_PAGE: i32 = 10;

/// KeyboardMiddleware - converts raw keyboard events to semantic actions
pub struct KeyboardMiddleware;

impl KeyboardMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyboardMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for KeyboardMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::Global(GlobalAction::KeyPressed(key)) = action {
            handle_key_event(key, state, dispatcher);
            // Consume the raw key event (don't pass to reducer)
            return false;
        }

        // Pass all other actions through
        true
    }
}

/// Handle a key event and dispatch semantic actions
fn handle_key_event(key: &KeyEvent, state: &AppState, dispatcher: &Dispatcher) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            dispatcher.dispatch(GlobalAction::Quit);
        }
        return;
    }

    if state.ui.editing {
        handle_editing_key(key, dispatcher);
        return;
    }

    match key.code {
        KeyCode::Char('q') => dispatcher.dispatch(GlobalAction::Quit),
        KeyCode::Esc => {
            if state.model.server_error.is_some() {
                dispatcher.dispatch(ModelAction::ClearServerError);
            }
        }
        KeyCode::Tab => dispatcher.dispatch(UiAction::FocusNext),
        KeyCode::BackTab => dispatcher.dispatch(UiAction::FocusPrevious),
        KeyCode::Char('c') => dispatcher.dispatch(ModelAction::Compile),
        KeyCode::Char('x') => dispatcher.dispatch(ModelAction::CancelCompile),
        KeyCode::Char('o') => dispatcher.dispatch(ModelAction::FetchSpmOptions),
        _ => match state.ui.focus {
            Panel::Editor => handle_editor_key(key, dispatcher),
            Panel::Variables => handle_variables_key(key, state, dispatcher),
            Panel::Sliders => handle_sliders_key(key, state, dispatcher),
            Panel::Chart => handle_chart_key(key, state, dispatcher),
        },
    }
}

/// Shared up/down handling; returns false if the key is not a cursor key
fn handle_cursor_key(key: &KeyEvent, dispatcher: &Dispatcher) -> bool {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => dispatcher.dispatch(UiAction::CursorNext),
        KeyCode::Up | KeyCode::Char('k') => dispatcher.dispatch(UiAction::CursorPrevious),
        _ => return false,
    }
    true
}

/// Every key except Esc edits the code while in edit mode
fn handle_editing_key(key: &KeyEvent, dispatcher: &Dispatcher) {
    let input = match key.code {
        KeyCode::Esc => {
            dispatcher.dispatch(UiAction::StopEditing);
            return;
        }
        KeyCode::Char(c) => TextInputAction::Char(c),
        KeyCode::Enter => TextInputAction::Newline,
        KeyCode::Backspace => TextInputAction::Backspace,
        KeyCode::Delete => TextInputAction::Delete,
        KeyCode::Left => TextInputAction::Left,
        KeyCode::Right => TextInputAction::Right,
        KeyCode::Up => TextInputAction::Up,
        KeyCode::Down => TextInputAction::Down,
        KeyCode::Home => TextInputAction::Home,
        KeyCode::End => TextInputAction::End,
        _ => {
            log::trace!("Unhandled key while editing: {:?}", key);
            return;
        }
    };
    dispatcher.dispatch(input);
}

fn handle_editor_key(key: &KeyEvent, dispatcher: &Dispatcher) {
    if handle_cursor_key(key, dispatcher) {
        return;
    }
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => dispatcher.dispatch(UiAction::StartEditing),
        KeyCode::PageDown => dispatcher.dispatch(UiAction::ScrollCode(CODE_PAGE)),
        KeyCode::PageUp => dispatcher.dispatch(UiAction::ScrollCode(-CODE_PAGE)),
        _ => log::trace!("Unhandled key in editor: {:?}", key),
    }
}

fn handle_variables_key(key: &KeyEvent, state: &AppState, dispatcher: &Dispatcher) {
    if handle_cursor_key(key, dispatcher) {
        return;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            dispatcher.dispatch(UiAction::ShowVariables(VariableList::Inputs));
        }
        KeyCode::Right | KeyCode::Char('l') => {
            dispatcher.dispatch(UiAction::ShowVariables(VariableList::Outputs));
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            let list = state.ui.variable_list;
            let Some(name) = state.model.options(list).get(state.ui.variable_cursor) else {
                return;
            };
            let selection = toggled(state.model.selected(list), name);
            let action = match list {
                VariableList::Inputs => ModelAction::SetSpmInputs(selection),
                VariableList::Outputs => ModelAction::SetSpmOutputs(selection),
            };
            dispatcher.dispatch(action);
        }
        _ => log::trace!("Unhandled key in variables: {:?}", key),
    }
}

fn handle_sliders_key(key: &KeyEvent, state: &AppState, dispatcher: &Dispatcher) {
    if handle_cursor_key(key, dispatcher) {
        return;
    }
    let model = &state.model;
    let Some(session) = model.session.as_ref() else {
        return;
    };
    let index = state.ui.slider_cursor;
    let (Some(&value), Some(&lower), Some(&upper)) = (
        session.inputs().get(index),
        model.lower_bound.get(index),
        model.upper_bound.get(index),
    ) else {
        return;
    };
    let bound_step = bound_step(lower, upper);

    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            let direction = if matches!(key.code, KeyCode::Left | KeyCode::Char('h')) {
                -1.0
            } else {
                1.0
            };
            dispatcher.dispatch(ModelAction::SetInput {
                index,
                value: slider_step(value, lower, upper, direction),
                dvalue: 1.0,
            });
        }
        KeyCode::Char('[') => dispatcher.dispatch(ModelAction::SetLowerBound {
            index,
            value: lower - bound_step,
        }),
        KeyCode::Char(']') => dispatcher.dispatch(ModelAction::SetLowerBound {
            index,
            value: lower + bound_step,
        }),
        KeyCode::Char('{') => dispatcher.dispatch(ModelAction::SetUpperBound {
            index,
            value: upper - bound_step,
        }),
        KeyCode::Char('}') => dispatcher.dispatch(ModelAction::SetUpperBound {
            index,
            value: upper + bound_step,
        }),
        _ => log::trace!("Unhandled key in sliders: {:?}", key),
    }
}

fn handle_chart_key(key: &KeyEvent, state: &AppState, dispatcher: &Dispatcher) {
    let Some(session) = state.model.session.as_ref() else {
        return;
    };
    let end_time = session.end_time();
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') => {
            dispatcher.dispatch(ModelAction::SetMaxTime(end_time * 2.0));
        }
        KeyCode::Char('-') => dispatcher.dispatch(ModelAction::SetMaxTime(end_time / 2.0)),
        _ => log::trace!("Unhandled key in chart: {:?}", key),
    }
}

/// Add `name` to the selection, or remove it if already selected
fn toggled(selected: &[String], name: &str) -> Vec<String> {
    if selected.iter().any(|s| s == name) {
        selected.iter().filter(|s| *s != name).cloned().collect()
    } else {
        let mut selection = selected.to_vec();
        selection.push(name.to_string());
        selection
    }
}

/// Move `value` one slider step in `direction`, staying inside the bounds
fn slider_step(value: f64, lower: f64, upper: f64, direction: f64) -> f64 {
    let step = (upper - lower).abs() / SLIDER_STEPS;
    let next = value + direction * step;
    if lower <= upper {
        next.clamp(lower, upper)
    } else {
        next
    }
}

/// Increment for moving a bound: a tenth of the range, never zero
fn bound_step(lower: f64, upper: f64) -> f64 {
    ((upper - lower).abs() * 0.1).max(1e-3)
}
