//! UI Reducer
//!
//! Focus and cursor movement. Reads the model only to bound cursors.

use crate::actions::UiAction;
use crate::state::{code_lines, ModelState, Panel, UiState};

/// Highest valid index for a list of `len` items
fn last_index(len: usize) -> usize {
    len.saturating_sub(1)
}

fn max_code_scroll(model: &ModelState) -> u16 {
    let lines = code_lines(&model.code).len();
    u16::try_from(last_index(lines)).unwrap_or(u16::MAX)
}

/// Keep every cursor inside the lists it points into
pub fn clamp_cursors(state: &mut UiState, model: &ModelState) {
    let options = model.options(state.variable_list).len();
    state.variable_cursor = state.variable_cursor.min(last_index(options));
    state.slider_cursor = state.slider_cursor.min(last_index(model.parameter_count()));
    state.code_scroll = state.code_scroll.min(max_code_scroll(model));
    state.editor_cursor = state.editor_cursor.clamped(&model.code);
}

pub fn reduce_ui(state: &mut UiState, model: &ModelState, action: &UiAction) {
    match action {
        UiAction::FocusNext => {
            state.focus = state.focus.next();
            log::debug!("Focus moved to {}", state.focus);
        }
        UiAction::FocusPrevious => {
            state.focus = state.focus.previous();
            log::debug!("Focus moved to {}", state.focus);
        }
        UiAction::CursorNext => match state.focus {
            Panel::Editor => {
                state.code_scroll = state.code_scroll.saturating_add(1);
            }
            Panel::Variables => {
                state.variable_cursor += 1;
            }
            Panel::Sliders => {
                state.slider_cursor += 1;
            }
            Panel::Chart => {}
        },
        UiAction::CursorPrevious => match state.focus {
            Panel::Editor => {
                state.code_scroll = state.code_scroll.saturating_sub(1);
            }
            Panel::Variables => {
                state.variable_cursor = state.variable_cursor.saturating_sub(1);
            }
            Panel::Sliders => {
                state.slider_cursor = state.slider_cursor.saturating_sub(1);
            }
            Panel::Chart => {}
        },
        UiAction::ShowVariables(list) => {
            if state.variable_list != *list {
                state.variable_list = *list;
                state.variable_cursor = 0;
            }
        }
        UiAction::ScrollCode(delta) => {
            let target = i64::from(state.code_scroll) + i64::from(*delta);
            state.code_scroll = u16::try_from(target.max(0)).unwrap_or(u16::MAX);
        }
        UiAction::StartEditing => {
            state.focus = Panel::Editor;
            state.editing = true;
            log::debug!("Editing model code at {:?}", state.editor_cursor);
        }
        UiAction::StopEditing => {
            state.editing = false;
        }
        UiAction::SetEditorCursor(cursor) => {
            state.editor_cursor = *cursor;
            // Scroll up to the cursor; scrolling down needs the view height
            let line = u16::try_from(cursor.line).unwrap_or(u16::MAX);
            state.code_scroll = state.code_scroll.min(line);
        }
    }

    clamp_cursors(state, model);
}
