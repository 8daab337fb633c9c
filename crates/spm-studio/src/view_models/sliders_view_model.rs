//! Sliders View Model
//!
//! One row per parameter of the compiled model.

use crate::state::{AppState, Panel};

/// A single parameter slider
#[derive(Debug, Clone, PartialEq)]
pub struct SliderRowViewModel {
    pub name: String,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
    /// Position of `value` between the bounds, in `[0, 1]`
    pub ratio: f64,
    pub selected: bool,
    /// Parameter carries a non-zero sensitivity seed
    pub seeded: bool,
    /// Text drawn over the gauge
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlidersViewModel {
    pub rows: Vec<SliderRowViewModel>,
    pub focused: bool,
}

impl SlidersViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let model = &state.model;
        let focused = state.ui.focus == Panel::Sliders;

        let rows = model
            .session
            .as_ref()
            .map(|session| {
                session
                    .inputs()
                    .iter()
                    .enumerate()
                    .map(|(i, &value)| {
                        let lower = model.lower_bound.get(i).copied().unwrap_or(0.0);
                        let upper = model.upper_bound.get(i).copied().unwrap_or(0.0);
                        SliderRowViewModel {
                            name: session.input_name(i),
                            value,
                            lower,
                            upper,
                            ratio: ratio(value, lower, upper),
                            selected: focused && i == state.ui.slider_cursor,
                            seeded: session.dinputs().get(i).is_some_and(|d| *d != 0.0),
                            label: format!("{:.4} [{:.3}, {:.3}]", value, lower, upper),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { rows, focused }
    }
}

/// Fraction of the way from `lower` to `upper`, clamped for the gauge
fn ratio(value: f64, lower: f64, upper: f64) -> f64 {
    let range = upper - lower;
    if !range.is_finite() || range <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    ((value - lower) / range).clamp(0.0, 1.0)
}
