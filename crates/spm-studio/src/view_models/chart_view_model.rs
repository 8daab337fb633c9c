//! Chart View Model
//!
//! Splits the time-major output buffers into one `(t, y)` series per output
//! channel, for both the solution and its sensitivity, and computes the axis
//! bounds the chart widget needs. After the time range changes the
//! sensitivities are not recomputed, so that plot is flagged as stale.

use crate::state::{ModelState, SolverSession};
use crate::theme::Theme;
use ratatui::style::Color;

const STALE_SENSITIVITY_TITLE: &str = "Sensitivities (stale, adjust a parameter)";

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesViewModel {
    pub name: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

/// A set of series sharing axes
#[derive(Debug, Clone, PartialEq)]
pub struct PlotViewModel {
    pub title: String,
    pub series: Vec<SeriesViewModel>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// Data does not belong to the current grid
    pub stale: bool,
}

/// View model for the chart panel
#[derive(Debug, Clone, PartialEq)]
pub struct ChartViewModel {
    pub solution: PlotViewModel,
    pub sensitivity: PlotViewModel,
}

impl ChartViewModel {
    /// Build the chart from the current session; `None` before the first compile
    pub fn from_state(model: &ModelState, theme: &Theme) -> Option<Self> {
        let session = model.session.as_ref()?;
        let end_time = session.end_time();

        let solution = channel_series(session, session.outputs(), theme, |name| name);
        let sensitivity = channel_series(session, session.doutputs(), theme, |name| {
            format!("d {}", name)
        });

        let mut sensitivity =
            PlotViewModel::new("Sensitivities".to_string(), sensitivity, end_time);
        if session.sensitivities_stale() {
            sensitivity.title = STALE_SENSITIVITY_TITLE.to_string();
            sensitivity.stale = true;
        }

        Some(Self {
            solution: PlotViewModel::new("Outputs".to_string(), solution, end_time),
            sensitivity,
        })
    }
}

impl PlotViewModel {
    fn new(title: String, series: Vec<SeriesViewModel>, end_time: f64) -> Self {
        let y_bounds = value_bounds(&series);
        let x_bounds = [0.0, if end_time > 0.0 { end_time } else { 1.0 }];
        Self {
            title,
            x_labels: axis_labels(x_bounds),
            y_labels: axis_labels(y_bounds),
            series,
            x_bounds,
            y_bounds,
            stale: false,
        }
    }
}

/// Extract channel `j` of a time-major buffer: `buffer[t * n_out + j]`
pub fn channel(buffer: &[f64], number_of_outputs: usize, j: usize) -> Vec<f64> {
    if number_of_outputs == 0 || j >= number_of_outputs {
        return Vec::new();
    }
    buffer
        .iter()
        .skip(j)
        .step_by(number_of_outputs)
        .copied()
        .collect()
}

fn channel_series(
    session: &SolverSession,
    buffer: &[f64],
    theme: &Theme,
    label: impl Fn(String) -> String,
) -> Vec<SeriesViewModel> {
    let number_of_outputs = session.number_of_outputs();
    (0..number_of_outputs)
        .map(|j| SeriesViewModel {
            name: label(session.output_name(j)),
            color: theme.series_color(j),
            points: session
                .timepoints()
                .iter()
                .copied()
                .zip(channel(buffer, number_of_outputs, j))
                .collect(),
        })
        .collect()
}

/// Min/max over all finite y values, padded so a flat line stays visible
fn value_bounds(series: &[SeriesViewModel]) -> [f64; 2] {
    let (min, max) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, y)| *y))
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

    if min > max {
        return [0.0, 1.0];
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    [min - pad, max + pad]
}

/// Labels at the ends and midpoint of an axis
fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| format_tick(*v))
        .collect()
}

fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-2..1e4).contains(&magnitude) {
        format!("{:.1e}", value)
    } else {
        format!("{:.2}", value)
    }
}
