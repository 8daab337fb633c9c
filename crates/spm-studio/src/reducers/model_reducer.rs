//! Model Reducer
//!
//! Handles the session intents. Runs synchronously on the UI thread: solves
//! triggered by an intent complete before the next intent is reduced, and
//! solver failures are stored as text in `solve_error` instead of being
//! returned.

use spm_solver::SolverError;

use crate::actions::{CompiledModel, ModelAction};
use crate::reducer::ReduceError;
use crate::state::ModelState;

/// Turn a solve result into the value of the `solve_error` slot
fn solve_outcome(result: Result<(), SolverError>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(e) => {
            log::warn!("Solve failed: {}", e);
            Some(e.to_string())
        }
    }
}

/// Write one bound in place; bounds never trigger a solve
fn set_bound(bounds: &mut [f64], index: usize, value: f64, which: &str) {
    match bounds.get_mut(index) {
        Some(bound) => *bound = value,
        None => log::warn!(
            "{} bound index {} out of range ({} parameters)",
            which,
            index,
            bounds.len()
        ),
    }
}

/// Reduce a session intent into the model state.
///
/// Returns an error only for intents that require a compiled model when none
/// exists; the state is left untouched in that case.
pub fn reduce_model(state: &mut ModelState, action: ModelAction) -> Result<(), ReduceError> {
    match action {
        ModelAction::Compile => {
            if state.compiling {
                log::debug!("Compile already in progress, ignoring request");
                return Ok(());
            }
            state.compile_generation = state.compile_generation.next();
            state.compiling = true;
            log::info!("Compile {} started", state.compile_generation);
        }

        ModelAction::CancelCompile => {
            if state.compiling {
                log::info!("Compile {} cancelled", state.compile_generation);
                // Results of the abandoned cycle are now stale
                state.compile_generation = state.compile_generation.next();
                state.compiling = false;
            }
        }

        ModelAction::FetchSpmOptions => {
            // Handled entirely by CompileMiddleware
        }

        ModelAction::Compiled(compiled) => {
            let CompiledModel {
                generation,
                mut session,
                lower_bound,
                upper_bound,
            } = *compiled;

            if state.is_stale(Some(generation)) {
                log::info!(
                    "Discarding model from compile {} (current {})",
                    generation,
                    state.compile_generation
                );
                return Ok(());
            }

            // Release the previous solver and buffers before installing the new group
            drop(state.session.take());

            state.solve_error = solve_outcome(session.solve_with_sensitivities());
            state.session = Some(session);
            state.lower_bound = lower_bound;
            state.upper_bound = upper_bound;
            state.compile_error = None;
            state.compiling = false;
            log::info!("Compile {} installed", generation);
        }

        ModelAction::SetCode { code, generation } => {
            if state.is_stale(generation) {
                log::debug!("Discarding stale model source");
                return Ok(());
            }
            state.code = code;
        }

        ModelAction::SetInput {
            index,
            value,
            dvalue,
        } => {
            let session = state
                .session
                .as_mut()
                .ok_or(ReduceError::NotCompiled { action: "SetInput" })?;

            if !session.set_input(index, value, dvalue) {
                log::warn!(
                    "Input index {} out of range ({} parameters)",
                    index,
                    session.number_of_inputs()
                );
                return Ok(());
            }
            state.solve_error = solve_outcome(session.solve_with_sensitivities());
        }

        ModelAction::SetLowerBound { index, value } => {
            set_bound(&mut state.lower_bound, index, value, "Lower");
        }

        ModelAction::SetUpperBound { index, value } => {
            set_bound(&mut state.upper_bound, index, value, "Upper");
        }

        ModelAction::SetMaxTime(end_time) => {
            let session = state
                .session
                .as_mut()
                .ok_or(ReduceError::NotCompiled {
                    action: "SetMaxTime",
                })?;

            if !end_time.is_finite() || end_time <= 0.0 {
                log::warn!("Ignoring invalid end time {}", end_time);
                return Ok(());
            }
            session.resample(end_time);
            state.solve_error = solve_outcome(session.solve());
        }

        ModelAction::SetCompileError { error, generation } => {
            if state.is_stale(generation) {
                log::debug!("Discarding stale compile error: {}", error);
                return Ok(());
            }
            state.compile_error = Some(error);
            state.compiling = false;
        }

        ModelAction::SetServerError { error, generation } => {
            if state.is_stale(generation) {
                log::debug!("Discarding stale server error: {:?}", error);
                return Ok(());
            }
            state.server_error = error;
            state.compiling = false;
        }

        ModelAction::ClearServerError => {
            state.server_error = None;
        }

        ModelAction::SetSpmInputs(inputs) => {
            state.spm_inputs = inputs;
        }

        ModelAction::SetSpmOutputs(outputs) => {
            state.spm_outputs = outputs;
        }

        ModelAction::SetSpmInputOptions(options) => {
            state.spm_input_options = options;
        }

        ModelAction::SetSpmOutputOptions(options) => {
            state.spm_output_options = options;
        }
    }

    Ok(())
}
