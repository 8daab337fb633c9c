//! Solver Session
//!
//! The solver handle and the numeric buffers it reads and writes. They are
//! created together by a successful compile and replaced together by the next
//! one; dropping the session releases all of them.

use spm_solver::{Solver, SolverError, Vector};

/// Number of samples in every timepoint grid
pub const TIMEPOINT_COUNT: usize = 100;
/// End of the timepoint grid allocated for a freshly compiled model, in seconds
pub const DEFAULT_END_TIME: f64 = 3600.0;
/// Initial value of every model parameter
pub const DEFAULT_INPUT_VALUE: f64 = 0.5;

/// `count` evenly spaced samples from 0 to `end_time`, both endpoints included
pub fn timepoint_grid(end_time: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let intervals = (count - 1) as f64;
            (0..count)
                .map(|i| end_time * i as f64 / intervals)
                .collect()
        }
    }
}

/// Solver handle plus its input, output and timepoint buffers.
///
/// Invariants:
/// - `inputs` and `dinputs` have `number_of_inputs()` elements
/// - `outputs` and `doutputs` have `timepoints.len() * number_of_outputs()` elements
pub struct SolverSession {
    solver: Box<dyn Solver>,
    /// Variable names requested when this model was compiled
    input_names: Vec<String>,
    output_names: Vec<String>,
    inputs: Vector,
    dinputs: Vector,
    outputs: Vector,
    doutputs: Vector,
    timepoints: Vector,
    /// `doutputs` no longer match the current grid; set by `resample`
    sensitivities_stale: bool,
}

impl SolverSession {
    /// Allocate default buffers for a freshly built solver
    pub fn allocate(
        solver: Box<dyn Solver>,
        input_names: Vec<String>,
        output_names: Vec<String>,
    ) -> Self {
        let number_of_inputs = solver.number_of_inputs();
        let number_of_outputs = solver.number_of_outputs();
        let timepoints = Vector::from(timepoint_grid(DEFAULT_END_TIME, TIMEPOINT_COUNT));
        let output_len = timepoints.len() * number_of_outputs;

        log::debug!(
            "Allocating solver session: {} inputs, {} outputs, {} timepoints",
            number_of_inputs,
            number_of_outputs,
            timepoints.len()
        );

        Self {
            solver,
            input_names,
            output_names,
            inputs: Vector::filled(number_of_inputs, DEFAULT_INPUT_VALUE),
            dinputs: Vector::zeros(number_of_inputs),
            outputs: Vector::zeros(output_len),
            doutputs: Vector::zeros(output_len),
            timepoints,
            sensitivities_stale: false,
        }
    }

    pub fn number_of_inputs(&self) -> usize {
        self.solver.number_of_inputs()
    }

    pub fn number_of_outputs(&self) -> usize {
        self.solver.number_of_outputs()
    }

    pub fn inputs(&self) -> &Vector {
        &self.inputs
    }

    pub fn dinputs(&self) -> &Vector {
        &self.dinputs
    }

    pub fn outputs(&self) -> &Vector {
        &self.outputs
    }

    pub fn doutputs(&self) -> &Vector {
        &self.doutputs
    }

    pub fn timepoints(&self) -> &Vector {
        &self.timepoints
    }

    /// True between a `resample` and the next successful sensitivity solve
    pub fn sensitivities_stale(&self) -> bool {
        self.sensitivities_stale
    }

    /// Label of parameter `index`, falling back to a positional name
    pub fn input_name(&self, index: usize) -> String {
        self.input_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("p{}", index))
    }

    /// Label of output channel `channel`, falling back to a positional name
    pub fn output_name(&self, channel: usize) -> String {
        self.output_names
            .get(channel)
            .cloned()
            .unwrap_or_else(|| format!("y{}", channel))
    }

    /// Last sample time of the current grid
    pub fn end_time(&self) -> f64 {
        self.timepoints.last().copied().unwrap_or(0.0)
    }

    /// Write a parameter value and its sensitivity seed.
    ///
    /// Returns false if `index` is out of range.
    pub fn set_input(&mut self, index: usize, value: f64, dvalue: f64) -> bool {
        if index >= self.inputs.len() {
            return false;
        }
        self.inputs[index] = value;
        self.dinputs[index] = dvalue;
        true
    }

    /// Replace the timepoint grid by `TIMEPOINT_COUNT` samples over `[0, end_time]`.
    ///
    /// Sensitivity buffers are resized but keep their old samples until the
    /// next sensitivity solve.
    pub fn resample(&mut self, end_time: f64) {
        let grid = timepoint_grid(end_time, TIMEPOINT_COUNT);
        self.timepoints.resize(grid.len());
        self.timepoints.copy_from_slice(&grid);

        let output_len = self.timepoints.len() * self.number_of_outputs();
        self.outputs.resize(output_len);
        self.doutputs.resize(output_len);
        self.sensitivities_stale = true;
    }

    /// Solve without sensitivities
    pub fn solve(&mut self) -> Result<(), SolverError> {
        let Self {
            solver,
            inputs,
            outputs,
            timepoints,
            ..
        } = self;
        solver.solve(timepoints, inputs, outputs)
    }

    /// Solve together with forward sensitivities
    pub fn solve_with_sensitivities(&mut self) -> Result<(), SolverError> {
        let Self {
            solver,
            inputs,
            dinputs,
            outputs,
            doutputs,
            timepoints,
            sensitivities_stale,
            ..
        } = self;
        solver.solve_with_sensitivities(timepoints, inputs, dinputs, outputs, doutputs)?;
        *sensitivities_stale = false;
        Ok(())
    }
}

impl Drop for SolverSession {
    fn drop(&mut self) {
        log::debug!(
            "Releasing solver session ({} inputs, {} outputs)",
            self.inputs.len(),
            self.number_of_outputs()
        );
    }
}

impl std::fmt::Debug for SolverSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverSession")
            .field("solver", &"<solver>")
            .field("input_names", &self.input_names)
            .field("output_names", &self.output_names)
            .field("inputs", &self.inputs)
            .field("dinputs", &self.dinputs)
            .field("outputs", &self.outputs)
            .field("doutputs", &self.doutputs)
            .field("timepoints", &self.timepoints)
            .field("sensitivities_stale", &self.sensitivities_stale)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spm_solver::testing::ScriptedCompiler;

    fn session(number_of_inputs: usize, number_of_outputs: usize) -> SolverSession {
        let solver = ScriptedCompiler::accepting(number_of_inputs, number_of_outputs).solver();
        SolverSession::allocate(solver, vec!["a".to_string()], vec!["y".to_string()])
    }

    #[test]
    fn test_grid_includes_both_endpoints() {
        let grid = timepoint_grid(10.0, 5);
        assert_eq!(grid, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_grid_degenerate_counts() {
        assert!(timepoint_grid(10.0, 0).is_empty());
        assert_eq!(timepoint_grid(10.0, 1), vec![0.0]);
    }

    #[test]
    fn test_allocate_sizes_buffers_from_solver() {
        let session = session(3, 2);
        assert_eq!(session.inputs().len(), 3);
        assert_eq!(session.dinputs().len(), 3);
        assert!(session.inputs().iter().all(|v| *v == DEFAULT_INPUT_VALUE));
        assert!(session.dinputs().iter().all(|v| *v == 0.0));
        assert_eq!(session.timepoints().len(), TIMEPOINT_COUNT);
        assert_eq!(session.outputs().len(), TIMEPOINT_COUNT * 2);
        assert_eq!(session.doutputs().len(), TIMEPOINT_COUNT * 2);
        assert_eq!(session.end_time(), DEFAULT_END_TIME);
    }

    #[test]
    fn test_set_input_out_of_range() {
        let mut session = session(2, 1);
        assert!(session.set_input(1, 0.25, 1.0));
        assert_eq!(session.inputs()[1], 0.25);
        assert_eq!(session.dinputs()[1], 1.0);
        assert!(!session.set_input(2, 0.25, 1.0));
    }

    #[test]
    fn test_names_fall_back_to_positions() {
        let session = session(2, 2);
        assert_eq!(session.input_name(0), "a");
        assert_eq!(session.input_name(1), "p1");
        assert_eq!(session.output_name(0), "y");
        assert_eq!(session.output_name(1), "y1");
    }

    #[test]
    fn test_resample_marks_sensitivities_stale_until_next_sensitivity_solve() {
        let mut session = session(1, 1);
        session.solve_with_sensitivities().unwrap();
        assert!(!session.sensitivities_stale());

        session.resample(7200.0);
        assert!(session.sensitivities_stale());
        session.solve().unwrap();
        assert!(session.sensitivities_stale());

        session.set_input(0, 0.75, 1.0);
        session.solve_with_sensitivities().unwrap();
        assert!(!session.sensitivities_stale());
    }

    #[test]
    fn test_failed_sensitivity_solve_keeps_stale_mark() {
        let compiler = ScriptedCompiler::failing_solves(1, 1, "diverged");
        let mut session = SolverSession::allocate(compiler.solver(), vec![], vec![]);
        session.resample(10.0);
        assert!(session.solve_with_sensitivities().is_err());
        assert!(session.sensitivities_stale());
    }

    #[test]
    fn test_drop_releases_solver() {
        let compiler = ScriptedCompiler::accepting(1, 1);
        let counters = compiler.counters();
        let session = SolverSession::allocate(compiler.solver(), vec![], vec![]);
        assert_eq!(counters.live_solvers(), 1);
        drop(session);
        assert_eq!(counters.live_solvers(), 0);
    }
}
