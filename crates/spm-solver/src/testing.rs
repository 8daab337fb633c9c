//! Scripted solver module doubles for tests
//!
//! The scripted solver does no integration. It writes a closed-form trace
//! (`t * (channel + 1) * sum(inputs)`) so tests can check which buffers were
//! touched and with what values.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{CompileError, SolverError};
use crate::options::SolverOptions;
use crate::solver::{check_len, CompiledModule, ModelCompiler, Solver};
use crate::vector::Vector;

/// Counters shared between a [`ScriptedCompiler`] and the solvers it builds
#[derive(Debug, Clone, Default)]
pub struct SolverCounters {
    live: Arc<AtomicUsize>,
    solves: Arc<AtomicUsize>,
    sensitivity_solves: Arc<AtomicUsize>,
}

impl SolverCounters {
    /// Solvers built and not yet dropped
    pub fn live_solvers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn solves(&self) -> usize {
        self.solves.load(Ordering::SeqCst)
    }

    pub fn sensitivity_solves(&self) -> usize {
        self.sensitivity_solves.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
enum Script {
    Accept,
    Reject(String),
    FailSetup(String),
    FailSolve(String),
}

/// Compiler double whose outcome is fixed at construction
#[derive(Debug, Clone)]
pub struct ScriptedCompiler {
    script: Script,
    number_of_inputs: usize,
    number_of_outputs: usize,
    counters: SolverCounters,
}

impl ScriptedCompiler {
    /// Accept every source and build solvers with the given dimensions
    pub fn accepting(number_of_inputs: usize, number_of_outputs: usize) -> Self {
        Self {
            script: Script::Accept,
            number_of_inputs,
            number_of_outputs,
            counters: SolverCounters::default(),
        }
    }

    /// Reject every source with `reason`
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            script: Script::Reject(reason.into()),
            ..Self::accepting(0, 0)
        }
    }

    /// Compile successfully but fail to construct the solver
    pub fn failing_setup(
        number_of_inputs: usize,
        number_of_outputs: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            script: Script::FailSetup(reason.into()),
            ..Self::accepting(number_of_inputs, number_of_outputs)
        }
    }

    /// Build solvers whose every solve fails with `reason`
    pub fn failing_solves(
        number_of_inputs: usize,
        number_of_outputs: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            script: Script::FailSolve(reason.into()),
            ..Self::accepting(number_of_inputs, number_of_outputs)
        }
    }

    pub fn counters(&self) -> SolverCounters {
        self.counters.clone()
    }

    /// Build a solver directly, skipping the compile step
    pub fn solver(&self) -> Box<dyn Solver> {
        let fail_with = match &self.script {
            Script::FailSolve(reason) => Some(reason.clone()),
            _ => None,
        };
        Box::new(ScriptedSolver::new(
            self.number_of_inputs,
            self.number_of_outputs,
            fail_with,
            self.counters.clone(),
        ))
    }
}

impl ModelCompiler for ScriptedCompiler {
    fn compile(&self, _source: &str) -> Result<Box<dyn CompiledModule>, CompileError> {
        match &self.script {
            Script::Reject(reason) => Err(CompileError::new(reason.clone())),
            _ => Ok(Box::new(self.clone())),
        }
    }
}

impl CompiledModule for ScriptedCompiler {
    fn build_solver(&self, _options: &SolverOptions) -> Result<Box<dyn Solver>, SolverError> {
        match &self.script {
            Script::FailSetup(reason) => Err(SolverError::Setup(reason.clone())),
            _ => Ok(self.solver()),
        }
    }
}

/// Solver double produced by [`ScriptedCompiler`]
#[derive(Debug)]
pub struct ScriptedSolver {
    number_of_inputs: usize,
    number_of_outputs: usize,
    fail_with: Option<String>,
    counters: SolverCounters,
}

impl ScriptedSolver {
    fn new(
        number_of_inputs: usize,
        number_of_outputs: usize,
        fail_with: Option<String>,
        counters: SolverCounters,
    ) -> Self {
        counters.live.fetch_add(1, Ordering::SeqCst);
        Self {
            number_of_inputs,
            number_of_outputs,
            fail_with,
            counters,
        }
    }

    fn fill(&self, timepoints: &Vector, weights: &Vector, out: &mut Vector) {
        let total: f64 = weights.iter().sum();
        for (i, t) in timepoints.iter().enumerate() {
            for j in 0..self.number_of_outputs {
                out[i * self.number_of_outputs + j] = t * (j + 1) as f64 * total;
            }
        }
    }

    fn check(&self, timepoints: &Vector, inputs: &Vector, outputs: &Vector) -> Result<(), SolverError> {
        check_len("inputs", inputs, self.number_of_inputs)?;
        check_len("outputs", outputs, timepoints.len() * self.number_of_outputs)?;
        match &self.fail_with {
            Some(reason) => Err(SolverError::Solve(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Solver for ScriptedSolver {
    fn number_of_inputs(&self) -> usize {
        self.number_of_inputs
    }

    fn number_of_outputs(&self) -> usize {
        self.number_of_outputs
    }

    fn solve(
        &mut self,
        timepoints: &Vector,
        inputs: &Vector,
        outputs: &mut Vector,
    ) -> Result<(), SolverError> {
        self.counters.solves.fetch_add(1, Ordering::SeqCst);
        self.check(timepoints, inputs, outputs)?;
        self.fill(timepoints, inputs, outputs);
        Ok(())
    }

    fn solve_with_sensitivities(
        &mut self,
        timepoints: &Vector,
        inputs: &Vector,
        dinputs: &Vector,
        outputs: &mut Vector,
        doutputs: &mut Vector,
    ) -> Result<(), SolverError> {
        self.counters.sensitivity_solves.fetch_add(1, Ordering::SeqCst);
        self.check(timepoints, inputs, outputs)?;
        check_len("dinputs", dinputs, self.number_of_inputs)?;
        check_len("doutputs", doutputs, outputs.len())?;
        self.fill(timepoints, inputs, outputs);
        self.fill(timepoints, dinputs, doutputs);
        Ok(())
    }
}

impl Drop for ScriptedSolver {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}
