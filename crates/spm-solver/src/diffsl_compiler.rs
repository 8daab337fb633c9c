//! DiffSL backend over diffsol
//!
//! Model source is JIT compiled with Cranelift and integrated with BDF at
//! the requested timepoints. The JIT module is not `Send`, so a solver keeps
//! the source and rebuilds the problem for every solve with the current
//! parameters.
//!
//! Cranelift builds carry no automatic differentiation, so forward
//! sensitivities are a directional finite difference along `dinputs`.

use diffsol::{CraneliftJitModule, MatrixCommon, OdeBuilder, OdeEquations, OdeSolverMethod, Op};

use crate::error::{CompileError, SolverError};
use crate::options::{JacobianKind, LinearSolverKind, SolverOptions};
use crate::solver::{check_len, CompiledModule, ModelCompiler, Solver};
use crate::vector::Vector;

type M = diffsol::NalgebraMat<f64>;
type CG = CraneliftJitModule;
type LS = diffsol::NalgebraLU<f64>;

/// Compiles DiffSL source with the Cranelift JIT
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffSlCompiler;

impl ModelCompiler for DiffSlCompiler {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledModule>, CompileError> {
        // Parameters default to zero; this build only validates and sizes the model
        let problem = OdeBuilder::<M>::new()
            .build_from_diffsl::<CG>(source)
            .map_err(|e| CompileError::new(e.to_string()))?;

        let rhs = problem.eqn.rhs();
        let number_of_inputs = rhs.nparams();
        let number_of_outputs = problem
            .eqn
            .out()
            .map(|out| out.nout())
            .unwrap_or_else(|| rhs.nstates());

        log::info!(
            "DiffSlCompiler: compiled model with {} parameters, {} outputs",
            number_of_inputs,
            number_of_outputs
        );
        Ok(Box::new(DiffSlModule {
            source: source.to_string(),
            number_of_inputs,
            number_of_outputs,
        }))
    }
}

#[derive(Debug, Clone)]
struct DiffSlModule {
    source: String,
    number_of_inputs: usize,
    number_of_outputs: usize,
}

impl CompiledModule for DiffSlModule {
    fn build_solver(&self, options: &SolverOptions) -> Result<Box<dyn Solver>, SolverError> {
        if !(options.rtol > 0.0 && options.atol > 0.0) {
            return Err(SolverError::Setup(format!(
                "tolerances must be positive (atol {}, rtol {})",
                options.atol, options.rtol
            )));
        }
        if options.jacobian != JacobianKind::Dense
            || options.linear_solver != LinearSolverKind::Dense
        {
            log::debug!(
                "DiffSlModule: {:?} Jacobian with {:?} requested, using dense LU",
                options.jacobian,
                options.linear_solver
            );
        }
        if !options.fixed_times {
            log::debug!("DiffSlModule: outputs are always reported at the requested times");
        }

        Ok(Box::new(DiffSlSolver {
            source: self.source.clone(),
            number_of_inputs: self.number_of_inputs,
            number_of_outputs: self.number_of_outputs,
            atol: options.atol,
            rtol: options.rtol,
            fwd_sens: options.fwd_sens,
        }))
    }
}

#[derive(Debug)]
struct DiffSlSolver {
    source: String,
    number_of_inputs: usize,
    number_of_outputs: usize,
    atol: f64,
    rtol: f64,
    fwd_sens: bool,
}

impl DiffSlSolver {
    fn check_buffers(
        &self,
        timepoints: &Vector,
        inputs: &Vector,
        outputs: &Vector,
    ) -> Result<(), SolverError> {
        check_len("inputs", inputs, self.number_of_inputs)?;
        check_len(
            "outputs",
            outputs,
            timepoints.len() * self.number_of_outputs,
        )
    }

    /// Integrate with parameters `inputs`, writing time-major into `out`
    fn integrate(
        &self,
        timepoints: &[f64],
        inputs: &[f64],
        out: &mut [f64],
    ) -> Result<(), SolverError> {
        if timepoints.is_empty() {
            return Ok(());
        }

        let problem = OdeBuilder::<M>::new()
            .rtol(self.rtol)
            .atol([self.atol])
            .p(inputs.iter().copied())
            .build_from_diffsl::<CG>(&self.source)
            .map_err(|e| SolverError::Setup(e.to_string()))?;
        let mut solver = problem
            .bdf::<LS>()
            .map_err(|e| SolverError::Setup(e.to_string()))?;
        let ys = solver
            .solve_dense(timepoints)
            .map_err(|e| SolverError::Solve(e.to_string()))?;

        let data = ys.inner();
        write_time_major(data.nrows(), data.ncols(), |j, i| data[(j, i)], out)
    }
}

impl Solver for DiffSlSolver {
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
        self.check_buffers(timepoints, inputs, outputs)?;
        self.integrate(timepoints, inputs, outputs)
    }

    fn solve_with_sensitivities(
        &mut self,
        timepoints: &Vector,
        inputs: &Vector,
        dinputs: &Vector,
        outputs: &mut Vector,
        doutputs: &mut Vector,
    ) -> Result<(), SolverError> {
        if !self.fwd_sens {
            return Err(SolverError::Setup(
                "solver was built without forward sensitivities".to_string(),
            ));
        }
        self.check_buffers(timepoints, inputs, outputs)?;
        check_len("dinputs", dinputs, self.number_of_inputs)?;
        check_len("doutputs", doutputs, outputs.len())?;

        self.integrate(timepoints, inputs, outputs)?;

        let Some(step) = perturbation_step(inputs, dinputs, self.rtol) else {
            doutputs.fill(0.0);
            return Ok(());
        };
        let perturbed: Vec<f64> = inputs
            .iter()
            .zip(dinputs.iter())
            .map(|(p, d)| p + step * d)
            .collect();
        self.integrate(timepoints, &perturbed, doutputs)?;
        difference_quotient(outputs, doutputs, step);
        Ok(())
    }
}

/// Copy a `rows x cols` matrix (rows = outputs, cols = timepoints) into a
/// time-major buffer
fn write_time_major(
    rows: usize,
    cols: usize,
    value: impl Fn(usize, usize) -> f64,
    out: &mut [f64],
) -> Result<(), SolverError> {
    if rows * cols != out.len() {
        return Err(SolverError::Dimension {
            buffer: "outputs",
            expected: out.len(),
            actual: rows * cols,
        });
    }
    for i in 0..cols {
        for j in 0..rows {
            out[i * rows + j] = value(j, i);
        }
    }
    Ok(())
}

/// Step along `dinputs` for the finite difference, `None` for a zero seed.
///
/// Scaled so the largest parameter moves by about `sqrt(rtol)` relative to
/// its magnitude.
fn perturbation_step(inputs: &[f64], dinputs: &[f64], rtol: f64) -> Option<f64> {
    let seed = dinputs.iter().fold(0.0_f64, |m, d| m.max(d.abs()));
    if seed == 0.0 || !seed.is_finite() {
        return None;
    }
    let scale = inputs.iter().fold(1.0_f64, |m, p| m.max(p.abs()));
    Some(rtol.sqrt() * scale / seed)
}

/// `perturbed <- (perturbed - base) / step`
fn difference_quotient(base: &[f64], perturbed: &mut [f64], step: f64) {
    for (d, y) in perturbed.iter_mut().zip(base) {
        *d = (*d - y) / step;
    }
}
