//! Solver module traits
//!
//! Implementations must be `Send` so that compilation can run off the UI
//! thread and the resulting solver can be handed back to it.

use crate::error::{CompileError, SolverError};
use crate::options::SolverOptions;
use crate::vector::Vector;

/// Compiles model source into a loadable module
pub trait ModelCompiler: Send + Sync {
    /// Compile `source`.
    ///
    /// A rejected model is reported as [`CompileError`] with the compiler's
    /// plain-text reason.
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledModule>, CompileError>;
}

/// A successfully compiled model
pub trait CompiledModule: Send {
    /// Construct a solver for this model
    fn build_solver(&self, options: &SolverOptions) -> Result<Box<dyn Solver>, SolverError>;
}

/// A solver instance bound to one compiled model.
///
/// Output buffers are time-major: the value of output channel `j` at
/// timepoint `i` is stored at `i * number_of_outputs() + j`.
pub trait Solver: Send {
    /// Number of model parameters
    fn number_of_inputs(&self) -> usize;

    /// Number of output channels reported per timepoint
    fn number_of_outputs(&self) -> usize;

    /// Integrate the model, writing the solution at every timepoint into `outputs`
    fn solve(
        &mut self,
        timepoints: &Vector,
        inputs: &Vector,
        outputs: &mut Vector,
    ) -> Result<(), SolverError>;

    /// Integrate the model together with its forward sensitivities.
    ///
    /// `dinputs` seeds the sensitivity direction; the directional derivative
    /// of the solution is written into `doutputs`.
    fn solve_with_sensitivities(
        &mut self,
        timepoints: &Vector,
        inputs: &Vector,
        dinputs: &Vector,
        outputs: &mut Vector,
        doutputs: &mut Vector,
    ) -> Result<(), SolverError>;
}

/// Check that `buffer` has `expected` elements
pub fn check_len(buffer: &'static str, actual: &Vector, expected: usize) -> Result<(), SolverError> {
    if actual.len() == expected {
        Ok(())
    } else {
        Err(SolverError::Dimension {
            buffer,
            expected,
            actual: actual.len(),
        })
    }
}
