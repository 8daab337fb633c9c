//! Solver configuration record

use serde::{Deserialize, Serialize};

/// How the solver represents the Jacobian of the right-hand side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JacobianKind {
    Dense,
    #[default]
    Sparse,
}

/// Linear solver used inside the implicit integrator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolverKind {
    Dense,
    /// Sparse direct solver (KLU)
    #[default]
    Klu,
}

/// Configuration handed to [`crate::CompiledModule::build_solver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Absolute tolerance
    pub atol: f64,
    /// Relative tolerance
    pub rtol: f64,
    /// Compute forward sensitivities alongside the primary solve
    pub fwd_sens: bool,
    /// Report the solution only at the requested timepoints
    pub fixed_times: bool,
    pub jacobian: JacobianKind,
    pub linear_solver: LinearSolverKind,
}

impl Default for SolverOptions {
    /// Tight tolerances with a sparse Jacobian and a direct sparse linear solver
    fn default() -> Self {
        Self {
            atol: 1.0e-8,
            rtol: 1.0e-8,
            fwd_sens: true,
            fixed_times: true,
            jacobian: JacobianKind::Sparse,
            linear_solver: LinearSolverKind::Klu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SolverOptions::default();
        assert_eq!(options.atol, 1.0e-8);
        assert_eq!(options.rtol, 1.0e-8);
        assert!(options.fwd_sens);
        assert!(options.fixed_times);
        assert_eq!(options.jacobian, JacobianKind::Sparse);
        assert_eq!(options.linear_solver, LinearSolverKind::Klu);
    }

    #[test]
    fn test_options_serialize_snake_case() {
        let json = serde_json::to_value(SolverOptions::default()).unwrap();
        assert_eq!(json["jacobian"], "sparse");
        assert_eq!(json["linear_solver"], "klu");
    }
}
