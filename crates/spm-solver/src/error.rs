//! Error types reported by the solver module

use thiserror::Error;

/// The compiler rejected the model source.
///
/// Carries the compiler's plain-text reason unchanged, so it can be shown to
/// the user next to the code it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CompileError(pub String);

impl CompileError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Failures raised while constructing or running a solver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The solver could not be constructed with the requested options
    #[error("solver setup failed: {0}")]
    Setup(String),

    /// A buffer handed to the solver does not have the expected length
    #[error("{buffer} has length {actual}, expected {expected}")]
    Dimension {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Numerical failure during integration
    #[error("solve failed: {0}")]
    Solve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_displays_reason_verbatim() {
        let err = CompileError::new("syntax error");
        assert_eq!(err.to_string(), "syntax error");
        assert_eq!(err.reason(), "syntax error");
    }

    #[test]
    fn test_dimension_error_message() {
        let err = SolverError::Dimension {
            buffer: "outputs",
            expected: 200,
            actual: 100,
        };
        assert_eq!(err.to_string(), "outputs has length 100, expected 200");
    }
}
