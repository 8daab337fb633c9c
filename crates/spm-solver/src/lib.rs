//! Interface to the client-side solver module
//!
//! Describes the contract the studio consumes (model compilation, time
//! integration, forward sensitivities) and, with the default `diffsl`
//! feature, implements it with diffsol.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  compile(source)  ┌──────────────────┐
//! │  ModelCompiler   │──────────────────►│  CompiledModule  │
//! └──────────────────┘                   └──────────────────┘
//!                                                 │ build_solver(&SolverOptions)
//!                                                 ▼
//!                                        ┌──────────────────┐
//!                                        │      Solver      │
//!                                        │ - solve()        │
//!                                        │ - solve_with_    │
//!                                        │   sensitivities()│
//!                                        └──────────────────┘
//! ```
//!
//! Resources held by a compiled module or a solver are released when the
//! owning box is dropped.

#[cfg(feature = "diffsl")]
pub mod diffsl_compiler;
pub mod error;
pub mod options;
pub mod solver;
pub mod unlinked;
pub mod vector;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{CompileError, SolverError};
pub use options::{JacobianKind, LinearSolverKind, SolverOptions};
pub use solver::{CompiledModule, ModelCompiler, Solver};
pub use unlinked::UnlinkedCompiler;
pub use vector::Vector;

#[cfg(feature = "diffsl")]
pub use diffsl_compiler::DiffSlCompiler;

use std::sync::Arc;

/// The linked solver backend, or [`UnlinkedCompiler`] in builds without one
pub fn default_compiler() -> Arc<dyn ModelCompiler> {
    #[cfg(feature = "diffsl")]
    {
        Arc::new(DiffSlCompiler)
    }
    #[cfg(not(feature = "diffsl"))]
    {
        Arc::new(UnlinkedCompiler)
    }
}
