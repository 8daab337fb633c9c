//! Fallback compiler for builds without the `diffsl` feature

use crate::error::CompileError;
use crate::solver::{CompiledModule, ModelCompiler};

/// Compiler used when no solver backend is linked into the binary.
///
/// Every compile is rejected with an explanatory reason, so the rest of the
/// application (service requests, code display, error reporting) stays usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlinkedCompiler;

impl ModelCompiler for UnlinkedCompiler {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledModule>, CompileError> {
        log::warn!(
            "UnlinkedCompiler: rejecting {} bytes of model source, no solver backend linked",
            source.len()
        );
        Err(CompileError::new(
            "no solver backend is linked into this build",
        ))
    }
}
