//! Model session state

use super::{SolverSession, VariableList};

/// Initial lower bound of every parameter
pub const DEFAULT_LOWER_BOUND: f64 = 0.0;
/// Initial upper bound of every parameter
pub const DEFAULT_UPPER_BOUND: f64 = 1.0;

/// Sequence number of a compile cycle.
///
/// Results of the asynchronous compile pipeline carry the generation they
/// were started with; anything older than the current generation is stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompileGeneration(u64);

impl CompileGeneration {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CompileGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The model being edited and its latest solution
#[derive(Debug)]
pub struct ModelState {
    /// Model source as returned by the compile service
    pub code: String,
    /// Present once a compile has succeeded
    pub session: Option<SolverSession>,
    /// Per-parameter bounds, index-aligned with the session inputs
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
    /// Selected variable names; order fixes the channel order
    pub spm_inputs: Vec<String>,
    pub spm_outputs: Vec<String>,
    /// Variable names the compile service accepts
    pub spm_input_options: Vec<String>,
    pub spm_output_options: Vec<String>,
    pub compile_error: Option<String>,
    pub server_error: Option<String>,
    pub solve_error: Option<String>,
    /// True while a compile cycle is in flight
    pub compiling: bool,
    pub compile_generation: CompileGeneration,
}

impl ModelState {
    pub fn new(spm_inputs: Vec<String>, spm_outputs: Vec<String>) -> Self {
        Self {
            code: String::new(),
            session: None,
            lower_bound: Vec::new(),
            upper_bound: Vec::new(),
            spm_inputs,
            spm_outputs,
            spm_input_options: Vec::new(),
            spm_output_options: Vec::new(),
            compile_error: None,
            server_error: None,
            solve_error: None,
            compiling: false,
            compile_generation: CompileGeneration::default(),
        }
    }

    /// Whether a result tagged with `generation` belongs to an abandoned compile cycle.
    ///
    /// Untagged results (user edits, option fetches) are never stale.
    pub fn is_stale(&self, generation: Option<CompileGeneration>) -> bool {
        generation.is_some_and(|g| g != self.compile_generation)
    }

    /// Names the service offers for `list`
    pub fn options(&self, list: VariableList) -> &[String] {
        match list {
            VariableList::Inputs => &self.spm_input_options,
            VariableList::Outputs => &self.spm_output_options,
        }
    }

    /// Names currently selected for `list`
    pub fn selected(&self, list: VariableList) -> &[String] {
        match list {
            VariableList::Inputs => &self.spm_inputs,
            VariableList::Outputs => &self.spm_outputs,
        }
    }

    /// Number of parameters of the compiled model (0 before the first compile)
    pub fn parameter_count(&self) -> usize {
        self.session
            .as_ref()
            .map(|s| s.number_of_inputs())
            .unwrap_or(0)
    }
}
