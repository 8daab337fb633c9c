//! Session intents
//!
//! Dispatched by the panels (user edits) and by the compile middleware
//! (results of the asynchronous compile pipeline).

use crate::state::{CompileGeneration, SolverSession, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND};

/// Everything a successful compile cycle produces, installed as one unit
#[derive(Debug)]
pub struct CompiledModel {
    /// Compile cycle that produced this model
    pub generation: CompileGeneration,
    pub session: SolverSession,
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
}

impl CompiledModel {
    /// Wrap a freshly allocated session with default parameter bounds
    pub fn new(generation: CompileGeneration, session: SolverSession) -> Self {
        let number_of_inputs = session.number_of_inputs();
        Self {
            generation,
            session,
            lower_bound: vec![DEFAULT_LOWER_BOUND; number_of_inputs],
            upper_bound: vec![DEFAULT_UPPER_BOUND; number_of_inputs],
        }
    }
}

/// Intents reduced into `ModelState`
#[derive(Debug)]
pub enum ModelAction {
    /// Request a new compile cycle for the selected variables
    Compile,
    /// Abandon the compile cycle in flight; its results will be discarded
    CancelCompile,
    /// Request the list of valid variable names from the service
    FetchSpmOptions,
    /// A compile cycle finished successfully
    Compiled(Box<CompiledModel>),
    /// Replace the model source (`generation` is set when the compile pipeline sends it)
    SetCode {
        code: String,
        generation: Option<CompileGeneration>,
    },
    /// Set a parameter value and its sensitivity seed
    SetInput { index: usize, value: f64, dvalue: f64 },
    SetLowerBound { index: usize, value: f64 },
    SetUpperBound { index: usize, value: f64 },
    /// Resample the solution over `[0, end_time]`
    SetMaxTime(f64),
    /// The compiler rejected the model source
    SetCompileError {
        error: String,
        generation: Option<CompileGeneration>,
    },
    /// The service or the compile pipeline failed
    SetServerError {
        error: Option<String>,
        generation: Option<CompileGeneration>,
    },
    /// Dismiss the server error dialog
    ClearServerError,
    SetSpmInputs(Vec<String>),
    SetSpmOutputs(Vec<String>),
    SetSpmInputOptions(Vec<String>),
    SetSpmOutputOptions(Vec<String>),
}

impl ModelAction {
    pub fn name(&self) -> &'static str {
        match self {
            ModelAction::Compile => "Compile",
            ModelAction::CancelCompile => "CancelCompile",
            ModelAction::FetchSpmOptions => "FetchSpmOptions",
            ModelAction::Compiled(_) => "Compiled",
            ModelAction::SetCode { .. } => "SetCode",
            ModelAction::SetInput { .. } => "SetInput",
            ModelAction::SetLowerBound { .. } => "SetLowerBound",
            ModelAction::SetUpperBound { .. } => "SetUpperBound",
            ModelAction::SetMaxTime(_) => "SetMaxTime",
            ModelAction::SetCompileError { .. } => "SetCompileError",
            ModelAction::SetServerError { .. } => "SetServerError",
            ModelAction::ClearServerError => "ClearServerError",
            ModelAction::SetSpmInputs(_) => "SetSpmInputs",
            ModelAction::SetSpmOutputs(_) => "SetSpmOutputs",
            ModelAction::SetSpmInputOptions(_) => "SetSpmInputOptions",
            ModelAction::SetSpmOutputOptions(_) => "SetSpmOutputOptions",
        }
    }
}
