//! Compile Middleware
//!
//! Performs the asynchronous work behind two intents:
//! - `Compile`: request model source from the compile service, compile it
//!   with the solver module and allocate a fresh solver session
//! - `FetchSpmOptions`: request the valid variable names from the service
//!
//! Each compile cycle is tagged with the generation the reducer assigns to
//! it, so results of a cancelled or superseded cycle are discarded.

use std::sync::Arc;

use anyhow::Context;
use spm_client::{CompileService, ServiceError, VariableSelection};
use spm_solver::{CompileError, ModelCompiler, SolverError, SolverOptions};
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::task::{JoinError, JoinHandle};

use crate::actions::{Action, CompiledModel, ModelAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, CompileGeneration, SolverSession};

/// Message shown when a compile task dies without a classifiable error
const UNKNOWN_ERROR: &str = "Unknown error";

/// Failure anywhere in the compile pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The solver module rejected the generated source
    #[error(transparent)]
    Rejected(#[from] CompileError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("compile task failed: {0}")]
    Task(#[from] JoinError),
}

impl PipelineError {
    /// Classify into the error intent that ends the compile cycle
    pub fn into_action(self, generation: CompileGeneration) -> ModelAction {
        match self {
            PipelineError::Rejected(e) => ModelAction::SetCompileError {
                error: e.reason().to_string(),
                generation: Some(generation),
            },
            PipelineError::Task(e) => {
                log::error!("Compile task {} failed: {}", generation, e);
                ModelAction::SetServerError {
                    error: Some(UNKNOWN_ERROR.to_string()),
                    generation: Some(generation),
                }
            }
            other => ModelAction::SetServerError {
                error: Some(other.to_string()),
                generation: Some(generation),
            },
        }
    }
}

/// Compile `source` and allocate a session sized from the new solver
fn build_session(
    compiler: &dyn ModelCompiler,
    source: &str,
    selection: VariableSelection,
) -> Result<SolverSession, PipelineError> {
    let module = compiler.compile(source)?;
    let solver = module.build_solver(&SolverOptions::default())?;
    Ok(SolverSession::allocate(
        solver,
        selection.inputs,
        selection.outputs,
    ))
}

/// One compile cycle: fetch source, publish it, compile it, allocate buffers
async fn run_compile_cycle(
    service: Arc<dyn CompileService>,
    compiler: Arc<dyn ModelCompiler>,
    selection: VariableSelection,
    generation: CompileGeneration,
    dispatcher: Dispatcher,
) -> Result<CompiledModel, PipelineError> {
    let source = service.compile(&selection).await?;

    dispatcher.dispatch(ModelAction::SetCode {
        code: source.clone(),
        generation: Some(generation),
    });

    // Compilation is CPU bound
    let session = tokio::task::spawn_blocking(move || {
        build_session(compiler.as_ref(), &source, selection)
    })
    .await??;

    Ok(CompiledModel::new(generation, session))
}

/// Middleware for the compile service and the solver module
pub struct CompileMiddleware {
    /// Tokio runtime for async operations
    runtime: Runtime,
    service: Arc<dyn CompileService>,
    compiler: Arc<dyn ModelCompiler>,
    /// Task of the compile cycle in flight, if any
    in_flight: Option<JoinHandle<()>>,
}

impl CompileMiddleware {
    pub fn new(
        service: Arc<dyn CompileService>,
        compiler: Arc<dyn ModelCompiler>,
    ) -> anyhow::Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            runtime,
            service,
            compiler,
            in_flight: None,
        })
    }

    fn start_compile(&mut self, state: &AppState, dispatcher: &Dispatcher) {
        // The reducer assigns the same generation when it sees the Compile action
        let generation = state.model.compile_generation.next();
        let selection = VariableSelection::new(
            state.model.spm_inputs.clone(),
            state.model.spm_outputs.clone(),
        );
        log::info!(
            "CompileMiddleware: starting compile {} for inputs {:?}, outputs {:?}",
            generation,
            selection.inputs,
            selection.outputs
        );

        let service = Arc::clone(&self.service);
        let compiler = Arc::clone(&self.compiler);
        let dispatcher = dispatcher.clone();

        let handle = self.runtime.spawn(async move {
            let result =
                run_compile_cycle(service, compiler, selection, generation, dispatcher.clone())
                    .await;
            let action = match result {
                Ok(model) => ModelAction::Compiled(Box::new(model)),
                Err(e) => {
                    log::warn!("CompileMiddleware: compile {} failed: {}", generation, e);
                    e.into_action(generation)
                }
            };
            dispatcher.dispatch(action);
        });

        if let Some(previous) = self.in_flight.replace(handle) {
            previous.abort();
        }
    }

    fn cancel_compile(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            log::info!("CompileMiddleware: aborting compile task");
            handle.abort();
        }
    }

    fn fetch_options(&self, dispatcher: &Dispatcher) {
        let service = Arc::clone(&self.service);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            match service.options().await {
                Ok(options) => {
                    log::info!(
                        "CompileMiddleware: loaded {} input and {} output options",
                        options.inputs.len(),
                        options.outputs.len()
                    );
                    dispatcher.dispatch(ModelAction::SetSpmInputOptions(options.inputs));
                    dispatcher.dispatch(ModelAction::SetSpmOutputOptions(options.outputs));
                }
                Err(e) => {
                    match e.status() {
                        Some(status) => log::warn!(
                            "CompileMiddleware: options request answered {}: {}",
                            status,
                            e
                        ),
                        None => log::warn!("CompileMiddleware: failed to load options: {}", e),
                    }
                    dispatcher.dispatch(ModelAction::SetServerError {
                        error: Some(e.to_string()),
                        generation: None,
                    });
                }
            }
        });
    }
}

impl Middleware for CompileMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Model(ModelAction::Compile) => {
                if state.model.compiling {
                    log::debug!("CompileMiddleware: compile in progress, dropping request");
                    return false;
                }
                self.start_compile(state, dispatcher);
                true // Reducer flips the busy flag
            }
            Action::Model(ModelAction::CancelCompile) => {
                if state.model.compiling {
                    self.cancel_compile();
                }
                true
            }
            Action::Model(ModelAction::FetchSpmOptions) => {
                self.fetch_options(dispatcher);
                false
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TIMEPOINT_COUNT;
    use crate::store::Store;
    use async_trait::async_trait;
    use spm_solver::testing::ScriptedCompiler;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};
    use tokio::sync::Notify;

    /// In-memory compile service
    struct MockService {
        /// Ok(source) or Err(status code)
        compile: Result<String, u16>,
        options: Result<VariableSelection, u16>,
        compile_calls: Arc<AtomicUsize>,
        /// When set, compile requests wait for a notification
        gate: Option<Arc<Notify>>,
    }

    impl MockService {
        fn answering(source: &str) -> Self {
            Self {
                compile: Ok(source.to_string()),
                options: Ok(VariableSelection::default()),
                compile_calls: Arc::new(AtomicUsize::new(0)),
                gate: None,
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                compile: Err(status),
                options: Err(status),
                ..Self::answering("")
            }
        }

        fn status_error(status: u16) -> ServiceError {
            ServiceError::Status {
                status,
                reason: "Internal Server Error".to_string(),
                body: String::new(),
            }
        }
    }

    #[async_trait]
    impl CompileService for MockService {
        async fn compile(&self, _selection: &VariableSelection) -> Result<String, ServiceError> {
            self.compile_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.compile.clone().map_err(Self::status_error)
        }

        async fn options(&self) -> Result<VariableSelection, ServiceError> {
            self.options.clone().map_err(Self::status_error)
        }
    }

    fn store_with(service: MockService, compiler: ScriptedCompiler) -> Store {
        let mut store = Store::new(AppState::default());
        let middleware = CompileMiddleware::new(Arc::new(service), Arc::new(compiler)).unwrap();
        store.add_middleware(Box::new(middleware));
        store
    }

    /// Reduce follow-up actions until `done` holds or five seconds pass
    fn settle(store: &mut Store, done: impl Fn(&AppState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(store.state()) && Instant::now() < deadline {
            store.process_next(Duration::from_millis(50)).unwrap();
        }
    }

    fn not_compiling(state: &AppState) -> bool {
        !state.model.compiling
    }

    #[test]
    fn test_successful_compile_allocates_buffers() {
        let compiler = ScriptedCompiler::accepting(3, 2);
        let mut store = store_with(MockService::answering("model source"), compiler.clone());

        store.dispatch(ModelAction::Compile).unwrap();
        assert!(store.state().model.compiling);
        settle(&mut store, not_compiling);

        let model = &store.state().model;
        assert!(!model.compiling);
        assert_eq!(model.code, "model source");
        assert_eq!(model.compile_error, None);
        assert_eq!(model.solve_error, None);

        let session = model.session.as_ref().expect("session installed");
        assert_eq!(session.timepoints().len(), TIMEPOINT_COUNT);
        assert_eq!(session.outputs().len(), 200);
        assert_eq!(session.doutputs().len(), 200);
        assert_eq!(session.inputs().len(), 3);
        assert_eq!(session.dinputs().len(), 3);
        assert_eq!(model.lower_bound.len(), 3);
        assert_eq!(model.upper_bound.len(), 3);
        assert!(session.inputs().iter().all(|v| *v == 0.5));
        assert_eq!(session.output_name(0), "Voltage [V]");
        assert_eq!(compiler.counters().sensitivity_solves(), 1);
    }

    #[test]
    fn test_service_failure_sets_server_error() {
        let mut store = store_with(MockService::failing(500), ScriptedCompiler::accepting(1, 1));

        store.dispatch(ModelAction::Compile).unwrap();
        settle(&mut store, not_compiling);

        let model = &store.state().model;
        assert!(!model.compiling);
        assert_eq!(model.compile_error, None);
        let error = model.server_error.as_deref().expect("server error set");
        assert!(error.contains("500"), "unexpected message: {}", error);
        assert!(model.session.is_none());
    }

    #[test]
    fn test_compiler_rejection_sets_compile_error() {
        let mut store = store_with(
            MockService::answering("broken source"),
            ScriptedCompiler::rejecting("syntax error"),
        );

        store.dispatch(ModelAction::Compile).unwrap();
        settle(&mut store, not_compiling);

        let model = &store.state().model;
        assert_eq!(model.compile_error.as_deref(), Some("syntax error"));
        assert!(!model.compiling);
        assert_eq!(model.server_error, None);
        // Source was published before compiling
        assert_eq!(model.code, "broken source");
    }

    #[test]
    fn test_solver_setup_failure_sets_server_error() {
        let mut store = store_with(
            MockService::answering("source"),
            ScriptedCompiler::failing_setup(2, 1, "KLU unavailable"),
        );

        store.dispatch(ModelAction::Compile).unwrap();
        settle(&mut store, not_compiling);

        let model = &store.state().model;
        assert_eq!(
            model.server_error.as_deref(),
            Some("solver setup failed: KLU unavailable")
        );
        assert_eq!(model.compile_error, None);
    }

    #[test]
    fn test_second_compile_while_in_flight_is_dropped() {
        let gate = Arc::new(Notify::new());
        let service = MockService {
            gate: Some(Arc::clone(&gate)),
            ..MockService::answering("source")
        };
        let calls = Arc::clone(&service.compile_calls);
        let mut store = store_with(service, ScriptedCompiler::accepting(1, 1));

        store.dispatch(ModelAction::Compile).unwrap();
        let before = format!("{:?}", store.state().model);
        store.dispatch(ModelAction::Compile).unwrap();
        assert_eq!(format!("{:?}", store.state().model), before);

        gate.notify_one();
        settle(&mut store, not_compiling);

        assert!(store.state().model.session.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancelled_compile_is_not_installed() {
        let gate = Arc::new(Notify::new());
        let service = MockService {
            gate: Some(Arc::clone(&gate)),
            ..MockService::answering("source")
        };
        let compiler = ScriptedCompiler::accepting(1, 1);
        let mut store = store_with(service, compiler.clone());

        store.dispatch(ModelAction::Compile).unwrap();
        store.dispatch(ModelAction::CancelCompile).unwrap();
        assert!(!store.state().model.compiling);

        gate.notify_one();
        store.process_next(Duration::from_millis(200)).unwrap();

        let model = &store.state().model;
        assert!(model.session.is_none());
        assert_eq!(model.code, "");
        assert_eq!(compiler.counters().sensitivity_solves(), 0);
    }

    #[test]
    fn test_recompile_replaces_session() {
        let compiler = ScriptedCompiler::accepting(2, 1);
        let mut store = store_with(MockService::answering("source"), compiler.clone());

        store.dispatch(ModelAction::Compile).unwrap();
        settle(&mut store, not_compiling);
        store.dispatch(ModelAction::Compile).unwrap();
        settle(&mut store, not_compiling);

        assert!(store.state().model.session.is_some());
        assert_eq!(compiler.counters().live_solvers(), 1);
        assert_eq!(compiler.counters().sensitivity_solves(), 2);
    }

    #[test]
    fn test_fetch_options_fills_choices() {
        let service = MockService {
            options: Ok(VariableSelection::new(
                vec!["Current function [A]".to_string(), "Ambient temperature [K]".to_string()],
                vec!["Voltage [V]".to_string()],
            )),
            ..MockService::answering("")
        };
        let mut store = store_with(service, ScriptedCompiler::accepting(1, 1));

        store.dispatch(ModelAction::FetchSpmOptions).unwrap();
        settle(&mut store, |state| !state.model.spm_output_options.is_empty());

        let model = &store.state().model;
        assert_eq!(model.spm_input_options.len(), 2);
        assert_eq!(model.spm_output_options, vec!["Voltage [V]"]);
        assert_eq!(model.server_error, None);
    }

    #[test]
    fn test_fetch_options_failure_sets_server_error() {
        let mut store = store_with(MockService::failing(503), ScriptedCompiler::accepting(1, 1));

        store.dispatch(ModelAction::FetchSpmOptions).unwrap();
        settle(&mut store, |state| state.model.server_error.is_some());

        let error = store.state().model.server_error.clone().unwrap();
        assert!(error.contains("503"));
        assert!(store.state().model.spm_input_options.is_empty());
    }

    #[test]
    fn test_error_classification() {
        let generation = CompileGeneration::default().next();

        let rejected = PipelineError::from(CompileError::new("bad token")).into_action(generation);
        assert!(matches!(
            rejected,
            ModelAction::SetCompileError { ref error, generation: Some(_) } if error == "bad token"
        ));

        let setup = PipelineError::from(SolverError::Setup("no memory".to_string()))
            .into_action(generation);
        assert!(matches!(
            setup,
            ModelAction::SetServerError { error: Some(ref e), .. } if e == "solver setup failed: no memory"
        ));
    }
}
