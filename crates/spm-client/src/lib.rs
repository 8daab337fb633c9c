//! Client for the SPM model compilation service
//!
//! The service turns a selection of input/output variable names into model
//! source text for the client-side solver module.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │         CompileService trait         │
//! │  - compile(&VariableSelection)       │
//! │  - options()                         │
//! └──────────────────────────────────────┘
//!                    │
//!                    ▼
//!         ┌─────────────────────┐
//!         │ HttpCompileService  │
//!         │ (reqwest)           │
//!         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use spm_client::{CompileService, HttpCompileService, VariableSelection};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), spm_client::ServiceError> {
//! let service = HttpCompileService::new("https://diffeq-pybamm-backend.fly.dev", Duration::from_secs(60))?;
//! let options = service.options().await?;
//! let source = service
//!     .compile(&VariableSelection::new(options.inputs, vec!["Voltage [V]".to_string()]))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http_client;
pub mod types;

pub use client::CompileService;
pub use error::ServiceError;
pub use http_client::HttpCompileService;
pub use types::VariableSelection;
