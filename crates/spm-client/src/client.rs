//! Compile service trait

use crate::error::ServiceError;
use crate::types::VariableSelection;
use async_trait::async_trait;

/// Remote model compilation service
///
/// Implementations must be `Send + Sync` so they can be shared with the
/// async tasks spawned by the studio middleware.
#[async_trait]
pub trait CompileService: Send + Sync {
    /// Generate model source for the selected variables
    ///
    /// # Returns
    ///
    /// The model source text, or an error if the request failed or the
    /// service answered with a non-success status.
    async fn compile(&self, selection: &VariableSelection) -> Result<String, ServiceError>;

    /// List the variable names the service accepts as inputs and outputs
    async fn options(&self) -> Result<VariableSelection, ServiceError>;
}
