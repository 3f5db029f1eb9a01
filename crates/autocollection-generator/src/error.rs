//! Error types for collection synthesis

use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::templates::TemplateError;

/// Pass-level failures
///
/// Candidate-local problems are not errors; they surface as
/// [`Diagnostic`]s in the pass report while the other candidates proceed.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A contract/shape pair has no template; aborts the whole contract
    #[error("Configuration fault: {}", .diagnostic.message)]
    Configuration {
        /// The contract-level diagnostic
        diagnostic: Diagnostic,
        /// Candidate diagnostics gathered before the fault
        candidate_faults: Vec<Diagnostic>,
    },

    /// Two units computed the same identity
    #[error("Identity collision: {0}")]
    IdentityCollision(String),

    /// The host cancelled the pass before publication
    #[error("Synthesis pass cancelled")]
    Cancelled,

    /// Template catalog error
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// The output sink refused a unit
    #[error("Publish failed for {identity}: {message}")]
    PublishFailed {
        /// Identity of the refused unit
        identity: String,
        /// Reason reported by the sink
        message: String,
    },

    /// The compilation snapshot could not be read
    #[error("Invalid compilation snapshot: {0}")]
    InvalidSnapshot(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
