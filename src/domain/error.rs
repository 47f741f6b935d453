//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the forest invariants.
/// These are independent of any storage backend.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A record names a parent that is not in the input mapping.
    /// The input is inconsistent (e.g. the parent image was deleted),
    /// so no sound partial forest can be produced.
    #[error("missing parent vdi {parent} (referenced by {child})")]
    MissingParent { child: String, parent: String },

    #[error("cycle detected in parent chain at: {0}")]
    CycleDetected(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
