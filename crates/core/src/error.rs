//! Domain-level error type shared across the workspace.

use crate::types::DbId;

/// Errors produced by domain logic and surfaced by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record with the given id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. duplicate username).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request carries no valid user identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The user identity is valid but not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
