//! Error taxonomy for store and service operations

use reclaim_domain::ValidationError;

/// Errors surfaced by the store protocol and the layers above it.
///
/// `Transport` covers anything that makes the remote collaborator
/// unreachable or a call fail in flight; `NotFound` is a present store with
/// an absent document, and the two are never conflated.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("item not found: {0}")]
    NotFound(String),

    #[error("unsupported query: {0}")]
    UnsupportedQuery(String),

    #[error("validation failed on {}", .0.iter().map(|e| e.field.as_str()).collect::<Vec<_>>().join(", "))]
    Validation(Vec<ValidationError>),
}

impl StoreError {
    /// True for failures of the remote call itself, as opposed to outcomes
    /// of a call that reached the store.
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}
