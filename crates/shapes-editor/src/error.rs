//! Error kinds for rejected edits.
//!
//! Neither kind is ever surfaced to the user: the session turns both into
//! silent no-ops and only logs them.

use thiserror::Error;

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The edit would break a shape or session invariant.
    #[error("invalid edit: {0}")]
    Validation(String),

    /// The edit refers to a shape, selection, or clipboard entry that
    /// does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<String> for EditError {
    fn from(reason: String) -> Self {
        EditError::Validation(reason)
    }
}
