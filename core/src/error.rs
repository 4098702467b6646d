//! Errors returned by [`TodoService`](crate::service::TodoService).

use crate::todo::TodoId;
use crate::todo_store::TodoStoreError;
use thiserror::Error;

/// Errors that can occur during todo operations.
///
/// Deleting a missing record is deliberately absent here: it is reported
/// through `DeleteTodoResult { success: false }`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No record has the requested id.
    #[error("Todo with id {0} not found")]
    NotFound(TodoId),

    /// The underlying store failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] TodoStoreError),
}

impl TodoError {
    /// Short machine-readable kind, used as a metrics label
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "store",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_id() {
        let err = TodoError::NotFound(TodoId::new(99999));
        assert_eq!(err.to_string(), "Todo with id 99999 not found");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err = TodoError::from(TodoStoreError::Database("connection reset".to_string()));
        assert_eq!(err.to_string(), "Database error: connection reset");
        assert_eq!(err.kind(), "store");
    }
}
