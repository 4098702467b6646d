//! The four todo operations.
//!
//! `TodoService` translates RPC inputs into [`TodoStore`] calls and enforces the
//! data-mutation contracts:
//!
//! | Operation | Missing id |
//! |-----------|------------|
//! | `create_todo` | n/a |
//! | `get_todos` | n/a |
//! | `update_todo` | [`TodoError::NotFound`] |
//! | `delete_todo` | `DeleteTodoResult { success: false }` |
//!
//! Store failures are logged here and then propagated unchanged. Nothing is
//! retried.

use crate::error::TodoError;
use crate::todo::{CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, UpdateTodoInput};
use crate::todo_store::TodoStore;
use std::sync::Arc;

/// Service over a shared, type-erased store. This is what the web boundary holds.
pub type DynTodoService = TodoService<Arc<dyn TodoStore>>;

/// Todo operations on top of a [`TodoStore`].
#[derive(Debug, Clone)]
pub struct TodoService<S> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    /// Creates a service backed by `store`
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Create a todo.
    ///
    /// The title is stored as given; emptiness is checked by callers.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the insert fails.
    #[tracing::instrument(skip(self, input), fields(title_len = input.title.len()))]
    pub async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, TodoError> {
        metrics::counter!("todo.service.operations", "op" => "create").increment(1);

        let todo = self
            .store
            .insert(input.title)
            .await
            .map_err(|e| record_failure("create", e.into()))?;

        tracing::info!(id = %todo.id, "Todo created");
        Ok(todo)
    }

    /// List every todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_todos(&self) -> Result<Vec<Todo>, TodoError> {
        metrics::counter!("todo.service.operations", "op" => "list").increment(1);

        let todos = self
            .store
            .list()
            .await
            .map_err(|e| record_failure("list", e.into()))?;

        tracing::debug!(count = todos.len(), "Todos fetched");
        Ok(todos)
    }

    /// Set the completion flag of an existing todo.
    ///
    /// `title` and `created_at` come back exactly as stored.
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no todo has `input.id`
    /// - [`TodoError::Store`] if the update fails
    #[tracing::instrument(skip(self, input), fields(id = %input.id, completed = input.completed))]
    pub async fn update_todo(&self, input: UpdateTodoInput) -> Result<Todo, TodoError> {
        metrics::counter!("todo.service.operations", "op" => "update").increment(1);

        let updated = self
            .store
            .set_completed(input.id, input.completed)
            .await
            .map_err(|e| record_failure("update", e.into()))?;

        match updated {
            Some(todo) => {
                tracing::info!("Todo updated");
                Ok(todo)
            },
            None => Err(record_failure("update", TodoError::NotFound(input.id))),
        }
    }

    /// Delete a todo.
    ///
    /// Deleting an id that does not exist is not an error; it yields
    /// `success: false`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the delete fails.
    #[tracing::instrument(skip(self, input), fields(id = %input.id))]
    pub async fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteTodoResult, TodoError> {
        metrics::counter!("todo.service.operations", "op" => "delete").increment(1);

        let success = self
            .store
            .delete(input.id)
            .await
            .map_err(|e| record_failure("delete", e.into()))?;

        if success {
            tracing::info!("Todo deleted");
        } else {
            tracing::debug!("Delete matched no todo");
        }

        Ok(DeleteTodoResult { success })
    }
}

/// Log and count a failed operation, then hand the error back for propagation.
fn record_failure(op: &'static str, error: TodoError) -> TodoError {
    metrics::counter!("todo.service.errors", "op" => op, "kind" => error.kind()).increment(1);

    match &error {
        TodoError::NotFound(id) => {
            tracing::warn!(op, id = %id, "Todo not found");
        },
        TodoError::Store(source) => {
            tracing::error!(op, error = %source, "Todo store operation failed");
        },
    }

    error
}
