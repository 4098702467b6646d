//! Persistence contract for todo records.
//!
//! The `TodoStore` trait is the only way the service touches durable state.
//! It maps one-to-one onto single-statement SQL operations against the
//! `todos(id, title, completed, created_at)` table.
//!
//! # Implementations
//!
//! - `PostgresTodoStore` (in `todo-postgres`): Production implementation
//! - `InMemoryTodoStore` (in `todo-testing`): Fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use todo_core::todo_store::{TodoStore, TodoStoreError};
//!
//! async fn example<S: TodoStore>(store: &S) -> Result<(), TodoStoreError> {
//!     let todo = store.insert("Buy milk".to_string()).await?;
//!     let _ = store.set_completed(todo.id, true).await?;
//!     let removed = store.delete(todo.id).await?;
//!     assert!(removed);
//!     Ok(())
//! }
//! ```

use crate::todo::{Todo, TodoId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`TodoStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TodoStoreError>> + Send + 'a>>;

/// Errors that can occur during store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoStoreError {
    /// Query failed (constraint violation, malformed row, lost connection mid-query).
    #[error("Database error: {0}")]
    Database(String),

    /// Could not obtain a connection from the pool.
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Durable storage for todo records.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single store can be shared by
/// every request handler.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// to enable trait object usage (`Arc<dyn TodoStore>`).
pub trait TodoStore: Send + Sync {
    /// Insert a new record.
    ///
    /// The store assigns `id` and `created_at`; `completed` starts `false`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError`] if the insert fails.
    fn insert(&self, title: String) -> StoreFuture<'_, Todo>;

    /// Load every record.
    ///
    /// No ordering is promised to callers.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError`] if the query fails.
    fn list(&self) -> StoreFuture<'_, Vec<Todo>>;

    /// Load one record by id.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError`] if the query fails. A missing row is `Ok(None)`.
    fn get(&self, id: TodoId) -> StoreFuture<'_, Option<Todo>>;

    /// Set the completion flag of one record and return the stored row.
    ///
    /// Only `completed` is written. Returns `Ok(None)` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError`] if the update fails.
    fn set_completed(&self, id: TodoId, completed: bool) -> StoreFuture<'_, Option<Todo>>;

    /// Remove one record permanently.
    ///
    /// Returns `true` iff a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError`] if the delete fails.
    fn delete(&self, id: TodoId) -> StoreFuture<'_, bool>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError`] if the backing database cannot be queried.
    fn ping(&self) -> StoreFuture<'_, ()>;
}

impl<T: TodoStore + ?Sized> TodoStore for std::sync::Arc<T> {
    fn insert(&self, title: String) -> StoreFuture<'_, Todo> {
        (**self).insert(title)
    }

    fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
        (**self).list()
    }

    fn get(&self, id: TodoId) -> StoreFuture<'_, Option<Todo>> {
        (**self).get(id)
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> StoreFuture<'_, Option<Todo>> {
        (**self).set_completed(id, completed)
    }

    fn delete(&self, id: TodoId) -> StoreFuture<'_, bool> {
        (**self).delete(id)
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        (**self).ping()
    }
}
