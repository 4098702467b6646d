//! In-memory todo testing utilities
//!
//! Provides fast, deterministic stand-ins for the persistence and RPC seams:
//! - [`InMemoryTodoStore`]: `BTreeMap`-based [`TodoStore`] with failure injection
//! - [`FailingTodoRpc`]: [`TodoRpc`] whose every call fails with a fixed error

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on lock poisoning

use crate::mocks::test_clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use todo_core::environment::Clock;
use todo_core::rpc::{RpcError, RpcFuture, TodoRpc};
use todo_core::todo::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, TodoId, UpdateTodoInput,
};
use todo_core::todo_store::{StoreFuture, TodoStore, TodoStoreError};

#[derive(Debug, Default)]
struct Inner {
    todos: BTreeMap<TodoId, Todo>,
    last_id: i32,
    failure: Option<TodoStoreError>,
}

/// In-memory todo store for fast, deterministic testing.
///
/// Ids start at 1 and are never reused, matching a `SERIAL` column.
/// `created_at` comes from the injected [`Clock`].
///
/// # Example
///
/// ```
/// use todo_testing::InMemoryTodoStore;
/// use todo_core::todo_store::TodoStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryTodoStore::new();
///
/// let todo = store.insert("Buy milk".to_string()).await?;
/// assert_eq!(todo.id.get(), 1);
/// assert!(!todo.completed);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InMemoryTodoStore {
    inner: Arc<RwLock<Inner>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTodoStore {
    /// Create an empty store stamped by [`test_clock`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(test_clock())
    }

    /// Create an empty store stamped by `clock`
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            clock: Arc::new(clock),
        }
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: TodoStoreError) {
        self.inner.write().unwrap().failure = Some(error);
    }

    /// Stop injecting failures
    pub fn recover(&self) {
        self.inner.write().unwrap().failure = None;
    }

    /// Number of stored todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().todos.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().todos.is_empty()
    }

    /// Clear all todos; the id sequence keeps counting
    pub fn clear(&self) {
        self.inner.write().unwrap().todos.clear();
    }

    fn check(&self) -> Result<(), TodoStoreError> {
        match &self.inner.read().unwrap().failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTodoStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl TodoStore for InMemoryTodoStore {
    fn insert(&self, title: String) -> StoreFuture<'_, Todo> {
        Box::pin(async move {
            self.check()?;
            let mut inner = self.inner.write().unwrap();
            inner.last_id += 1;
            let todo = Todo {
                id: TodoId::new(inner.last_id),
                title,
                completed: false,
                created_at: self.clock.now(),
            };
            inner.todos.insert(todo.id, todo.clone());
            Ok(todo)
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            self.check()?;
            Ok(self.inner.read().unwrap().todos.values().cloned().collect())
        })
    }

    fn get(&self, id: TodoId) -> StoreFuture<'_, Option<Todo>> {
        Box::pin(async move {
            self.check()?;
            Ok(self.inner.read().unwrap().todos.get(&id).cloned())
        })
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> StoreFuture<'_, Option<Todo>> {
        Box::pin(async move {
            self.check()?;
            let mut inner = self.inner.write().unwrap();
            Ok(inner.todos.get_mut(&id).map(|todo| {
                todo.completed = completed;
                todo.clone()
            }))
        })
    }

    fn delete(&self, id: TodoId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            self.check()?;
            Ok(self.inner.write().unwrap().todos.remove(&id).is_some())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.check() })
    }
}

/// RPC client whose every call fails with the same error.
///
/// # Example
///
/// ```
/// use todo_testing::FailingTodoRpc;
/// use todo_core::rpc::{RpcErrorCode, TodoRpc};
///
/// # async fn example() {
/// let rpc = FailingTodoRpc::new(RpcErrorCode::Internal, "database down");
/// let err = rpc.get_todos().await.unwrap_err();
/// assert_eq!(err.message, "database down");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FailingTodoRpc {
    error: RpcError,
}

impl FailingTodoRpc {
    /// Fail every call with `code` and `message`
    #[must_use]
    pub fn new(code: todo_core::rpc::RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: RpcError::new(code, message),
        }
    }

    fn fail<T: Send + 'static>(&self) -> RpcFuture<'_, T> {
        let error = self.error.clone();
        Box::pin(async move { Err(error) })
    }
}

impl TodoRpc for FailingTodoRpc {
    fn get_todos(&self) -> RpcFuture<'_, Vec<Todo>> {
        self.fail()
    }

    fn create_todo(&self, _input: CreateTodoInput) -> RpcFuture<'_, Todo> {
        self.fail()
    }

    fn update_todo(&self, _input: UpdateTodoInput) -> RpcFuture<'_, Todo> {
        self.fail()
    }

    fn delete_todo(&self, _input: DeleteTodoInput) -> RpcFuture<'_, DeleteTodoResult> {
        self.fail()
    }
}
