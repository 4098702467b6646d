//! The RPC contract between the view-state controller and the server.
//!
//! Four procedures, each a typed call/response:
//!
//! | Procedure | Input | Output |
//! |-----------|-------|--------|
//! | `getTodos` | none | `Vec<Todo>` |
//! | `createTodo` | [`CreateTodoInput`] | [`Todo`] |
//! | `updateTodo` | [`UpdateTodoInput`] | [`Todo`] (NOT_FOUND if absent) |
//! | `deleteTodo` | [`DeleteTodoInput`] | [`DeleteTodoResult`] |
//!
//! [`TodoService`] implements [`TodoRpc`] directly for in-process use; the
//! client crate provides an HTTP implementation.

use crate::error::TodoError;
use crate::service::TodoService;
use crate::todo::{CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, UpdateTodoInput};
use crate::todo_store::TodoStore;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Procedure names as they appear on the wire (`POST /rpc/<name>`).
pub mod procedures {
    /// List all todos
    pub const GET_TODOS: &str = "getTodos";
    /// Create a todo
    pub const CREATE_TODO: &str = "createTodo";
    /// Set a todo's completion flag
    pub const UPDATE_TODO: &str = "updateTodo";
    /// Delete a todo
    pub const DELETE_TODO: &str = "deleteTodo";

    /// Every procedure the server mounts
    pub const ALL: [&str; 4] = [GET_TODOS, CREATE_TODO, UPDATE_TODO, DELETE_TODO];
}

/// Error category carried across the RPC boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcErrorCode {
    /// Malformed request
    BadRequest,
    /// Input failed validation
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    /// Requested record does not exist
    NotFound,
    /// Server-side failure (store failure included)
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    Internal,
    /// Request never produced a response (connection refused, decode failure)
    #[serde(rename = "TRANSPORT_ERROR")]
    Transport,
    /// Any code this client does not know
    #[serde(other)]
    Unknown,
}

/// Error returned by an RPC call.
///
/// Displays as its message so callers can match on the server's wording
/// (e.g. "Todo with id 7 not found").
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct RpcError {
    /// Error category
    pub code: RpcErrorCode,
    /// Human-readable message
    pub message: String,
}

impl RpcError {
    /// Create a new RPC error
    #[must_use]
    pub fn new(code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Whether the server reported a missing record
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == RpcErrorCode::NotFound
    }
}

impl From<TodoError> for RpcError {
    fn from(error: TodoError) -> Self {
        let code = match error {
            TodoError::NotFound(_) => RpcErrorCode::NotFound,
            TodoError::Store(_) => RpcErrorCode::Internal,
        };
        Self::new(code, error.to_string())
    }
}

/// Boxed future returned by [`TodoRpc`] methods.
pub type RpcFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RpcError>> + Send + 'a>>;

/// The four remote procedures.
///
/// # Dyn Compatibility
///
/// Methods return `Pin<Box<dyn Future>>` so the controller environment can hold
/// an `Arc<dyn TodoRpc>` and swap transports in tests.
pub trait TodoRpc: Send + Sync {
    /// `getTodos`
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] if the call fails.
    fn get_todos(&self) -> RpcFuture<'_, Vec<Todo>>;

    /// `createTodo`
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] if the call fails.
    fn create_todo(&self, input: CreateTodoInput) -> RpcFuture<'_, Todo>;

    /// `updateTodo`
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] with [`RpcErrorCode::NotFound`] if the id is absent.
    fn update_todo(&self, input: UpdateTodoInput) -> RpcFuture<'_, Todo>;

    /// `deleteTodo`
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] if the call fails. A missing id is not an error.
    fn delete_todo(&self, input: DeleteTodoInput) -> RpcFuture<'_, DeleteTodoResult>;
}

impl<S: TodoStore> TodoRpc for TodoService<S> {
    fn get_todos(&self) -> RpcFuture<'_, Vec<Todo>> {
        Box::pin(async move { Ok(TodoService::get_todos(self).await?) })
    }

    fn create_todo(&self, input: CreateTodoInput) -> RpcFuture<'_, Todo> {
        Box::pin(async move { Ok(TodoService::create_todo(self, input).await?) })
    }

    fn update_todo(&self, input: UpdateTodoInput) -> RpcFuture<'_, Todo> {
        Box::pin(async move { Ok(TodoService::update_todo(self, input).await?) })
    }

    fn delete_todo(&self, input: DeleteTodoInput) -> RpcFuture<'_, DeleteTodoResult> {
        Box::pin(async move { Ok(TodoService::delete_todo(self, input).await?) })
    }
}
