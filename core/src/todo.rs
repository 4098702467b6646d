//! Todo records and the payloads that cross the RPC boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a todo record.
///
/// Assigned by the persistent store on insertion and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i32);

impl TodoId {
    /// Wraps a raw store identifier
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw store identifier
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TodoId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// A single task record.
///
/// Only `completed` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identifier
    pub id: TodoId,
    /// Task text
    pub title: String,
    /// Completion flag, `false` at creation
    pub completed: bool,
    /// Insertion time, assigned by the store
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Returns a copy with `completed` replaced
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Input for `createTodo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoInput {
    /// Title of the new todo
    pub title: String,
}

impl CreateTodoInput {
    /// Creates a new input from any string-like title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Input for `updateTodo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoInput {
    /// Record to update
    pub id: TodoId,
    /// New completion flag
    pub completed: bool,
}

/// Input for `deleteTodo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTodoInput {
    /// Record to remove
    pub id: TodoId,
}

/// Outcome of `deleteTodo`.
///
/// `success` is `false` when no record had the requested id; that is a
/// reported outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTodoResult {
    /// Whether a record was removed
    pub success: bool,
}
