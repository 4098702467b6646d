//! View state and actions for the todo list screen.

use todo_core::todo::{Todo, TodoId};

/// State of the todo list as the user sees it.
///
/// Only the reducer mutates it. Counts and progress are derived on demand and
/// never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListState {
    /// Todos in display order (server order on load, appended on create)
    pub todos: Vec<Todo>,
    /// Text currently in the input field
    pub draft_title: String,
    /// A `getTodos` call is in flight
    pub is_loading: bool,
    /// A `createTodo` call is in flight
    pub is_creating: bool,
    /// Message of the most recent failed call, cleared by the next success
    pub last_error: Option<String>,
}

impl TodoListState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of todos
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Completed fraction in `0.0..=1.0`, `0.0` for an empty list
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Todo counts stay far below 2^52
    pub fn progress(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / total as f64
    }

    /// True when the list is non-empty and every todo is completed
    #[must_use]
    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|t| t.completed)
    }

    /// Looks up a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }
}

/// User intents and RPC outcomes for the todo list.
///
/// Intents (`Load`, `Submit`, `Toggle`, ...) may start an RPC call; outcomes
/// (`Loaded`, `CreateFailed`, ...) are fed back by the runtime when the call
/// finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoListAction {
    // ========== Intents ==========
    /// Fetch the full list from the server
    Load,

    /// The input field changed
    DraftChanged {
        /// New field contents
        title: String,
    },

    /// Create a todo from the current draft
    Submit,

    /// Flip the completion flag of a todo
    Toggle {
        /// Todo to flip
        id: TodoId,
    },

    /// Delete a todo
    Delete {
        /// Todo to delete
        id: TodoId,
    },

    // ========== Outcomes ==========
    /// `getTodos` succeeded
    Loaded {
        /// Every stored todo
        todos: Vec<Todo>,
    },

    /// `getTodos` failed
    LoadFailed {
        /// Error message
        error: String,
    },

    /// `createTodo` succeeded
    Created {
        /// The stored record
        todo: Todo,
    },

    /// `createTodo` failed
    CreateFailed {
        /// Error message
        error: String,
    },

    /// `updateTodo` succeeded
    Toggled {
        /// The updated record
        todo: Todo,
    },

    /// `updateTodo` failed
    ToggleFailed {
        /// Todo that was being updated
        id: TodoId,
        /// Error message
        error: String,
    },

    /// `deleteTodo` answered
    ///
    /// Also emitted when the server reports `success: false`: the record is
    /// gone either way.
    Deleted {
        /// Removed todo
        id: TodoId,
    },

    /// `deleteTodo` failed
    DeleteFailed {
        /// Todo that was being deleted
        id: TodoId,
        /// Error message
        error: String,
    },
}
