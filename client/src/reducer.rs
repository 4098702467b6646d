//! Reducer for the todo list view state.
//!
//! The reducer never flips state optimistically: every change to the list
//! comes from a server response fed back as an outcome action.

use crate::types::{TodoListAction, TodoListState};
use std::sync::Arc;
use todo_core::effect::Effect;
use todo_core::reducer::Reducer;
use todo_core::rpc::TodoRpc;
use todo_core::rpc_effect;
use todo_core::todo::{CreateTodoInput, DeleteTodoInput, UpdateTodoInput};
use todo_core::{SmallVec, smallvec};

/// Environment dependencies for the todo list reducer
#[derive(Clone)]
pub struct TodoListEnvironment {
    /// Transport for the four procedures
    pub rpc: Arc<dyn TodoRpc>,
}

impl TodoListEnvironment {
    /// Creates a new `TodoListEnvironment`
    #[must_use]
    pub const fn new(rpc: Arc<dyn TodoRpc>) -> Self {
        Self { rpc }
    }
}

impl std::fmt::Debug for TodoListEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoListEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list screen
#[derive(Clone, Debug)]
pub struct TodoListReducer;

impl TodoListReducer {
    /// Creates a new `TodoListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TodoListReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoListReducer {
    type State = TodoListState;
    type Action = TodoListAction;
    type Environment = TodoListEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action reads best flat
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Intents ==========
            TodoListAction::Load => {
                state.is_loading = true;
                let rpc = Arc::clone(&env.rpc);
                smallvec![rpc_effect! {
                    call: rpc.get_todos(),
                    on_success: |todos| TodoListAction::Loaded { todos },
                    on_error: |error| TodoListAction::LoadFailed { error: error.to_string() }
                }]
            },

            TodoListAction::DraftChanged { title } => {
                state.draft_title = title;
                SmallVec::new()
            },

            TodoListAction::Submit => {
                let title = state.draft_title.trim();
                if title.is_empty() {
                    tracing::debug!("Submit ignored: draft is blank");
                    return SmallVec::new();
                }
                if state.is_creating {
                    tracing::debug!("Submit ignored: a create is already in flight");
                    return SmallVec::new();
                }

                let input = CreateTodoInput::new(title);
                state.is_creating = true;
                let rpc = Arc::clone(&env.rpc);
                smallvec![rpc_effect! {
                    call: rpc.create_todo(input),
                    on_success: |todo| TodoListAction::Created { todo },
                    on_error: |error| TodoListAction::CreateFailed { error: error.to_string() }
                }]
            },

            TodoListAction::Toggle { id } => {
                let Some(todo) = state.get(id) else {
                    tracing::debug!(%id, "Toggle ignored: todo not in list");
                    return SmallVec::new();
                };

                let input = UpdateTodoInput {
                    id,
                    completed: !todo.completed,
                };
                let rpc = Arc::clone(&env.rpc);
                smallvec![rpc_effect! {
                    call: rpc.update_todo(input),
                    on_success: |todo| TodoListAction::Toggled { todo },
                    on_error: |error| TodoListAction::ToggleFailed { id, error: error.to_string() }
                }]
            },

            TodoListAction::Delete { id } => {
                let rpc = Arc::clone(&env.rpc);
                smallvec![rpc_effect! {
                    call: rpc.delete_todo(DeleteTodoInput { id }),
                    on_success: |_result| TodoListAction::Deleted { id },
                    on_error: |error| TodoListAction::DeleteFailed { id, error: error.to_string() }
                }]
            },

            // ========== Outcomes ==========
            TodoListAction::Loaded { todos } => {
                state.todos = todos;
                state.is_loading = false;
                state.last_error = None;
                SmallVec::new()
            },

            TodoListAction::LoadFailed { error } => {
                tracing::error!(error = %error, "Failed to load todos");
                state.is_loading = false;
                state.last_error = Some(error);
                SmallVec::new()
            },

            TodoListAction::Created { todo } => {
                state.todos.push(todo);
                state.draft_title.clear();
                state.is_creating = false;
                state.last_error = None;
                SmallVec::new()
            },

            TodoListAction::CreateFailed { error } => {
                tracing::error!(error = %error, "Failed to create todo");
                state.is_creating = false;
                state.last_error = Some(error);
                SmallVec::new()
            },

            TodoListAction::Toggled { todo } => {
                // Only the flag is taken from the response; the rest of the
                // local record stays as displayed.
                if let Some(existing) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                    existing.completed = todo.completed;
                }
                state.last_error = None;
                SmallVec::new()
            },

            TodoListAction::ToggleFailed { id, error } => {
                tracing::error!(%id, error = %error, "Failed to update todo");
                state.last_error = Some(error);
                SmallVec::new()
            },

            TodoListAction::Deleted { id } => {
                state.todos.retain(|t| t.id != id);
                state.last_error = None;
                SmallVec::new()
            },

            TodoListAction::DeleteFailed { id, error } => {
                tracing::error!(%id, error = %error, "Failed to delete todo");
                state.last_error = Some(error);
                SmallVec::new()
            },
        }
    }
}
