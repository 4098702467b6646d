//! RPC procedure handlers.
//!
//! One handler per procedure, mounted at `POST /rpc/<procedure>`. Each one
//! validates its input at the boundary and dispatches to the service.
//!
//! | Procedure | Body | Response |
//! |-----------|------|----------|
//! | `getTodos` | none | `[Todo]` |
//! | `createTodo` | `{ "title": string }` | `Todo` |
//! | `updateTodo` | `{ "id": int, "completed": bool }` | `Todo` or 404 |
//! | `deleteTodo` | `{ "id": int }` | `{ "success": bool }` |

use crate::WebResult;
use crate::error::AppError;
use crate::extractors::RpcInput;
use crate::state::AppState;
use axum::{Json, extract::State};
use todo_core::todo::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, UpdateTodoInput,
};

/// `getTodos`: every stored todo.
///
/// # Errors
///
/// `500 INTERNAL_SERVER_ERROR` if the store fails.
pub async fn get_todos(State(state): State<AppState>) -> WebResult<Json<Vec<Todo>>> {
    Ok(Json(state.service().get_todos().await?))
}

/// `createTodo`: insert a todo with the given title.
///
/// The title is stored exactly as sent, whatever its length.
///
/// # Errors
///
/// - `422 VALIDATION_ERROR` if the title is blank
/// - `500 INTERNAL_SERVER_ERROR` if the store fails
pub async fn create_todo(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<CreateTodoInput>,
) -> WebResult<Json<Todo>> {
    validate_title(&input.title)?;
    Ok(Json(state.service().create_todo(input).await?))
}

/// `updateTodo`: set the completion flag of one todo.
///
/// # Errors
///
/// - `404 NOT_FOUND` ("Todo with id <id> not found") if the id is absent
/// - `500 INTERNAL_SERVER_ERROR` if the store fails
pub async fn update_todo(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<UpdateTodoInput>,
) -> WebResult<Json<Todo>> {
    Ok(Json(state.service().update_todo(input).await?))
}

/// `deleteTodo`: remove one todo; a missing id yields `success: false`.
///
/// # Errors
///
/// `500 INTERNAL_SERVER_ERROR` if the store fails.
pub async fn delete_todo(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<DeleteTodoInput>,
) -> WebResult<Json<DeleteTodoResult>> {
    Ok(Json(state.service().delete_todo(input).await?))
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title must not be empty"));
    }
    Ok(())
}
