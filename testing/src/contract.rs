//! Behavioral checks every [`TodoStore`] must pass when driven through
//! [`TodoService`].
//!
//! Each check is a plain async function so the in-memory suite and the
//! Postgres suite run exactly the same assertions. Checks tolerate rows
//! already present in the store unless their name says otherwise.
//!
//! ```ignore
//! #[tokio::test]
//! async fn create_returns_new_record() {
//!     contract::create_returns_new_record(&TodoService::new(my_store())).await;
//! }
//! ```

#![allow(clippy::unwrap_used)] // Contract checks fail loudly
#![allow(clippy::missing_panics_doc)] // Every check panics on violation

use regex::Regex;
use std::collections::HashSet;
use todo_core::error::TodoError;
use todo_core::service::TodoService;
use todo_core::todo::{CreateTodoInput, DeleteTodoInput, Todo, TodoId, UpdateTodoInput};
use todo_core::todo_store::TodoStore;

/// An id no check ever creates
pub const MISSING_ID: TodoId = TodoId::new(99_999);

async fn create<S: TodoStore>(service: &TodoService<S>, title: &str) -> Todo {
    service.create_todo(CreateTodoInput::new(title)).await.unwrap()
}

async fn ids<S: TodoStore>(service: &TodoService<S>) -> HashSet<TodoId> {
    service
        .get_todos()
        .await
        .unwrap()
        .into_iter()
        .map(|todo| todo.id)
        .collect()
}

/// A created record carries the title, starts incomplete and is listed.
pub async fn create_returns_new_record<S: TodoStore>(service: &TodoService<S>) {
    let todo = create(service, "Test Todo Item").await;

    assert_eq!(todo.title, "Test Todo Item");
    assert!(!todo.completed);
    assert!(todo.id.get() > 0);
    assert!(todo.created_at.timestamp() > 0);

    let stored = service.store().get(todo.id).await.unwrap();
    assert_eq!(stored.as_ref(), Some(&todo));
    assert!(ids(service).await.contains(&todo.id));
}

/// Two creates yield two distinct, listed records.
pub async fn creates_get_distinct_ids<S: TodoStore>(service: &TodoService<S>) {
    let first = create(service, "First").await;
    let second = create(service, "Second").await;

    assert_ne!(first.id, second.id);

    let listed = ids(service).await;
    assert!(listed.contains(&first.id));
    assert!(listed.contains(&second.id));
}

/// Completion toggles both ways; nothing else changes.
pub async fn update_round_trips_completion<S: TodoStore>(service: &TodoService<S>) {
    let todo = create(service, "Toggle me").await;

    let done = service
        .update_todo(UpdateTodoInput { id: todo.id, completed: true })
        .await
        .unwrap();
    assert!(done.completed);
    assert_eq!(done.title, todo.title);
    assert_eq!(done.created_at, todo.created_at);

    let undone = service
        .update_todo(UpdateTodoInput { id: todo.id, completed: false })
        .await
        .unwrap();
    assert_eq!(undone, todo);
}

/// Updating a missing id is a NOT-FOUND error naming the id.
pub async fn update_missing_is_not_found<S: TodoStore>(service: &TodoService<S>) {
    let err = service
        .update_todo(UpdateTodoInput { id: MISSING_ID, completed: true })
        .await
        .unwrap_err();

    assert_eq!(err, TodoError::NotFound(MISSING_ID));
    let pattern = Regex::new(r"(?i)todo with id 99999 not found").unwrap();
    assert!(pattern.is_match(&err.to_string()), "unexpected message: {err}");
}

/// Delete reports success once, then `false`.
pub async fn delete_reports_success_once<S: TodoStore>(service: &TodoService<S>) {
    let todo = create(service, "Delete me").await;

    let first = service.delete_todo(DeleteTodoInput { id: todo.id }).await.unwrap();
    assert!(first.success);
    assert!(!ids(service).await.contains(&todo.id));

    let second = service.delete_todo(DeleteTodoInput { id: todo.id }).await.unwrap();
    assert!(!second.success);
}

/// Deleting a missing id is not an error.
pub async fn delete_missing_is_unsuccessful<S: TodoStore>(service: &TodoService<S>) {
    let result = service.delete_todo(DeleteTodoInput { id: MISSING_ID }).await.unwrap();
    assert!(!result.success);
}

/// Deleting one record leaves its neighbours untouched.
pub async fn delete_leaves_others_intact<S: TodoStore>(service: &TodoService<S>) {
    let a = create(service, "A").await;
    let b = create(service, "B").await;
    let c = create(service, "C").await;

    assert!(service.delete_todo(DeleteTodoInput { id: b.id }).await.unwrap().success);

    let todos = service.get_todos().await.unwrap();
    assert!(todos.contains(&a));
    assert!(todos.contains(&c));
    assert!(todos.iter().all(|todo| todo.id != b.id));
}

/// Requires an empty store: lists nothing, then exactly the inserted rows.
pub async fn list_returns_exactly_inserted<S: TodoStore>(service: &TodoService<S>) {
    assert!(service.get_todos().await.unwrap().is_empty());

    for n in 0..5 {
        create(service, &format!("Todo {n}")).await;
    }

    let todos = service.get_todos().await.unwrap();
    assert_eq!(todos.len(), 5);
    let unique: HashSet<TodoId> = todos.iter().map(|todo| todo.id).collect();
    assert_eq!(unique.len(), 5);
}

/// Titles are stored verbatim, whatever they contain.
pub async fn special_characters_round_trip<S: TodoStore>(service: &TodoService<S>) {
    let titles = [
        r#"Quotes "double" and 'single'"#,
        "Tom & Jerry",
        "<script>alert('x')</script>",
        "Café naïve façade",
        "Ship it 🚀✨",
    ];

    for title in titles {
        let todo = create(service, title).await;
        let stored = service.store().get(todo.id).await.unwrap().unwrap();
        assert_eq!(stored.title, title);
    }
}
