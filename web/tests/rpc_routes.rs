//! Route-level tests for the RPC and health endpoints.
//!
//! Drives the full router (middleware included) with `tower::ServiceExt::oneshot`
//! over an `InMemoryTodoStore`.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use todo_core::todo_store::TodoStoreError;
use todo_testing::InMemoryTodoStore;
use todo_web::{AppState, CORRELATION_ID_HEADER, router};
use tower::ServiceExt;

fn app(store: &InMemoryTodoStore) -> Router {
    router(AppState::new(Arc::new(store.clone())))
}

async fn call(app: Router, procedure: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/rpc/{procedure}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    (status, value)
}

#[tokio::test]
async fn test_create_then_get_todos() {
    let store = InMemoryTodoStore::new();

    let (status, created) = call(app(&store), "createTodo", json!({ "title": "Buy milk" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["completed"], false);
    assert!(created["id"].as_i64().unwrap() > 0);
    assert!(created["created_at"].is_string());

    let (status, todos) = call(app(&store), "getTodos", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todos, json!([created]));
}

#[tokio::test]
async fn test_get_todos_accepts_get_without_body() {
    let store = InMemoryTodoStore::new();
    let request = Request::builder()
        .uri("/rpc/getTodos")
        .body(Body::empty())
        .unwrap();

    let response = app(&store).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_blank_title_is_validation_error() {
    let store = InMemoryTodoStore::new();

    let (status, body) = call(app(&store), "createTodo", json!({ "title": "   " })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_long_title_is_stored_whole() {
    let store = InMemoryTodoStore::new();
    let title = "x".repeat(2_000);

    let (status, body) = call(app(&store), "createTodo", json!({ "title": title })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], title);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_update_toggles_completion() {
    let store = InMemoryTodoStore::new();
    let (_, created) = call(app(&store), "createTodo", json!({ "title": "Walk" })).await;

    let (status, updated) = call(
        app(&store),
        "updateTodo",
        json!({ "id": created["id"], "completed": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "Walk");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let store = InMemoryTodoStore::new();

    let (status, body) = call(
        app(&store),
        "updateTodo",
        json!({ "id": 99999, "completed": true }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Todo with id 99999 not found");
}

#[tokio::test]
async fn test_delete_reports_success_flag() {
    let store = InMemoryTodoStore::new();
    let (_, created) = call(app(&store), "createTodo", json!({ "title": "Gone" })).await;

    let (status, body) = call(app(&store), "deleteTodo", json!({ "id": created["id"] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = call(app(&store), "deleteTodo", json!({ "id": created["id"] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false }));
}

#[tokio::test]
async fn test_wrong_input_shape_is_rejected() {
    let store = InMemoryTodoStore::new();

    let (status, body) = call(app(&store), "updateTodo", json!({ "id": "seven" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let store = InMemoryTodoStore::new();
    let request = Request::builder()
        .method("POST")
        .uri("/rpc/createTodo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\":"))
        .unwrap();

    let response = app(&store).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let store = InMemoryTodoStore::new();
    store.fail_with(TodoStoreError::Database("disk full".to_string()));

    let (status, body) = call(app(&store), "getTodos", json!({})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["message"], "Database error: disk full");
}

#[tokio::test]
async fn test_every_response_has_correlation_id() {
    let store = InMemoryTodoStore::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app(&store).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}

#[tokio::test]
async fn test_readiness_reflects_store() {
    let store = InMemoryTodoStore::new();
    let ready = || Request::builder().uri("/health/ready").body(Body::empty()).unwrap();

    let response = app(&store).oneshot(ready()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    store.fail_with(TodoStoreError::Connection("refused".to_string()));
    let response = app(&store).oneshot(ready()).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
