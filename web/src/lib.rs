//! Axum RPC and health endpoints for Composable Todo.
//!
//! This crate is the server half of the RPC boundary. It is a thin
//! imperative shell: handlers validate input, call
//! [`TodoService`](todo_core::service::TodoService) and map the result to
//! HTTP.
//!
//! # Routes
//!
//! ```text
//! POST /rpc/getTodos      (GET also accepted)
//! POST /rpc/createTodo
//! POST /rpc/updateTodo
//! POST /rpc/deleteTodo
//! GET  /health
//! GET  /health/ready
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use todo_web::{AppState, router};
//!
//! let app = router(AppState::new(Arc::new(store)));
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use todo_core::rpc::procedures;
use tower_http::trace::TraceLayer;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::RpcInput;
pub use middleware::{CORRELATION_ID_HEADER, RequestContext, rpc_context};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;

/// URL path of an RPC procedure.
#[must_use]
pub fn rpc_path(procedure: &str) -> String {
    format!("/rpc/{procedure}")
}

/// Build the full application router.
///
/// Request tracing and [`rpc_context`] are applied to every route. CORS is
/// left to the binary, which knows the allowed origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            &rpc_path(procedures::GET_TODOS),
            get(handlers::rpc::get_todos).post(handlers::rpc::get_todos),
        )
        .route(&rpc_path(procedures::CREATE_TODO), post(handlers::rpc::create_todo))
        .route(&rpc_path(procedures::UPDATE_TODO), post(handlers::rpc::update_todo))
        .route(&rpc_path(procedures::DELETE_TODO), post(handlers::rpc::delete_todo))
        .route("/health", get(handlers::health_check))
        .route("/health/ready", get(handlers::readiness_check))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(rpc_context))
        .with_state(state)
}
