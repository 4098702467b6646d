//! View-state controller for the Composable Todo client.
//!
//! The todo list screen is an explicit state container: a
//! [`Store`](todo_runtime::Store) runs [`TodoListReducer`] for every action
//! and executes the RPC calls it describes. Responses come back as actions,
//! so state only ever changes inside the reducer.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_client::{HttpTodoClient, TodoListAction, TodoListEnvironment, TodoListStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rpc = Arc::new(HttpTodoClient::new("http://localhost:8080"));
//! let store = TodoListStore::new(
//!     Default::default(),
//!     Default::default(),
//!     TodoListEnvironment::new(rpc),
//! );
//!
//! store.send(TodoListAction::Load).await?.wait().await;
//! let progress = store.state(|s| s.progress()).await;
//! println!("{:.0}% done", progress * 100.0);
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use http::HttpTodoClient;
pub use reducer::{TodoListEnvironment, TodoListReducer};
pub use types::{TodoListAction, TodoListState};

/// Store running the todo list reducer
pub type TodoListStore =
    todo_runtime::Store<TodoListState, TodoListAction, TodoListEnvironment, TodoListReducer>;
