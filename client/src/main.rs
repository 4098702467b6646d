//! Command-line walkthrough of the todo list controller against a running server.
//!
//! ```text
//! TODO_API_URL=http://localhost:8080 cargo run -p todo-client
//! ```

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use todo_client::{
    HttpTodoClient, TodoListAction, TodoListEnvironment, TodoListReducer, TodoListState,
    TodoListStore,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todo_client=info")),
        )
        .init();

    let base_url = std::env::var("TODO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let http = reqwest::Client::builder()
        .timeout(CALL_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;
    let rpc = Arc::new(HttpTodoClient::with_client(http, base_url.clone()));

    let store = TodoListStore::new(
        TodoListState::new(),
        TodoListReducer::new(),
        TodoListEnvironment::new(rpc),
    );

    println!("=== Composable Todo ({base_url}) ===\n");

    dispatch(&store, TodoListAction::Load).await?;
    print_list(&store, "Loaded").await;

    for title in ["Buy milk", "Write documentation"] {
        dispatch(&store, TodoListAction::DraftChanged { title: title.to_string() }).await?;
        dispatch(&store, TodoListAction::Submit).await?;
    }
    print_list(&store, "After creating").await;

    if let Some(id) = store.state(|s| s.todos.last().map(|t| t.id)).await {
        dispatch(&store, TodoListAction::Toggle { id }).await?;
        print_list(&store, "After toggling the newest").await;

        dispatch(&store, TodoListAction::Delete { id }).await?;
        print_list(&store, "After deleting it").await;
    }

    if let Some(error) = store.state(|s| s.last_error.clone()).await {
        println!("\nLast error: {error}");
    }

    store.shutdown(CALL_TIMEOUT).await?;
    Ok(())
}

/// Send an action and wait for the call it starts to come back
async fn dispatch(store: &TodoListStore, action: TodoListAction) -> anyhow::Result<()> {
    let mut handle = store.send(action).await?;
    handle.wait_with_timeout(CALL_TIMEOUT).await?;
    Ok(())
}

async fn print_list(store: &TodoListStore, heading: &str) {
    let state = store.state(Clone::clone).await;
    println!("{heading}:");
    for todo in &state.todos {
        let status = if todo.completed { "x" } else { " " };
        println!("  [{status}] #{} {}", todo.id, todo.title);
    }
    println!(
        "  {}/{} completed ({:.0}%)\n",
        state.completed_count(),
        state.total_count(),
        state.progress() * 100.0
    );
}
