//! Application state for Axum handlers.

use std::sync::Arc;
use todo_core::service::{DynTodoService, TodoService};
use todo_core::todo_store::TodoStore;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap: every clone shares one [`DynTodoService`].
///
/// # Examples
///
/// ```ignore
/// use std::sync::Arc;
/// use todo_web::AppState;
///
/// let state = AppState::new(Arc::new(PostgresTodoStore::from_pool(pool)));
/// let app = todo_web::router(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    service: Arc<DynTodoService>,
}

impl AppState {
    /// Create application state over a shared store.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            service: Arc::new(TodoService::new(store)),
        }
    }

    /// The todo service handlers dispatch to.
    #[must_use]
    pub fn service(&self) -> &DynTodoService {
        &self.service
    }
}
