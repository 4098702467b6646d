//! `PostgreSQL` todo store for Composable Todo.
//!
//! This crate provides the production [`TodoStore`] implementation. Every
//! operation is a single SQL statement against the `todos` table, so the
//! database is the only serialization point between concurrent requests.
//!
//! # Example
//!
//! ```ignore
//! use todo_postgres::PostgresTodoStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresTodoStore::connect("postgres://localhost/todos").await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use todo_core::todo::{Todo, TodoId};
use todo_core::todo_store::{StoreFuture, TodoStore, TodoStoreError};

/// Row shape of the `todos` table
#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i32,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId::new(row.id),
            title: row.title,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

/// Map a sqlx failure onto the store error kinds.
///
/// Pool exhaustion and socket failures are connection problems; everything
/// else happened inside the database.
fn store_error(error: sqlx::Error) -> TodoStoreError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            TodoStoreError::Connection(error.to_string())
        },
        other => TodoStoreError::Database(other.to_string()),
    }
}

/// `PostgreSQL`-backed todo store.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct PostgresTodoStore {
    pool: PgPool,
}

impl PostgresTodoStore {
    /// Create a store using an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a small default pool.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Connection`] if the database is unreachable.
    pub async fn connect(database_url: &str) -> Result<Self, TodoStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| TodoStoreError::Connection(format!("Failed to connect: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Run the bundled migrations (creates the `todos` table).
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Database`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), TodoStoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TodoStoreError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Todo migrations applied");
        Ok(())
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoStore for PostgresTodoStore {
    fn insert(&self, title: String) -> StoreFuture<'_, Todo> {
        Box::pin(async move {
            let row: TodoRow = sqlx::query_as(
                r"
                INSERT INTO todos (title)
                VALUES ($1)
                RETURNING id, title, completed, created_at
                ",
            )
            .bind(title)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

            Ok(row.into())
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let rows: Vec<TodoRow> = sqlx::query_as(
                "SELECT id, title, completed, created_at FROM todos ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

            Ok(rows.into_iter().map(Todo::from).collect())
        })
    }

    fn get(&self, id: TodoId) -> StoreFuture<'_, Option<Todo>> {
        Box::pin(async move {
            let row: Option<TodoRow> = sqlx::query_as(
                "SELECT id, title, completed, created_at FROM todos WHERE id = $1",
            )
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

            Ok(row.map(Todo::from))
        })
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> StoreFuture<'_, Option<Todo>> {
        Box::pin(async move {
            let row: Option<TodoRow> = sqlx::query_as(
                r"
                UPDATE todos
                SET completed = $2
                WHERE id = $1
                RETURNING id, title, completed, created_at
                ",
            )
            .bind(id.get())
            .bind(completed)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

            Ok(row.map(Todo::from))
        })
    }

    fn delete(&self, id: TodoId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM todos WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(store_error)?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(store_error)?;
            Ok(())
        })
    }
}
