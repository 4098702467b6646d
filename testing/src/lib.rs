//! # Todo Testing
//!
//! Testing utilities and helpers for Composable Todo.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - In-memory [`TodoStore`](todo_core::todo_store::TodoStore) and failing RPC doubles
//! - Effect helpers for driving reducers without a Store
//! - Property-based testing strategies
//! - Shared service [`contract`] checks for every store implementation
//! - The [`ReducerTest`] Given-When-Then harness
//!
//! ## Example
//!
//! ```ignore
//! use todo_testing::{InMemoryTodoStore, test_clock};
//! use todo_core::service::TodoService;
//!
//! #[tokio::test]
//! async fn test_create_then_list() {
//!     let service = TodoService::new(InMemoryTodoStore::new());
//!
//!     service.create_todo(CreateTodoInput::new("Buy milk")).await?;
//!
//!     let todos = service.get_todos().await?;
//!     assert_eq!(todos.len(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use todo_core::environment::Clock;

/// Ergonomic reducer testing (Given-When-Then)
pub mod reducer_test;

/// In-memory store and RPC doubles
pub mod todo_mocks;

/// Store-agnostic service behavior checks
pub mod contract;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::FixedClock;
    /// use todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use todo_core::effect::Effect;

    /// Execute effects in place and collect the actions they produce.
    ///
    /// Effects are awaited one after another in the order the reducer
    /// returned them. Use this to drive a reducer by hand without a Store.
    ///
    /// ```ignore
    /// let effects = reducer.reduce(&mut state, TodoListAction::Load, &env);
    /// let actions = collect_actions(effects).await;
    /// assert!(matches!(actions[0], TodoListAction::Loaded { .. }));
    /// ```
    pub async fn collect_actions<A, I>(effects: I) -> Vec<A>
    where
        I: IntoIterator<Item = Effect<A>>,
        A: Send + 'static,
    {
        let mut actions = Vec::new();
        for effect in effects {
            if let Effect::Future(fut) = effect {
                actions.extend(fut.await);
            }
        }
        actions
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Titles with at least one non-whitespace character, up to 80 chars
    pub fn title_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9 ,.!?-]{0,79}"
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
pub use todo_mocks::{FailingTodoRpc, InMemoryTodoStore};
