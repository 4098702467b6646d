//! # Todo Core
//!
//! Core traits and types for Composable Todo.
//!
//! This crate holds everything the other crates agree on:
//!
//! - **Domain**: [`Todo`](todo::Todo) records and the RPC input/output shapes
//! - **Persistence contract**: the [`TodoStore`](todo_store::TodoStore) trait
//! - **Service**: [`TodoService`](service::TodoService), the four data-mutation contracts
//! - **RPC contract**: the [`TodoRpc`](rpc::TodoRpc) trait and [`RpcError`](rpc::RpcError)
//! - **Client architecture**: [`Reducer`](reducer::Reducer), [`Effect`](effect::Effect)
//!   and the [`Clock`](environment::Clock) dependency
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O in reducers)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use todo_core::service::TodoService;
//! use todo_core::todo::CreateTodoInput;
//!
//! let service = TodoService::new(store);
//! let todo = service.create_todo(CreateTodoInput::new("Buy milk")).await?;
//! assert!(!todo.completed);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Domain types: todo records and RPC payloads
pub mod todo;

/// Persistence contract for todo records
pub mod todo_store;

/// Service-level error types
pub mod error;

/// The four todo operations on top of a [`todo_store::TodoStore`]
pub mod service;

/// RPC contract shared by the server boundary and client adapters
pub mod rpc;

/// Declarative macros for ergonomic effect construction
pub mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all view-state logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoListReducer {
    ///     type State = TodoListState;
    ///     type Action = TodoListAction;
    ///     type Environment = TodoListEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodoListState,
    ///         action: TodoListAction,
    ///         env: &TodoListEnvironment,
    ///     ) -> SmallVec<[Effect<TodoListAction>; 4]> {
    ///         match action {
    ///             TodoListAction::Load => {
    ///                 state.is_loading = true;
    ///                 smallvec![/* fetch effect */]
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation whose output is fed back as an action
        #[must_use]
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Whether this effect does no work
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }
}
