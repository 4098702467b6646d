//! # Todo Runtime
//!
//! Store runtime that drives the view-state controller.
//!
//! The Store owns the controller state, runs the reducer for every action,
//! executes the effects it returns and feeds the resulting actions back in.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **`EffectHandle`**: Lets a caller wait until the effects of one action are done
//!
//! ## Example
//!
//! ```ignore
//! use todo_runtime::Store;
//!
//! let store = Store::new(TodoListState::default(), TodoListReducer, environment);
//!
//! let mut handle = store.send(TodoListAction::Load).await?;
//! handle.wait().await;
//!
//! let count = store.state(|s| s.todos.len()).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use todo_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after shutdown was initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects of that
/// action to complete. Actions fed back by those effects are processed by the
/// time the handle resolves, but effects *they* spawn are not tracked.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(TodoListAction::Load).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // Loaded or LoadFailed has been reduced
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running for this action
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracker is gone, so nothing can still be running
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// The counter is released even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreError,
    };
    use tokio::sync::broadcast;

    /// Buffered outcome actions per observer; the list screen has one or two.
    const ACTION_BROADCAST_CAPACITY: usize = 16;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (view-state logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Every action produced by an effect is broadcast here before it is
        /// fed back into the reducer.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Clone + Send + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (action_broadcast, _) = broadcast::channel(ACTION_BROADCAST_CAPACITY);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Spawns the returned effects
        ///
        /// `send()` returns after starting effect execution, not after
        /// completion. Concurrent sends serialize at the reducer.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching result action
        ///
        /// Subscribes to the action broadcast before sending, so a fast effect
        /// cannot race past the subscription.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action within `timeout`
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
        ///
        /// # Example
        ///
        /// ```ignore
        /// let result = store.send_and_wait_for(
        ///     TodoListAction::Submit,
        ///     |a| matches!(a, TodoListAction::Created { .. } | TodoListAction::CreateFailed { .. }),
        ///     Duration::from_secs(5),
        /// ).await?;
        /// ```
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to every action produced by effects
        ///
        /// Actions sent directly through [`Store::send`] are not broadcast.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let progress = store.state(TodoListState::progress).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Rejects new actions, then waits for in-flight effects.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when `timeout` expires.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(20);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect with tracking
        ///
        /// A `Future` runs on its own task; its action, if any, is broadcast
        /// and then fed back. A panicking effect is isolated in its task and
        /// the guards keep the counters correct.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let guard = DecrementGuard(tracking.clone());
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            let _ = store.action_broadcast.send(action.clone());
                            store.feed_back(action).await;
                        }
                    });
                },
            }
        }

        /// Feed an effect-produced action back into the reducer.
        ///
        /// Boxed because `send` spawns effects that call back into `send`.
        fn feed_back(&self, action: A) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
            Box::pin(async move {
                if let Err(error) = self.send(action).await {
                    tracing::debug!(error = %error, "Dropped effect action");
                }
            })
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

    #[derive(Debug, Clone, Default)]
    struct Titles {
        shown: Vec<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TitleAction {
        Add(String),
        Clear,
        Fetch,
        FetchEach(usize),
        FetchCrashes,
        FetchStalls,
    }

    #[derive(Debug, Clone)]
    struct NoEnv;

    #[derive(Debug, Clone)]
    struct TitleReducer;

    impl Reducer for TitleReducer {
        type State = Titles;
        type Action = TitleAction;
        type Environment = NoEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TitleAction::Add(title) => {
                    state.shown.push(title);
                    SmallVec::new()
                },
                TitleAction::Clear => {
                    state.shown.clear();
                    SmallVec::new()
                },
                TitleAction::Fetch => {
                    smallvec![Effect::future(async {
                        Some(TitleAction::Add("from server".to_string()))
                    })]
                },
                TitleAction::FetchEach(count) => (0..count)
                    .map(|n| Effect::future(async move { Some(TitleAction::Add(format!("row {n}"))) }))
                    .collect(),
                #[allow(clippy::panic)] // The effect task must absorb the panic
                TitleAction::FetchCrashes => smallvec![Effect::future(async {
                    panic!("effect blew up");
                })],
                TitleAction::FetchStalls => smallvec![Effect::future(async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    None
                })],
            }
        }
    }

    type TitleStore = Store<Titles, TitleAction, NoEnv, TitleReducer>;

    fn store() -> TitleStore {
        Store::new(Titles::default(), TitleReducer, NoEnv)
    }

    #[tokio::test]
    async fn test_send_reduces_in_order() -> Result<(), StoreError> {
        let store = store();

        store.send(TitleAction::Add("a".to_string())).await?;
        store.send(TitleAction::Clear).await?;
        store.send(TitleAction::Add("b".to_string())).await?;

        assert_eq!(store.state(|s| s.shown.clone()).await, vec!["b".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_future_action_is_reduced_before_handle_resolves() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TitleAction::Fetch).await?;
        handle.wait().await;

        assert_eq!(store.state(|s| s.shown.len()).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_handle_tracks_every_effect_of_one_action() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TitleAction::FetchEach(4)).await?;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        let mut shown = store.state(|s| s.shown.clone()).await;
        shown.sort();
        assert_eq!(shown, vec!["row 0", "row 1", "row 2", "row 3"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_action_without_effects_has_nothing_pending() -> Result<(), StoreError> {
        let store = store();

        let handle = store.send(TitleAction::Clear).await?;

        assert_eq!(handle.pending(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_clones_share_state() -> Result<(), StoreError> {
        let first = store();
        let second = first.clone();

        first.send(TitleAction::Add("shared".to_string())).await?;

        assert_eq!(second.state(|s| s.shown.len()).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_panicking_effect_does_not_poison_store() -> Result<(), StoreError> {
        let store = store();

        let mut handle = store.send(TitleAction::FetchCrashes).await?;
        handle.wait_with_timeout(Duration::from_secs(1)).await?;

        store.send(TitleAction::Add("still alive".to_string())).await?;
        assert_eq!(store.state(|s| s.shown.len()).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for_returns_outcome() -> Result<(), StoreError> {
        let store = store();

        let action = store
            .send_and_wait_for(
                TitleAction::Fetch,
                |a| matches!(a, TitleAction::Add(_)),
                Duration::from_secs(1),
            )
            .await?;

        assert_eq!(action, TitleAction::Add("from server".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_and_wait_for_times_out() {
        let store = store();

        let result = store
            .send_and_wait_for(TitleAction::Clear, |a| matches!(a, TitleAction::Add(_)), Duration::from_millis(50))
            .await;

        assert_eq!(result, Err(StoreError::Timeout));
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_actions() -> Result<(), StoreError> {
        let store = store();

        store.shutdown(Duration::from_secs(1)).await?;

        let result = store.send(TitleAction::Clear).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_times_out_on_stalled_effect() -> Result<(), StoreError> {
        let store = store();

        store.send(TitleAction::FetchStalls).await?;
        let result = store.shutdown(Duration::from_millis(30)).await;

        assert_eq!(result, Err(StoreError::ShutdownTimeout(1)));
        Ok(())
    }

    #[tokio::test]
    async fn test_completed_handle_does_not_block() {
        let mut handle = EffectHandle::completed();
        assert_eq!(handle.pending(), 0);
        handle.wait().await;
    }
}
