//! Given-When-Then harness for view-state reducers.
//!
//! A controller reducer never touches its list until a response comes back,
//! so a test usually checks two things: the flags an intent raises, and the
//! RPC it hands the runtime. [`ReducerTest::run`] covers the first;
//! [`ReducerTest::replay`] also awaits the returned effects and hands back
//! the outcome actions they produce.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use crate::helpers::collect_actions;
use todo_core::effect::Effect;
use todo_core::reducer::Reducer;
use todo_core::SmallVec;

type StateCheck<S> = Box<dyn FnOnce(&S)>;
type EffectCheck<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent reducer test
///
/// Every `when_action` call appends to the script. All actions are reduced
/// in order against the given state; effect checks see only what the last
/// one returned, so earlier actions can set the scene (e.g. `Submit` then
/// `Created`).
///
/// # Example
///
/// ```ignore
/// use todo_testing::{ReducerTest, assertions};
///
/// ReducerTest::new(TodoListReducer::new())
///     .with_env(env)
///     .given_state(TodoListState::new())
///     .when_action(TodoListAction::Load)
///     .then_state(|state| assert!(state.is_loading))
///     .then_effects(assertions::assert_single_rpc)
///     .run();
/// ```
pub struct ReducerTest<R: Reducer> {
    reducer: R,
    env: Option<R::Environment>,
    state: Option<R::State>,
    actions: Vec<R::Action>,
    state_checks: Vec<StateCheck<R::State>>,
    effect_checks: Vec<EffectCheck<R::Action>>,
}

impl<R: Reducer> ReducerTest<R> {
    /// Start a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            env: None,
            state: None,
            actions: Vec::new(),
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Environment the reducer sees
    #[must_use]
    pub fn with_env(mut self, env: R::Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// State before the first action (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.state = Some(state);
        self
    }

    /// Append an action to the script (When)
    #[must_use]
    pub fn when_action(mut self, action: R::Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Check the state after the last action (Then)
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Check the effects returned by the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<R::Action>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Reduce the script and run every check
    ///
    /// # Panics
    ///
    /// Panics if the state, environment or script is missing, or if a check
    /// fails.
    pub fn run(self) {
        drop(self.execute());
    }

    /// Like [`run`](Self::run), then await the last action's effects and
    /// return the actions they feed back
    ///
    /// # Panics
    ///
    /// Same as [`run`](Self::run).
    pub async fn replay(self) -> Vec<R::Action>
    where
        R::Action: Send + 'static,
    {
        collect_actions(self.execute()).await
    }

    #[allow(clippy::panic)] // A half-built test is a bug in the test
    fn execute(self) -> SmallVec<[Effect<R::Action>; 4]> {
        let Some(mut state) = self.state else {
            panic!("ReducerTest needs given_state()");
        };
        let Some(env) = self.env else {
            panic!("ReducerTest needs with_env()");
        };
        if self.actions.is_empty() {
            panic!("ReducerTest needs at least one when_action()");
        }

        let mut effects = SmallVec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env);
        }

        for check in self.state_checks {
            check(&state);
        }
        for check in self.effect_checks {
            check(&effects);
        }
        effects
    }
}

/// Effect checks for [`ReducerTest::then_effects`]
pub mod assertions {
    use todo_core::effect::Effect;

    /// Nothing for the runtime to do
    ///
    /// # Panics
    ///
    /// Panics if any effect does work.
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected no work, got {effects:?}"
        );
    }

    /// Exactly `expected` effects
    ///
    /// # Panics
    ///
    /// Panics on any other count.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "unexpected effect count");
    }

    /// At least one future among the effects
    ///
    /// # Panics
    ///
    /// Panics if none of the effects is a future.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "expected a future effect"
        );
    }

    /// One RPC in flight: a single future and nothing else
    ///
    /// Every intent that reaches the server returns exactly this.
    ///
    /// # Panics
    ///
    /// Panics on any other shape.
    pub fn assert_single_rpc<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            matches!(effects, [Effect::Future(_)]),
            "expected one RPC effect, got {effects:?}"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::{FailingTodoRpc, InMemoryTodoStore};
    use std::sync::Arc;
    use todo_core::rpc::{RpcErrorCode, TodoRpc};
    use todo_core::rpc_effect;
    use todo_core::service::TodoService;
    use todo_core::smallvec;
    use todo_core::todo::{CreateTodoInput, Todo};

    #[derive(Clone, Debug, Default)]
    struct Board {
        todos: Vec<Todo>,
        fetching: bool,
        error: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum BoardAction {
        Refresh,
        Refreshed(Vec<Todo>),
        RefreshFailed(String),
    }

    struct BoardEnv {
        rpc: Arc<dyn TodoRpc>,
    }

    struct BoardReducer;

    impl Reducer for BoardReducer {
        type State = Board;
        type Action = BoardAction;
        type Environment = BoardEnv;

        fn reduce(
            &self,
            state: &mut Board,
            action: BoardAction,
            env: &BoardEnv,
        ) -> SmallVec<[Effect<BoardAction>; 4]> {
            match action {
                BoardAction::Refresh if state.fetching => SmallVec::new(),
                BoardAction::Refresh => {
                    state.fetching = true;
                    let rpc = Arc::clone(&env.rpc);
                    smallvec![rpc_effect! {
                        call: rpc.get_todos(),
                        on_success: |todos| BoardAction::Refreshed(todos),
                        on_error: |error| BoardAction::RefreshFailed(error.to_string())
                    }]
                },
                BoardAction::Refreshed(todos) => {
                    state.todos = todos;
                    state.fetching = false;
                    SmallVec::new()
                },
                BoardAction::RefreshFailed(error) => {
                    state.fetching = false;
                    state.error = Some(error);
                    SmallVec::new()
                },
            }
        }
    }

    fn offline() -> BoardEnv {
        BoardEnv {
            rpc: Arc::new(FailingTodoRpc::new(RpcErrorCode::Transport, "offline")),
        }
    }

    #[test]
    fn test_intent_raises_flag_and_issues_one_rpc() {
        ReducerTest::new(BoardReducer)
            .with_env(offline())
            .given_state(Board::default())
            .when_action(BoardAction::Refresh)
            .then_state(|board| assert!(board.fetching))
            .then_effects(assertions::assert_single_rpc)
            .run();
    }

    #[test]
    fn test_intent_in_flight_is_ignored() {
        ReducerTest::new(BoardReducer)
            .with_env(offline())
            .given_state(Board {
                fetching: true,
                ..Board::default()
            })
            .when_action(BoardAction::Refresh)
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_script_checks_effects_of_last_action_only() {
        ReducerTest::new(BoardReducer)
            .with_env(offline())
            .given_state(Board::default())
            .when_action(BoardAction::Refresh)
            .when_action(BoardAction::Refreshed(Vec::new()))
            .then_state(|board| assert!(!board.fetching))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn test_replay_returns_failure_outcome() {
        let outcomes = ReducerTest::new(BoardReducer)
            .with_env(offline())
            .given_state(Board::default())
            .when_action(BoardAction::Refresh)
            .replay()
            .await;

        assert_eq!(outcomes, vec![BoardAction::RefreshFailed("offline".to_string())]);
    }

    #[tokio::test]
    async fn test_replay_returns_server_records() {
        let service = TodoService::new(InMemoryTodoStore::new());
        let seeded = service
            .create_todo(CreateTodoInput::new("Buy milk"))
            .await
            .unwrap();

        let outcomes = ReducerTest::new(BoardReducer)
            .with_env(BoardEnv {
                rpc: Arc::new(service),
            })
            .given_state(Board::default())
            .when_action(BoardAction::Refresh)
            .replay()
            .await;

        assert_eq!(outcomes, vec![BoardAction::Refreshed(vec![seeded])]);
    }

    #[test]
    #[should_panic(expected = "needs given_state")]
    fn test_missing_state_is_reported() {
        ReducerTest::new(BoardReducer)
            .with_env(offline())
            .when_action(BoardAction::Refresh)
            .run();
    }

    #[test]
    fn test_assertions_accept_expected_shapes() {
        assertions::assert_no_effects::<BoardAction>(&[]);
        assertions::assert_no_effects::<BoardAction>(&[Effect::None]);
        assertions::assert_effects_count::<BoardAction>(&[Effect::None], 1);
        assertions::assert_single_rpc(&[Effect::future(async {
            Some(BoardAction::Refresh)
        })]);
    }

    #[test]
    #[should_panic(expected = "expected one RPC effect")]
    fn test_single_rpc_rejects_extra_effects() {
        assertions::assert_single_rpc(&[
            Effect::future(async { Some(BoardAction::Refresh) }),
            Effect::None,
        ]);
    }
}
