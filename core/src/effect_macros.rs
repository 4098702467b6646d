//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when a reducer hands an RPC call to the
//! runtime and maps its result back into an action.

/// Create an `Effect::Future` that awaits a fallible call and maps both outcomes
/// to actions.
///
/// The call expression is evaluated inside the spawned future, so anything it
/// borrows must be moved in first (typically an `Arc` clone).
///
/// # Example
///
/// ```rust,ignore
/// use todo_core::rpc_effect;
///
/// let rpc = Arc::clone(&env.rpc);
/// rpc_effect! {
///     call: rpc.get_todos(),
///     on_success: |todos| TodoListAction::Loaded { todos },
///     on_error: |error| TodoListAction::LoadFailed { error: error.to_string() }
/// }
/// ```
#[macro_export]
macro_rules! rpc_effect {
    (
        call: $call:expr,
        on_success: |$success_param:ident| $success_body:expr,
        on_error: |$error_param:ident| $error_body:expr
    ) => {
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move {
            match $call.await {
                ::std::result::Result::Ok($success_param) => {
                    ::std::option::Option::Some($success_body)
                }
                ::std::result::Result::Err($error_param) => {
                    ::std::option::Option::Some($error_body)
                }
            }
        }))
    };
}
