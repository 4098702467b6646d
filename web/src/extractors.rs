//! Custom Axum extractors.
//!
//! [`RpcInput`] is `Json<T>` with rejections converted to [`AppError`], so a
//! malformed RPC body gets the same `{ code, message }` shape as every other
//! error instead of Axum's plain-text rejection.
//!
//! # Examples
//!
//! ```ignore
//! use todo_web::extractors::RpcInput;
//!
//! async fn delete_todo(
//!     State(state): State<AppState>,
//!     RpcInput(input): RpcInput<DeleteTodoInput>,
//! ) -> Result<Json<DeleteTodoResult>, AppError> {
//!     Ok(Json(state.service().delete_todo(input).await?))
//! }
//! ```

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON request body of an RPC procedure.
///
/// - Body that is not JSON (or has no JSON content type): `400 BAD_REQUEST`
/// - JSON that does not match `T`: `422 VALIDATION_ERROR`
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcInput<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for RpcInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
