//! Request context for the RPC routes.
//!
//! [`rpc_context`] runs around every route. It settles the correlation ID
//! (propagated from `X-Correlation-ID` when that holds a UUID, fresh
//! otherwise), resolves which procedure the path names, and handles the
//! request inside an `rpc_request` span carrying both. The span's `status`
//! field is filled in once the handler answers, and the ID is echoed on the
//! response.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/rpc/getTodos", post(get_todos))
//!     .layer(axum::middleware::from_fn(rpc_context));
//! ```

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use todo_core::rpc::procedures;
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// What the middleware learned about a request.
///
/// Stored in request extensions; handlers take it with
/// `Extension<RequestContext>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestContext {
    /// ID echoed in the `X-Correlation-ID` response header
    pub correlation_id: Uuid,
    /// Procedure named by a `/rpc/<procedure>` path; `None` for health routes
    /// and unknown names
    pub procedure: Option<&'static str>,
}

/// Resolve the procedure a request path names.
#[must_use]
pub fn procedure_of(path: &str) -> Option<&'static str> {
    let name = path.strip_prefix("/rpc/")?;
    procedures::ALL.into_iter().find(|p| *p == name)
}

/// Middleware function; mount with [`axum::middleware::from_fn`].
pub async fn rpc_context(mut req: Request, next: Next) -> Response {
    let correlation_id = req
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let procedure = procedure_of(req.uri().path());

    req.extensions_mut().insert(RequestContext {
        correlation_id,
        procedure,
    });

    let span = tracing::info_span!(
        "rpc_request",
        %correlation_id,
        procedure = procedure.unwrap_or("-"),
        method = %req.method(),
        status = tracing::field::Empty,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    let status = response.status();
    span.record("status", status.as_u16());
    if procedure.is_some() {
        tracing::debug!(parent: &span, status = status.as_u16(), "RPC answered");
    }

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}
