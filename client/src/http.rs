//! HTTP transport for the four RPC procedures.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use todo_core::rpc::{RpcError, RpcErrorCode, RpcFuture, TodoRpc, procedures};
use todo_core::todo::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, UpdateTodoInput,
};

/// [`TodoRpc`] over `POST {base_url}/rpc/<procedure>`.
///
/// Error bodies (`{ "code", "message" }`) are decoded into [`RpcError`];
/// anything that prevents a decoded response is reported as
/// [`RpcErrorCode::Transport`].
#[derive(Clone, Debug)]
pub struct HttpTodoClient {
    client: Client,
    base_url: String,
}

impl HttpTodoClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8080`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing a configured [`reqwest::Client`]
    ///
    /// Use this to set a request timeout.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<I, O>(&self, procedure: &str, input: &I) -> Result<O, RpcError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let url = format!("{}/rpc/{procedure}", self.base_url);
        tracing::debug!(%url, "RPC call");

        let response = self
            .client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(|e| RpcError::new(RpcErrorCode::Transport, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<O>()
                .await
                .map_err(|e| RpcError::new(RpcErrorCode::Transport, e.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RpcError::new(RpcErrorCode::Transport, e.to_string()))?;
        Err(decode_error(status, &body))
    }
}

/// Decode a non-2xx response, falling back to the status when the body is
/// not an error object.
fn decode_error(status: StatusCode, body: &str) -> RpcError {
    if let Ok(error) = serde_json::from_str::<RpcError>(body) {
        return error;
    }

    let code = match status {
        StatusCode::BAD_REQUEST => RpcErrorCode::BadRequest,
        StatusCode::NOT_FOUND => RpcErrorCode::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => RpcErrorCode::Validation,
        s if s.is_server_error() => RpcErrorCode::Internal,
        _ => RpcErrorCode::Unknown,
    };
    let message = if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    };
    RpcError::new(code, message)
}

#[derive(Serialize)]
struct Empty {}

impl TodoRpc for HttpTodoClient {
    fn get_todos(&self) -> RpcFuture<'_, Vec<Todo>> {
        Box::pin(async move { self.call(procedures::GET_TODOS, &Empty {}).await })
    }

    fn create_todo(&self, input: CreateTodoInput) -> RpcFuture<'_, Todo> {
        Box::pin(async move { self.call(procedures::CREATE_TODO, &input).await })
    }

    fn update_todo(&self, input: UpdateTodoInput) -> RpcFuture<'_, Todo> {
        Box::pin(async move { self.call(procedures::UPDATE_TODO, &input).await })
    }

    fn delete_todo(&self, input: DeleteTodoInput) -> RpcFuture<'_, DeleteTodoResult> {
        Box::pin(async move { self.call(procedures::DELETE_TODO, &input).await })
    }
}
