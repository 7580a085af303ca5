//! HTTP dispatch.
//!
//! Executes formatted requests against the management API and routes each
//! outcome through a caller-supplied handler: before-send, then exactly one
//! of success or error, then complete.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::registry::{Method, Operation, ResponseType};
use crate::request::{format, RequestDescriptor};
use crate::template::ParamBag;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-request hooks invoked around dispatch.
///
/// Every hook has a no-op default except `on_error`, which falls back to the
/// shared [`default_error_handler`]. For a request that reaches the wire,
/// exactly one of `on_success`/`on_error` runs, followed by `on_complete`,
/// each at most once.
#[async_trait]
pub trait ResponseHandler: Send + Sync {
    /// Called with the formatted request before it is dispatched.
    async fn on_before_send(&self, _request: &RequestDescriptor) {}

    /// Called once with the decoded payload when the server replies with a
    /// success status.
    async fn on_success(&self, _payload: &Value, _request: &RequestDescriptor) {}

    /// Called once when dispatch fails or the server replies with an error
    /// status.
    async fn on_error(&self, error: &ClientError, request: &RequestDescriptor) {
        default_error_handler(error, request);
    }

    /// Called exactly once after success or error handling.
    async fn on_complete(&self) {}
}

/// Handler for callers that only consume the returned result. Errors still
/// reach the default fallback.
pub struct NoopHandler;

#[async_trait]
impl ResponseHandler for NoopHandler {}

/// Generic fallback for unhandled request failures: a structured warning with
/// the verb, URL, status, and the server's `message` field when the error
/// body is a JSON document that carries one.
pub fn default_error_handler(error: &ClientError, request: &RequestDescriptor) {
    let status = error.status();
    let detail = error_detail(error);
    warn!(
        method = request.method.as_str(),
        url = %request.url,
        status = status,
        detail = %detail,
        "API request failed"
    );
}

/// Human-readable detail for a failed request. Server errors whose body is a
/// JSON document carrying a `message` field report that message; any other
/// body is reported verbatim.
fn error_detail(error: &ClientError) -> String {
    match error {
        ClientError::Server { message, .. } => serde_json::from_str::<Value>(message)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| message.clone()),
        other => other.to_string(),
    }
}

/// Client for the ClusterView management API.
///
/// Holds the HTTP connection pool and the configuration the formatter runs
/// against. Each `send` is an independent, stateless dispatch.
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Dispatch entry point for callers carrying operation names as data.
    ///
    /// An unknown name logs a warning and returns `None` without dispatching
    /// anything or invoking any handler hook.
    pub async fn send_named(
        &self,
        name: &str,
        params: &ParamBag,
        handler: &dyn ResponseHandler,
    ) -> Option<Result<Value>> {
        match Operation::from_name(name) {
            Some(operation) => Some(self.send(operation, params, handler).await),
            None => {
                warn!(name, "Unknown operation name");
                None
            }
        }
    }

    /// Format and dispatch one operation.
    ///
    /// The handler's before-send hook sees the formatted request; then
    /// exactly one of success/error runs, then complete. The outcome is also
    /// returned for callers that prefer `Result` over hooks.
    pub async fn send(
        &self,
        operation: Operation,
        params: &ParamBag,
        handler: &dyn ResponseHandler,
    ) -> Result<Value> {
        let request = format(operation, params, &self.config);
        debug!(
            operation = operation.name(),
            method = request.method.as_str(),
            url = %request.url,
            "Dispatching request"
        );

        handler.on_before_send(&request).await;
        let result = self.dispatch(&request).await;
        match &result {
            Ok(payload) => handler.on_success(payload, &request).await,
            Err(error) => handler.on_error(error, &request).await,
        }
        handler.on_complete().await;
        result
    }

    async fn dispatch(&self, request: &RequestDescriptor) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, request.url);
        let mut builder = self
            .http
            .request(to_http_method(request.method), &url)
            .timeout(Duration::from_millis(request.timeout_ms));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: text,
            });
        }

        match request.response_type {
            ResponseType::Json => {
                if text.is_empty() {
                    return Ok(Value::Null);
                }
                serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
            }
            ResponseType::Text => Ok(Value::String(text)),
        }
    }
}

fn to_http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}
