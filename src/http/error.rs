//! Bridge-side errors and the JSON error body shape.

use serde_json::{json, Value};
use thiserror::Error;

use crate::engine::EngineError;

/// Errors that terminate one bridged request.
///
/// All variants funnel into the bridge's containment path: logged, then
/// answered with a 500 JSON diagnostic. Nothing is retried.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The body declared `application/json` but did not parse.
    #[error("POST body sent invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The engine rejected or failed the request.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The caller's context function failed.
    #[error("context function failed: {0}")]
    Context(String),

    /// The engine reported a status code outside the valid HTTP range.
    #[error("engine returned invalid status code {0}")]
    InvalidStatus(u16),

    /// The engine produced a header the HTTP layer cannot represent.
    #[error("engine returned invalid response header `{name}`: {reason}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// What the HTTP layer objected to.
        reason: String,
    },
}

/// Build the `{ "errors": [...] }` body used for bridge-level failures.
///
/// With no explicit GraphQL error list, each message becomes one
/// `{ "message": ... }` entry, in order. An explicit list fully
/// overrides the messages.
pub fn error_messages<M: AsRef<str>>(messages: &[M], graphql_errors: Option<&[Value]>) -> Value {
    if let Some(errors) = graphql_errors {
        return json!({ "errors": errors });
    }

    let errors: Vec<Value> = messages
        .iter()
        .map(|message| json!({ "message": message.as_ref() }))
        .collect();
    json!({ "errors": errors })
}
