//! The request bridge between the axum router and the engine.
//!
//! # Responsibilities
//! - Gate methods to GET/POST (405 otherwise, engine never invoked)
//! - Collect the request body and hand it to the body parser
//! - Translate inbound headers into the engine's header collection
//! - Build the request envelope and dispatch to the engine
//! - Translate the engine's complete or chunked result back to HTTP
//! - Contain every failure as a 500 JSON diagnostic
//!
//! # Design Decisions
//! - Mounted with `any()` so the bridge owns 405 semantics instead of
//!   the router's default method dispatch
//! - The per-request context function runs lazily, only when the engine
//!   asks for it
//! - Chunked bodies stream fragment-by-fragment in engine order; the
//!   bridge never buffers the sequence
//! - Errors never propagate to the host framework

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, request::Parts, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use futures_util::future::BoxFuture;
use std::future::Future;

use crate::engine::{
    ContextThunk, EngineError, GraphqlEngine, HeaderMap, HttpGraphqlRequest, HttpGraphqlResponse,
    ResponseBody,
};

use super::body::parse_body;
use super::error::{error_messages, BridgeError};

/// Snapshot of the inbound exchange handed to the context function.
#[derive(Debug, Clone)]
pub struct RequestScope {
    /// The inbound HTTP method.
    pub method: Method,
    /// The full request URI.
    pub uri: Uri,
    /// The raw inbound headers.
    pub headers: axum::http::HeaderMap,
}

type ContextFn<C> =
    Arc<dyn Fn(RequestScope) -> BoxFuture<'static, Result<C, BridgeError>> + Send + Sync>;

/// Bridges HTTP exchanges to a [`GraphqlEngine`].
///
/// Cheap to clone; one instance serves every request on the route it is
/// mounted at.
pub struct GraphqlBridge<E: GraphqlEngine> {
    engine: Arc<E>,
    context_fn: ContextFn<E::Context>,
}

impl<E: GraphqlEngine> Clone for GraphqlBridge<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            context_fn: Arc::clone(&self.context_fn),
        }
    }
}

impl<E: GraphqlEngine> GraphqlBridge<E>
where
    E::Context: Default,
{
    /// Build a bridge with an empty default context.
    ///
    /// Fails if the engine has not completed startup.
    pub fn new(engine: E) -> Result<Self, EngineError> {
        Self::with_context(engine, |_scope| async { Ok(E::Context::default()) })
    }
}

impl<E: GraphqlEngine> GraphqlBridge<E> {
    /// Build a bridge with a caller-supplied context function.
    ///
    /// The function receives a [`RequestScope`] snapshot of the inbound
    /// exchange and is invoked lazily, at most once per request, when
    /// the engine requests its context.
    pub fn with_context<F, Fut>(engine: E, context: F) -> Result<Self, EngineError>
    where
        F: Fn(RequestScope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<E::Context, BridgeError>> + Send + 'static,
    {
        engine.assert_started("GraphqlBridge")?;
        Ok(Self {
            engine: Arc::new(engine),
            context_fn: Arc::new(move |scope| Box::pin(context(scope))),
        })
    }

    /// Mount the bridge on a fresh router at `path`.
    ///
    /// Uses `any()` routing so non-GET/POST methods reach the bridge's
    /// own 405 response.
    pub fn into_router(self, path: &str) -> Router {
        Router::new().route(
            path,
            any(move |request: Request| {
                let bridge = self.clone();
                async move { bridge.handle(request).await }
            }),
        )
    }

    /// Handle one HTTP exchange end to end.
    pub async fn handle(&self, request: Request) -> Response {
        if request.method() != Method::GET && request.method() != Method::POST {
            let body = error_messages(&["GraphQL only supports GET and POST requests."], None);
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "GET, POST")],
                Json(body),
            )
                .into_response();
        }

        let (parts, body) = request.into_parts();
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(error) => {
                // Host-level misconfiguration, not a client error: some
                // layer ahead of the bridge broke the body stream.
                tracing::error!(%error, "request body could not be read");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "the request body could not be read; this probably means a layer \
                     installed ahead of the GraphQL bridge consumed it without buffering \
                     a replacement",
                )
                    .into_response();
            }
        };

        match self.respond(parts, &bytes).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(%error, "error while bridging GraphQL request");
                let body = error_messages(
                    &["Internal server error".to_string(), error.to_string()],
                    None,
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }

    async fn respond(&self, parts: Parts, raw_body: &[u8]) -> Result<Response, BridgeError> {
        let body = parse_body(&parts.headers, raw_body)?;

        let mut headers = HeaderMap::new();
        for name in parts.headers.keys() {
            let joined = parts
                .headers
                .get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect::<Vec<_>>()
                .join(", ");
            headers.set(name.as_str(), joined);
        }

        let search = parts
            .uri
            .query()
            .map(|query| format!("?{query}"))
            .unwrap_or_default();

        let envelope = HttpGraphqlRequest {
            method: parts.method.as_str().to_ascii_uppercase(),
            headers,
            search,
            body,
        };

        let scope = RequestScope {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
        };
        let context_fn = Arc::clone(&self.context_fn);
        let thunk: ContextThunk<E::Context> = Box::new(move || {
            Box::pin(async move {
                context_fn(scope)
                    .await
                    .map_err(|error| EngineError::Execution(error.to_string()))
            })
        });

        let result = self.engine.execute_http_request(envelope, thunk).await?;
        build_response(result)
    }
}

/// Translate the engine's result into the outgoing response.
#[allow(unreachable_patterns)] // fallback arm kept for future response kinds
fn build_response(result: HttpGraphqlResponse) -> Result<Response, BridgeError> {
    let status = match result.status {
        Some(code) => StatusCode::from_u16(code).map_err(|_| BridgeError::InvalidStatus(code))?,
        None => StatusCode::OK,
    };

    let (body, chunked) = match result.body {
        ResponseBody::Complete(text) => (Body::from(text), false),
        ResponseBody::Chunked(fragments) => (Body::from_stream(fragments), true),
        _ => {
            return Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_messages(&["Unknown response type"], None)),
            )
                .into_response());
        }
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;

    for (name, value) in result.headers.iter() {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| BridgeError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| BridgeError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        response.headers_mut().insert(header_name, header_value);
    }

    if chunked {
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response.headers_mut().insert(
            header::TRANSFER_ENCODING,
            HeaderValue::from_static("chunked"),
        );
    }

    Ok(response)
}
