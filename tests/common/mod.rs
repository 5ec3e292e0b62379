//! Shared utilities for bridge integration tests.

use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use graphql_bridge::engine::{
    ContextThunk, EngineError, GraphqlEngine, HttpGraphqlRequest, HttpGraphqlResponse,
};

/// Scripted engine that records what the bridge hands it.
pub struct FakeEngine {
    started: bool,
    resolve_context: bool,
    response: Mutex<Option<Result<HttpGraphqlResponse, EngineError>>>,
    /// Envelopes received, in order.
    pub calls: Arc<Mutex<Vec<HttpGraphqlRequest>>>,
    /// Context values resolved through the thunk.
    pub contexts: Arc<Mutex<Vec<String>>>,
}

impl FakeEngine {
    /// Engine that answers one request with the given result.
    pub fn new(response: Result<HttpGraphqlResponse, EngineError>) -> Self {
        Self {
            started: true,
            resolve_context: true,
            response: Mutex::new(Some(response)),
            calls: Arc::default(),
            contexts: Arc::default(),
        }
    }

    /// Engine whose startup assertion fails.
    pub fn unstarted() -> Self {
        Self {
            started: false,
            resolve_context: false,
            response: Mutex::new(None),
            calls: Arc::default(),
            contexts: Arc::default(),
        }
    }

    /// Never invoke the context thunk, to observe laziness.
    pub fn skip_context(mut self) -> Self {
        self.resolve_context = false;
        self
    }
}

impl GraphqlEngine for FakeEngine {
    type Context = String;

    fn assert_started(&self, operation: &str) -> Result<(), EngineError> {
        if self.started {
            Ok(())
        } else {
            Err(EngineError::not_started(operation))
        }
    }

    async fn execute_http_request(
        &self,
        request: HttpGraphqlRequest,
        context: ContextThunk<String>,
    ) -> Result<HttpGraphqlResponse, EngineError> {
        self.calls.lock().unwrap().push(request);
        if self.resolve_context {
            let value = context().await?;
            self.contexts.lock().unwrap().push(value);
        }
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(EngineError::Execution("fake engine exhausted".into())))
    }
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
