//! Reference engine backed by `async-graphql`.
//!
//! # Responsibilities
//! - Implement [`GraphqlEngine`] over an `async_graphql::Schema`
//! - Extract query / operationName / variables from the request envelope
//! - Fall back to the query string for GET requests
//! - Serialize the execution result as a complete JSON body
//!
//! # Design Decisions
//! - Complete responses only; incremental delivery is left to engines
//!   that support it
//! - A schema is ready as soon as it is built, so the startup assertion
//!   always passes
//! - GraphQL field errors still produce HTTP 200; only a missing query
//!   string maps to 400

use std::marker::PhantomData;

use async_graphql::{ObjectType, Schema, SubscriptionType, Variables};
use serde_json::{Map, Value};
use url::form_urlencoded;

use super::{ContextThunk, EngineError, GraphqlEngine, HttpGraphqlRequest, HttpGraphqlResponse};

/// A [`GraphqlEngine`] executing against an `async-graphql` schema.
///
/// `C` is the per-request context type; it is attached to the request
/// data so resolvers can read it via `ctx.data::<C>()`.
pub struct SchemaEngine<Q, M, S, C = ()> {
    schema: Schema<Q, M, S>,
    _context: PhantomData<fn() -> C>,
}

impl<Q, M, S, C> SchemaEngine<Q, M, S, C> {
    /// Wrap a built schema.
    pub fn new(schema: Schema<Q, M, S>) -> Self {
        Self {
            schema,
            _context: PhantomData,
        }
    }
}

impl<Q, M, S, C> Clone for SchemaEngine<Q, M, S, C> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            _context: PhantomData,
        }
    }
}

impl<Q, M, S, C> GraphqlEngine for SchemaEngine<Q, M, S, C>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
    C: Send + Sync + 'static,
{
    type Context = C;

    fn assert_started(&self, _operation: &str) -> Result<(), EngineError> {
        // The schema is fully constructed before the engine exists.
        Ok(())
    }

    async fn execute_http_request(
        &self,
        request: HttpGraphqlRequest,
        context: ContextThunk<C>,
    ) -> Result<HttpGraphqlResponse, EngineError> {
        let mut params = request.body;
        if !params.contains_key("query") && request.method == "GET" {
            params = search_params(&request.search);
        }

        let Some(query) = params.get("query").and_then(Value::as_str) else {
            return Ok(bad_request("Must provide query string."));
        };

        let mut operation = async_graphql::Request::new(query);
        if let Some(name) = params.get("operationName").and_then(Value::as_str) {
            operation = operation.operation_name(name);
        }
        match params.get("variables") {
            // GET requests carry variables as URL-encoded JSON text.
            Some(Value::String(raw)) => {
                let value: Value = serde_json::from_str(raw)
                    .map_err(|e| EngineError::Execution(format!("invalid variables: {e}")))?;
                operation = operation.variables(Variables::from_json(value));
            }
            Some(value) => {
                operation = operation.variables(Variables::from_json(value.clone()));
            }
            None => {}
        }

        let ctx = context().await?;
        let result = self.schema.execute(operation.data(ctx)).await;
        let body =
            serde_json::to_string(&result).map_err(|e| EngineError::Execution(e.to_string()))?;

        Ok(HttpGraphqlResponse::complete(body)
            .with_status(200)
            .with_header("content-type", "application/json"))
    }
}

/// Decode the envelope's query string into a flat parameter map.
fn search_params(search: &str) -> Map<String, Value> {
    let mut params = Map::new();
    for (name, value) in form_urlencoded::parse(search.trim_start_matches('?').as_bytes()) {
        params.insert(name.into_owned(), Value::String(value.into_owned()));
    }
    params
}

fn bad_request(message: &str) -> HttpGraphqlResponse {
    let body = serde_json::json!({ "errors": [{ "message": message }] });
    HttpGraphqlResponse::complete(body.to_string())
        .with_status(400)
        .with_header("content-type", "application/json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HeaderMap, ResponseBody};
    use async_graphql::{EmptyMutation, EmptySubscription, Object};
    use serde_json::Map;

    struct Query;

    #[Object]
    impl Query {
        async fn hello(&self) -> &str {
            "world"
        }
    }

    fn engine() -> SchemaEngine<Query, EmptyMutation, EmptySubscription> {
        SchemaEngine::new(Schema::build(Query, EmptyMutation, EmptySubscription).finish())
    }

    fn empty_context() -> ContextThunk<()> {
        Box::new(|| Box::pin(async { Ok(()) }))
    }

    fn envelope(method: &str, search: &str, body: Map<String, Value>) -> HttpGraphqlRequest {
        HttpGraphqlRequest {
            method: method.into(),
            headers: HeaderMap::new(),
            search: search.into(),
            body,
        }
    }

    #[tokio::test]
    async fn test_get_reads_query_from_search() {
        let request = envelope("GET", "?query=%7B+hello+%7D", Map::new());
        let response = engine()
            .execute_http_request(request, empty_context())
            .await
            .unwrap();

        assert_eq!(response.status, Some(200));
        match response.body {
            ResponseBody::Complete(body) => {
                assert_eq!(body, r#"{"data":{"hello":"world"}}"#);
            }
            _ => panic!("expected a complete body"),
        }
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let request = envelope("POST", "", Map::new());
        let response = engine()
            .execute_http_request(request, empty_context())
            .await
            .unwrap();

        assert_eq!(response.status, Some(400));
        match response.body {
            ResponseBody::Complete(body) => {
                assert!(body.contains("Must provide query string."));
            }
            _ => panic!("expected a complete body"),
        }
    }
}
