//! GraphQL-over-HTTP bridge for axum.
//!
//! Translates inbound HTTP exchanges into the structured envelope a
//! GraphQL execution engine consumes, and translates the engine's
//! complete or chunked result back into the HTTP response.
//!
//! The engine is a collaborator behind the [`engine::GraphqlEngine`]
//! trait; [`engine::SchemaEngine`] is a reference implementation backed
//! by `async-graphql`.

pub mod engine;
pub mod http;
pub mod observability;

pub use engine::{EngineError, GraphqlEngine, HttpGraphqlRequest, HttpGraphqlResponse, SchemaEngine};
pub use http::{error_messages, parse_body, BridgeError, GraphqlBridge};
