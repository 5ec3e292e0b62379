//! GraphQL execution engine contract.
//!
//! # Data Flow
//! ```text
//! http::bridge builds:
//!     → HttpGraphqlRequest (method, headers, search, parsed body)
//!     → ContextThunk (lazy per-request context)
//!
//! Engine produces:
//!     → HttpGraphqlResponse (status, headers, complete or chunked body)
//! ```
//!
//! # Design Decisions
//! - The engine is a trait so the bridge never depends on a concrete
//!   GraphQL library
//! - Startup is asserted when the bridge is built, not per request
//! - The context thunk is invoked by the engine, at most once, only when
//!   the engine actually wants a context value
//! - `ResponseBody` is non_exhaustive so the bridge keeps a defensive
//!   fallback arm for response kinds added later

pub mod error;
pub mod headers;
pub mod request;
pub mod response;
pub mod schema;

use std::future::Future;

use futures_util::future::BoxFuture;

pub use error::EngineError;
pub use headers::HeaderMap;
pub use request::HttpGraphqlRequest;
pub use response::{FragmentStream, HttpGraphqlResponse, ResponseBody};
pub use schema::SchemaEngine;

/// Lazily produces the per-request context value for resolvers.
///
/// Built by the bridge from the caller's context function; the engine
/// decides if and when to run it.
pub type ContextThunk<C> = Box<dyn FnOnce() -> BoxFuture<'static, Result<C, EngineError>> + Send>;

/// The execution engine collaborator consumed by the HTTP bridge.
pub trait GraphqlEngine: Send + Sync + 'static {
    /// Per-request context value handed to resolvers.
    type Context: Send + 'static;

    /// Returns an error if the engine has not completed startup.
    ///
    /// `operation` names the caller for the diagnostic.
    fn assert_started(&self, operation: &str) -> Result<(), EngineError>;

    /// Execute one HTTP-shaped GraphQL request.
    fn execute_http_request(
        &self,
        request: HttpGraphqlRequest,
        context: ContextThunk<Self::Context>,
    ) -> impl Future<Output = Result<HttpGraphqlResponse, EngineError>> + Send;
}
