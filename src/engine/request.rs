//! The HTTP-shaped request envelope handed to the engine.

use serde_json::{Map, Value};

use super::headers::HeaderMap;

/// One inbound HTTP request, translated for the engine.
///
/// Constructed by the bridge only after the body has been fully parsed
/// (or determined empty); never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpGraphqlRequest {
    /// HTTP method, uppercased.
    pub method: String,
    /// Inbound headers, multi-valued headers already joined with `", "`.
    pub headers: HeaderMap,
    /// Raw query string including the leading `?`, or empty.
    pub search: String,
    /// Decoded request body.
    pub body: Map<String, Value>,
}
