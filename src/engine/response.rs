//! The engine's response, complete or chunked.

use std::fmt;

use futures_util::stream::BoxStream;

use super::error::EngineError;
use super::headers::HeaderMap;

/// Ordered sequence of body fragments for a chunked response.
///
/// Fragments are delivered to the client in exactly this order; the
/// bridge never buffers ahead.
pub type FragmentStream = BoxStream<'static, Result<String, EngineError>>;

/// Response produced by one engine execution.
pub struct HttpGraphqlResponse {
    /// HTTP status to report; `None` means 200.
    pub status: Option<u16>,
    /// Headers the engine wants on the outgoing response.
    pub headers: HeaderMap,
    /// The response body, by kind.
    pub body: ResponseBody,
}

/// The two body kinds an engine can produce.
///
/// Non-exhaustive so the bridge keeps an explicit fallback arm for
/// kinds added in later versions.
#[non_exhaustive]
pub enum ResponseBody {
    /// A single fully-serialized body string.
    Complete(String),
    /// A lazy fragment sequence, consumed exactly once.
    Chunked(FragmentStream),
}

impl HttpGraphqlResponse {
    /// A complete response with the given body and no explicit status.
    pub fn complete(body: impl Into<String>) -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            body: ResponseBody::Complete(body.into()),
        }
    }

    /// A chunked response streaming the given fragments.
    pub fn chunked(fragments: FragmentStream) -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            body: ResponseBody::Chunked(fragments),
        }
    }

    /// Set the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Set a response header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete(body) => f.debug_tuple("Complete").field(body).finish(),
            Self::Chunked(_) => f.debug_tuple("Chunked").field(&"..").finish(),
        }
    }
}

impl fmt::Debug for HttpGraphqlResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGraphqlResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}
