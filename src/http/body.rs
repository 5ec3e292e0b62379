//! Request body decoding.
//!
//! # Responsibilities
//! - Inspect the declared content type of an inbound request
//! - Decode the body into the key/value map the engine consumes
//! - Treat unsupported or absent content types as "no body"
//!
//! # Design Decisions
//! - Content-type dispatch is an exact string match; a media-type
//!   parameter such as `; charset=utf-8` misses and falls through to an
//!   empty map (possible latent upstream bug, preserved deliberately)
//! - Unsupported content type is not an error, so GET requests carrying
//!   only query parameters never trip a parse failure
//! - Malformed JSON is the single failure path

use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};
use url::form_urlencoded;

use super::error::BridgeError;

const APPLICATION_GRAPHQL: &str = "application/graphql";
const APPLICATION_JSON: &str = "application/json";
const APPLICATION_FORM: &str = "application/x-www-form-urlencoded";

/// Decode a request body according to its declared content type.
///
/// Returns an empty map when no body is expected; fails only on a
/// malformed JSON body under `application/json`.
pub fn parse_body(headers: &HeaderMap, body: &[u8]) -> Result<Map<String, Value>, BridgeError> {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return Ok(Map::new());
    };

    match content_type {
        APPLICATION_GRAPHQL => {
            let query = String::from_utf8_lossy(body).into_owned();
            let mut map = Map::new();
            map.insert("query".into(), Value::String(query));
            Ok(map)
        }
        APPLICATION_JSON => match serde_json::from_slice(body) {
            Ok(map) => Ok(map),
            Err(error) => {
                tracing::error!(%error, "request body is not valid JSON");
                Err(BridgeError::InvalidJson(error))
            }
        },
        APPLICATION_FORM => {
            let mut map = Map::new();
            for (name, value) in form_urlencoded::parse(body) {
                map.insert(name.into_owned(), Value::String(value.into_owned()));
            }
            Ok(map)
        }
        _ => Ok(Map::new()),
    }
}
