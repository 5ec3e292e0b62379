//! Structured logging setup.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the demo binary
//! - Honor `RUST_LOG`, with a sensible default filter otherwise

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Call once at process startup; panics if a subscriber is already set.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graphql_bridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
