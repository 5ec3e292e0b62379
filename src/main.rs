//! Demo GraphQL server wired through the bridge.
//!
//! Serves a small echo schema at `/graphql` (plus a `/health` route),
//! the same shape the bridge is expected to be embedded in:
//!
//! ```text
//! Client ──▶ axum Router ──▶ GraphqlBridge ──▶ SchemaEngine (async-graphql)
//!        ◀── complete/chunked response ◀──────┘
//! ```

use std::net::SocketAddr;

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};
use axum::{routing::get, Router};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use graphql_bridge::engine::SchemaEngine;
use graphql_bridge::GraphqlBridge;

#[derive(Parser)]
#[command(name = "graphql-bridge", about = "Demo GraphQL HTTP bridge server")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Route path the bridge is mounted at.
    #[arg(long, default_value = "/graphql")]
    path: String,
}

struct Query;

#[Object]
impl Query {
    /// Fixed greeting, handy for smoke tests.
    async fn hello(&self) -> &str {
        "Hello world!"
    }

    /// Echo the message back.
    async fn echo(&self, message: String) -> String {
        message
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    graphql_bridge::observability::logging::init();

    let args = Args::parse();

    let schema = Schema::build(Query, EmptyMutation, EmptySubscription).finish();
    let engine: SchemaEngine<Query, EmptyMutation, EmptySubscription> = SchemaEngine::new(schema);
    let bridge = GraphqlBridge::new(engine)?;

    let app: Router = bridge
        .into_router(&args.path)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(args.bind).await?;
    tracing::info!(address = %args.bind, path = %args.path, "GraphQL bridge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
