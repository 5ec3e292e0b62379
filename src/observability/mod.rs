//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - Log level configurable through `RUST_LOG`
//! - The library only emits events; subscriber setup belongs to the
//!   binary that embeds it

pub mod logging;
