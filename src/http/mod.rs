//! HTTP adapter layer.
//!
//! # Data Flow
//! ```text
//! axum router
//!     → bridge.rs (method gate, header translation, dispatch)
//!     → body.rs (content-type negotiation, body decoding)
//!     → [engine executes]
//!     → bridge.rs (status/header/body translation, chunk streaming)
//!     → Send to client
//! ```

pub mod body;
pub mod bridge;
pub mod error;

pub use body::parse_body;
pub use bridge::{GraphqlBridge, RequestScope};
pub use error::{error_messages, BridgeError};
