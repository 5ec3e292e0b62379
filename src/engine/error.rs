//! Engine-side error types.

use thiserror::Error;

/// Errors reported by a [`GraphqlEngine`](super::GraphqlEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine was used before it finished starting up.
    #[error("the GraphQL engine must be started before `{operation}` is called")]
    NotStarted {
        /// The operation that was attempted on the unstarted engine.
        operation: String,
    },

    /// Query execution or context construction failed.
    #[error("{0}")]
    Execution(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::NotStarted`].
    pub fn not_started(operation: impl Into<String>) -> Self {
        Self::NotStarted {
            operation: operation.into(),
        }
    }
}
