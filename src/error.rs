//! Error types for underbar.

use thiserror::Error;

/// Underbar error types.
#[derive(Error, Debug)]
pub enum UnderbarError {
    /// `reduce_first` over a collection with nothing to seed the accumulator
    #[error("Cannot reduce an empty collection without an initial value")]
    EmptyReduce,

    /// `invoke_method` named a method the element does not have
    #[error("Unknown method: {method}")]
    UnknownMethod { method: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The timer runtime behind `EventLoop` could not be started
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Result type alias for underbar operations.
pub type Result<T> = std::result::Result<T, UnderbarError>;
