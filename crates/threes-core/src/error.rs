//! Error types for threes-core operations.

use thiserror::Error;

/// Errors that can occur while building or querying threes containers.
///
/// Incomparable values are *not* an error: they surface as
/// [`Comparison::Different`](crate::value::Comparison::Different).
#[derive(Error, Debug)]
pub enum ThreesError {
    /// An index-based list operation was given an index past the end.
    #[error("Index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A JSON value has no tagged-value counterpart (arrays, booleans, ...).
    #[error("Unsupported JSON value: {0}")]
    UnsupportedJson(String),

    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A duplicate policy name that is not one of the known policies.
    #[error("Unknown duplicate policy: '{0}'")]
    UnknownPolicy(String),

    /// A traversal order name that is not one of the known orders.
    #[error("Unknown traversal order: '{0}'")]
    UnknownOrder(String),
}

/// Convenience alias used throughout threes-core.
pub type Result<T> = std::result::Result<T, ThreesError>;
