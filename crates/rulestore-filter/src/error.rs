//! Error types for filter translation.

use thiserror::Error;

/// Error during filter translation.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The filter value matched none of the recognized filter shapes, or its
    /// content could not be turned into a predicate (raw text without a
    /// single `=`, a structured filter with no non-empty section, a builder
    /// that produced nothing).
    #[error("invalid filter type: {0}")]
    InvalidFilterType(String),
}

impl FilterError {
    /// Create an invalid-filter error with a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        FilterError::InvalidFilterType(reason.into())
    }
}
