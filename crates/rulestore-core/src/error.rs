//! Core error types.

use thiserror::Error;

/// Adapter errors.
///
/// Failures inside a multi-statement batch roll the transaction back before
/// surfacing here as [`Error::Storage`]; partial batch effects are never
/// left behind.
#[derive(Debug, Error)]
pub enum Error {
    /// Filter translation rejected the supplied filter.
    #[error("filter error: {0}")]
    Filter(#[from] rulestore_filter::FilterError),

    /// Statement execution failure from the underlying database, propagated
    /// unchanged.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
