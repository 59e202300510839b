//! Error types for reporting.

use pledge_core::{CoreError, InvestorId};
use pledge_traits::TraitError;
use thiserror::Error;

/// A specialized Result type for reporting operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised by the [`Reporter`](crate::Reporter).
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// No investor with this id is stored.
    #[error("Investor not found: {id}")]
    NotFound {
        /// The requested id.
        id: InvestorId,
    },

    /// The store could not be read.
    #[error("Storage error: {0}")]
    Storage(#[from] TraitError),

    /// A total could not be computed from the stored amounts.
    #[error("Aggregation failed: {0}")]
    Arithmetic(#[from] CoreError),
}
