//! Pager error types

use thiserror::Error;

use crate::state::PagingState;

/// Recoverable pager errors
///
/// None of these leave the controller in an inconsistent state; the failed
/// operation is simply not performed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanError {
    /// Requested page index does not exist
    #[error("page index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// An animated jump is still in flight
    #[error("an animated jump is already in progress")]
    JumpInProgress,

    /// The pager is not at rest
    #[error("pager is busy ({0:?})")]
    Busy(PagingState),
}

/// Result type for pager operations
pub type Result<T> = std::result::Result<T, PanError>;
