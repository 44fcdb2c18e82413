//! Error types for the pay matrix model
//!
//! - [`ModelError`]: malformed identifiers and labels
//! - [`ValidationError`]: a level submission that must not reach the store

use crate::pairs::DroppedRow;
use rust_decimal::Decimal;

/// Invalid identifier or label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Matrix name was empty
    #[error("matrix name must not be empty")]
    EmptyMatrixId,

    /// Level id was empty
    #[error("level id must not be empty")]
    EmptyLevelId,

    /// Grade label was empty
    #[error("grade must not be empty")]
    EmptyGrade,

    /// Scale was zero
    #[error("scale must be a positive integer, got {0}")]
    InvalidScale(i64),

    /// Amount below zero
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
}

/// Rejected level submission
///
/// Raised before any store call; the user can always fix it by re-editing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// No valid (scale, amount) pair survived validation
    #[error("please add at least one scale entry")]
    NoPairs,

    /// Grade field left blank
    #[error("grade is required")]
    MissingGrade,

    /// Strict policy: malformed rows reject the whole submission
    #[error("{} scale row(s) are invalid: {}", dropped.len(), describe(dropped))]
    RowsRejected {
        /// Rows that failed validation
        dropped: Vec<DroppedRow>,
    },
}

fn describe(dropped: &[DroppedRow]) -> String {
    dropped
        .iter()
        .map(|row| format!("row {} ({})", row.index + 1, row.reason))
        .collect::<Vec<_>>()
        .join(", ")
}
