//! Error types for the view layer
//!
//! Every failure is caught at the operation boundary and turned into a
//! [`Notice`]. None is fatal: the view keeps its last good snapshot.

use crate::dialog::DialogState;
use crate::notice::{Indicator, Notice};
use paymatrix_model::ValidationError;
use paymatrix_seed::SeedError;
use paymatrix_store::StoreError;

/// Main view error type
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Submission rejected before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store rejected the operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Dialog lifecycle violation
    #[error(transparent)]
    Dialog(#[from] DialogError),

    /// No matrix designated
    #[error("no pay matrix selected")]
    NotFound,

    /// Matrix has not been saved yet
    #[error("Please save the Pay Matrix first.")]
    MatrixNotSaved,

    /// Bulk seeding failed
    #[error("could not create Standard Pay Matrix: {0}")]
    Seed(#[from] SeedError),
}

impl ViewError {
    /// Check if the user can fix the input and submit again
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Store(_) | Self::Dialog(DialogError::Busy)
        )
    }

    /// Check for the empty state
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// User-facing message
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(e) => Notice::new("Validation Error", e.to_string(), Indicator::Orange),
            Self::MatrixNotSaved | Self::NotFound => {
                Notice::new("Not Saved", self.to_string(), Indicator::Blue)
            }
            Self::Dialog(DialogError::Busy) => {
                Notice::new("Please Wait", self.to_string(), Indicator::Blue)
            }
            _ => Notice::new("Error", self.to_string(), Indicator::Red),
        }
    }
}

/// Dialog lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    /// A submission is already in flight
    #[error("a submission is already in progress")]
    Busy,

    /// Transition not in the dialog's table
    #[error("illegal dialog transition {from:?} -> {to:?}")]
    IllegalTransition { from: DialogState, to: DialogState },
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("config i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML
    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}
