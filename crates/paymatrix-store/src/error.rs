//! Store errors
//!
//! Every variant is a rejection by the store. Callers surface the message
//! verbatim and never retry.

use paymatrix_model::{Grade, MatrixId, Scale};
use std::fmt;

/// Kinds of documents held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Named matrix
    Matrix,
    /// One grade's row
    Level,
    /// Employee grade catalog entry
    Grade,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Matrix => "Pay Matrix",
            EntityKind::Level => "Pay Matrix Level",
            EntityKind::Grade => "Employee Grade",
        };
        f.write_str(name)
    }
}

/// Remote rejection
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    /// Document name already taken
    #[error("{kind} {id} already exists")]
    Duplicate { kind: EntityKind, id: String },

    /// Matrix already has a level for this grade
    #[error("grade {grade} already has a level in {matrix}")]
    DuplicateGrade { matrix: MatrixId, grade: Grade },

    /// Level lists the same scale twice
    #[error("scale {0} appears more than once in the level")]
    DuplicateScale(Scale),

    /// Grade link does not resolve
    #[error("could not find Employee Grade: {0}")]
    UnknownGrade(Grade),

    /// Backend-specific failure
    #[error("store backend error: {0}")]
    Backend(String),

    /// Snapshot could not be read or written
    #[error("snapshot i/o failed: {0}")]
    SnapshotIo(#[from] std::io::Error),

    /// Snapshot content is malformed
    #[error("snapshot format invalid: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

impl StoreError {
    /// Not-found error for a document
    #[inline]
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Duplicate-name error for a document
    #[inline]
    pub fn duplicate(kind: EntityKind, id: impl ToString) -> Self {
        Self::Duplicate {
            kind,
            id: id.to_string(),
        }
    }

    /// Check for a missing document
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
