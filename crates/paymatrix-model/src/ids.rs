//! Identifiers for matrices and levels

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Name of a pay matrix (e.g. `Standard`, `Head Office`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatrixId(String);

impl MatrixId {
    /// Create matrix id, trimming surrounding whitespace
    ///
    /// # Errors
    /// `ModelError::EmptyMatrixId` if nothing is left after trimming
    pub fn new(name: impl AsRef<str>) -> Result<Self, ModelError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyMatrixId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MatrixId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MatrixId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MatrixId> for String {
    fn from(value: MatrixId) -> Self {
        value.0
    }
}

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned level identifier
///
/// Opaque to the renderer; rows carry it back so the presentation layer can
/// bind clicks to the originating level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LevelId(String);

impl LevelId {
    /// Generate a fresh, sortable id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string().to_lowercase())
    }

    /// Get id text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LevelId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyLevelId);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for LevelId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LevelId> for String {
    fn from(value: LevelId) -> Self {
        value.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
