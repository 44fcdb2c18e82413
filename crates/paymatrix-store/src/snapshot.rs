//! JSON snapshots of store contents

use crate::error::StoreError;
use paymatrix_model::{Grade, Level, MatrixId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialisable copy of a store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    /// Matrix names
    pub matrices: Vec<MatrixId>,
    /// Employee grade catalog
    pub grades: Vec<Grade>,
    /// Levels with their pairs
    pub levels: Vec<Level>,
}

impl StoreSnapshot {
    /// Read a snapshot file
    ///
    /// # Errors
    /// I/O failure or malformed JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read a snapshot file, or start empty if it does not exist
    ///
    /// # Errors
    /// I/O failure other than not-found, or malformed JSON
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write as pretty JSON
    ///
    /// # Errors
    /// I/O failure
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
