//! Seed data: grade → amounts tables and seed files

use crate::error::SeedError;
use crate::standard::STANDARD_TABLE;
use indexmap::IndexMap;
use paymatrix_model::{Amount, MatrixId, Pair, Scale};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Amount table for one matrix
///
/// Keys are grade labels (or grade numbers, for the standard matrix); the
/// amount at position `i` belongs to scale `i + 1`. Key order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixData(IndexMap<String, Vec<Amount>>);

impl MatrixData {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in standard table, keyed `"1"` to `"18"`
    #[must_use]
    pub fn standard() -> Self {
        let rows = STANDARD_TABLE
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let amounts = row.iter().map(|&v| Amount::from_units(u64::from(v))).collect();
                ((i + 1).to_string(), amounts)
            })
            .collect();
        Self(rows)
    }

    /// Add or replace a grade row
    pub fn insert(&mut self, grade: impl Into<String>, amounts: Vec<Amount>) {
        self.0.insert(grade.into(), amounts);
    }

    /// Grade rows in file order
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Amount])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of grade rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check for an empty table
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Widest row
    #[must_use]
    pub fn scale_count(&self) -> usize {
        self.0.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Pairs for a row, numbering scales from 1
    ///
    /// # Errors
    /// `SeedError::TooManyScales` if a position overflows a scale number
    pub fn pairs_for(grade: &str, amounts: &[Amount]) -> Result<Vec<Pair>, SeedError> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                u32::try_from(i + 1)
                    .ok()
                    .and_then(|n| Scale::new(n).ok())
                    .map(|scale| Pair::new(scale, amount))
                    .ok_or_else(|| SeedError::TooManyScales {
                        grade: grade.to_string(),
                    })
            })
            .collect()
    }

    /// Load a table from `{"matrix_data": {...}}`, falling back to the
    /// built-in standard table when the file is missing, unreadable or has
    /// no `matrix_data`
    #[must_use]
    pub fn load_or_standard(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match SeedFile::load(path) {
            Ok(SeedFile {
                matrix_data: Some(data),
                ..
            }) => data,
            Ok(_) => {
                tracing::warn!(path = %path.display(), "seed file has no matrix_data, using built-in table");
                Self::standard()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not load matrix data, using built-in table");
                Self::standard()
            }
        }
    }
}

/// A named matrix inside a seed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMatrix {
    /// Matrix name
    pub name: MatrixId,
    /// Grade rows
    pub data: MatrixData,
}

/// Seed file contents
///
/// ```json
/// { "matrix_data": { "1": [4905, 5346] },
///   "matrices": { "project": { "name": "Project", "data": { "A1": [100] } } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    /// Table for the standard matrix
    pub matrix_data: Option<MatrixData>,
    /// Named matrices, in file order
    pub matrices: IndexMap<String, NamedMatrix>,
}

impl SeedFile {
    /// Read a seed file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON
    ///
    /// # Errors
    /// I/O or parse failure
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Ok(serde_yaml::from_str(&text)?)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }

    /// Standard table from the file, or the built-in one
    #[must_use]
    pub fn standard_data(&self) -> MatrixData {
        self.matrix_data.clone().unwrap_or_else(MatrixData::standard)
    }
}
