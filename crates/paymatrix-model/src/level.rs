//! Levels: one grade's row within a matrix

use crate::amount::Amount;
use crate::grade::Grade;
use crate::ids::{LevelId, MatrixId};
use crate::scale::Scale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A (scale, amount) association within one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    /// Column
    pub scale: Scale,
    /// Cell value
    pub amount: Amount,
}

impl Pair {
    /// Create pair
    #[inline]
    #[must_use]
    pub fn new(scale: Scale, amount: Amount) -> Self {
        Self { scale, amount }
    }
}

/// Fully loaded level record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Store-assigned id
    pub id: LevelId,
    /// Owning matrix
    pub matrix: MatrixId,
    /// Row label
    pub grade: Grade,
    /// Scale/amount pairs, in stored order
    #[serde(default)]
    pub pairs: Vec<Pair>,
}

impl Level {
    /// Create level
    #[inline]
    #[must_use]
    pub fn new(id: LevelId, matrix: MatrixId, grade: Grade, pairs: Vec<Pair>) -> Self {
        Self {
            id,
            matrix,
            grade,
            pairs,
        }
    }

    /// Amount for a scale, if the pair exists
    #[must_use]
    pub fn amount(&self, scale: Scale) -> Option<Amount> {
        self.pairs
            .iter()
            .find(|p| p.scale == scale)
            .map(|p| p.amount)
    }

    /// Pairs keyed by scale
    ///
    /// Order-independent view, handy for comparing pair sets.
    #[must_use]
    pub fn pair_map(&self) -> BTreeMap<Scale, Amount> {
        self.pairs.iter().map(|p| (p.scale, p.amount)).collect()
    }

    /// Lightweight projection
    #[must_use]
    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            id: self.id.clone(),
            grade: self.grade.clone(),
        }
    }
}

/// List-query projection of a level (no pairs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// Store-assigned id
    pub id: LevelId,
    /// Row label
    pub grade: Grade,
}

/// Payload for insert and full-replace update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDraft {
    /// Owning matrix
    pub matrix: MatrixId,
    /// Row label
    pub grade: Grade,
    /// Complete pair set
    pub pairs: Vec<Pair>,
}

impl LevelDraft {
    /// Create draft
    #[inline]
    #[must_use]
    pub fn new(matrix: MatrixId, grade: Grade, pairs: Vec<Pair>) -> Self {
        Self {
            matrix,
            grade,
            pairs,
        }
    }

    /// Materialise into a level record
    #[inline]
    #[must_use]
    pub fn into_level(self, id: LevelId) -> Level {
        Level::new(id, self.matrix, self.grade, self.pairs)
    }

    /// First scale that appears more than once, if any
    #[must_use]
    pub fn duplicate_scale(&self) -> Option<Scale> {
        let mut seen = std::collections::BTreeSet::new();
        self.pairs
            .iter()
            .map(|p| p.scale)
            .find(|scale| !seen.insert(*scale))
    }
}
