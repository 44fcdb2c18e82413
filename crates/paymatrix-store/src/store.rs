//! Document store contract

use crate::error::StoreError;
use async_trait::async_trait;
use paymatrix_model::{Grade, Level, LevelDraft, LevelId, LevelSummary, MatrixId};

/// Ordering of a level list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelOrder {
    /// Grade label ascending (lexicographic, as a backend would sort text)
    #[default]
    GradeAsc,
    /// Insertion order
    Inserted,
}

/// Level list query: all levels owned by one matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelQuery {
    /// Owning matrix filter
    pub matrix: MatrixId,
    /// Ordering
    pub order_by: LevelOrder,
}

impl LevelQuery {
    /// Query for one matrix, grade ascending
    #[inline]
    #[must_use]
    pub fn for_matrix(matrix: MatrixId) -> Self {
        Self {
            matrix,
            order_by: LevelOrder::default(),
        }
    }

    /// With ordering
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order_by: LevelOrder) -> Self {
        self.order_by = order_by;
        self
    }
}

/// Minimal CRUD surface over matrix, level and grade documents
///
/// List queries return lightweight projections; nested pairs are only
/// available through [`DocumentStore::get_level`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Levels of one matrix, without pairs
    async fn list_levels(&self, query: &LevelQuery) -> Result<Vec<LevelSummary>, StoreError>;

    /// Full level including pairs
    async fn get_level(&self, id: &LevelId) -> Result<Level, StoreError>;

    /// Create a level
    async fn insert_level(&self, draft: LevelDraft) -> Result<Level, StoreError>;

    /// Replace a level's grade, owning matrix and complete pair set
    async fn update_level(&self, id: &LevelId, draft: LevelDraft) -> Result<(), StoreError>;

    /// Remove a level and all its pairs
    async fn delete_level(&self, id: &LevelId) -> Result<(), StoreError>;

    /// All matrix names
    async fn list_matrices(&self) -> Result<Vec<MatrixId>, StoreError>;

    /// Check a matrix exists
    async fn matrix_exists(&self, id: &MatrixId) -> Result<bool, StoreError>;

    /// Create an empty matrix
    async fn insert_matrix(&self, id: MatrixId) -> Result<(), StoreError>;

    /// Remove a matrix and its levels, returning the number of levels removed
    async fn delete_matrix(&self, id: &MatrixId) -> Result<usize, StoreError>;

    /// Employee grade catalog
    async fn list_grades(&self) -> Result<Vec<Grade>, StoreError>;

    /// Add a catalog grade
    async fn insert_grade(&self, grade: Grade) -> Result<(), StoreError>;
}
