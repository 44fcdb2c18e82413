//! Two-phase level fetch
//!
//! Lists the matrix's level summaries, then fetches each level's pairs with
//! bounded concurrency. Results come back in list order and are then sorted
//! by grade key.

use crate::error::ViewError;
use futures::stream::{self, StreamExt, TryStreamExt};
use paymatrix_model::{sort_levels, Level, MatrixId};
use paymatrix_store::{DocumentStore, LevelOrder, LevelQuery};

/// Fetches all levels of one matrix
pub struct MatrixLoader<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    concurrency: usize,
}

impl<'a, S: DocumentStore + ?Sized> MatrixLoader<'a, S> {
    /// Create loader with the given detail fetch concurrency (minimum 1)
    #[inline]
    #[must_use]
    pub fn new(store: &'a S, concurrency: usize) -> Self {
        Self {
            store,
            concurrency: concurrency.max(1),
        }
    }

    /// Load every level of `matrix` with its pairs, sorted by grade key
    ///
    /// # Errors
    /// - `ViewError::NotFound` when no matrix is designated
    /// - `ViewError::Store` on the first failed fetch
    pub async fn load(&self, matrix: Option<&MatrixId>) -> Result<Vec<Level>, ViewError> {
        let Some(matrix) = matrix else {
            return Err(ViewError::NotFound);
        };

        let query = LevelQuery::for_matrix(matrix.clone()).with_order(LevelOrder::GradeAsc);
        let summaries = self.store.list_levels(&query).await?;
        tracing::debug!(matrix = %matrix, levels = summaries.len(), "listed levels");

        let store = self.store;
        let mut levels: Vec<Level> = stream::iter(summaries)
            .map(|summary| async move { store.get_level(&summary.id).await })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        sort_levels(&mut levels);
        tracing::debug!(matrix = %matrix, levels = levels.len(), "loaded level details");
        Ok(levels)
    }
}
