//! Level create, update and delete
//!
//! Validation runs before any store call. Updates always send the complete
//! pair set; the store replaces the level wholesale.

use crate::error::ViewError;
use paymatrix_model::{
    validate_pairs, DroppedRow, Grade, LevelDraft, LevelId, MatrixId, RawPair, ValidationError,
    ValidationPolicy,
};
use paymatrix_store::DocumentStore;

/// Confirmation prompt shown before a delete
pub const DELETE_PROMPT: &str = "Delete this Pay Matrix Level and its rows?";

/// Result of a successful create or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Affected level
    pub level: LevelId,
    /// Pairs written
    pub kept: usize,
    /// Rows dropped by lenient validation
    pub dropped: Vec<DroppedRow>,
}

/// First step of a delete; nothing happens until it is confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete request does nothing until passed to confirm_delete"]
pub struct DeleteRequest {
    level: LevelId,
}

impl DeleteRequest {
    /// Level to delete
    #[inline]
    #[must_use]
    pub fn level(&self) -> &LevelId {
        &self.level
    }

    /// Prompt to show the user
    #[inline]
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }

    /// Decline the delete
    #[inline]
    pub fn cancel(self) {
        tracing::debug!(level = %self.level, "delete cancelled");
    }
}

/// Validates and submits level mutations
pub struct LevelEditor<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    policy: ValidationPolicy,
}

impl<'a, S: DocumentStore + ?Sized> LevelEditor<'a, S> {
    /// Create editor with the default (lenient) policy
    #[inline]
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            policy: ValidationPolicy::default(),
        }
    }

    /// With validation policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create a level in `matrix`
    ///
    /// # Errors
    /// - `ViewError::MatrixNotSaved` when no matrix is designated
    /// - `ViewError::Validation` for a blank grade or no valid pairs
    /// - `ViewError::Store` when the insert is rejected
    pub async fn create(
        &self,
        matrix: Option<&MatrixId>,
        grade: &str,
        raw: &[RawPair],
    ) -> Result<EditOutcome, ViewError> {
        let matrix = matrix.ok_or(ViewError::MatrixNotSaved)?;
        let (draft, dropped) = self.draft(matrix, grade, raw)?;
        let kept = draft.pairs.len();

        let level = self.store.insert_level(draft).await.map_err(|e| {
            tracing::warn!(matrix = %matrix, error = %e, "level insert rejected");
            e
        })?;
        tracing::info!(level = %level.id, matrix = %matrix, grade = %level.grade, kept, "level created");

        Ok(EditOutcome {
            level: level.id,
            kept,
            dropped,
        })
    }

    /// Replace a level's grade, owning matrix and pairs
    ///
    /// # Errors
    /// - `ViewError::Validation` for a blank grade or no valid pairs
    /// - `ViewError::Store` when the update is rejected
    pub async fn update(
        &self,
        level: &LevelId,
        matrix: &MatrixId,
        grade: &str,
        raw: &[RawPair],
    ) -> Result<EditOutcome, ViewError> {
        let (draft, dropped) = self.draft(matrix, grade, raw)?;
        let kept = draft.pairs.len();

        self.store.update_level(level, draft).await.map_err(|e| {
            tracing::warn!(level = %level, error = %e, "level update rejected");
            e
        })?;
        tracing::info!(level = %level, matrix = %matrix, kept, "level updated");

        Ok(EditOutcome {
            level: level.clone(),
            kept,
            dropped,
        })
    }

    /// Start a delete
    #[inline]
    pub fn request_delete(&self, level: &LevelId) -> DeleteRequest {
        DeleteRequest {
            level: level.clone(),
        }
    }

    /// Delete a confirmed level and all its pairs
    ///
    /// # Errors
    /// `ViewError::Store` when the delete is rejected
    pub async fn confirm_delete(&self, request: DeleteRequest) -> Result<LevelId, ViewError> {
        let DeleteRequest { level } = request;
        self.store.delete_level(&level).await.map_err(|e| {
            tracing::warn!(level = %level, error = %e, "level delete rejected");
            e
        })?;
        tracing::info!(level = %level, "level deleted");
        Ok(level)
    }

    fn draft(
        &self,
        matrix: &MatrixId,
        grade: &str,
        raw: &[RawPair],
    ) -> Result<(LevelDraft, Vec<DroppedRow>), ViewError> {
        let grade = Grade::new(grade).map_err(|_| ValidationError::MissingGrade)?;
        let validation = validate_pairs(raw, self.policy)?;
        if !validation.dropped.is_empty() {
            tracing::warn!(
                grade = %grade,
                dropped = validation.dropped.len(),
                "malformed scale rows dropped"
            );
        }
        Ok((
            LevelDraft::new(matrix.clone(), grade, validation.pairs),
            validation.dropped,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paymatrix_model::DropReason;
    use paymatrix_test_utils::{matrix, raw, standard_scenario, CountingStore};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_without_matrix_is_not_saved() {
        let store = CountingStore::new(standard_scenario().await);
        let err = LevelEditor::new(&store)
            .create(None, "3", &raw(&[("1", "100")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::MatrixNotSaved));
        assert_eq!(store.mutations(), 0);
    }

    #[tokio::test]
    async fn blank_grade_is_missing_grade() {
        let store = CountingStore::new(standard_scenario().await);
        let err = LevelEditor::new(&store)
            .create(Some(&matrix("Standard")), "  ", &raw(&[("1", "100")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::Validation(ValidationError::MissingGrade)));
        assert_eq!(store.total_calls(), 0);
    }

    #[tokio::test]
    async fn unparsable_amount_makes_no_insert() {
        let store = CountingStore::new(standard_scenario().await);
        let err = LevelEditor::new(&store)
            .create(Some(&matrix("Standard")), "3", &raw(&[("2", "abc")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::Validation(ValidationError::NoPairs)));
        assert_eq!(store.total_calls(), 0);
    }

    #[tokio::test]
    async fn lenient_create_reports_dropped_rows() {
        let store = CountingStore::new(standard_scenario().await);
        let outcome = LevelEditor::new(&store)
            .create(
                Some(&matrix("Standard")),
                "3",
                &raw(&[("1", "100"), ("0", "5"), ("2", "x"), ("1", "200")]),
            )
            .await
            .unwrap();

        assert_eq!(outcome.kept, 1);
        let reasons: Vec<DropReason> = outcome.dropped.iter().map(|d| d.reason).collect();
        assert_eq!(
            reasons,
            vec![DropReason::ZeroScale, DropReason::UnparsableAmount, DropReason::DuplicateScale]
        );
        assert_eq!(store.mutations(), 1);
    }

    #[tokio::test]
    async fn strict_policy_rejects_whole_submission() {
        let store = CountingStore::new(standard_scenario().await);
        let err = LevelEditor::new(&store)
            .with_policy(ValidationPolicy::Strict)
            .create(Some(&matrix("Standard")), "3", &raw(&[("1", "100"), ("x", "1")]))
            .await
            .unwrap_err();

        let ViewError::Validation(ValidationError::RowsRejected { dropped }) = err else {
            panic!("expected rows rejected, got {err:?}");
        };
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].index, 1);
        assert_eq!(store.total_calls(), 0);
    }

    #[tokio::test]
    async fn duplicate_grade_surfaces_store_error() {
        let store = standard_scenario().await;
        let err = LevelEditor::new(&store)
            .create(Some(&matrix("Standard")), "1", &raw(&[("1", "1")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::Store(_)));
        assert_eq!(err.notice().message, "grade 1 already has a level in Standard");
    }

    #[tokio::test]
    async fn cancelled_delete_makes_no_call() {
        let store = CountingStore::new(standard_scenario().await);
        let editor = LevelEditor::new(&store);
        let request = editor.request_delete(&paymatrix_model::LevelId::generate());
        assert_eq!(request.prompt(), DELETE_PROMPT);
        request.cancel();
        assert_eq!(store.total_calls(), 0);
    }
}
