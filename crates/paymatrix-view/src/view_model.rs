//! Matrix view-model
//!
//! Holds the store handle, the designated matrix and the last rendered
//! snapshot. The snapshot is replaced whole after every successful
//! mutation and kept untouched on failure.

use crate::config::ViewConfig;
use crate::dialog::{DialogMode, LevelDialog};
use crate::editor::{DeleteRequest, EditOutcome, LevelEditor};
use crate::error::ViewError;
use crate::loader::MatrixLoader;
use crate::notice::Notice;
use crate::render::{render_html, render_text};
use paymatrix_model::{pivot, Grade, LevelId, MatrixId, RenderedMatrix};
use paymatrix_seed::{MatrixData, MatrixSeeder};
use paymatrix_store::DocumentStore;
use std::sync::Arc;

/// View-model for one pay matrix form
pub struct PayMatrixView<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    matrix: Option<MatrixId>,
    config: ViewConfig,
    snapshot: RenderedMatrix,
}

impl<S: DocumentStore + ?Sized> PayMatrixView<S> {
    /// Create view; `matrix` is `None` until the form has been saved
    #[must_use]
    pub fn new(store: Arc<S>, matrix: Option<MatrixId>) -> Self {
        Self {
            store,
            matrix,
            config: ViewConfig::default(),
            snapshot: RenderedMatrix::NoData,
        }
    }

    /// With configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Designated matrix
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Option<&MatrixId> {
        self.matrix.as_ref()
    }

    /// Switch matrix; the snapshot is stale until the next refresh
    #[inline]
    pub fn set_matrix(&mut self, matrix: Option<MatrixId>) {
        self.matrix = matrix;
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Store handle
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Last rendered matrix
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &RenderedMatrix {
        &self.snapshot
    }

    /// Snapshot as HTML
    #[must_use]
    pub fn html(&self) -> String {
        render_html(&self.snapshot, &self.config.number_format)
    }

    /// Snapshot as plain text
    #[must_use]
    pub fn text(&self) -> String {
        render_text(&self.snapshot, &self.config.number_format)
    }

    /// Reload and re-pivot the matrix
    ///
    /// No designated matrix yields the no-data state, not an error.
    ///
    /// # Errors
    /// `ViewError::Store` on a failed fetch; the previous snapshot is kept
    pub async fn refresh(&mut self) -> Result<&RenderedMatrix, ViewError> {
        let loader = MatrixLoader::new(&*self.store, self.config.detail_fetch_concurrency);
        self.snapshot = match loader.load(self.matrix.as_ref()).await {
            Ok(levels) => pivot(&levels),
            Err(ViewError::NotFound) => RenderedMatrix::NoData,
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                return Err(e);
            }
        };
        tracing::info!(
            matrix = ?self.matrix.as_ref().map(MatrixId::as_str),
            rows = self.snapshot.rows().len(),
            columns = self.snapshot.columns().len(),
            "matrix refreshed"
        );
        Ok(&self.snapshot)
    }

    /// Dialog for a new level
    ///
    /// # Errors
    /// `ViewError::MatrixNotSaved` when no matrix is designated
    pub fn open_create_dialog(&self) -> Result<LevelDialog, ViewError> {
        if self.matrix.is_none() {
            return Err(ViewError::MatrixNotSaved);
        }
        Ok(LevelDialog::create())
    }

    /// Dialog for an existing level, filled from a fresh fetch
    ///
    /// # Errors
    /// `ViewError::Store` if the level cannot be fetched
    pub async fn open_edit_dialog(&self, level: &LevelId) -> Result<LevelDialog, ViewError> {
        let level = self.store.get_level(level).await?;
        Ok(LevelDialog::edit(level))
    }

    /// Submit a dialog
    ///
    /// On success the dialog closes and the view refreshes. On failure the
    /// dialog returns to editing with the error kept.
    pub async fn submit(&mut self, dialog: &mut LevelDialog) -> Notice {
        if let Err(e) = dialog.begin_submission() {
            return ViewError::from(e).notice();
        }

        let store = Arc::clone(&self.store);
        let editor = LevelEditor::new(&*store).with_policy(self.config.validation);
        let (result, verb) = match dialog.mode() {
            DialogMode::Create => (
                editor
                    .create(self.matrix.as_ref(), dialog.grade(), dialog.rows().rows())
                    .await,
                "created",
            ),
            DialogMode::Edit(level) => (
                editor
                    .update(&level.id, &level.matrix, dialog.grade(), dialog.rows().rows())
                    .await,
                "updated",
            ),
        };

        self.settle(dialog, result, |outcome: &EditOutcome| {
            let mut message = format!("Pay Matrix Level {verb}");
            if !outcome.dropped.is_empty() {
                message.push_str(&format!(" ({} invalid row(s) ignored)", outcome.dropped.len()));
            }
            message
        })
        .await
    }

    /// Start deleting the level an edit dialog shows; `None` for create dialogs
    #[must_use]
    pub fn request_delete(&self, dialog: &LevelDialog) -> Option<DeleteRequest> {
        let level = dialog.level_id()?;
        Some(LevelEditor::new(&*self.store).request_delete(level))
    }

    /// Run a confirmed delete
    pub async fn confirm_delete(
        &mut self,
        dialog: &mut LevelDialog,
        request: DeleteRequest,
    ) -> Notice {
        if let Err(e) = dialog.begin_submission() {
            return ViewError::from(e).notice();
        }
        let store = Arc::clone(&self.store);
        let result = LevelEditor::new(&*store).confirm_delete(request).await;
        self.settle(dialog, result, |_| "Pay Matrix Level deleted".to_string())
            .await
    }

    /// Grade catalog for the grade selector, in grade-key order
    ///
    /// # Errors
    /// `ViewError::Store` if the catalog cannot be listed
    pub async fn grade_options(&self) -> Result<Vec<Grade>, ViewError> {
        let mut grades = self.store.list_grades().await?;
        grades.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.cmp(b)));
        Ok(grades)
    }

    /// Recreate the standard matrix, then switch the view to it and refresh
    pub async fn seed_standard(&mut self, data: &MatrixData) -> Notice {
        let store = Arc::clone(&self.store);
        let report = match MatrixSeeder::new(&*store).seed_standard(data).await {
            Ok(report) => report,
            Err(e) => return ViewError::from(e).notice(),
        };
        self.set_matrix(Some(report.matrix.clone()));
        if let Err(e) = self.refresh().await {
            return e.notice();
        }
        Notice::success(report.message())
    }

    async fn settle<T>(
        &mut self,
        dialog: &mut LevelDialog,
        result: Result<T, ViewError>,
        success: impl FnOnce(&T) -> String,
    ) -> Notice {
        if let Err(e) = dialog.finish_submission(&result) {
            tracing::warn!(error = %e, "dialog left submitting state unexpectedly");
        }
        match result {
            Ok(value) => {
                if let Err(e) = self.refresh().await {
                    return e.notice();
                }
                Notice::success(success(&value))
            }
            Err(e) => e.notice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Indicator;
    use paymatrix_model::{Amount, LevelDraft, ValidationPolicy};
    use paymatrix_store::InMemoryStore;
    use paymatrix_test_utils::{grade, matrix, pairs, standard_scenario, CountingStore};
    use pretty_assertions::assert_eq;

    async fn view() -> PayMatrixView<CountingStore<InMemoryStore>> {
        let store = Arc::new(CountingStore::new(standard_scenario().await));
        let mut view = PayMatrixView::new(store, Some(matrix("Standard")));
        view.refresh().await.unwrap();
        view
    }

    #[tokio::test]
    async fn unsaved_form_shows_no_data() {
        let store = Arc::new(standard_scenario().await);
        let mut view = PayMatrixView::new(store, None);
        assert!(view.refresh().await.unwrap().is_no_data());
        assert_eq!(view.html(), "<p>No data found.</p>");
        assert!(matches!(view.open_create_dialog(), Err(ViewError::MatrixNotSaved)));
    }

    #[tokio::test]
    async fn create_refreshes_snapshot() {
        let mut view = view().await;
        let mut dialog = view.open_create_dialog().unwrap();
        dialog.set_grade("3").unwrap();
        {
            let rows = dialog.rows_mut().unwrap();
            rows.set_scale(0, "2");
            rows.set_amount(0, "7500");
        }

        let notice = view.submit(&mut dialog).await;
        assert!(notice.is_success(), "{notice}");
        assert_eq!(notice.message, "Pay Matrix Level created");
        assert!(!dialog.is_open());

        let grades: Vec<&str> = view.snapshot().rows().iter().map(|r| r.grade.as_str()).collect();
        assert_eq!(grades, vec!["1", "2", "3"]);
        assert_eq!(view.snapshot().columns().len(), 3);
    }

    #[tokio::test]
    async fn validation_failure_keeps_dialog_open_without_store_call() {
        let mut view = view().await;
        let before = view.store().mutations();
        let mut dialog = view.open_create_dialog().unwrap();
        dialog.set_grade("3").unwrap();

        let notice = view.submit(&mut dialog).await;
        assert_eq!(notice.title, "Validation Error");
        assert_eq!(notice.indicator, Indicator::Orange);
        assert!(dialog.is_open());
        assert_eq!(dialog.last_error(), Some("please add at least one scale entry"));
        assert_eq!(view.store().mutations(), before);
    }

    #[tokio::test]
    async fn store_rejection_keeps_previous_snapshot() {
        let mut view = view().await;
        let before = view.snapshot().clone();
        let mut dialog = view.open_create_dialog().unwrap();
        dialog.set_grade("1").unwrap();
        dialog.rows_mut().unwrap().push("5", "1");

        let notice = view.submit(&mut dialog).await;
        assert_eq!(notice.indicator, Indicator::Red);
        assert_eq!(view.snapshot(), &before);
        assert!(dialog.last_error().is_some());
    }

    #[tokio::test]
    async fn strict_config_reports_bad_rows() {
        let mut view = view()
            .await
            .with_config(ViewConfig::default().with_validation(ValidationPolicy::Strict));
        let mut dialog = view.open_create_dialog().unwrap();
        dialog.set_grade("3").unwrap();
        dialog.rows_mut().unwrap().push("1", "100");
        dialog.rows_mut().unwrap().push("two", "100");

        let notice = view.submit(&mut dialog).await;
        assert_eq!(notice.title, "Validation Error");
        assert!(notice.message.contains("row 3"), "{}", notice.message);
    }

    #[tokio::test]
    async fn edit_dialog_uses_fresh_level() {
        let mut view = view().await;
        let level = view.snapshot().rows()[1].level.clone();
        let mut dialog = view.open_edit_dialog(&level).await.unwrap();
        assert_eq!(dialog.grade(), "2");

        dialog.rows_mut().unwrap().push("3", "9000");
        let notice = view.submit(&mut dialog).await;
        assert_eq!(notice.message, "Pay Matrix Level updated");

        let grid = view.snapshot().grid().unwrap();
        let formatted = grid.row(&level).unwrap().formatted(&view.config().number_format);
        assert_eq!(formatted, vec!["6,000".to_string(), "9,000".to_string()]);
    }

    #[tokio::test]
    async fn edit_keeps_level_in_its_own_matrix() {
        let mut view = view().await;
        let project = matrix("Project");
        view.store().insert_matrix(project.clone()).await.unwrap();
        let level = view
            .store()
            .insert_level(LevelDraft::new(project.clone(), grade("4"), pairs(&[(1, 100)])))
            .await
            .unwrap();

        let mut dialog = view.open_edit_dialog(&level.id).await.unwrap();
        dialog.rows_mut().unwrap().push("2", "200");
        let notice = view.submit(&mut dialog).await;
        assert!(notice.is_success(), "{notice}");

        let after = view.store().get_level(&level.id).await.unwrap();
        assert_eq!(after.matrix, project);
        assert_eq!(after.pairs, pairs(&[(1, 100), (2, 200)]));
        assert_eq!(view.matrix(), Some(&matrix("Standard")));
        assert!(view.snapshot().grid().unwrap().row(&level.id).is_none());
    }

    #[tokio::test]
    async fn seeding_switches_view_to_standard() {
        let store = Arc::new(standard_scenario().await);
        store.insert_matrix(matrix("Project")).await.unwrap();
        let mut view = PayMatrixView::new(store, Some(matrix("Project")));
        assert!(view.refresh().await.unwrap().is_no_data());

        let mut data = MatrixData::new();
        data.insert("1", vec![Amount::from_units(4905)]);
        let notice = view.seed_standard(&data).await;
        assert!(notice.is_success(), "{notice}");
        assert_eq!(view.matrix(), Some(&matrix("Standard")));
        let grades: Vec<&str> = view.snapshot().rows().iter().map(|r| r.grade.as_str()).collect();
        assert_eq!(grades, vec!["1"]);
    }

    #[tokio::test]
    async fn delete_after_confirmation() {
        let mut view = view().await;
        let level = view.snapshot().rows()[0].level.clone();
        let mut dialog = view.open_edit_dialog(&level).await.unwrap();

        let request = view.request_delete(&dialog).unwrap();
        let notice = view.confirm_delete(&mut dialog, request).await;
        assert_eq!(notice.message, "Pay Matrix Level deleted");
        assert_eq!(view.snapshot().rows().len(), 1);
        assert!(view.snapshot().grid().unwrap().row(&level).is_none());
    }

    #[tokio::test]
    async fn create_dialog_cannot_delete() {
        let view = view().await;
        let dialog = view.open_create_dialog().unwrap();
        assert!(view.request_delete(&dialog).is_none());
    }

    #[tokio::test]
    async fn grade_options_in_key_order() {
        let view = view().await;
        let grades = view.grade_options().await.unwrap();
        assert_eq!(grades.first(), Some(&grade("1")));
        assert!(grades.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()));
    }
}
