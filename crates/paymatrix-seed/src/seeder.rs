//! Bulk matrix creation

use crate::data::{MatrixData, SeedFile};
use crate::error::SeedError;
use paymatrix_model::{Grade, LevelDraft, MatrixId, STANDARD_MATRIX};
use paymatrix_store::DocumentStore;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Result of seeding one matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Seeded matrix
    pub matrix: MatrixId,
    /// Levels created
    pub created: usize,
    /// Catalog grades that received a level
    pub matched: Vec<Grade>,
    /// Table keys with no matching catalog grade
    pub skipped: Vec<String>,
    /// Catalog grades created while seeding
    pub grades_created: Vec<Grade>,
    /// Widest row of the seeded table
    pub scales: usize,
}

impl SeedReport {
    fn new(matrix: MatrixId, scales: usize) -> Self {
        Self {
            matrix,
            created: 0,
            matched: Vec::new(),
            skipped: Vec::new(),
            grades_created: Vec::new(),
            scales,
        }
    }

    /// Skipped grade count
    #[inline]
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// User-facing summary
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = format!(
            "{} Pay Matrix created successfully! Created {} grade levels with {} scales each.",
            self.matrix, self.created, self.scales
        );

        if !self.matched.is_empty() {
            let mut matched: Vec<&Grade> = self.matched.iter().collect();
            matched.sort_by_key(|g| matched_order(g));
            let names: Vec<&str> = matched.iter().map(|g| g.as_str()).collect();
            message.push_str(&format!("\n\nMatched grades: {}", names.join(", ")));
        }

        if !self.skipped.is_empty() {
            let mut skipped: Vec<&str> = self.skipped.iter().map(String::as_str).collect();
            skipped.sort_by_key(|s| (s.parse::<u64>().unwrap_or(u64::MAX), *s));
            let names = skipped.join(", ");
            message.push_str(&format!("\n\nSkipped grades (not found in system): {names}"));
            message.push_str(&format!("\nPlease create Employee Grades with names: {names}"));
        }

        message
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Matched grades list numerically; labels without a number go last
fn matched_order(grade: &Grade) -> (u64, String) {
    let n = grade
        .number()
        .and_then(|n| n.parse::<u64>().ok())
        .unwrap_or(999);
    (n, grade.as_str().to_string())
}

/// Result of seeding several matrices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSeedOutcome {
    /// One report per matrix, in seeding order
    pub reports: Vec<SeedReport>,
}

impl BulkSeedOutcome {
    /// Total levels created
    #[must_use]
    pub fn total_levels(&self) -> usize {
        self.reports.iter().map(|r| r.created).sum()
    }

    /// Number of matrices seeded
    #[inline]
    #[must_use]
    pub fn matrices(&self) -> usize {
        self.reports.len()
    }
}

/// Seeds whole matrices into a store
///
/// Every seed deletes the target matrix (cascading to its levels) and
/// recreates it from the table.
pub struct MatrixSeeder<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> MatrixSeeder<'a, S> {
    /// Create seeder over a store
    #[inline]
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Recreate the `Standard` matrix
    ///
    /// A level is created only for table keys whose number exists in the
    /// grade catalog as `"N"` or `"Grade N"`; other keys are skipped.
    ///
    /// # Errors
    /// Store failure
    pub async fn seed_standard(&self, data: &MatrixData) -> Result<SeedReport, SeedError> {
        let matrix = MatrixId::new(STANDARD_MATRIX)?;
        self.recreate(&matrix).await?;

        let grade_map = self.grade_number_map().await?;
        let mut report = SeedReport::new(matrix.clone(), data.scale_count());

        for (key, amounts) in data.rows() {
            let Some(grade) = grade_map.get(key.trim()) else {
                report.skipped.push(key.to_string());
                continue;
            };
            let pairs = MatrixData::pairs_for(key, amounts)?;
            self.store
                .insert_level(LevelDraft::new(matrix.clone(), grade.clone(), pairs))
                .await?;
            report.matched.push(grade.clone());
            report.created += 1;
        }

        if !report.skipped.is_empty() {
            tracing::warn!(
                skipped = report.skipped.len(),
                "standard matrix grades missing from catalog"
            );
        }
        tracing::info!(matrix = %matrix, created = report.created, "seeded standard matrix");
        Ok(report)
    }

    /// Recreate a named matrix, adding any grade missing from the catalog
    ///
    /// # Errors
    /// Invalid grade label or store failure
    pub async fn seed_named(
        &self,
        name: &MatrixId,
        data: &MatrixData,
    ) -> Result<SeedReport, SeedError> {
        self.recreate(name).await?;

        let mut catalog: HashSet<Grade> = self.store.list_grades().await?.into_iter().collect();
        let mut report = SeedReport::new(name.clone(), data.scale_count());

        for (key, amounts) in data.rows() {
            let grade = Grade::new(key)?;
            if !catalog.contains(&grade) {
                self.store.insert_grade(grade.clone()).await?;
                catalog.insert(grade.clone());
                report.grades_created.push(grade.clone());
            }
            let pairs = MatrixData::pairs_for(key, amounts)?;
            self.store
                .insert_level(LevelDraft::new(name.clone(), grade.clone(), pairs))
                .await?;
            report.matched.push(grade);
            report.created += 1;
        }

        tracing::info!(
            matrix = %name,
            created = report.created,
            grades_created = report.grades_created.len(),
            "seeded matrix"
        );
        Ok(report)
    }

    /// Seed every matrix in a file; `matrix_data`, when present, seeds `Standard`
    ///
    /// # Errors
    /// First failing matrix
    pub async fn seed_file(&self, file: &SeedFile) -> Result<BulkSeedOutcome, SeedError> {
        let mut outcome = BulkSeedOutcome::default();
        if let Some(data) = &file.matrix_data {
            outcome.reports.push(self.seed_standard(data).await?);
        }
        for named in file.matrices.values() {
            outcome.reports.push(self.seed_named(&named.name, &named.data).await?);
        }
        Ok(outcome)
    }

    /// Seed the file's named matrices only if any of them is missing
    ///
    /// Returns `None` when all already exist.
    ///
    /// # Errors
    /// Store failure
    pub async fn ensure_matrices(
        &self,
        file: &SeedFile,
    ) -> Result<Option<BulkSeedOutcome>, SeedError> {
        let mut missing = false;
        for named in file.matrices.values() {
            if !self.store.matrix_exists(&named.name).await? {
                missing = true;
                break;
            }
        }
        if !missing {
            tracing::debug!("all seed matrices present");
            return Ok(None);
        }

        let mut outcome = BulkSeedOutcome::default();
        for named in file.matrices.values() {
            outcome.reports.push(self.seed_named(&named.name, &named.data).await?);
        }
        Ok(Some(outcome))
    }

    /// Delete every matrix and its levels, returning the number of matrices removed
    ///
    /// # Errors
    /// Store failure
    pub async fn delete_all(&self) -> Result<usize, SeedError> {
        let matrices = self.store.list_matrices().await?;
        let mut levels = 0;
        for matrix in &matrices {
            levels += self.store.delete_matrix(matrix).await?;
        }
        tracing::info!(matrices = matrices.len(), levels, "deleted all matrices");
        Ok(matrices.len())
    }

    async fn recreate(&self, matrix: &MatrixId) -> Result<(), SeedError> {
        if self.store.matrix_exists(matrix).await? {
            let removed = self.store.delete_matrix(matrix).await?;
            tracing::debug!(matrix = %matrix, removed, "deleted existing matrix");
        }
        self.store.insert_matrix(matrix.clone()).await?;
        Ok(())
    }

    /// Grade number → catalog grade; walks the catalog in label order so
    /// `"Grade N"` wins over a bare `"N"`
    async fn grade_number_map(&self) -> Result<BTreeMap<String, Grade>, SeedError> {
        let mut grades = self.store.list_grades().await?;
        grades.sort();
        let mut map = BTreeMap::new();
        for grade in grades {
            if let Some(number) = grade.number() {
                map.insert(number.to_string(), grade.clone());
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paymatrix_model::Amount;
    use paymatrix_store::{InMemoryStore, LevelQuery};
    use pretty_assertions::assert_eq;

    fn grade(label: &str) -> Grade {
        Grade::new(label).unwrap()
    }

    async fn catalog(labels: &[&str]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for label in labels {
            store.insert_grade(grade(label)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn standard_matches_both_label_forms() {
        let store = catalog(&["1", "Grade 2"]).await;
        let report = MatrixSeeder::new(&store)
            .seed_standard(&MatrixData::standard())
            .await
            .unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.skipped_count(), 16);
        assert_eq!(report.matched, vec![grade("1"), grade("Grade 2")]);

        let standard = MatrixId::new(STANDARD_MATRIX).unwrap();
        let levels = store.list_levels(&LevelQuery::for_matrix(standard)).await.unwrap();
        assert_eq!(levels.len(), 2);
        for summary in levels {
            assert_eq!(store.get_level(&summary.id).await.unwrap().pairs.len(), 22);
        }
    }

    #[tokio::test]
    async fn standard_message_lists_matched_and_skipped() {
        let store = catalog(&["Grade 10", "2"]).await;
        let report = MatrixSeeder::new(&store)
            .seed_standard(&MatrixData::standard())
            .await
            .unwrap();
        let message = report.message();

        assert!(message.starts_with(
            "Standard Pay Matrix created successfully! Created 2 grade levels with 22 scales each."
        ));
        assert!(message.contains("Matched grades: 2, Grade 10"));
        assert!(message.contains("Skipped grades (not found in system): 1, 3, 4, 5, 6, 7, 8, 9, 11,"));
        assert!(message.contains("Please create Employee Grades with names: 1, 3,"));
    }

    #[tokio::test]
    async fn prefixed_label_wins_over_bare_number() {
        let store = catalog(&["1", "Grade 1"]).await;
        let report = MatrixSeeder::new(&store)
            .seed_standard(&MatrixData::standard())
            .await
            .unwrap();
        assert_eq!(report.matched, vec![grade("Grade 1")]);
    }

    #[tokio::test]
    async fn reseeding_replaces_previous_levels() {
        let store = catalog(&["1", "2", "3"]).await;
        let seeder = MatrixSeeder::new(&store);
        seeder.seed_standard(&MatrixData::standard()).await.unwrap();
        seeder.seed_standard(&MatrixData::standard()).await.unwrap();
        assert_eq!(store.level_count(), 3);
    }

    #[tokio::test]
    async fn named_matrix_creates_missing_grades() {
        let store = catalog(&["A1"]).await;
        let mut data = MatrixData::new();
        data.insert("A1", vec![Amount::from_units(100), Amount::from_units(110)]);
        data.insert("B1", vec![Amount::from_units(200)]);
        let name = MatrixId::new("Project").unwrap();

        let report = MatrixSeeder::new(&store).seed_named(&name, &data).await.unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.grades_created, vec![grade("B1")]);
        assert!(store.list_grades().await.unwrap().contains(&grade("B1")));
        assert!(store.matrix_exists(&name).await.unwrap());
    }

    #[tokio::test]
    async fn ensure_skips_when_all_present() {
        let store = InMemoryStore::new();
        let file: SeedFile = serde_json::from_str(
            r#"{"matrices": {"p": {"name": "Project", "data": {"A1": [1, 2]}}}}"#,
        )
        .unwrap();
        let seeder = MatrixSeeder::new(&store);

        let first = seeder.ensure_matrices(&file).await.unwrap();
        assert_eq!(first.map(|o| o.total_levels()), Some(1));
        assert!(seeder.ensure_matrices(&file).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_all_cascades() {
        let store = catalog(&["1", "2"]).await;
        let seeder = MatrixSeeder::new(&store);
        seeder.seed_standard(&MatrixData::standard()).await.unwrap();

        assert_eq!(seeder.delete_all().await.unwrap(), 1);
        assert_eq!(store.level_count(), 0);
        assert!(store.list_matrices().await.unwrap().is_empty());
    }
}
