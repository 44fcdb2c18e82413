//! In-memory document store
//!
//! Reads go straight to the concurrent maps. Mutations are serialised by a
//! single write lock so cross-document constraints (unique grade per matrix,
//! matrix cascade) are checked and applied atomically.

use crate::error::{EntityKind, StoreError};
use crate::snapshot::StoreSnapshot;
use crate::store::{DocumentStore, LevelOrder, LevelQuery};
use async_trait::async_trait;
use dashmap::DashMap;
use paymatrix_model::{Grade, Level, LevelDraft, LevelId, LevelSummary, MatrixId};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Reject levels whose grade is not in the employee grade catalog
    pub enforce_grade_links: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            enforce_grade_links: true,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredLevel {
    level: Level,
    seq: u64,
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    options: StoreOptions,
    matrices: RwLock<BTreeSet<MatrixId>>,
    grades: RwLock<Vec<Grade>>,
    levels: DashMap<LevelId, StoredLevel>,
    next_seq: AtomicU64,
    write_lock: Mutex<()>,
}

impl InMemoryStore {
    /// Create empty store with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty store
    #[inline]
    #[must_use]
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Store options
    #[inline]
    #[must_use]
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Number of levels across all matrices
    #[inline]
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Rebuild a store from a snapshot
    ///
    /// Level ids are kept; every level is re-checked against the same
    /// constraints as an insert.
    ///
    /// # Errors
    /// The first constraint the snapshot violates.
    pub fn from_snapshot(
        snapshot: StoreSnapshot,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        let store = Self::with_options(options);
        for matrix in snapshot.matrices {
            store.put_matrix(matrix)?;
        }
        for grade in snapshot.grades {
            store.put_grade(grade)?;
        }
        for level in snapshot.levels {
            if store.levels.contains_key(&level.id) {
                return Err(StoreError::duplicate(EntityKind::Level, &level.id));
            }
            let id = level.id.clone();
            let draft = LevelDraft::new(level.matrix, level.grade, level.pairs);
            store.check_draft(&draft, None)?;
            store.put_level(id, draft);
        }
        tracing::debug!(levels = store.levels.len(), "store restored from snapshot");
        Ok(store)
    }

    /// Capture the current contents
    ///
    /// Levels are listed in insertion order so a reload keeps list order.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let _guard = self.write_lock.lock();
        let mut stored: Vec<StoredLevel> = self.levels.iter().map(|e| e.value().clone()).collect();
        stored.sort_by_key(|s| s.seq);
        StoreSnapshot {
            matrices: self.matrices.read().iter().cloned().collect(),
            grades: self.grades.read().clone(),
            levels: stored.into_iter().map(|s| s.level).collect(),
        }
    }

    fn put_matrix(&self, id: MatrixId) -> Result<(), StoreError> {
        let mut matrices = self.matrices.write();
        if matrices.contains(&id) {
            return Err(StoreError::duplicate(EntityKind::Matrix, &id));
        }
        matrices.insert(id);
        Ok(())
    }

    fn put_grade(&self, grade: Grade) -> Result<(), StoreError> {
        let mut grades = self.grades.write();
        if grades.contains(&grade) {
            return Err(StoreError::duplicate(EntityKind::Grade, &grade));
        }
        grades.push(grade);
        Ok(())
    }

    fn put_level(&self, id: LevelId, draft: LevelDraft) -> Level {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let level = draft.into_level(id.clone());
        self.levels.insert(
            id,
            StoredLevel {
                level: level.clone(),
                seq,
            },
        );
        level
    }

    /// Constraint checks shared by insert, update and restore
    fn check_draft(&self, draft: &LevelDraft, existing: Option<&LevelId>) -> Result<(), StoreError> {
        if !self.matrices.read().contains(&draft.matrix) {
            return Err(StoreError::not_found(EntityKind::Matrix, &draft.matrix));
        }
        if self.options.enforce_grade_links && !self.grades.read().contains(&draft.grade) {
            return Err(StoreError::UnknownGrade(draft.grade.clone()));
        }
        if let Some(scale) = draft.duplicate_scale() {
            return Err(StoreError::DuplicateScale(scale));
        }
        let clash = self.levels.iter().any(|entry| {
            let level = &entry.value().level;
            Some(&level.id) != existing && level.matrix == draft.matrix && level.grade == draft.grade
        });
        if clash {
            return Err(StoreError::DuplicateGrade {
                matrix: draft.matrix.clone(),
                grade: draft.grade.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_levels(&self, query: &LevelQuery) -> Result<Vec<LevelSummary>, StoreError> {
        let mut rows: Vec<(u64, LevelSummary)> = self
            .levels
            .iter()
            .filter(|entry| entry.value().level.matrix == query.matrix)
            .map(|entry| (entry.value().seq, entry.value().level.summary()))
            .collect();

        match query.order_by {
            LevelOrder::GradeAsc => rows.sort_by(|(sa, a), (sb, b)| {
                a.grade.as_str().cmp(b.grade.as_str()).then(sa.cmp(sb))
            }),
            LevelOrder::Inserted => rows.sort_by_key(|(seq, _)| *seq),
        }
        Ok(rows.into_iter().map(|(_, summary)| summary).collect())
    }

    async fn get_level(&self, id: &LevelId) -> Result<Level, StoreError> {
        self.levels
            .get(id)
            .map(|entry| entry.value().level.clone())
            .ok_or_else(|| StoreError::not_found(EntityKind::Level, id))
    }

    async fn insert_level(&self, draft: LevelDraft) -> Result<Level, StoreError> {
        let _guard = self.write_lock.lock();
        self.check_draft(&draft, None)?;
        let level = self.put_level(LevelId::generate(), draft);
        tracing::debug!(level = %level.id, matrix = %level.matrix, grade = %level.grade, "level inserted");
        Ok(level)
    }

    async fn update_level(&self, id: &LevelId, draft: LevelDraft) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        if !self.levels.contains_key(id) {
            return Err(StoreError::not_found(EntityKind::Level, id));
        }
        self.check_draft(&draft, Some(id))?;
        if let Some(mut entry) = self.levels.get_mut(id) {
            entry.level = draft.into_level(id.clone());
        }
        tracing::debug!(level = %id, "level replaced");
        Ok(())
    }

    async fn delete_level(&self, id: &LevelId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        self.levels
            .remove(id)
            .map(|_| tracing::debug!(level = %id, "level deleted"))
            .ok_or_else(|| StoreError::not_found(EntityKind::Level, id))
    }

    async fn list_matrices(&self) -> Result<Vec<MatrixId>, StoreError> {
        Ok(self.matrices.read().iter().cloned().collect())
    }

    async fn matrix_exists(&self, id: &MatrixId) -> Result<bool, StoreError> {
        Ok(self.matrices.read().contains(id))
    }

    async fn insert_matrix(&self, id: MatrixId) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        self.put_matrix(id)
    }

    async fn delete_matrix(&self, id: &MatrixId) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock();
        if !self.matrices.write().remove(id) {
            return Err(StoreError::not_found(EntityKind::Matrix, id));
        }
        let before = self.levels.len();
        self.levels.retain(|_, stored| &stored.level.matrix != id);
        let removed = before - self.levels.len();
        tracing::debug!(matrix = %id, removed, "matrix deleted");
        Ok(removed)
    }

    async fn list_grades(&self) -> Result<Vec<Grade>, StoreError> {
        Ok(self.grades.read().clone())
    }

    async fn insert_grade(&self, grade: Grade) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        self.put_grade(grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paymatrix_model::{Amount, Pair, Scale};
    use std::str::FromStr;

    fn matrix(name: &str) -> MatrixId {
        MatrixId::from_str(name).unwrap()
    }

    fn grade(label: &str) -> Grade {
        Grade::from_str(label).unwrap()
    }

    fn pairs(values: &[(u32, u64)]) -> Vec<Pair> {
        values
            .iter()
            .map(|&(s, a)| Pair::new(Scale::new(s).unwrap(), Amount::from_units(a)))
            .collect()
    }

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_matrix(matrix("Standard")).await.unwrap();
        for g in ["1", "2", "Grade 3"] {
            store.insert_grade(grade(g)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = seeded().await;
        let draft = LevelDraft::new(matrix("Standard"), grade("1"), pairs(&[(1, 5000)]));
        let level = store.insert_level(draft).await.unwrap();

        let fetched = store.get_level(&level.id).await.unwrap();
        assert_eq!(fetched, level);
        assert_eq!(store.level_count(), 1);
    }

    #[tokio::test]
    async fn unknown_matrix_rejected() {
        let store = seeded().await;
        let draft = LevelDraft::new(matrix("Nope"), grade("1"), pairs(&[(1, 1)]));
        let err = store.insert_level(draft).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn grade_link_enforced() {
        let store = seeded().await;
        let draft = LevelDraft::new(matrix("Standard"), grade("9"), pairs(&[(1, 1)]));
        assert!(matches!(
            store.insert_level(draft.clone()).await,
            Err(StoreError::UnknownGrade(_))
        ));

        let lax = InMemoryStore::with_options(StoreOptions {
            enforce_grade_links: false,
        });
        lax.insert_matrix(matrix("Standard")).await.unwrap();
        assert!(lax.insert_level(draft).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_grade_rejected_per_matrix() {
        let store = seeded().await;
        store.insert_matrix(matrix("Project")).await.unwrap();
        let d1 = LevelDraft::new(matrix("Standard"), grade("1"), pairs(&[(1, 1)]));
        store.insert_level(d1.clone()).await.unwrap();

        assert!(matches!(
            store.insert_level(d1).await,
            Err(StoreError::DuplicateGrade { .. })
        ));

        let other = LevelDraft::new(matrix("Project"), grade("1"), pairs(&[(1, 1)]));
        assert!(store.insert_level(other).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_scale_rejected() {
        let store = seeded().await;
        let draft = LevelDraft::new(matrix("Standard"), grade("1"), pairs(&[(1, 1), (1, 2)]));
        assert!(matches!(
            store.insert_level(draft).await,
            Err(StoreError::DuplicateScale(_))
        ));
    }

    #[tokio::test]
    async fn update_replaces_whole_level() {
        let store = seeded().await;
        let level = store
            .insert_level(LevelDraft::new(
                matrix("Standard"),
                grade("1"),
                pairs(&[(1, 5000), (2, 5500)]),
            ))
            .await
            .unwrap();

        // keeping its own grade is not a clash
        store
            .update_level(
                &level.id,
                LevelDraft::new(matrix("Standard"), grade("1"), pairs(&[(3, 9000)])),
            )
            .await
            .unwrap();
        let fetched = store.get_level(&level.id).await.unwrap();
        assert_eq!(fetched.pairs, pairs(&[(3, 9000)]));

        store
            .update_level(
                &level.id,
                LevelDraft::new(matrix("Standard"), grade("2"), pairs(&[(3, 9000)])),
            )
            .await
            .unwrap();
        assert_eq!(store.get_level(&level.id).await.unwrap().grade, grade("2"));
    }

    #[tokio::test]
    async fn update_missing_level() {
        let store = seeded().await;
        let id = LevelId::from_str("missing").unwrap();
        let draft = LevelDraft::new(matrix("Standard"), grade("1"), pairs(&[(1, 1)]));
        assert!(store.update_level(&id, draft).await.unwrap_err().is_not_found());
        assert!(store.delete_level(&id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_filters_and_orders() {
        let store = seeded().await;
        store.insert_matrix(matrix("Project")).await.unwrap();
        for g in ["Grade 3", "2", "1"] {
            store
                .insert_level(LevelDraft::new(matrix("Standard"), grade(g), pairs(&[(1, 1)])))
                .await
                .unwrap();
        }
        store
            .insert_level(LevelDraft::new(matrix("Project"), grade("1"), pairs(&[(1, 1)])))
            .await
            .unwrap();

        let query = LevelQuery::for_matrix(matrix("Standard"));
        let by_grade: Vec<String> = store
            .list_levels(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.grade.to_string())
            .collect();
        assert_eq!(by_grade, vec!["1", "2", "Grade 3"]);

        let inserted: Vec<String> = store
            .list_levels(&query.with_order(LevelOrder::Inserted))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.grade.to_string())
            .collect();
        assert_eq!(inserted, vec!["Grade 3", "2", "1"]);
    }

    #[tokio::test]
    async fn delete_matrix_cascades() {
        let store = seeded().await;
        store.insert_matrix(matrix("Project")).await.unwrap();
        store
            .insert_level(LevelDraft::new(matrix("Standard"), grade("1"), pairs(&[(1, 1)])))
            .await
            .unwrap();
        store
            .insert_level(LevelDraft::new(matrix("Project"), grade("1"), pairs(&[(1, 1)])))
            .await
            .unwrap();

        assert_eq!(store.delete_matrix(&matrix("Standard")).await.unwrap(), 1);
        assert!(!store.matrix_exists(&matrix("Standard")).await.unwrap());
        assert_eq!(store.level_count(), 1);
        assert!(store.delete_matrix(&matrix("Standard")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn duplicate_catalog_entries_rejected() {
        let store = seeded().await;
        assert!(matches!(
            store.insert_matrix(matrix("Standard")).await,
            Err(StoreError::Duplicate { kind: EntityKind::Matrix, .. })
        ));
        assert!(matches!(
            store.insert_grade(grade("1")).await,
            Err(StoreError::Duplicate { kind: EntityKind::Grade, .. })
        ));
    }
}
