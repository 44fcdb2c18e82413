//! Testing utilities for the pay matrix workspace
//!
//! Shared fixtures and a call-counting store wrapper.

#![allow(missing_docs)]

use async_trait::async_trait;
use paymatrix_model::{
    Amount, Grade, Level, LevelDraft, LevelId, LevelSummary, MatrixId, Pair, RawPair, Scale,
    STANDARD_MATRIX,
};
use paymatrix_store::{DocumentStore, InMemoryStore, LevelQuery, StoreError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn matrix(name: &str) -> MatrixId {
    MatrixId::new(name).unwrap()
}

pub fn grade(label: &str) -> Grade {
    Grade::new(label).unwrap()
}

pub fn pair(scale: u32, units: u64) -> Pair {
    Pair::new(Scale::new(scale).unwrap(), Amount::from_units(units))
}

pub fn pairs(values: &[(u32, u64)]) -> Vec<Pair> {
    values.iter().map(|&(scale, units)| pair(scale, units)).collect()
}

pub fn raw(rows: &[(&str, &str)]) -> Vec<RawPair> {
    rows.iter().map(|&(scale, amount)| RawPair::new(scale, amount)).collect()
}

/// Grade labels `"1"` to `"5"` in the catalog and an empty `Standard` matrix
pub async fn empty_standard() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.insert_matrix(matrix(STANDARD_MATRIX)).await.unwrap();
    for n in 1..=5 {
        store.insert_grade(grade(&n.to_string())).await.unwrap();
    }
    store
}

/// `Standard` with grade 1 = {1: 5000, 3: 7000} and grade 2 = {1: 6000}
///
/// Grade 2 is inserted first so insertion order differs from display order.
pub async fn standard_scenario() -> InMemoryStore {
    let store = empty_standard().await;
    let standard = matrix(STANDARD_MATRIX);
    store
        .insert_level(LevelDraft::new(standard.clone(), grade("2"), pairs(&[(1, 6000)])))
        .await
        .unwrap();
    store
        .insert_level(LevelDraft::new(
            standard,
            grade("1"),
            pairs(&[(1, 5000), (3, 7000)]),
        ))
        .await
        .unwrap();
    store
}

/// Store wrapper that counts calls and can reject mutations
#[derive(Debug, Default)]
pub struct CountingStore<S> {
    inner: S,
    reads: AtomicUsize,
    mutations: AtomicUsize,
    fail_mutations: AtomicBool,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
            mutations: AtomicUsize::new(0),
            fail_mutations: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.reads() + self.mutations()
    }

    /// Make every later mutation fail with a backend error
    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn mutate(&self) -> Result<(), StoreError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for CountingStore<S> {
    async fn list_levels(&self, query: &LevelQuery) -> Result<Vec<LevelSummary>, StoreError> {
        self.read();
        self.inner.list_levels(query).await
    }

    async fn get_level(&self, id: &LevelId) -> Result<Level, StoreError> {
        self.read();
        self.inner.get_level(id).await
    }

    async fn insert_level(&self, draft: LevelDraft) -> Result<Level, StoreError> {
        self.mutate()?;
        self.inner.insert_level(draft).await
    }

    async fn update_level(&self, id: &LevelId, draft: LevelDraft) -> Result<(), StoreError> {
        self.mutate()?;
        self.inner.update_level(id, draft).await
    }

    async fn delete_level(&self, id: &LevelId) -> Result<(), StoreError> {
        self.mutate()?;
        self.inner.delete_level(id).await
    }

    async fn list_matrices(&self) -> Result<Vec<MatrixId>, StoreError> {
        self.read();
        self.inner.list_matrices().await
    }

    async fn matrix_exists(&self, id: &MatrixId) -> Result<bool, StoreError> {
        self.read();
        self.inner.matrix_exists(id).await
    }

    async fn insert_matrix(&self, id: MatrixId) -> Result<(), StoreError> {
        self.mutate()?;
        self.inner.insert_matrix(id).await
    }

    async fn delete_matrix(&self, id: &MatrixId) -> Result<usize, StoreError> {
        self.mutate()?;
        self.inner.delete_matrix(id).await
    }

    async fn list_grades(&self) -> Result<Vec<Grade>, StoreError> {
        self.read();
        self.inner.list_grades().await
    }

    async fn insert_grade(&self, grade: Grade) -> Result<(), StoreError> {
        self.mutate()?;
        self.inner.insert_grade(grade).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_and_injects_failures() {
        let store = CountingStore::new(standard_scenario().await);
        store.list_grades().await.unwrap();
        assert_eq!(store.reads(), 1);

        store.fail_mutations(true);
        let err = store.insert_grade(grade("9")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(store.mutations(), 1);
        assert_eq!(store.inner().list_grades().await.unwrap().len(), 5);
    }
}
