//! Pay Matrix Store
//!
//! The document store is an external collaborator. This crate defines the
//! minimal CRUD contract the engine needs ([`DocumentStore`]) and ships an
//! in-memory implementation ([`InMemoryStore`]) that enforces the same
//! constraints a real backend would, with JSON snapshots for persistence.
//!
//! # Example
//!
//! ```rust,ignore
//! use paymatrix_store::{DocumentStore, InMemoryStore, LevelQuery};
//!
//! let store = InMemoryStore::new();
//! store.insert_matrix(matrix.clone()).await?;
//! let summaries = store.list_levels(&LevelQuery::for_matrix(matrix)).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod memory;
mod snapshot;
mod store;

pub use error::{EntityKind, StoreError};
pub use memory::{InMemoryStore, StoreOptions};
pub use snapshot::StoreSnapshot;
pub use store::{DocumentStore, LevelOrder, LevelQuery};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
