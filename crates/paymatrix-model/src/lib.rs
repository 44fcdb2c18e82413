//! Pay Matrix Model
//!
//! Domain types for a grade x scale compensation table.
//!
//! # Core Concepts
//!
//! - [`Grade`]: row label, ordered by the digits embedded in it
//! - [`Scale`]: positive integer column identifier
//! - [`Amount`]: non-negative decimal cell value
//! - [`Level`]: one grade's row, owning its [`Pair`]s
//! - [`RenderedMatrix`]: the pivoted grid (or the "no data" state)
//!
//! # Example
//!
//! ```rust,ignore
//! use paymatrix_model::{pivot, validate_pairs, RawPair, ValidationPolicy};
//!
//! let checked = validate_pairs(&[RawPair::new("1", "5000")], ValidationPolicy::Lenient)?;
//! assert_eq!(checked.pairs.len(), 1);
//!
//! let rendered = pivot(&levels);
//! println!("{} columns", rendered.columns().len());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod amount;
mod error;
mod grade;
mod grid;
mod ids;
mod level;
mod pairs;
mod scale;

// Re-exports
pub use amount::{Amount, NumberFormat};
pub use error::{ModelError, ValidationError};
pub use grade::Grade;
pub use grid::{pivot, sort_levels, GridRow, MatrixGrid, RenderedMatrix};
pub use ids::{LevelId, MatrixId};
pub use level::{Level, LevelDraft, LevelSummary, Pair};
pub use pairs::{
    parse_amount, parse_scale, validate_pairs, DropReason, DroppedRow, PairValidation, RawPair,
    ValidationPolicy,
};
pub use scale::Scale;

/// Name of the canonical, bulk-seeded matrix
pub const STANDARD_MATRIX: &str = "Standard";

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
