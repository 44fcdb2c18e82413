//! Pay Matrix Seed
//!
//! Bulk creation of whole matrices:
//! - the canonical `Standard` matrix (18 grades x 22 scales), matched against
//!   the grades already present in the employee grade catalog
//! - named matrices from a JSON or YAML seed file, creating missing grades
//!
//! Seeding always deletes and recreates the target matrix.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod data;
mod error;
mod seeder;
mod standard;

pub use data::{MatrixData, NamedMatrix, SeedFile};
pub use error::SeedError;
pub use seeder::{BulkSeedOutcome, MatrixSeeder, SeedReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
