//! Seeding errors

use paymatrix_model::ModelError;
use paymatrix_store::StoreError;

/// Seeding failure
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Store rejected a write
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Seed data holds an invalid grade or amount
    #[error("invalid seed data: {0}")]
    InvalidData(#[from] ModelError),

    /// Seed file could not be read
    #[error("seed file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid JSON
    #[error("seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Seed file is not valid YAML
    #[error("seed file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Scale position does not fit a scale number
    #[error("grade {grade} has too many scales")]
    TooManyScales { grade: String },
}
