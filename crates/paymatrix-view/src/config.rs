//! View configuration

use crate::error::ConfigError;
use paymatrix_model::{NumberFormat, ValidationPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// View-model configuration
///
/// Loaded from TOML; every field is optional.
///
/// ```toml
/// detail_fetch_concurrency = 4
/// validation = "strict"
///
/// [number_format]
/// group_separator = " "
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Maximum level detail fetches in flight during a load
    pub detail_fetch_concurrency: usize,
    /// Treatment of malformed rows on submit
    pub validation: ValidationPolicy,
    /// Grid cell formatting
    pub number_format: NumberFormat,
}

impl ViewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With detail fetch concurrency
    #[inline]
    #[must_use]
    pub fn with_detail_fetch_concurrency(mut self, limit: usize) -> Self {
        self.detail_fetch_concurrency = limit;
        self
    }

    /// With validation policy
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, policy: ValidationPolicy) -> Self {
        self.validation = policy;
        self
    }

    /// With number format
    #[inline]
    #[must_use]
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Malformed TOML or an invalid value
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// I/O failure, malformed TOML or an invalid value
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detail_fetch_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "detail_fetch_concurrency must be at least 1".to_string(),
            ));
        }
        if self.number_format.max_fraction_digits > 28 {
            return Err(ConfigError::Invalid(
                "number_format.max_fraction_digits must be at most 28".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            detail_fetch_concurrency: 8,
            validation: ValidationPolicy::Lenient,
            number_format: NumberFormat::default(),
        }
    }
}
