//! Scale column identifiers

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Pay step column (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scale(NonZeroU32);

impl Scale {
    /// Create scale
    ///
    /// # Errors
    /// `ModelError::InvalidScale` for zero
    pub fn new(value: u32) -> Result<Self, ModelError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(ModelError::InvalidScale(0))
    }

    /// Numeric value
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<i64> for Scale {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ModelError::InvalidScale(value))
    }
}

impl From<NonZeroU32> for Scale {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rejected() {
        assert!(Scale::new(0).is_err());
        assert_eq!(Scale::new(22).unwrap().get(), 22);
    }

    #[test]
    fn from_i64_bounds() {
        assert!(Scale::try_from(-1i64).is_err());
        assert!(Scale::try_from(i64::from(u32::MAX) + 1).is_err());
        assert_eq!(Scale::try_from(5i64).unwrap().get(), 5);
    }

    #[test]
    fn ordering_is_numeric() {
        let mut scales = vec![Scale::new(10).unwrap(), Scale::new(2).unwrap(), Scale::new(1).unwrap()];
        scales.sort();
        let values: Vec<u32> = scales.into_iter().map(Scale::get).collect();
        assert_eq!(values, vec![1, 2, 10]);
    }
}
