//! Grade labels
//!
//! Grades are free-form labels. Both `7` and `Grade 7` are accepted, so
//! ordering goes through [`Grade::sort_key`] rather than string comparison.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row label of a pay matrix
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Grade(String);

impl Grade {
    /// Create grade, trimming surrounding whitespace
    ///
    /// # Errors
    /// `ModelError::EmptyGrade` if the label is blank
    pub fn new(label: impl AsRef<str>) -> Result<Self, ModelError> {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyGrade);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric ordering key
    ///
    /// All ASCII digits in the label, concatenated and parsed. Labels without
    /// digits map to 0; overlong digit runs saturate.
    ///
    /// # Examples
    /// - `Grade 2`, `2`, `02` → 2
    /// - `Senior` → 0
    #[must_use]
    pub fn sort_key(&self) -> u64 {
        sort_key(&self.0)
    }

    /// Digit suffix of a `Grade N` label, or the label itself when it is all digits
    ///
    /// Used to match catalog grades against numeric seed keys.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        let label = self.0.as_str();
        if is_digits(label) {
            return Some(label);
        }
        label
            .strip_prefix("Grade ")
            .map(str::trim)
            .filter(|rest| is_digits(rest))
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Sort key for an arbitrary label, see [`Grade::sort_key`]
pub(crate) fn sort_key(label: &str) -> u64 {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

impl FromStr for Grade {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Grade {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for String {
    fn from(value: Grade) -> Self {
        value.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn prefixed_and_bare_share_key() {
        for label in ["Grade 2", "2", "02"] {
            assert_eq!(Grade::new(label).unwrap().sort_key(), 2, "{label}");
        }
    }

    #[test]
    fn no_digits_sorts_first() {
        assert_eq!(Grade::new("Senior").unwrap().sort_key(), 0);
    }

    #[test]
    fn scattered_digits_concatenate() {
        assert_eq!(Grade::new("G1-B2").unwrap().sort_key(), 12);
    }

    #[test]
    fn overflow_saturates() {
        let g = Grade::new("99999999999999999999999").unwrap();
        assert_eq!(g.sort_key(), u64::MAX);
    }

    #[test]
    fn number_extraction() {
        assert_eq!(Grade::new("7").unwrap().number(), Some("7"));
        assert_eq!(Grade::new("Grade 12").unwrap().number(), Some("12"));
        assert_eq!(Grade::new("Grade X").unwrap().number(), None);
        assert_eq!(Grade::new("Senior 3").unwrap().number(), None);
    }

    #[test]
    fn blank_rejected() {
        assert_eq!(Grade::new(" \t"), Err(ModelError::EmptyGrade));
    }

    proptest! {
        #[test]
        fn prop_grade_prefix_does_not_change_key(n in 0u32..1_000_000) {
            let bare = Grade::new(n.to_string()).unwrap();
            let prefixed = Grade::new(format!("Grade {n}")).unwrap();
            prop_assert_eq!(bare.sort_key(), u64::from(n));
            prop_assert_eq!(prefixed.sort_key(), u64::from(n));
        }
    }
}
