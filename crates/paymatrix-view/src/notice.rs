//! User-visible messages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Success
    Green,
    /// Fixable input problem
    Orange,
    /// Failure
    Red,
    /// Informational
    Blue,
}

/// Message shown to the user after an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Heading
    pub title: String,
    /// Body
    pub message: String,
    /// Colour
    pub indicator: Indicator,
}

impl Notice {
    /// Create notice
    #[inline]
    pub fn new(title: impl Into<String>, message: impl Into<String>, indicator: Indicator) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            indicator,
        }
    }

    /// Success notice
    #[inline]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success", message, Indicator::Green)
    }

    /// Check for a success notice
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.indicator == Indicator::Green
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
