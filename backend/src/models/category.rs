//! Urgency category (C1–C5)
//!
//! C1 is the most urgent, C5 the least. Lower numeric value is served first
//! by the urgent-first queue ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when building patient data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatientError {
    #[error("Category {0} is outside the valid range 1-5")]
    InvalidCategory(u8),
}

/// Triage urgency category, guaranteed to lie in 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Category(u8);

impl Category {
    pub const C1: Category = Category(1);
    pub const C2: Category = Category(2);
    pub const C3: Category = Category(3);
    pub const C4: Category = Category(4);
    pub const C5: Category = Category(5);

    /// Every category, most urgent first
    pub const ALL: [Category; 5] = [
        Category::C1,
        Category::C2,
        Category::C3,
        Category::C4,
        Category::C5,
    ];

    /// Build a category from its numeric level
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::Category;
    ///
    /// assert_eq!(Category::new(2).unwrap(), Category::C2);
    /// assert!(Category::new(6).is_err());
    /// ```
    pub fn new(level: u8) -> Result<Self, PatientError> {
        if (1..=5).contains(&level) {
            Ok(Category(level))
        } else {
            Err(PatientError::InvalidCategory(level))
        }
    }

    /// Numeric level (1 = most urgent)
    pub fn level(self) -> u8 {
        self.0
    }

    /// Zero-based position in [`Category::ALL`]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Category {
    type Error = PatientError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Category::new(level)
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_levels() {
        for level in 1..=5u8 {
            let category = Category::new(level).unwrap();
            assert_eq!(category.level(), level);
            assert_eq!(category.index(), (level - 1) as usize);
        }
    }

    #[test]
    fn test_invalid_levels_rejected() {
        assert_eq!(Category::new(0), Err(PatientError::InvalidCategory(0)));
        assert_eq!(Category::new(6), Err(PatientError::InvalidCategory(6)));
    }

    #[test]
    fn test_ordering_most_urgent_smallest() {
        assert!(Category::C1 < Category::C2);
        assert!(Category::C4 < Category::C5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::C3.to_string(), "C3");
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let parsed: Result<Category, _> = serde_json::from_str("9");
        assert!(parsed.is_err());
        let parsed: Category = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, Category::C4);
    }
}
