use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

/// A question bank label. The backend owns it; the client treats it as an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` for blank labels.
    pub fn new(name: impl Into<String>) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-category counters reported by the backend for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub answered: u32,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
}

impl CategorySummary {
    /// Summary for a category the student has never opened.
    #[must_use]
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            total_questions: 0,
            answered: 0,
            correct: 0,
            incorrect: 0,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.total_questions.saturating_sub(self.answered)
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.answered > 0
    }
}

/// Banks grouped under the verbal section; every other bank is quantitative.
pub const VERBAL_CATEGORIES: [&str; 7] = [
    "اللفظي",
    "استيعاب المقروء",
    "التناظر اللفظي",
    "الخطأ السياقي",
    "الارتباط والاختلاف",
    "إكمال الجمل",
    "الكلمة الشاذة",
];

/// Filter applied to the category picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Verbal,
    Quantitative,
}

impl CategoryFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Verbal, Self::Quantitative];

    #[must_use]
    pub fn matches(self, category: &Category) -> bool {
        let verbal = VERBAL_CATEGORIES.contains(&category.as_str());
        match self {
            Self::All => true,
            Self::Verbal => verbal,
            Self::Quantitative => !verbal,
        }
    }

    /// Keep the summaries accepted by this filter, in input order.
    #[must_use]
    pub fn filter_summaries<'a>(self, summaries: &'a [CategorySummary]) -> Vec<&'a CategorySummary> {
        summaries
            .iter()
            .filter(|summary| self.matches(&summary.category))
            .collect()
    }
}
