//! Product categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a form value is not one of the known category slugs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct CategoryError(pub String);

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Course,
    Ebook,
    Template,
    Service,
    Other,
}

impl Category {
    /// Every category, in the order the form lists them.
    pub const ALL: [Self; 5] = [
        Self::Course,
        Self::Ebook,
        Self::Template,
        Self::Service,
        Self::Other,
    ];

    /// Stable identifier used as the form value.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Ebook => "ebook",
            Self::Template => "template",
            Self::Service => "service",
            Self::Other => "other",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Ebook => "E-book",
            Self::Template => "Template",
            Self::Service => "Service",
            Self::Other => "Other",
        }
    }

    /// Look up a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError`] if the slug is unknown.
    pub fn from_slug(slug: &str) -> Result<Self, CategoryError> {
        let slug = slug.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == slug)
            .ok_or_else(|| CategoryError(slug.to_owned()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_five_categories() {
        assert_eq!(Category::ALL.len(), 5);
    }

    #[test]
    fn test_from_slug_finds_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_slug(category.slug()).unwrap(), category);
        }
    }

    #[test]
    fn test_from_slug_rejects_labels_and_unknowns() {
        assert!(Category::from_slug("E-book").is_err());
        assert_eq!(
            Category::from_slug("podcast"),
            Err(CategoryError("podcast".to_owned()))
        );
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&Category::Ebook).unwrap();
        assert_eq!(json, "\"ebook\"");
    }
}
