//! List filtering for content queries.

use mediashelf_shared::types::PageRequest;
use serde::{Deserialize, Serialize};

use super::error::ContentError;
use super::types::{ContentCategory, ContentRecord};

/// Escape character used in LIKE patterns built by [`ContentFilter::like_pattern`].
pub const LIKE_ESCAPE: char = '\\';

/// List query as submitted; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentListQuery {
    /// Page number, defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Page size, defaults to 12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Category, wire representation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ContentListQuery {
    /// Split into a validated filter and page request.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Validation` for out-of-range paging or an unknown category.
    pub fn into_parts(self) -> Result<(ContentFilter, PageRequest), ContentError> {
        let defaults = PageRequest::default();
        let page = PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        );
        page.validate().map_err(ContentError::Validation)?;

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::parse::<ContentCategory>)
            .transpose()?;

        let mut filter = ContentFilter::new();
        if let Some(category) = category {
            filter = filter.with_category(category);
        }
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }

        Ok((filter, page))
    }
}

/// Predicate over content records: category AND (title OR description OR platform).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    category: Option<ContentCategory>,
    search: Option<String>,
}

impl ContentFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one category.
    #[must_use]
    pub const fn with_category(mut self, category: ContentCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the search term. Blank terms are ignored.
    #[must_use]
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    /// Category restriction, if any.
    #[must_use]
    pub const fn category(&self) -> Option<ContentCategory> {
        self.category
    }

    /// Trimmed search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none()
    }

    /// Lowercased `%term%` pattern for a `LIKE` comparison against lowercased columns.
    ///
    /// `%`, `_` and the escape character are escaped with [`LIKE_ESCAPE`].
    #[must_use]
    pub fn like_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(&term.to_lowercase())))
    }

    /// Evaluates the filter against a record in memory.
    #[must_use]
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if self.category.is_some_and(|c| c != record.category) {
            return false;
        }

        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let term = term.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&term);

        contains(&record.title)
            || contains(&record.description)
            || record.platform.as_deref().is_some_and(contains)
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
