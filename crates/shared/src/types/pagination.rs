//! Pagination types for list procedures.

use serde::{Deserialize, Serialize};

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u64 = 1;
/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    12
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Checks `page >= 1` and `limit` within `[1, 100]`.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be at least 1".to_string());
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.limit) {
            return Err(format!(
                "limit must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}"
            ));
        }
        Ok(())
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Whether this page starts at or after the last of `total` items.
    ///
    /// Such a page is empty; callers skip the row query, whose offset may not
    /// fit the database's signed integer type.
    #[must_use]
    pub fn is_past_end(&self, total: u64) -> bool {
        self.offset() >= total
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total: u64,
    /// Current page number.
    pub page: u64,
    /// Items per page.
    pub limit: u64,
    /// Total number of pages, `ceil(total / limit)`.
    pub total_pages: u64,
}

impl PageMeta {
    /// Computes the metadata for a request against `total` matching items.
    ///
    /// An empty result set has zero pages.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        let total_pages = if request.limit == 0 {
            0
        } else {
            total.div_ceil(request.limit)
        };

        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages,
        }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
