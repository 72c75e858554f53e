/// Pagination support for queries
///
/// Standard pagination model used across all bounded contexts
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// Upper bound for `page_size` unless overridden by configuration
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 6;

/// Pagination parameters for queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Build parameters from raw request values, rejecting pages below 1 and
    /// sizes outside `1..=max_page_size`.
    pub fn validated(page: i64, page_size: i64, max_page_size: u32) -> AppResult<Self> {
        if page < 1 {
            return Err(AppError::ValidationError(
                "Page must be greater than or equal to 1".to_string(),
            ));
        }
        if page_size < 1 || page_size > i64::from(max_page_size) {
            return Err(AppError::ValidationError(format!(
                "Page size must be between 1 and {}",
                max_page_size
            )));
        }
        let page = u32::try_from(page)
            .map_err(|_| AppError::ValidationError("Page is too large".to_string()))?;

        Ok(Self::new(page, page_size as u32))
    }

    /// Calculate offset for database queries
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    /// Get limit for database queries
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn total_pages(&self, total_count: u64) -> u32 {
        total_count.div_ceil(u64::from(self.page_size)) as u32
    }

    /// Fails when the requested page lies past the last page of a non-empty set.
    pub fn ensure_page_exists(&self, total_count: u64) -> AppResult<()> {
        if total_count > 0 && self.page > self.total_pages(total_count) {
            return Err(AppError::NotFound(format!(
                "Page {} does not exist",
                self.page
            )));
        }
        Ok(())
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub requested_at: DateTime<Utc>,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, params: &PaginationParams) -> Self {
        Self {
            items,
            total_count,
            page: params.page,
            page_size: params.page_size,
            total_pages: params.total_pages(total_count),
            requested_at: Utc::now(),
        }
    }

    /// Envelope returned when nothing matched at all.
    pub fn empty(params: &PaginationParams) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: 0,
            page_size: params.page_size,
            total_pages: 0,
            requested_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shape a page from a total count and a loader for the requested window.
///
/// The loader only runs when the page exists; an empty set yields
/// [`PaginatedResult::empty`].
pub fn paginate<T, F>(
    params: &PaginationParams,
    total_count: u64,
    load_window: F,
) -> AppResult<PaginatedResult<T>>
where
    F: FnOnce(i64, i64) -> AppResult<Vec<T>>,
{
    if total_count == 0 {
        return Ok(PaginatedResult::empty(params));
    }
    params.ensure_page_exists(total_count)?;

    let items = load_window(params.offset(), params.limit())?;
    Ok(PaginatedResult::new(items, total_count, params))
}
