//! Page bookkeeping for listing endpoints.

use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Raw `page`/`limit` query parameters. Kept as strings so junk input falls
/// back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Sanitized page position: `page >= 1`, `1 <= limit <= 50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Apply defaults and clamping to already-parsed numbers.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(value) if value > 0 => value as u64,
            _ => 1,
        };
        let limit = match limit {
            Some(value) if value > 0 => (value as u64).min(MAX_PAGE_LIMIT),
            _ => DEFAULT_PAGE_LIMIT,
        };
        Self { page, limit }
    }

    /// Parse query-string values; unparsable input counts as absent.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|value| value.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(limit))
    }

    /// Number of rows to skip before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn page_for(&self, total: u64) -> Page {
        Page {
            page: self.page,
            limit: self.limit,
            total,
        }
    }
}

/// Pagination block of a listing response.
///
/// Only `page`, `limit` and `total` are held; the derived fields are
/// computed when serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

impl Page {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.limit.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 6)?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("limit", &self.limit)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("totalPages", &self.total_pages())?;
        state.serialize_field("hasNext", &self.has_next())?;
        state.serialize_field("hasPrev", &self.has_prev())?;
        state.end()
    }
}

/// `paginate(page, limit, total)` with the usual defaults and clamping.
pub fn paginate(page: Option<i64>, limit: Option<i64>, total: u64) -> Page {
    PageRequest::new(page, limit).page_for(total)
}

/// A page of rows plus its bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Page,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: Page) -> Self {
        Self { data, pagination }
    }
}
