use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Book, Catalog};

pub const DEFAULT_PAGE: u64 = 0;
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// Raw query-string input. Deserialized as strings so that junk like
/// `?page=abc` falls back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub term: Option<String>,
}

/// Validated pagination and search input for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: u64,
    pub size: u64,
    pub term: Option<String>,
}

impl ListingQuery {
    /// Bad input is treated as "use the default", never as an error.
    ///
    /// A parsed page overrides the default 0 only when positive; there is
    /// no upper bound, a page past the data just comes back empty. A parsed
    /// size overrides the default 15 only when strictly between 0 and 15 —
    /// an explicit `size=15` is out of range and falls back to the default,
    /// which happens to be the same value. The term passes through
    /// unchanged, empty included.
    pub fn resolve(params: ListingParams) -> Self {
        ListingQuery {
            page: resolve_page(params.page.as_deref()),
            size: resolve_size(params.size.as_deref()),
            term: params.term,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

fn resolve_page(raw: Option<&str>) -> u64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(page) if page > 0 => page as u64,
        _ => DEFAULT_PAGE,
    }
}

fn resolve_size(raw: Option<&str>) -> u64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(size) if size > 0 && size < DEFAULT_PAGE_SIZE as i64 => size as u64,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// `size` must be non-zero; `ListingQuery::resolve` guarantees that.
pub fn total_pages(total_count: u64, size: u64) -> u64 {
    total_count.div_ceil(size)
}

/// The shaped result for one listing request.
#[derive(Debug, Serialize)]
pub struct ListingResult {
    pub items: Vec<Book>,
    pub current_page: u64,
    pub total_pages: u64,
}

impl Catalog<'_> {
    /// The listing policy: fetch the requested slice plus the matching
    /// total, both under the same term filter. Read-only.
    pub async fn list(&self, query: &ListingQuery) -> Result<ListingResult> {
        let term = query.term.as_deref();
        let items = self.list_books(query.size, query.offset(), term).await?;
        let total = self.count_books(term).await?;

        Ok(ListingResult {
            items,
            current_page: query.page,
            total_pages: total_pages(total, query.size),
        })
    }
}
