//! Search results and pagination.

use std::ops::Range;

use crate::search::ListingFacets;
use serde::{Deserialize, Serialize};

/// Pages shown on each side of the current page in the pager.
pub const PAGE_WINDOW_RADIUS: usize = 2;

/// Pagination info.
///
/// An empty result has `total_pages == 0` and `page == 1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed), already clamped.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info, clamping `page` into `[1, max(1, total_pages)]`.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Item index range of this page within the full result set.
    pub fn range(&self) -> Range<usize> {
        let start = self.offset().min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.range().end
    }

    /// Page the "Next" button leads to, if any.
    pub fn next_page(&self) -> Option<usize> {
        self.has_next.then_some(self.page + 1)
    }

    /// Page the "Prev" button leads to, if any.
    pub fn prev_page(&self) -> Option<usize> {
        self.has_prev.then_some(self.page - 1)
    }

    /// Check if `page` is a valid navigation target.
    pub fn can_go_to(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Pager entries: the first page, the last page, and pages within
    /// `radius` of the current one, with an ellipsis wherever numbers are
    /// skipped.
    pub fn page_links(&self, radius: usize) -> Vec<PageLink> {
        let mut links = Vec::new();
        let mut previous: Option<usize> = None;

        for n in 1..=self.total_pages {
            let near_current = n + radius >= self.page && n <= self.page + radius;
            if n != 1 && n != self.total_pages && !near_current {
                continue;
            }
            if let Some(prev) = previous {
                if n != prev + 1 {
                    links.push(PageLink::Ellipsis);
                }
            }
            links.push(PageLink::Page {
                number: n,
                current: n == self.page,
            });
            previous = Some(n);
        }

        links
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::DEFAULT_PAGE_SIZE, 0)
    }
}

/// One entry in the pager.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Search results container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults<T> {
    /// Items on the requested page, in sorted order.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
    /// Facets over the full filtered set (if requested).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<ListingFacets>,
}

impl<T> SearchResults<T> {
    /// Create new search results.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self {
            items,
            pagination,
            facets: None,
        }
    }

    /// Create empty results.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Pagination::default())
    }

    /// Set facets.
    pub fn with_facets(mut self, facets: ListingFacets) -> Self {
        self.facets = Some(facets);
        self
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Transform the items, keeping pagination and facets.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchResults<U> {
        SearchResults {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
            facets: self.facets,
        }
    }
}

impl<T> Default for SearchResults<T> {
    fn default() -> Self {
        Self::empty()
    }
}
