//! The state container produced by the pagination transducer.

use crate::core::SortOrder;
use serde::{Deserialize, Serialize};

/// A wrapped reducer state together with its derived pagination view.
///
/// `cache_list` is the filtered and sorted view of the wrapped list and
/// `page_list` is the current page of it. Both are always reconstructible
/// from `base` and the pagination parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginationState<B, T> {
    /// State owned by the wrapped reducer
    pub base: B,
    /// Filtered and sorted items, the list pages are cut from
    pub cache_list: Vec<T>,
    /// Items on the current page
    pub page_list: Vec<T>,
    /// 1-based current page
    pub page: usize,
    /// Number of pages in `cache_list`
    pub total: usize,
    /// Page size, zero meaning "everything on one page"
    pub per: usize,
    pub order: SortOrder,
    pub by: String,
    pub filter: String,
}

impl<B, T> PaginationState<B, T> {
    /// Whether a page follows the current one.
    pub fn has_next(&self) -> bool {
        self.page < self.total
    }

    /// Whether a page precedes the current one.
    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.total > 0
    }

    /// Number of items across all pages, after filtering.
    pub fn item_count(&self) -> usize {
        self.cache_list.len()
    }
}
