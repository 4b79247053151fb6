//! List query primitives: filter, sort, reverse and page slicing.
//!
//! All functions are pure and total. They never mutate their input.

use super::item::{FieldValue, Item};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Keep the items where any text field contains `filter`, ignoring case.
///
/// An empty filter keeps everything.
///
/// # Example
///
/// ```rust
/// use cerebellum::core::filter_list;
/// use serde_json::json;
///
/// let list = vec![json!({ "name": "Alpha" }), json!({ "name": "beta" })];
/// assert_eq!(filter_list("ALP", &list), vec![json!({ "name": "Alpha" })]);
/// assert_eq!(filter_list("", &list), list);
/// ```
pub fn filter_list<T: Item + Clone>(filter: &str, list: &[T]) -> Vec<T> {
    if filter.is_empty() {
        return list.to_vec();
    }

    let needle = filter.to_lowercase();
    list.iter()
        .filter(|item| {
            item.values().iter().any(|value| {
                value
                    .as_text()
                    .is_some_and(|text| !text.is_empty() && text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

/// Sort `list` by the field named `by`, or by whole items when `by` is empty.
///
/// Missing fields sort as `FieldValue::Null`. The sort is stable.
pub fn sort_list<T: Item>(by: &str, order: SortOrder, mut list: Vec<T>) -> Vec<T> {
    list.sort_by(|a, b| {
        let ordering = sort_key(a, by).cmp(&sort_key(b, by));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    list
}

fn sort_key<'a, T: Item>(item: &'a T, by: &str) -> FieldValue<'a> {
    if by.is_empty() {
        item.whole()
    } else {
        item.field(by).unwrap_or(FieldValue::Null)
    }
}

/// A new sequence with the elements in reverse order.
pub fn reverse_list<T: Clone>(list: &[T]) -> Vec<T> {
    list.iter().rev().cloned().collect()
}

/// Number of pages of size `per` needed for `list`.
///
/// Zero when `per` is zero or the list is empty.
pub fn total_pages<T>(per: usize, list: &[T]) -> usize {
    if per == 0 {
        return 0;
    }
    list.len().div_ceil(per)
}

/// The items shown on 1-based `page` with `per` items per page.
///
/// Page 0 is treated as page 1. `per == 0` returns the whole list.
/// Pages past the end are empty.
///
/// # Example
///
/// ```rust
/// use cerebellum::core::slice_for_page;
///
/// let list = [1, 2, 3, 4, 5];
/// assert_eq!(slice_for_page(2, 2, &list), vec![3, 4]);
/// assert_eq!(slice_for_page(3, 2, &list), vec![5]);
/// assert_eq!(slice_for_page(4, 2, &list), Vec::<i32>::new());
/// assert_eq!(slice_for_page(1, 0, &list), list.to_vec());
/// ```
pub fn slice_for_page<T: Clone>(page: usize, per: usize, list: &[T]) -> Vec<T> {
    let start = (page.max(1) - 1).saturating_mul(per);
    let end = if per == 0 {
        list.len()
    } else {
        start.saturating_add(per)
    };

    let start = start.min(list.len());
    let end = end.min(list.len());
    list[start..end].to_vec()
}
