//! Construction-time pagination options.

use crate::core::SortOrder;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Problems found by [`PaginationOptions::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Page numbers start at 1, got 0")]
    ZeroPage,

    #[error("Total is derived from the list and cannot be preset (got {total})")]
    PresetTotal { total: usize },

    #[error("Sort field '{by}' is blank")]
    BlankSortField { by: String },

    #[error("Namespace must not be empty")]
    BlankNamespace,
}

/// Default pagination parameters.
///
/// Every field has a default, so any subset can be supplied:
///
/// ```rust
/// use cerebellum::core::SortOrder;
/// use cerebellum::paginate::PaginationOptions;
///
/// let options: PaginationOptions = serde_json::from_str(r#"{ "per": 25 }"#).unwrap();
/// assert_eq!(options.per, 25);
/// assert_eq!(options.page, 1);
/// assert_eq!(options.by, "Id");
/// assert_eq!(options.order, SortOrder::Ascending);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    pub page: usize,
    pub total: usize,
    /// Page size. Zero shows the whole list as a single page.
    pub per: usize,
    pub order: SortOrder,
    pub by: String,
    pub filter: String,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: 1,
            total: 0,
            per: 10,
            order: SortOrder::Ascending,
            by: "Id".to_string(),
            filter: String::new(),
        }
    }
}

impl PaginationOptions {
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_per(mut self, per: usize) -> Self {
        self.per = per;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_by(mut self, by: impl Into<String>) -> Self {
        self.by = by.into();
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Check the options, accumulating every problem found.
    ///
    /// Transitions never call this: unchecked options still paginate,
    /// following the arithmetic of the query primitives.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<OptionsError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<OptionsError>>> = Vec::new();

        checks.push(if self.page == 0 {
            Validation::fail(OptionsError::ZeroPage)
        } else {
            Validation::success(())
        });

        checks.push(if self.total != 0 {
            Validation::fail(OptionsError::PresetTotal { total: self.total })
        } else {
            Validation::success(())
        });

        checks.push(if !self.by.is_empty() && self.by.trim().is_empty() {
            Validation::fail(OptionsError::BlankSortField {
                by: self.by.clone(),
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = PaginationOptions::default();
        assert_eq!(options.page, 1);
        assert_eq!(options.total, 0);
        assert_eq!(options.per, 10);
        assert_eq!(options.order, SortOrder::Ascending);
        assert_eq!(options.by, "Id");
        assert_eq!(options.filter, "");
    }

    #[test]
    fn fluent_overrides_keep_other_defaults() {
        let options = PaginationOptions::default()
            .with_per(2)
            .with_order(SortOrder::Descending);

        assert_eq!(options.per, 2);
        assert_eq!(options.order, SortOrder::Descending);
        assert_eq!(options.by, "Id");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let options: PaginationOptions =
            serde_json::from_str(r#"{ "order": "desc", "filter": "x" }"#).unwrap();

        assert_eq!(options.order, SortOrder::Descending);
        assert_eq!(options.filter, "x");
        assert_eq!(options.per, 10);
    }

    #[test]
    fn default_options_are_valid() {
        assert!(matches!(
            PaginationOptions::default().validate(),
            Validation::Success(_)
        ));
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let options = PaginationOptions {
            page: 0,
            total: 4,
            by: "   ".to_string(),
            ..PaginationOptions::default()
        };

        match options.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| matches!(e, OptionsError::ZeroPage)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, OptionsError::PresetTotal { total: 4 })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, OptionsError::BlankSortField { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn empty_sort_field_is_allowed() {
        let options = PaginationOptions::default().with_by("");
        assert!(matches!(options.validate(), Validation::Success(_)));
    }
}
