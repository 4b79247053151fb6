//! Cerebellum: pagination and list helpers for reducer-based state
//!
//! Cerebellum follows the "pure core, imperative shell" philosophy. Every
//! state transition is a pure function returning a new value; the only
//! asynchronous surface is the small promise shim in [`effects`].
//!
//! # Core Concepts
//!
//! - **Reducers**: `init` plus `reduce(state, action) -> state`, via the [`Reducer`] trait
//! - **Pagination**: [`Paginated`] wraps any reducer holding a list and keeps
//!   a filtered, sorted and paged view of it
//! - **Items**: list entries expose named fields through the [`Item`] trait
//! - **Immutable helpers**: `merge`, `append`, `replace_by_key` and
//!   `remove_by_key` never touch their inputs
//!
//! # Example
//!
//! ```rust
//! use cerebellum::core::reducer_fn;
//! use cerebellum::{PageActions, Paginated, PaginationOptions, Reducer};
//! use serde_json::{json, Value};
//!
//! let books = reducer_fn(
//!     || {
//!         vec![
//!             json!({ "Id": 1, "title": "Dune" }),
//!             json!({ "Id": 2, "title": "Emma" }),
//!             json!({ "Id": 3, "title": "Ulysses" }),
//!         ]
//!     },
//!     |list: &Vec<Value>, _: &()| list.clone(),
//! );
//!
//! let paginated = Paginated::new("BOOKS", books)
//!     .with_options(PaginationOptions::default().with_per(2));
//! let actions = PageActions::new("BOOKS");
//!
//! let state = paginated.init();
//! assert_eq!(state.total, 2);
//!
//! let state = paginated.reduce(&state, &actions.filter_with("u"));
//! assert_eq!(state.page_list, vec![json!({ "Id": 1, "title": "Dune" }), json!({ "Id": 3, "title": "Ulysses" })]);
//! assert_eq!(state.total, 1);
//! ```

#[macro_use]
mod macros;

pub mod checkpoint;
pub mod core;
pub mod effects;
pub mod paginate;
pub mod reducers;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{Item, Reducer, SortOrder};
pub use checkpoint::{CheckpointError, PaginationCheckpoint};
pub use paginate::{Action, PageAction, PageActions, Paginated, PaginationOptions, PaginationState};
