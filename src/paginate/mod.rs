//! Pagination over a wrapped reducer.
//!
//! [`Paginated`] is a higher-order reducer: it owns a wrapped reducer's state
//! and keeps a filtered, sorted and sliced view of the list inside it.
//!
//! # Key Concepts
//!
//! - **Actions**: a closed vocabulary of page, filter and sort requests,
//!   addressed to a namespace. Anything else in the namespace is forwarded.
//! - **Extractors**: how the list is found inside the wrapped state
//! - **Options**: the construction-time defaults that `Reset` returns to

mod action;
mod extract;
mod options;
mod state;
mod transducer;

pub use action::{Action, ActionKind, PageAction, PageActions};
pub use extract::{ExtractWith, Extractor, Identity, Listing};
pub use options::{OptionsError, PaginationOptions};
pub use state::PaginationState;
pub use transducer::Paginated;
