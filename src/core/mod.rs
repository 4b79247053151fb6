//! Pure core: item model, immutable helpers, list queries and reducers.
//!
//! Nothing in this module performs I/O or mutates its inputs.

mod item;
mod query;
mod record;
mod reducer;

pub use item::{FieldValue, Item};
pub use query::{filter_list, reverse_list, slice_for_page, sort_list, total_pages, SortOrder};
pub use record::{append, merge, remove_by_key, replace_by_key, Merge};
pub use reducer::{reducer_fn, FnReducer, Reducer};
