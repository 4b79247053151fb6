//! Ready-made reducers and action creators for data fetched from a web API.
//!
//! - [`CrudReducer`] keeps a list in sync with create/read/patch/delete responses
//! - [`LoadReducer`] stores the latest response of a read-only endpoint
//! - [`CrudActionCreators`], [`LoadActionCreator`] and [`WebApi`] describe the calls producing those responses
//!
//! Both reducers can be wrapped by [`crate::paginate::Paginated`]; `CrudState`
//! implements [`crate::paginate::Listing`] so the default extractor finds its items.

mod api;
mod crud;
mod load;

pub use api::{
    ApiAction, ApiMeta, ApiMethod, ApiRequest, CrudActionCreators, CrudApiAction, CrudPayload,
    CrudRequest, LoadActionCreator, WebApi,
};
pub use crud::{CrudAction, CrudReducer, CrudState, Identified, JsonId};
pub use load::{LoadAction, LoadReducer};
