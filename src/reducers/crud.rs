//! Reducer for a data set managed through a CRUD web API.

use crate::core::{append, remove_by_key, replace_by_key, Merge, Reducer};
use crate::paginate::Listing;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

/// Items with a stable identifier.
pub trait Identified {
    type Id: PartialEq + fmt::Display;

    fn id(&self) -> Self::Id;
}

/// Identifier read from the `"Id"` key of a JSON object.
///
/// Displays strings without quotes so it can be used as a path segment.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonId(pub Value);

impl fmt::Display for JsonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl Identified for Value {
    type Id = JsonId;

    fn id(&self) -> JsonId {
        JsonId(self.get("Id").cloned().unwrap_or(Value::Null))
    }
}

/// State of a CRUD-managed data set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrudState<T> {
    pub fetching: bool,
    pub pending: bool,
    pub items: Vec<T>,
}

impl<T> Default for CrudState<T> {
    fn default() -> Self {
        Self {
            fetching: false,
            pending: false,
            items: Vec::new(),
        }
    }
}

impl<T> Listing for CrudState<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }
}

/// Web-API outcomes the CRUD reducer understands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CrudAction<T> {
    ReadRequest,
    ReadResponse(Vec<T>),
    /// The complete object sent back by the server
    CreateResponse(T),
    DeleteResponse { genuine: T },
    /// `genuine` is the object the client sent, `patch` the server response
    PatchResponse { genuine: T, patch: T },
}

impl<T> CrudAction<T> {
    fn name(&self) -> &'static str {
        match self {
            Self::ReadRequest => "READ_REQUEST",
            Self::ReadResponse(_) => "READ_RESPONSE",
            Self::CreateResponse(_) => "CREATE_RESPONSE",
            Self::DeleteResponse { .. } => "DELETE_RESPONSE",
            Self::PatchResponse { .. } => "PATCH_RESPONSE",
        }
    }
}

/// Reducer keeping a list of items in sync with CRUD responses.
///
/// # Example
///
/// ```rust
/// use cerebellum::core::Reducer;
/// use cerebellum::reducers::{CrudAction, CrudReducer};
/// use serde_json::{json, Value};
///
/// let reducer = CrudReducer::<Value>::new();
/// let state = reducer.init();
/// let state = reducer.reduce(&state, &CrudAction::ReadResponse(vec![json!({ "Id": 1 })]));
/// let state = reducer.reduce(&state, &CrudAction::CreateResponse(json!({ "Id": 2 })));
///
/// assert_eq!(state.items.len(), 2);
/// assert!(!state.fetching);
/// ```
pub struct CrudReducer<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> CrudReducer<T> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for CrudReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Reducer for CrudReducer<T>
where
    T: Identified + Merge + Clone,
{
    type State = CrudState<T>;
    type Action = CrudAction<T>;

    fn init(&self) -> CrudState<T> {
        CrudState::default()
    }

    fn reduce(&self, state: &CrudState<T>, action: &CrudAction<T>) -> CrudState<T> {
        trace!(action = action.name(), items = state.items.len(), "crud reduce");

        match action {
            CrudAction::ReadRequest => CrudState {
                fetching: true,
                ..state.clone()
            },
            CrudAction::ReadResponse(items) => CrudState {
                fetching: false,
                pending: state.pending,
                items: items.clone(),
            },
            CrudAction::CreateResponse(item) => CrudState {
                items: append(&state.items, item.clone()),
                ..state.clone()
            },
            CrudAction::DeleteResponse { genuine } => CrudState {
                items: remove_by_key(&state.items, T::id, genuine),
                ..state.clone()
            },
            CrudAction::PatchResponse { genuine, patch } => CrudState {
                items: replace_by_key(&state.items, T::id, genuine, patch),
                ..state.clone()
            },
        }
    }
}
