//! Reducer storing a web-service response as-is.

use crate::core::Reducer;
use serde::{Deserialize, Serialize};

/// Outcomes of a load call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LoadAction<T> {
    ReadRequest,
    ReadResponse(T),
}

/// Keeps the latest response of a read-only endpoint.
///
/// With `with_reset` (the default) a new request drops the previous
/// response and returns to the initial state until the answer arrives.
#[derive(Clone, Debug)]
pub struct LoadReducer<T> {
    initial: T,
    with_reset: bool,
}

impl<T: Clone> LoadReducer<T> {
    pub fn new(initial: T) -> Self {
        Self {
            initial,
            with_reset: true,
        }
    }

    /// Keep the previous response while a new request is in flight.
    pub fn without_reset(mut self) -> Self {
        self.with_reset = false;
        self
    }
}

impl<T: Default + Clone> Default for LoadReducer<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Reducer for LoadReducer<T> {
    type State = T;
    type Action = LoadAction<T>;

    fn init(&self) -> T {
        self.initial.clone()
    }

    fn reduce(&self, state: &T, action: &LoadAction<T>) -> T {
        match action {
            LoadAction::ReadResponse(response) => response.clone(),
            LoadAction::ReadRequest if self.with_reset => self.initial.clone(),
            LoadAction::ReadRequest => state.clone(),
        }
    }
}
