//! Promise error types.

use thiserror::Error;

/// Ways a deferred value can fail to arrive
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromiseError<E> {
    /// The producer rejected with an error
    #[error("Promise rejected: {0}")]
    Rejected(E),

    /// The `Deferred` was dropped without being settled
    #[error("Promise abandoned before it was settled")]
    Abandoned,
}
