//! Registry error types.

use thiserror::Error;

/// Errors that can occur when looking up a service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing was declared under the key
    #[error("No service declared under '{key}'")]
    Missing { key: String },

    /// A service exists but has another type
    #[error("Service '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}
