//! Service registry for inversion of control between generic and
//! application-specific layers.
//!
//! The registry is an ordinary value: create one, declare services on it and
//! pass it to whatever needs them. There is no process-wide instance.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub mod error;

pub use error::RegistryError;

type Service = Arc<dyn Any + Send + Sync>;

/// Keyed store of shared services.
///
/// # Example
///
/// ```rust
/// use cerebellum::registry::ServiceRegistry;
///
/// struct ApiRoot(String);
///
/// let mut registry = ServiceRegistry::new();
/// registry
///     .declare("api-root", ApiRoot("/api".into()))
///     .declare("page-size", 25usize);
///
/// let root = registry.require::<ApiRoot>("api-root").unwrap();
/// assert_eq!(root.0, "/api");
/// assert_eq!(registry.get::<usize>("page-size").as_deref(), Some(&25));
/// ```
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    storage: HashMap<String, Service>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` under `key`, replacing any previous one.
    pub fn declare<T>(&mut self, key: impl Into<String>, service: T) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        self.declare_shared(key, Arc::new(service))
    }

    /// Register an already shared service.
    pub fn declare_shared<T>(&mut self, key: impl Into<String>, service: Arc<T>) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        debug!(key = %key, service = type_name::<T>(), "service declared");
        self.storage.insert(key, service);
        self
    }

    /// The service under `key`, if one of type `T` was declared.
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.require(key).ok()
    }

    /// Like `get`, but says why the lookup failed.
    pub fn require<T>(&self, key: &str) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
    {
        let service = self.storage.get(key).ok_or_else(|| RegistryError::Missing {
            key: key.to_string(),
        })?;

        Arc::clone(service)
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.storage.keys().collect();
        keys.sort();
        f.debug_struct("ServiceRegistry").field("keys", &keys).finish()
    }
}
