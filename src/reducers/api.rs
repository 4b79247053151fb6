//! Web-API action creators.
//!
//! Creators describe a request: a method, an endpoint and a payload, bundled
//! into an [`ApiAction`] for some transport layer to execute. They never
//! perform I/O. A `can_execute` predicate may refuse the call, in which case
//! no action is produced.

use super::crud::Identified;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Web API verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
    Read,
    Create,
    Update,
    Patch,
    Delete,
}

impl ApiMethod {
    /// Methods addressing a single existing element.
    pub fn targets_element(self) -> bool {
        matches!(self, Self::Update | Self::Patch | Self::Delete)
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "READ",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Where and how to call the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: ApiMethod,
    pub endpoint: String,
}

/// The element an action is about, as the client knew it before the call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiMeta<T> {
    pub genuine: T,
}

/// A request for the transport layer, addressed to a namespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiAction<P, M = P> {
    pub namespace: String,
    pub payload: Option<P>,
    pub meta: Option<M>,
    pub api: ApiRequest,
}

type EndpointFn<S, P, G> = Box<dyn Fn(&S, Option<&P>, Option<&G>) -> String + Send + Sync>;
type GuardFn<S, P, G> = Box<dyn Fn(&S, Option<&P>) -> Option<G> + Send + Sync>;

/// Creator for a single web-API call.
///
/// A guard may refuse the call, or accept it and hand the endpoint builder
/// data it computed along the way (`G`). Without a guard the builder gets
/// `None`.
///
/// # Example
///
/// ```rust
/// use cerebellum::reducers::{ApiMethod, WebApi};
///
/// struct AppState {
///     signed_in: bool,
/// }
///
/// let profile = WebApi::<AppState, u32>::load("PROFILE", |_, id, _| {
///     format!("/api/profiles/{}", id.copied().unwrap_or_default())
/// })
/// .when(|state, _| state.signed_in);
///
/// let action = profile.call::<()>(&AppState { signed_in: true }, Some(7), None).unwrap();
/// assert_eq!(action.api.method, ApiMethod::Read);
/// assert_eq!(action.api.endpoint, "/api/profiles/7");
///
/// assert!(profile.call::<()>(&AppState { signed_in: false }, Some(7), None).is_none());
/// ```
pub struct WebApi<S, P, G = ()> {
    namespace: String,
    method: ApiMethod,
    endpoint: EndpointFn<S, P, G>,
    can_execute: Option<GuardFn<S, P, G>>,
}

impl<S, P, G> WebApi<S, P, G> {
    pub fn new<F>(namespace: impl Into<String>, method: ApiMethod, endpoint: F) -> Self
    where
        F: Fn(&S, Option<&P>, Option<&G>) -> String + Send + Sync + 'static,
    {
        Self {
            namespace: namespace.into(),
            method,
            endpoint: Box::new(endpoint),
            can_execute: None,
        }
    }

    /// A `Read` call, for loading data.
    pub fn load<F>(namespace: impl Into<String>, endpoint: F) -> Self
    where
        F: Fn(&S, Option<&P>, Option<&G>) -> String + Send + Sync + 'static,
    {
        Self::new(namespace, ApiMethod::Read, endpoint)
    }

    /// Only produce an action when `guard` returns `Some`. The value is
    /// passed on to the endpoint builder.
    pub fn guard<F>(mut self, guard: F) -> Self
    where
        F: Fn(&S, Option<&P>) -> Option<G> + Send + Sync + 'static,
    {
        self.can_execute = Some(Box::new(guard));
        self
    }

    /// Build the action, or `None` when the guard refuses.
    pub fn call<M>(&self, state: &S, payload: Option<P>, meta: Option<M>) -> Option<ApiAction<P, M>> {
        let params = match &self.can_execute {
            Some(guard) => match guard(state, payload.as_ref()) {
                Some(params) => Some(params),
                None => {
                    debug!(namespace = %self.namespace, method = %self.method, "api call refused");
                    return None;
                }
            },
            None => None,
        };

        let endpoint = (self.endpoint)(state, payload.as_ref(), params.as_ref());
        Some(ApiAction {
            namespace: self.namespace.clone(),
            payload,
            meta,
            api: ApiRequest {
                method: self.method,
                endpoint,
            },
        })
    }
}

impl<S, P> WebApi<S, P, ()> {
    /// Only produce an action when `predicate` holds.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S, Option<&P>) -> bool + Send + Sync + 'static,
    {
        self.guard(move |state, payload| predicate(state, payload).then_some(()))
    }
}

/// Read-only creator for endpoints handled by a `LoadReducer`.
pub struct LoadActionCreator<S, P, G = ()> {
    api: WebApi<S, P, G>,
}

impl<S, P, G> LoadActionCreator<S, P, G> {
    pub fn new<F>(namespace: impl Into<String>, endpoint: F) -> Self
    where
        F: Fn(&S, Option<&P>, Option<&G>) -> String + Send + Sync + 'static,
    {
        Self {
            api: WebApi::load(namespace, endpoint),
        }
    }

    pub fn guard<F>(self, guard: F) -> Self
    where
        F: Fn(&S, Option<&P>) -> Option<G> + Send + Sync + 'static,
    {
        Self {
            api: self.api.guard(guard),
        }
    }

    /// A `Read` action carrying `payload`, or `None` when refused.
    pub fn load(&self, state: &S, payload: Option<P>) -> Option<ApiAction<P, ()>> {
        self.api.call(state, payload, None)
    }
}

impl<S, P> LoadActionCreator<S, P, ()> {
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S, Option<&P>) -> bool + Send + Sync + 'static,
    {
        Self {
            api: self.api.when(predicate),
        }
    }
}

/// Payload of a CRUD action, depending on the method.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CrudPayload<T> {
    /// New object, for `Create`
    Element(T),
    /// Changed properties, for `Patch`
    Mutations(T),
    /// Query parameters, for `Read`
    Params(Map<String, Value>),
}

/// What a CRUD call is about, handed to the endpoint builder and guard.
#[derive(Debug)]
pub struct CrudRequest<'a, T> {
    pub method: ApiMethod,
    pub element: Option<&'a T>,
    pub mutations: Option<&'a T>,
    pub params: Option<&'a Map<String, Value>>,
}

impl<T> Clone for CrudRequest<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CrudRequest<'_, T> {}

type CrudEndpointFn<S, T, G> =
    Box<dyn Fn(&S, &CrudRequest<'_, T>, Option<&G>) -> String + Send + Sync>;
type CrudGuardFn<S, T, G> = Box<dyn Fn(&S, &CrudRequest<'_, T>) -> Option<G> + Send + Sync>;

/// Actions produced by [`CrudActionCreators`].
pub type CrudApiAction<T> = ApiAction<CrudPayload<T>, ApiMeta<T>>;

/// Create, read, update and delete creators for one namespace.
///
/// Calls addressing an existing element append `/{id}/` to the endpoint.
/// As with [`WebApi`], a guard's output reaches the endpoint builder.
pub struct CrudActionCreators<S, T, G = ()> {
    namespace: String,
    endpoint: CrudEndpointFn<S, T, G>,
    can_execute: Option<CrudGuardFn<S, T, G>>,
}

impl<S, T> CrudActionCreators<S, T, ()> {
    /// Only produce actions when `predicate` holds.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S, &CrudRequest<'_, T>) -> bool + Send + Sync + 'static,
    {
        self.guard(move |state, request| predicate(state, request).then_some(()))
    }
}

impl<S, T, G> CrudActionCreators<S, T, G> {
    pub fn new<F>(namespace: impl Into<String>, endpoint: F) -> Self
    where
        F: Fn(&S, &CrudRequest<'_, T>, Option<&G>) -> String + Send + Sync + 'static,
    {
        Self {
            namespace: namespace.into(),
            endpoint: Box::new(endpoint),
            can_execute: None,
        }
    }

    /// Only produce actions when `guard` returns `Some`.
    pub fn guard<F>(mut self, guard: F) -> Self
    where
        F: Fn(&S, &CrudRequest<'_, T>) -> Option<G> + Send + Sync + 'static,
    {
        self.can_execute = Some(Box::new(guard));
        self
    }
}

impl<S, T, G> CrudActionCreators<S, T, G>
where
    T: Identified + Clone,
{
    pub fn create(&self, state: &S, element: T) -> Option<CrudApiAction<T>> {
        self.execute(
            state,
            CrudRequest {
                method: ApiMethod::Create,
                element: Some(&element),
                mutations: None,
                params: None,
            },
        )
    }

    pub fn read(&self, state: &S, params: Map<String, Value>) -> Option<CrudApiAction<T>> {
        self.execute(
            state,
            CrudRequest {
                method: ApiMethod::Read,
                element: None,
                mutations: None,
                params: Some(&params),
            },
        )
    }

    /// Partial update of `element`, sent as `PATCH`.
    pub fn update(&self, state: &S, element: T, mutations: T) -> Option<CrudApiAction<T>> {
        self.execute(
            state,
            CrudRequest {
                method: ApiMethod::Patch,
                element: Some(&element),
                mutations: Some(&mutations),
                params: None,
            },
        )
    }

    pub fn delete(&self, state: &S, element: T) -> Option<CrudApiAction<T>> {
        self.execute(
            state,
            CrudRequest {
                method: ApiMethod::Delete,
                element: Some(&element),
                mutations: None,
                params: None,
            },
        )
    }

    fn execute(&self, state: &S, request: CrudRequest<'_, T>) -> Option<CrudApiAction<T>> {
        let params = match &self.can_execute {
            Some(guard) => match guard(state, &request) {
                Some(params) => Some(params),
                None => {
                    debug!(namespace = %self.namespace, method = %request.method, "crud call refused");
                    return None;
                }
            },
            None => None,
        };

        let payload = match request.method {
            ApiMethod::Create => request.element.cloned().map(CrudPayload::Element),
            ApiMethod::Update | ApiMethod::Patch => {
                request.mutations.cloned().map(CrudPayload::Mutations)
            }
            ApiMethod::Read => request.params.cloned().map(CrudPayload::Params),
            ApiMethod::Delete => None,
        };

        let mut endpoint = (self.endpoint)(state, &request, params.as_ref());
        if request.method.targets_element() {
            if let Some(element) = request.element {
                endpoint.push_str(&format!("/{}/", element.id()));
            }
        }

        Some(ApiAction {
            namespace: self.namespace.clone(),
            payload,
            meta: request.element.map(|element| ApiMeta {
                genuine: element.clone(),
            }),
            api: ApiRequest {
                method: request.method,
                endpoint,
            },
        })
    }
}
