//! Deferred results for asynchronous action creators.
//!
//! Action creators that may refuse to run still need to hand back something
//! awaitable. This module provides the pieces:
//!
//! - [`noop`]: an effect that succeeds immediately with `()`
//! - [`settled`]: lift an already known `Result` into an effect
//! - [`sync_all`]: run a batch of effects, collecting every output
//! - [`wait_for_it`]: turn callback-style resolve/reject code into a future

use futures::channel::oneshot;
use std::future::Future;
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;

pub mod error;

pub use error::PromiseError;

/// An effect that resolves immediately to `()`.
pub fn noop<E, Env>() -> BoxedEffect<(), E, Env>
where
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    pure(()).boxed()
}

/// An effect that yields `result` as-is.
pub fn settled<T, E, Env>(result: Result<T, E>) -> BoxedEffect<T, E, Env>
where
    T: Send + 'static,
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    match result {
        Ok(value) => pure(value).boxed(),
        Err(error) => fail(error).boxed(),
    }
}

/// Run every effect against `env` in order, collecting the outputs.
///
/// Fails with the first error; effects after it are not run.
pub async fn sync_all<T, E, Env>(effects: Vec<BoxedEffect<T, E, Env>>, env: &Env) -> Result<Vec<T>, E>
where
    T: Send + 'static,
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    let mut outputs = Vec::with_capacity(effects.len());
    for effect in effects {
        outputs.push(effect.run(env).await?);
    }
    Ok(outputs)
}

/// Settles the future returned by [`wait_for_it`]. Settling consumes it,
/// so a value is delivered at most once.
#[derive(Debug)]
pub struct Deferred<T, E> {
    sender: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Deferred<T, E> {
    pub fn resolve(self, value: T) {
        // The receiver may already be gone; nobody is waiting then.
        let _ = self.sender.send(Ok(value));
    }

    pub fn reject(self, error: E) {
        let _ = self.sender.send(Err(error));
    }
}

/// Hand `producer` a [`Deferred`] and return a future of its outcome.
///
/// # Example
///
/// ```rust
/// use cerebellum::effects::{wait_for_it, PromiseError};
///
/// # futures::executor::block_on(async {
/// let answer = wait_for_it(|deferred| deferred.resolve(42)).await;
/// assert_eq!(answer, Ok::<_, PromiseError<String>>(42));
///
/// let failed = wait_for_it(|deferred| deferred.reject("boom")).await;
/// assert_eq!(failed, Err::<u8, _>(PromiseError::Rejected("boom")));
/// # });
/// ```
pub fn wait_for_it<T, E, F>(producer: F) -> impl Future<Output = Result<T, PromiseError<E>>>
where
    F: FnOnce(Deferred<T, E>),
{
    let (sender, receiver) = oneshot::channel();
    producer(Deferred { sender });

    async move {
        match receiver.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(PromiseError::Rejected(error)),
            Err(oneshot::Canceled) => Err(PromiseError::Abandoned),
        }
    }
}
