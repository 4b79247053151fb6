//! The reducer abstraction: a pure state-transition function.

use std::marker::PhantomData;

/// Pure state-transition function.
///
/// `init` produces the state a reducer starts from. `reduce` maps a prior
/// state and an action to the next state. Both must be pure and synchronous.
///
/// # Example
///
/// ```rust
/// use cerebellum::core::{reducer_fn, Reducer};
///
/// let counter = reducer_fn(|| 0i64, |count: &i64, delta: &i64| count + delta);
///
/// let state = counter.init();
/// let state = counter.reduce(&state, &5);
/// let state = counter.reduce(&state, &-2);
/// assert_eq!(state, 3);
/// ```
pub trait Reducer {
    type State;
    type Action;

    /// Initial state, before any action has been seen.
    fn init(&self) -> Self::State;

    /// Compute the next state. Must not mutate `state`.
    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State;
}

/// Reducer built from a pair of closures. See [`reducer_fn`].
pub struct FnReducer<S, A, I, F> {
    init: I,
    reduce: F,
    _phantom: PhantomData<fn(&S, &A) -> S>,
}

/// Build a reducer from an init closure and a reduce closure.
pub fn reducer_fn<S, A, I, F>(init: I, reduce: F) -> FnReducer<S, A, I, F>
where
    I: Fn() -> S,
    F: Fn(&S, &A) -> S,
{
    FnReducer {
        init,
        reduce,
        _phantom: PhantomData,
    }
}

impl<S, A, I, F> Reducer for FnReducer<S, A, I, F>
where
    I: Fn() -> S,
    F: Fn(&S, &A) -> S,
{
    type State = S;
    type Action = A;

    fn init(&self) -> S {
        (self.init)()
    }

    fn reduce(&self, state: &S, action: &A) -> S {
        (self.reduce)(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Toggle {
        Flip,
        Keep,
    }

    #[test]
    fn fn_reducer_starts_from_init() {
        let reducer = reducer_fn(|| vec![1, 2], |s: &Vec<i32>, _: &()| s.clone());
        assert_eq!(reducer.init(), vec![1, 2]);
    }

    #[test]
    fn fn_reducer_is_pure() {
        let reducer = reducer_fn(
            || false,
            |on: &bool, action: &Toggle| match action {
                Toggle::Flip => !on,
                Toggle::Keep => *on,
            },
        );

        let state = reducer.init();
        let flipped = reducer.reduce(&state, &Toggle::Flip);
        let kept = reducer.reduce(&flipped, &Toggle::Keep);

        assert!(!state);
        assert!(flipped);
        assert!(kept);
    }
}
