//! Extractors: how the transducer finds the list inside a wrapped state.

use std::marker::PhantomData;

/// A state that holds an ordered list of items.
pub trait Listing {
    type Item;

    fn items(&self) -> &[Self::Item];
}

impl<T> Listing for Vec<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        self
    }
}

/// Reads the paginated list out of a wrapped reducer state.
pub trait Extractor<B> {
    type Item;

    fn extract<'a>(&self, base: &'a B) -> &'a [Self::Item];
}

/// Default extractor: the wrapped state is itself the list.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<L: Listing> Extractor<L> for Identity {
    type Item = L::Item;

    fn extract<'a>(&self, base: &'a L) -> &'a [L::Item] {
        base.items()
    }
}

/// Extractor backed by a function.
///
/// ```rust
/// use cerebellum::paginate::{ExtractWith, Extractor};
///
/// struct Inbox {
///     unread: usize,
///     messages: Vec<String>,
/// }
///
/// fn messages(inbox: &Inbox) -> &[String] {
///     &inbox.messages
/// }
///
/// let inbox = Inbox { unread: 1, messages: vec!["hi".into()] };
/// let extractor = ExtractWith::new(messages);
/// assert_eq!(extractor.extract(&inbox), ["hi".to_string()]);
/// ```
pub struct ExtractWith<F, T> {
    extract: F,
    _phantom: PhantomData<fn() -> T>,
}

impl<F, T> ExtractWith<F, T> {
    pub fn new(extract: F) -> Self {
        Self {
            extract,
            _phantom: PhantomData,
        }
    }
}

impl<B, T, F> Extractor<B> for ExtractWith<F, T>
where
    F: for<'a> Fn(&'a B) -> &'a [T],
{
    type Item = T;

    fn extract<'a>(&self, base: &'a B) -> &'a [T] {
        (self.extract)(base)
    }
}
