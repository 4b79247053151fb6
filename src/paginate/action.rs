//! Pagination action vocabulary and the action-creator factory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requests handled by the pagination transducer itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageAction {
    GotoPage(usize),
    NextPage,
    PrevPage,
    Filter(String),
    Sort(String),
    ChangePer(usize),
    Reset,
}

impl PageAction {
    /// Wire suffix used in action identifiers.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::GotoPage(_) => "PAG_GOTO_PAGE",
            Self::NextPage => "PAG_NEXT_PAGE",
            Self::PrevPage => "PAG_PREV_PAGE",
            Self::Filter(_) => "PAG_FILTER",
            Self::Sort(_) => "PAG_SORT",
            Self::ChangePer(_) => "PAG_CHANGE_PER",
            Self::Reset => "PAG_RESET",
        }
    }
}

impl fmt::Display for PageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// What an action asks for: a pagination change, or something for the
/// wrapped reducer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionKind<A> {
    Paginate(PageAction),
    Forward(A),
}

/// A dispatched action, addressed to one namespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action<A> {
    pub namespace: String,
    pub kind: ActionKind<A>,
}

impl<A> Action<A> {
    /// `"<namespace>_<SUFFIX>"` for pagination actions, `None` for forwarded ones.
    pub fn identifier(&self) -> Option<String> {
        match &self.kind {
            ActionKind::Paginate(action) => Some(format!("{}_{}", self.namespace, action)),
            ActionKind::Forward(_) => None,
        }
    }

    /// Whether this action is addressed to `namespace`.
    pub fn targets(&self, namespace: &str) -> bool {
        self.namespace == namespace
    }
}

/// Action creators bound to one namespace.
///
/// # Example
///
/// ```rust
/// use cerebellum::paginate::{Action, ActionKind, PageAction, PageActions};
///
/// let actions = PageActions::new("USERS");
/// let goto: Action<()> = actions.goto_page(3);
///
/// assert_eq!(goto.kind, ActionKind::Paginate(PageAction::GotoPage(3)));
/// assert_eq!(goto.identifier().as_deref(), Some("USERS_PAG_GOTO_PAGE"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageActions {
    namespace: String,
}

impl PageActions {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn goto_page<A>(&self, page: usize) -> Action<A> {
        self.paginate(PageAction::GotoPage(page))
    }

    pub fn next_page<A>(&self) -> Action<A> {
        self.paginate(PageAction::NextPage)
    }

    pub fn prev_page<A>(&self) -> Action<A> {
        self.paginate(PageAction::PrevPage)
    }

    pub fn filter_with<A>(&self, filter: impl Into<String>) -> Action<A> {
        self.paginate(PageAction::Filter(filter.into()))
    }

    pub fn sort_by<A>(&self, by: impl Into<String>) -> Action<A> {
        self.paginate(PageAction::Sort(by.into()))
    }

    pub fn change_per<A>(&self, per: usize) -> Action<A> {
        self.paginate(PageAction::ChangePer(per))
    }

    pub fn reset<A>(&self) -> Action<A> {
        self.paginate(PageAction::Reset)
    }

    /// Wrap an action for the inner reducer.
    pub fn forward<A>(&self, action: A) -> Action<A> {
        Action {
            namespace: self.namespace.clone(),
            kind: ActionKind::Forward(action),
        }
    }

    fn paginate<A>(&self, action: PageAction) -> Action<A> {
        Action {
            namespace: self.namespace.clone(),
            kind: ActionKind::Paginate(action),
        }
    }
}
