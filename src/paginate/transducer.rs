//! The pagination transducer: a reducer that wraps another reducer and
//! maintains a filtered, sorted and paged view of its list.

use super::action::{Action, ActionKind, PageAction};
use super::extract::{ExtractWith, Extractor, Identity};
use super::options::{OptionsError, PaginationOptions};
use super::state::PaginationState;
use crate::core::{
    filter_list, reverse_list, slice_for_page, sort_list, total_pages, Item, Reducer, SortOrder,
};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace};

/// Higher-order reducer adding pagination to an inner reducer.
///
/// Actions addressed to another namespace return the very same `Arc`, so
/// callers can detect no-ops with `Arc::ptr_eq`. Pagination actions are
/// answered from the cached list. Any other action in the namespace is
/// forwarded to the inner reducer, after which the cache is re-derived.
///
/// # Example
///
/// ```rust
/// use cerebellum::core::{reducer_fn, Reducer};
/// use cerebellum::paginate::{PageActions, Paginated, PaginationOptions};
/// use serde_json::{json, Value};
///
/// let inner = reducer_fn(
///     || vec![json!({ "Id": 3 }), json!({ "Id": 1 }), json!({ "Id": 2 })],
///     |list: &Vec<Value>, _: &()| list.clone(),
/// );
/// let paginated = Paginated::new("ITEMS", inner)
///     .with_options(PaginationOptions::default().with_per(2));
/// let actions = PageActions::new("ITEMS");
///
/// let state = paginated.init();
/// assert_eq!(state.page_list, vec![json!({ "Id": 1 }), json!({ "Id": 2 })]);
///
/// let state = paginated.reduce(&state, &actions.next_page());
/// assert_eq!(state.page, 2);
/// assert_eq!(state.page_list, vec![json!({ "Id": 3 })]);
/// ```
pub struct Paginated<R, X = Identity> {
    namespace: String,
    reducer: R,
    extractor: X,
    options: PaginationOptions,
}

impl<R> Paginated<R, Identity> {
    /// Wrap `reducer`, whose state is itself the list, with default options.
    pub fn new(namespace: impl Into<String>, reducer: R) -> Self {
        Self {
            namespace: namespace.into(),
            reducer,
            extractor: Identity,
            options: PaginationOptions::default(),
        }
    }
}

impl<R, X> Paginated<R, X> {
    /// Like `new` followed by `with_options`, but rejects invalid options
    /// and an empty namespace, reporting every problem at once.
    pub fn try_new(
        namespace: impl Into<String>,
        reducer: R,
        extractor: X,
        options: PaginationOptions,
    ) -> Result<Self, NonEmptyVec<OptionsError>> {
        let namespace = namespace.into();
        let namespace_check = if namespace.is_empty() {
            Validation::fail(OptionsError::BlankNamespace)
        } else {
            Validation::success(())
        };

        match Validation::all_vec(vec![namespace_check, options.validate()]) {
            Validation::Success(_) => Ok(Self {
                namespace,
                reducer,
                extractor,
                options,
            }),
            Validation::Failure(errors) => Err(errors),
        }
    }

    /// Replace the construction-time options.
    pub fn with_options(mut self, options: PaginationOptions) -> Self {
        self.options = options;
        self
    }

    /// Read the list through `extractor` instead.
    pub fn with_extractor<Y>(self, extractor: Y) -> Paginated<R, Y> {
        Paginated {
            namespace: self.namespace,
            reducer: self.reducer,
            extractor,
            options: self.options,
        }
    }

    /// Read the list through a plain function of the wrapped state.
    pub fn extract_with<F, T>(self, extract: F) -> Paginated<R, ExtractWith<F, T>> {
        self.with_extractor(ExtractWith::new(extract))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    pub fn reducer(&self) -> &R {
        &self.reducer
    }
}

type StateOf<R, X> =
    PaginationState<<R as Reducer>::State, <X as Extractor<<R as Reducer>::State>>::Item>;

impl<R, X> Paginated<R, X>
where
    R: Reducer,
    R::State: Clone,
    X: Extractor<R::State>,
    X::Item: Item + Clone,
{
    /// Filtered and sorted view of the list held by `base`.
    pub(crate) fn derive(
        &self,
        base: &R::State,
        filter: &str,
        by: &str,
        order: SortOrder,
    ) -> Vec<X::Item> {
        let list = self.extractor.extract(base);
        sort_list(by, order, filter_list(filter, list))
    }

    fn paginate(&self, state: &StateOf<R, X>, action: &PageAction) -> StateOf<R, X> {
        match action {
            PageAction::Reset => {
                let options = &self.options;
                let cache_list = self.derive(&state.base, &options.filter, &options.by, options.order);
                PaginationState {
                    base: state.base.clone(),
                    page_list: slice_for_page(options.page, options.per, &cache_list),
                    total: total_pages(options.per, &cache_list),
                    cache_list,
                    page: options.page,
                    per: options.per,
                    order: options.order,
                    by: options.by.clone(),
                    filter: options.filter.clone(),
                }
            }

            PageAction::GotoPage(page) => self.with_page(state, *page),

            PageAction::NextPage => {
                let next = if state.page >= state.total {
                    1
                } else {
                    state.page + 1
                };
                self.with_page(state, next)
            }

            PageAction::PrevPage => {
                let prev = if state.page <= 1 {
                    state.total.max(1)
                } else {
                    state.page - 1
                };
                self.with_page(state, prev)
            }

            PageAction::Filter(filter) => {
                let cache_list = self.derive(&state.base, filter, &state.by, state.order);
                let total = total_pages(state.per, &cache_list);
                let page = if state.page <= total { state.page } else { 1 };
                PaginationState {
                    base: state.base.clone(),
                    page_list: slice_for_page(page, state.per, &cache_list),
                    cache_list,
                    page,
                    total,
                    per: state.per,
                    order: state.order,
                    by: state.by.clone(),
                    filter: filter.clone(),
                }
            }

            PageAction::Sort(by) => {
                let (order, cache_list) = if *by == state.by {
                    (state.order.toggle(), reverse_list(&state.cache_list))
                } else {
                    let order = SortOrder::Ascending;
                    (order, self.derive(&state.base, &state.filter, by, order))
                };
                PaginationState {
                    base: state.base.clone(),
                    page_list: slice_for_page(state.page, state.per, &cache_list),
                    cache_list,
                    page: state.page,
                    total: state.total,
                    per: state.per,
                    order,
                    by: by.clone(),
                    filter: state.filter.clone(),
                }
            }

            PageAction::ChangePer(per) => {
                let total = total_pages(*per, &state.cache_list);
                let page = state.page.min(total).max(1);
                PaginationState {
                    base: state.base.clone(),
                    cache_list: state.cache_list.clone(),
                    page_list: slice_for_page(page, *per, &state.cache_list),
                    page,
                    total,
                    per: *per,
                    order: state.order,
                    by: state.by.clone(),
                    filter: state.filter.clone(),
                }
            }
        }
    }

    fn with_page(&self, state: &StateOf<R, X>, page: usize) -> StateOf<R, X> {
        PaginationState {
            page,
            page_list: slice_for_page(page, state.per, &state.cache_list),
            ..state.clone()
        }
    }

    fn forward(&self, state: &StateOf<R, X>, action: &R::Action) -> StateOf<R, X> {
        let base = self.reducer.reduce(&state.base, action);
        let cache_list = self.derive(&base, &state.filter, &state.by, state.order);
        PaginationState {
            base,
            page_list: slice_for_page(state.page, state.per, &cache_list),
            total: total_pages(state.per, &cache_list),
            cache_list,
            page: state.page,
            per: state.per,
            order: state.order,
            by: state.by.clone(),
            filter: state.filter.clone(),
        }
    }
}

impl<R, X> Reducer for Paginated<R, X>
where
    R: Reducer,
    R::State: Clone,
    X: Extractor<R::State>,
    X::Item: Item + Clone,
{
    type State = Arc<StateOf<R, X>>;
    type Action = Action<R::Action>;

    fn init(&self) -> Self::State {
        let options = &self.options;
        let base = self.reducer.init();
        let cache_list = self.derive(&base, &options.filter, &options.by, options.order);

        debug!(
            namespace = %self.namespace,
            items = cache_list.len(),
            per = options.per,
            "pagination initialized"
        );

        Arc::new(PaginationState {
            page_list: slice_for_page(options.page, options.per, &cache_list),
            total: total_pages(options.per, &cache_list),
            base,
            cache_list,
            page: options.page,
            per: options.per,
            order: options.order,
            by: options.by.clone(),
            filter: options.filter.clone(),
        })
    }

    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        if !action.targets(&self.namespace) {
            trace!(
                namespace = %self.namespace,
                target = %action.namespace,
                "action ignored"
            );
            return Arc::clone(state);
        }

        let next = match &action.kind {
            ActionKind::Paginate(page_action) => {
                let next = self.paginate(state, page_action);
                debug!(
                    namespace = %self.namespace,
                    action = %page_action,
                    page = next.page,
                    total = next.total,
                    "pagination updated"
                );
                next
            }
            ActionKind::Forward(inner) => {
                let next = self.forward(state, inner);
                debug!(
                    namespace = %self.namespace,
                    items = next.cache_list.len(),
                    total = next.total,
                    "inner state refreshed"
                );
                next
            }
        };

        Arc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reducer_fn;
    use crate::paginate::PageActions;
    use serde_json::{json, Value};

    #[derive(Clone, Debug, PartialEq)]
    enum ListAction {
        Push(Value),
        Clear,
    }

    fn sample() -> Vec<Value> {
        vec![
            json!({ "Id": 3, "name": "c" }),
            json!({ "Id": 1, "name": "a" }),
            json!({ "Id": 2, "name": "b" }),
        ]
    }

    fn list_reducer() -> impl Reducer<State = Vec<Value>, Action = ListAction> {
        reducer_fn(sample, |list: &Vec<Value>, action: &ListAction| match action {
            ListAction::Push(item) => crate::core::append(list, item.clone()),
            ListAction::Clear => Vec::new(),
        })
    }

    fn paginated(per: usize) -> Paginated<impl Reducer<State = Vec<Value>, Action = ListAction>> {
        Paginated::new("LIST", list_reducer())
            .with_options(PaginationOptions::default().with_per(per))
    }

    fn ids(list: &[Value]) -> Vec<i64> {
        list.iter().filter_map(|item| item["Id"].as_i64()).collect()
    }

    fn actions() -> PageActions {
        PageActions::new("LIST")
    }

    #[test]
    fn init_derives_sorted_first_page() {
        let state = paginated(2).init();

        assert_eq!(ids(&state.cache_list), vec![1, 2, 3]);
        assert_eq!(ids(&state.page_list), vec![1, 2]);
        assert_eq!(state.total, 2);
        assert_eq!(state.page, 1);
        assert_eq!(ids(&state.base), vec![3, 1, 2]);
    }

    #[test]
    fn other_namespace_returns_same_arc() {
        let paginated = paginated(2);
        let state = paginated.init();

        let action: Action<ListAction> = PageActions::new("OTHER").next_page();
        let next = paginated.reduce(&state, &action);

        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn filter_resets_page_when_out_of_range() {
        let paginated = paginated(2);
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions().goto_page(2));
        let state = paginated.reduce(&state, &actions().filter_with("b"));

        assert_eq!(state.cache_list, vec![json!({ "Id": 2, "name": "b" })]);
        assert_eq!(state.total, 1);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_list, vec![json!({ "Id": 2, "name": "b" })]);
        assert_eq!(state.filter, "b");
    }

    #[test]
    fn filter_keeps_page_when_in_range() {
        let paginated = paginated(1);
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions().filter_with("A"));
        let state = paginated.reduce(&state, &actions().filter_with(""));
        let state = paginated.reduce(&state, &actions().goto_page(2));
        let state = paginated.reduce(&state, &actions().filter_with("[no match]"));
        assert_eq!(state.total, 0);
        assert_eq!(state.page, 1);

        let state = paginated.reduce(&state, &actions().goto_page(3));
        let state = paginated.reduce(&state, &actions().filter_with(""));
        assert_eq!(state.total, 3);
        assert_eq!(state.page, 3);
        assert_eq!(ids(&state.page_list), vec![3]);
    }

    #[test]
    fn goto_page_does_not_touch_total() {
        let paginated = paginated(2);
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions().goto_page(2));

        assert_eq!(state.page, 2);
        assert_eq!(state.page_list, vec![json!({ "Id": 3, "name": "c" })]);
        assert_eq!(state.total, 2);
    }

    #[test]
    fn goto_page_is_not_clamped() {
        let paginated = paginated(2);
        let state = paginated.reduce(&paginated.init(), &actions().goto_page(9));

        assert_eq!(state.page, 9);
        assert!(state.page_list.is_empty());
    }

    #[test]
    fn next_page_wraps_to_first_after_last() {
        let paginated = paginated(2);
        let state = paginated.init();

        let state = paginated.reduce(&state, &actions().next_page());
        assert_eq!(state.page, 2);

        let state = paginated.reduce(&state, &actions().next_page());
        assert_eq!(state.page, 1);
        assert_eq!(ids(&state.page_list), vec![1, 2]);
    }

    #[test]
    fn prev_page_wraps_to_last_before_first() {
        let paginated = paginated(2);
        let state = paginated.reduce(&paginated.init(), &actions().prev_page());

        assert_eq!(state.page, 2);
        assert_eq!(ids(&state.page_list), vec![3]);

        let state = paginated.reduce(&state, &actions().prev_page());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn navigation_on_empty_list_stays_on_first_page() {
        let paginated = paginated(2);
        let state = paginated.reduce(&paginated.init(), &actions().forward(ListAction::Clear));

        let next = paginated.reduce(&state, &actions().next_page());
        let prev = paginated.reduce(&state, &actions().prev_page());

        assert_eq!(next.page, 1);
        assert_eq!(prev.page, 1);
        assert_eq!(next.total, 0);
    }

    #[test]
    fn sort_same_field_toggles_and_reverses() {
        let paginated = paginated(2);
        let state = paginated.init();
        let sorted = paginated.reduce(&state, &actions().sort_by("Id"));

        assert_eq!(sorted.order, SortOrder::Descending);
        assert_eq!(sorted.cache_list, reverse_list(&state.cache_list));
        assert_eq!(ids(&sorted.page_list), vec![3, 2]);

        let again = paginated.reduce(&sorted, &actions().sort_by("Id"));
        assert_eq!(again.order, SortOrder::Ascending);
        assert_eq!(ids(&again.cache_list), vec![1, 2, 3]);
    }

    #[test]
    fn sort_new_field_resorts_ascending() {
        let paginated = paginated(2);
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions().sort_by("Id"));
        let state = paginated.reduce(&state, &actions().sort_by("name"));

        assert_eq!(state.by, "name");
        assert_eq!(state.order, SortOrder::Ascending);
        assert_eq!(ids(&state.cache_list), vec![1, 2, 3]);
    }

    #[test]
    fn sort_respects_active_filter() {
        let paginated = paginated(2);
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions().filter_with("c"));
        let state = paginated.reduce(&state, &actions().sort_by("name"));

        assert_eq!(ids(&state.cache_list), vec![3]);
    }

    #[test]
    fn change_per_zero_shows_whole_list() {
        let paginated = paginated(2);
        let state = paginated.reduce(&paginated.init(), &actions().change_per(0));

        assert_eq!(state.page_list, state.cache_list);
        assert_eq!(state.page_list.len(), 3);
        assert_eq!(state.per, 0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn change_per_clamps_page() {
        let paginated = paginated(1);
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions().goto_page(3));
        let state = paginated.reduce(&state, &actions().change_per(2));

        assert_eq!(state.total, 2);
        assert_eq!(state.page, 2);
        assert_eq!(ids(&state.page_list), vec![3]);
    }

    #[test]
    fn reset_restores_construction_options() {
        let paginated = paginated(2);
        let initial = paginated.init();

        let state = paginated.reduce(&initial, &actions().sort_by("Id"));
        let state = paginated.reduce(&state, &actions().filter_with("a"));
        let state = paginated.reduce(&state, &actions().change_per(5));
        let state = paginated.reduce(&state, &actions().reset());

        assert_eq!(*state, *initial);
    }

    #[test]
    fn reset_is_idempotent() {
        let paginated = paginated(2);
        let state = paginated.reduce(&paginated.init(), &actions().goto_page(2));

        let once = paginated.reduce(&state, &actions().reset());
        let twice = paginated.reduce(&once, &actions().reset());

        assert_eq!(*once, *twice);
    }

    #[test]
    fn reset_rederives_over_current_base() {
        let paginated = paginated(2);
        let state = paginated.init();
        let state = paginated.reduce(
            &state,
            &actions().forward(ListAction::Push(json!({ "Id": 0, "name": "z" }))),
        );
        let state = paginated.reduce(&state, &actions().sort_by("name"));
        let state = paginated.reduce(&state, &actions().goto_page(2));

        let state = paginated.reduce(&state, &actions().reset());

        assert_ne!(state.base, paginated.reducer().init());
        assert_eq!(ids(&state.base), vec![3, 1, 2, 0]);
        assert_eq!(ids(&state.cache_list), vec![0, 1, 2, 3]);
        assert_eq!(ids(&state.page_list), vec![0, 1]);
        assert_eq!(state.by, paginated.options().by);
        assert_eq!(state.page, paginated.options().page);
        assert_eq!(state.total, 2);
    }

    #[test]
    fn reset_after_clear_keeps_empty_base() {
        let paginated = paginated(2);
        let state = paginated.reduce(&paginated.init(), &actions().forward(ListAction::Clear));
        let state = paginated.reduce(&state, &actions().reset());

        assert!(state.base.is_empty());
        assert!(state.cache_list.is_empty());
        assert!(state.page_list.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.per, paginated.options().per);
    }

    #[test]
    fn forward_rederives_cache_with_current_parameters() {
        let paginated = paginated(2);
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions().sort_by("Id"));
        let state = paginated.reduce(
            &state,
            &actions().forward(ListAction::Push(json!({ "Id": 4, "name": "d" }))),
        );

        assert_eq!(ids(&state.base), vec![3, 1, 2, 4]);
        assert_eq!(ids(&state.cache_list), vec![4, 3, 2, 1]);
        assert_eq!(ids(&state.page_list), vec![4, 3]);
        assert_eq!(state.total, 2);
        assert_eq!(state.order, SortOrder::Descending);
    }

    #[test]
    fn forward_keeps_filter() {
        let paginated = paginated(2);
        let state = paginated.reduce(&paginated.init(), &actions().filter_with("z"));
        let state = paginated.reduce(
            &state,
            &actions().forward(ListAction::Push(json!({ "Id": 9, "name": "zed" }))),
        );

        assert_eq!(ids(&state.cache_list), vec![9]);
        assert_eq!(state.total, 1);
    }

    #[test]
    fn transitions_never_mutate_prior_state() {
        let paginated = paginated(2);
        let state = paginated.init();
        let snapshot = (*state).clone();

        let _ = paginated.reduce(&state, &actions().sort_by("name"));
        let _ = paginated.reduce(&state, &actions().forward(ListAction::Clear));

        assert_eq!(*state, snapshot);
    }

    #[test]
    fn custom_extractor_reads_nested_list() {
        #[derive(Clone)]
        struct Inbox {
            rows: Vec<Value>,
        }

        fn rows(inbox: &Inbox) -> &[Value] {
            &inbox.rows
        }

        let inner = reducer_fn(|| Inbox { rows: sample() }, |inbox: &Inbox, _: &()| inbox.clone());
        let paginated = Paginated::new("INBOX", inner)
            .extract_with::<_, Value>(rows)
            .with_options(PaginationOptions::default().with_per(2).with_by("name"));

        let state = paginated.init();
        assert_eq!(ids(&state.page_list), vec![1, 2]);
    }

    #[test]
    fn try_new_reports_every_problem() {
        let options = PaginationOptions {
            page: 0,
            ..PaginationOptions::default()
        };

        match Paginated::try_new("", list_reducer(), Identity, options) {
            Err(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| matches!(e, OptionsError::BlankNamespace)));
                assert!(errors.iter().any(|e| matches!(e, OptionsError::ZeroPage)));
            }
            Ok(_) => panic!("Expected invalid options to be rejected"),
        }
    }

    #[test]
    fn try_new_accepts_valid_options() {
        let paginated =
            Paginated::try_new("LIST", list_reducer(), Identity, PaginationOptions::default());
        assert!(paginated.is_ok());
    }
}
