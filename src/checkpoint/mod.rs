//! Save and restore pagination parameters.
//!
//! A checkpoint records where a user was (page, page size, sort and filter)
//! without the list itself. Restoring re-derives the cached and paged lists
//! over whatever the wrapped state holds at that moment, so a checkpoint
//! taken yesterday still lands on sensible data today.

use crate::core::{slice_for_page, total_pages, Item, Reducer, SortOrder};
use crate::paginate::{Extractor, Paginated, PaginationState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of the pagination parameters of one namespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginationCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub namespace: String,
    pub page: usize,
    pub per: usize,
    pub order: SortOrder,
    pub by: String,
    pub filter: String,
}

impl PaginationCheckpoint {
    /// Capture the parameters of `state` under `namespace`.
    pub fn capture<B, T>(namespace: impl Into<String>, state: &PaginationState<B, T>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            namespace: namespace.into(),
            page: state.page,
            per: state.per,
            order: state.order,
            by: state.by.clone(),
            filter: state.filter.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(self)
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}

impl<R, X> Paginated<R, X>
where
    R: Reducer,
    R::State: Clone,
    X: Extractor<R::State>,
    X::Item: Item + Clone,
{
    /// Capture the pagination parameters of `state`.
    pub fn checkpoint(
        &self,
        state: &PaginationState<R::State, X::Item>,
    ) -> PaginationCheckpoint {
        PaginationCheckpoint::capture(self.namespace(), state)
    }

    /// Apply `checkpoint` to the wrapped state held by `state`.
    ///
    /// The base is kept as-is; cache, page list and total are recomputed
    /// from it with the checkpointed parameters. The page is not clamped,
    /// matching `GotoPage`.
    pub fn restore(
        &self,
        state: &PaginationState<R::State, X::Item>,
        checkpoint: &PaginationCheckpoint,
    ) -> Result<Arc<PaginationState<R::State, X::Item>>, CheckpointError> {
        if checkpoint.namespace != self.namespace() {
            return Err(CheckpointError::NamespaceMismatch {
                expected: self.namespace().to_string(),
                found: checkpoint.namespace.clone(),
            });
        }

        let cache_list = self.derive(
            &state.base,
            &checkpoint.filter,
            &checkpoint.by,
            checkpoint.order,
        );

        debug!(
            namespace = %checkpoint.namespace,
            checkpoint = %checkpoint.id,
            page = checkpoint.page,
            "pagination restored"
        );

        Ok(Arc::new(PaginationState {
            base: state.base.clone(),
            page_list: slice_for_page(checkpoint.page, checkpoint.per, &cache_list),
            total: total_pages(checkpoint.per, &cache_list),
            cache_list,
            page: checkpoint.page,
            per: checkpoint.per,
            order: checkpoint.order,
            by: checkpoint.by.clone(),
            filter: checkpoint.filter.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reducer_fn;
    use crate::paginate::{PageActions, PaginationOptions};
    use serde_json::{json, Value};

    fn people() -> Vec<Value> {
        vec![
            json!({ "Id": 1, "name": "Ada" }),
            json!({ "Id": 2, "name": "Brian" }),
            json!({ "Id": 3, "name": "Alan" }),
            json!({ "Id": 4, "name": "Grace" }),
            json!({ "Id": 5, "name": "Barbara" }),
        ]
    }

    fn paginated() -> Paginated<impl Reducer<State = Vec<Value>, Action = Vec<Value>>> {
        let inner = reducer_fn(people, |_: &Vec<Value>, replacement: &Vec<Value>| {
            replacement.clone()
        });
        Paginated::new("PEOPLE", inner).with_options(PaginationOptions::default().with_per(2))
    }

    fn ids(list: &[Value]) -> Vec<i64> {
        list.iter().filter_map(|item| item["Id"].as_i64()).collect()
    }

    #[test]
    fn checkpoint_captures_parameters_only() {
        let paginated = paginated();
        let actions = PageActions::new("PEOPLE");
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions.sort_by("name"));
        let state = paginated.reduce(&state, &actions.next_page());

        let checkpoint = paginated.checkpoint(&state);

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.namespace, "PEOPLE");
        assert_eq!(checkpoint.page, 2);
        assert_eq!(checkpoint.per, 2);
        assert_eq!(checkpoint.by, "name");
        assert_eq!(checkpoint.order, SortOrder::Ascending);
        assert_eq!(checkpoint.filter, "");
    }

    #[test]
    fn checkpoints_get_distinct_ids() {
        let paginated = paginated();
        let state = paginated.init();

        assert_ne!(paginated.checkpoint(&state).id, paginated.checkpoint(&state).id);
    }

    #[test]
    fn json_round_trip() {
        let paginated = paginated();
        let state = paginated.init();
        let checkpoint = paginated.checkpoint(&state);

        let json = checkpoint.to_json().unwrap();
        assert!(json.contains("\"namespace\":\"PEOPLE\""));
        assert_eq!(PaginationCheckpoint::from_json(&json).unwrap(), checkpoint);
    }

    #[test]
    fn binary_round_trip() {
        let paginated = paginated();
        let actions = PageActions::new("PEOPLE");
        let state = paginated.reduce(&paginated.init(), &actions.filter_with("a"));
        let checkpoint = paginated.checkpoint(&state);

        let bytes = checkpoint.to_binary().unwrap();
        assert_eq!(PaginationCheckpoint::from_binary(&bytes).unwrap(), checkpoint);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let paginated = paginated();
        let mut checkpoint = paginated.checkpoint(&paginated.init());
        checkpoint.version = 99;
        let json = checkpoint.to_json().unwrap();

        assert_eq!(
            PaginationCheckpoint::from_json(&json).unwrap_err(),
            CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            }
        );
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            PaginationCheckpoint::from_json("{ not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            PaginationCheckpoint::from_binary(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn restore_reapplies_parameters() {
        let paginated = paginated();
        let actions = PageActions::new("PEOPLE");
        let state = paginated.init();
        let saved = paginated.reduce(&state, &actions.filter_with("a"));
        let saved = paginated.reduce(&saved, &actions.sort_by("name"));
        let saved = paginated.reduce(&saved, &actions.goto_page(2));
        let checkpoint = paginated.checkpoint(&saved);

        let restored = paginated.restore(&state, &checkpoint).unwrap();

        assert_eq!(*restored, *saved);
    }

    #[test]
    fn restore_rederives_over_current_base() {
        let paginated = paginated();
        let actions = PageActions::new("PEOPLE");
        let state = paginated.init();
        let state = paginated.reduce(&state, &actions.goto_page(2));
        let checkpoint = paginated.checkpoint(&state);

        let shrunk = paginated.reduce(&paginated.init(), &actions.forward(people()[..3].to_vec()));
        let restored = paginated.restore(&shrunk, &checkpoint).unwrap();

        assert_eq!(restored.page, 2);
        assert_eq!(restored.total, 2);
        assert_eq!(ids(&restored.page_list), vec![3]);
        assert_eq!(restored.base, shrunk.base);
    }

    #[test]
    fn restore_rejects_foreign_namespace() {
        let paginated = paginated();
        let mut checkpoint = paginated.checkpoint(&paginated.init());
        checkpoint.namespace = "ORDERS".to_string();

        assert_eq!(
            paginated.restore(&paginated.init(), &checkpoint).unwrap_err(),
            CheckpointError::NamespaceMismatch {
                expected: "PEOPLE".to_string(),
                found: "ORDERS".to_string()
            }
        );
    }
}
