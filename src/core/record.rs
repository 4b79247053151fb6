//! Immutable record and sequence helpers.
//!
//! Every helper returns a new container and leaves its inputs untouched.
//! Elements are located by an explicit key rather than by reference.

use serde_json::{Map, Value};

/// Shallow merge of a record with a patch.
pub trait Merge {
    /// Return a new record holding `self` overlaid with `patch`.
    /// Keys present in `patch` win.
    fn merge(&self, patch: &Self) -> Self;
}

impl Merge for Map<String, Value> {
    fn merge(&self, patch: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl Merge for Value {
    fn merge(&self, patch: &Self) -> Self {
        match (self, patch) {
            (Value::Object(record), Value::Object(patch)) => Value::Object(record.merge(patch)),
            _ => patch.clone(),
        }
    }
}

/// Shallow union of `record` and `patch`.
///
/// # Example
///
/// ```rust
/// use cerebellum::core::merge;
/// use serde_json::json;
///
/// let record = json!({ "Id": 1, "name": "a" });
/// let merged = merge(&record, &json!({ "name": "b" }));
/// assert_eq!(merged, json!({ "Id": 1, "name": "b" }));
/// assert_eq!(record["name"], "a");
/// ```
pub fn merge<T: Merge>(record: &T, patch: &T) -> T {
    record.merge(patch)
}

/// Return a new sequence with `item` added at the end.
pub fn append<T: Clone>(sequence: &[T], item: T) -> Vec<T> {
    let mut appended = Vec::with_capacity(sequence.len() + 1);
    appended.extend_from_slice(sequence);
    appended.push(item);
    appended
}

/// Replace the element sharing `target`'s key with `merge(target, patch)`.
///
/// When no element matches, the sequence is returned unchanged.
pub fn replace_by_key<T, K, F>(sequence: &[T], key: F, target: &T, patch: &T) -> Vec<T>
where
    T: Merge + Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let wanted = key(target);
    let Some(index) = sequence.iter().position(|item| key(item) == wanted) else {
        return sequence.to_vec();
    };

    let mut replaced = sequence.to_vec();
    replaced[index] = target.merge(patch);
    replaced
}

/// Remove the element sharing `target`'s key.
///
/// When no element matches, the sequence is returned unchanged.
pub fn remove_by_key<T, K, F>(sequence: &[T], key: F, target: &T) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let wanted = key(target);
    match sequence.iter().position(|item| key(item) == wanted) {
        Some(index) => sequence[..index]
            .iter()
            .chain(&sequence[index + 1..])
            .cloned()
            .collect(),
        None => sequence.to_vec(),
    }
}
