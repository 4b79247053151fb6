//! Field access for list items.
//!
//! Filtering and sorting never look at concrete item types. They go through
//! the `Item` trait, which exposes named fields as comparable `FieldValue`s.

use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A borrowed, comparable view of a single field.
///
/// Values form a total order so any field can serve as a sort key:
/// `Null < Bool < number < Text`. Integers and floats compare by exact
/// numeric value, `-0.0 == 0`, and NaN sorts above every number.
#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl<'a> FieldValue<'a> {
    /// Text content, if this is a string field.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl Ord for FieldValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Int(a), Self::Float(b)) => int_cmp_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => int_cmp_float(*b, *a).reverse(),
            (Self::Float(a), Self::Float(b)) if a == b => Ordering::Equal,
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Exact comparison of an integer with a float, without rounding `int`.
fn int_cmp_float(int: i64, float: f64) -> Ordering {
    // 2^63 is exactly representable, i64::MAX is not.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return 0.0f64.total_cmp(&float);
    }
    if float >= BOUND {
        return Ordering::Less;
    }
    if float < -BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&float).unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue<'_> {}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> From<&'a &'a str> for FieldValue<'a> {
    fn from(value: &'a &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<&bool> for FieldValue<'_> {
    fn from(value: &bool) -> Self {
        Self::Bool(*value)
    }
}

macro_rules! int_field {
    ($($ty:ty),*) => {
        $(
            impl From<&$ty> for FieldValue<'_> {
                fn from(value: &$ty) -> Self {
                    Self::Int(i64::from(*value))
                }
            }
        )*
    };
}

int_field!(i8, i16, i32, i64, u8, u16, u32);

impl From<&u64> for FieldValue<'_> {
    fn from(value: &u64) -> Self {
        i64::try_from(*value).map_or(Self::Float(*value as f64), Self::Int)
    }
}

impl From<&usize> for FieldValue<'_> {
    fn from(value: &usize) -> Self {
        i64::try_from(*value).map_or(Self::Float(*value as f64), Self::Int)
    }
}

impl From<&f32> for FieldValue<'_> {
    fn from(value: &f32) -> Self {
        Self::Float(f64::from(*value))
    }
}

impl From<&f64> for FieldValue<'_> {
    fn from(value: &f64) -> Self {
        Self::Float(*value)
    }
}

macro_rules! optional_field {
    ($($ty:ty),*) => {
        $(
            impl<'a> From<&'a Option<$ty>> for FieldValue<'a> {
                fn from(value: &'a Option<$ty>) -> Self {
                    value.as_ref().map_or(Self::Null, |inner| FieldValue::from(inner))
                }
            }
        )*
    };
}

optional_field!(String, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, Value);

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            Value::String(s) => Self::Text(s),
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Null,
        }
    }
}

/// An element of a paginated list.
///
/// # Example
///
/// ```rust
/// use cerebellum::core::{FieldValue, Item};
/// use serde_json::json;
///
/// let user = json!({ "Id": 7, "name": "Ada" });
/// assert_eq!(user.field("Id"), Some(FieldValue::Int(7)));
/// assert_eq!(user.field("missing"), None);
/// ```
pub trait Item {
    /// Look up a field by name. `None` when the item has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Every field value of the item, used for free-text filtering.
    fn values(&self) -> Vec<FieldValue<'_>>;

    /// Sort key used when no sort field is configured.
    fn whole(&self) -> FieldValue<'_> {
        FieldValue::Null
    }
}

impl Item for Map<String, Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|value| FieldValue::from(value))
    }

    fn values(&self) -> Vec<FieldValue<'_>> {
        Map::values(self).map(|value| FieldValue::from(value)).collect()
    }
}

impl Item for Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.as_object().and_then(|object| object.field(name))
    }

    fn values(&self) -> Vec<FieldValue<'_>> {
        match self {
            Value::Object(object) => Item::values(object),
            scalar => vec![FieldValue::from(scalar)],
        }
    }

    fn whole(&self) -> FieldValue<'_> {
        FieldValue::from(self)
    }
}
