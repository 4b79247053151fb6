//! Macros for implementing `Item` on plain structs.

/// Generate an `Item` implementation from a list of struct fields.
///
/// Fields are exposed under their Rust name, or under an explicit key with
/// the `"Key" => field` form. Every listed field type needs a
/// `From<&T> for FieldValue` conversion.
///
/// # Example
///
/// ```
/// use cerebellum::core::{FieldValue, Item};
/// use cerebellum::impl_item;
///
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl_item!(User { "Id" => id, "name" => name });
///
/// let user = User { id: 4, name: "Grace".into() };
/// assert_eq!(user.field("Id"), Some(FieldValue::Int(4)));
/// assert_eq!(user.field("name"), Some(FieldValue::Text("Grace")));
/// ```
#[macro_export]
macro_rules! impl_item {
    ($name:ident { $($field:ident),* $(,)? }) => {
        $crate::impl_item!($name { $(stringify!($field) => $field),* });
    };
    ($name:ident { $($key:expr => $field:ident),* $(,)? }) => {
        impl $crate::core::Item for $name {
            fn field(&self, name: &str) -> Option<$crate::core::FieldValue<'_>> {
                $(
                    if name == $key {
                        return Some($crate::core::FieldValue::from(&self.$field));
                    }
                )*
                None
            }

            fn values(&self) -> Vec<$crate::core::FieldValue<'_>> {
                vec![$($crate::core::FieldValue::from(&self.$field)),*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldValue, Item};

    #[derive(Clone)]
    struct Task {
        id: u64,
        title: String,
        done: bool,
        owner: Option<String>,
    }

    impl_item!(Task { id, title, done, owner });

    #[derive(Clone)]
    struct Renamed {
        id: i32,
    }

    impl_item!(Renamed { "Id" => id });

    #[test]
    fn impl_item_exposes_rust_field_names() {
        let task = Task {
            id: 9,
            title: "write docs".into(),
            done: false,
            owner: None,
        };

        assert_eq!(task.field("id"), Some(FieldValue::Int(9)));
        assert_eq!(task.field("title"), Some(FieldValue::Text("write docs")));
        assert_eq!(task.field("done"), Some(FieldValue::Bool(false)));
        assert_eq!(task.field("owner"), Some(FieldValue::Null));
        assert_eq!(task.field("missing"), None);
        assert_eq!(task.values().len(), 4);
    }

    #[test]
    fn impl_item_supports_explicit_keys() {
        let item = Renamed { id: 1 };
        assert_eq!(item.field("Id"), Some(FieldValue::Int(1)));
        assert_eq!(item.field("id"), None);
    }
}
