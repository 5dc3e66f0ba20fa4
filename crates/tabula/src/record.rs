//! The [`Record`] trait: how the engine reads fields out of a row.
//!
//! The engine never looks at a record's concrete shape. It asks for a field
//! by column key and gets a [`Value`] back. Implement the trait by hand,
//! derive it with `#[derive(Record)]`, or use the provided implementation
//! for JSON objects.

use std::borrow::Cow;

use crate::value::{Number, Value};

/// Key consulted by [`Record::record_id`] when no explicit id is provided.
pub const ID_FIELD: &str = "id";

/// Trait for types that can be tabulated.
///
/// # Manual Implementation
///
/// ```
/// use tabula::{Record, Value};
///
/// struct Device {
///     id: String,
///     model: String,
/// }
///
/// impl Record for Device {
///     fn field(&self, key: &str) -> Value<'_> {
///         match key {
///             "id" => Value::String(&self.id),
///             "model" => Value::String(&self.model),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let d = Device { id: "d-1".into(), model: "MacBook Pro".into() };
/// assert_eq!(d.record_id().as_deref(), Some("d-1"));
/// ```
pub trait Record {
    /// Returns the value stored under `key`, or [`Value::None`] if the
    /// record has no such field.
    fn field(&self, key: &str) -> Value<'_>;

    /// Returns the record's own identity, if it has one.
    ///
    /// The default reads the `id` field and string-coerces it. Records
    /// without an id get a positional identity from the
    /// [`IdResolver`](crate::IdResolver).
    fn record_id(&self) -> Option<Cow<'_, str>> {
        match self.field(ID_FIELD) {
            Value::String(s) => Some(Cow::Borrowed(s)),
            other => other.coerce().map(|c| Cow::Owned(c.into_owned())),
        }
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Value<'_> {
        (**self).field(key)
    }

    fn record_id(&self) -> Option<Cow<'_, str>> {
        (**self).record_id()
    }
}

/// Helper trait for enum fields, which are tabulated by label.
///
/// Used by `#[derive(Record)]` for fields marked `#[record(Enum)]`.
///
/// ```
/// use tabula::RecordLabel;
///
/// enum Status {
///     Active,
///     OnLeave,
/// }
///
/// impl RecordLabel for Status {
///     fn record_label(&self) -> &str {
///         match self {
///             Status::Active => "active",
///             Status::OnLeave => "on_leave",
///         }
///     }
/// }
/// ```
pub trait RecordLabel {
    /// Returns the label used for search, filtering and sorting.
    fn record_label(&self) -> &str;
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Value<'_> {
        self.get(key).map(json_value).unwrap_or(Value::None)
    }
}

/// Non-object JSON values have no fields.
impl Record for serde_json::Value {
    fn field(&self, key: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field(key),
            _ => Value::None,
        }
    }
}

fn json_value(v: &serde_json::Value) -> Value<'_> {
    use serde_json::Value as Json;

    match v {
        Json::Null => Value::None,
        Json::Bool(b) => Value::Bool(*b),
        Json::String(s) => Value::String(s),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::I64(i))
            } else if let Some(u) = n.as_u64() {
                Value::Number(Number::U64(u))
            } else {
                n.as_f64()
                    .map(|f| Value::Number(Number::F64(f)))
                    .unwrap_or(Value::None)
            }
        }
        Json::Array(_) | Json::Object(_) => Value::Text(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Employee {
        name: String,
        age: Option<u32>,
    }

    impl Record for Employee {
        fn field(&self, key: &str) -> Value<'_> {
            match key {
                "name" => Value::String(&self.name),
                "age" => self.age.into(),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn manual_impl() {
        let e = Employee {
            name: "Ann".into(),
            age: None,
        };
        assert_eq!(e.field("name"), Value::String("Ann"));
        assert_eq!(e.field("age"), Value::None);
        assert_eq!(e.field("unknown"), Value::None);
        assert_eq!(e.record_id(), None);
    }

    #[test]
    fn json_fields() {
        let row = json!({
            "id": "1",
            "name": "Bob",
            "age": 30,
            "score": 2.5,
            "active": true,
            "manager": null,
            "tags": ["a", "b"]
        });
        assert_eq!(row.field("name"), Value::String("Bob"));
        assert_eq!(row.field("age"), Value::Number(Number::I64(30)));
        assert_eq!(row.field("score"), Value::Number(Number::F64(2.5)));
        assert_eq!(row.field("active"), Value::Bool(true));
        assert_eq!(row.field("manager"), Value::None);
        assert_eq!(row.field("nope"), Value::None);
        assert_eq!(row.field("tags"), Value::Text(r#"["a","b"]"#.into()));
    }

    #[test]
    fn json_record_id_coerces_numbers() {
        assert_eq!(json!({"id": "e-7"}).record_id().as_deref(), Some("e-7"));
        assert_eq!(json!({"id": 42}).record_id().as_deref(), Some("42"));
        assert_eq!(json!({"id": null}).record_id(), None);
        assert_eq!(json!({"name": "x"}).record_id(), None);
    }

    #[test]
    fn json_non_object_has_no_fields() {
        assert_eq!(json!([1, 2]).field("id"), Value::None);
        assert_eq!(json!("text").record_id(), None);
    }
}
