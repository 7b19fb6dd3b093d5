// crates/core/src/record.rs

//! Record type and typed accessors over its JSON fields.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A single row: field name → JSON value.
pub type Record = Map<String, Value>;

/// Identifier of a record within its table (a numeric-looking string).
pub type RecordId = String;

/// Typed read access to record fields.
///
/// Seed data written by hand is loose about types (money is often stored as
/// a string, ids sometimes as numbers), so the accessors accept both forms.
pub trait RecordExt {
    fn str_field(&self, field: &str) -> Option<&str>;
    fn f64_field(&self, field: &str) -> Option<f64>;
    fn bool_field(&self, field: &str) -> Option<bool>;

    /// Field rendered as a string id: strings as-is, integers formatted.
    fn id_field(&self, field: &str) -> Option<String>;

    fn has_status(&self, status: &str) -> bool {
        self.str_field("status") == Some(status)
    }

    /// True when `field` holds `id`, whether stored as a string or a number.
    fn refers_to(&self, field: &str, id: &str) -> bool {
        self.id_field(field).as_deref() == Some(id)
    }
}

impl RecordExt for Record {
    fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|v| v.as_str())
    }

    fn f64_field(&self, field: &str) -> Option<f64> {
        value_as_f64(self.get(field)?)
    }

    fn bool_field(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(|v| v.as_bool())
    }

    fn id_field(&self, field: &str) -> Option<String> {
        value_as_id(self.get(field)?)
    }
}

/// Numeric view of a JSON value; numeric strings are parsed.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Id view of a JSON value.
pub fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

/// Build a record from a `json!({...})` object literal.
///
/// Non-object values produce an empty record.
pub fn record_from(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// `deserialize_with` helper: ids given as strings or integers.
pub fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value_as_id(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected an id, got {}", value)))
}

/// Optional form of [`de_id`]; `null` and absent both map to `None`.
pub fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value_as_id(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected an id, got {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_as_string_or_number() {
        let rec = record_from(json!({"a": "1200.50", "b": 99, "c": "n/a"}));
        assert_eq!(rec.f64_field("a"), Some(1200.5));
        assert_eq!(rec.f64_field("b"), Some(99.0));
        assert_eq!(rec.f64_field("c"), None);
        assert_eq!(rec.f64_field("missing"), None);
    }

    #[derive(Deserialize)]
    struct Args {
        #[serde(deserialize_with = "de_id")]
        id: String,
        #[serde(default, deserialize_with = "de_opt_id")]
        other: Option<String>,
    }

    #[test]
    fn test_flexible_ids() {
        let a: Args = serde_json::from_value(json!({"id": 12})).unwrap();
        assert_eq!(a.id, "12");
        assert_eq!(a.other, None);
        let b: Args = serde_json::from_value(json!({"id": "7", "other": 3})).unwrap();
        assert_eq!(b.other.as_deref(), Some("3"));
        assert!(serde_json::from_value::<Args>(json!({"id": true})).is_err());
    }

    #[test]
    fn test_refers_to_numeric_id() {
        let rec = record_from(json!({"employee_id": 7, "cycle_id": "3"}));
        assert!(rec.refers_to("employee_id", "7"));
        assert!(rec.refers_to("cycle_id", "3"));
        assert!(!rec.refers_to("cycle_id", "4"));
    }
}
