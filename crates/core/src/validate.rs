// crates/core/src/validate.rs

//! Field validation combinators and the validated mutation helper.
//!
//! A tool describes the constraints on the fields it writes with a
//! [`FieldRules`] list, then hands the updates to [`apply_mutation`]. Every
//! rule is evaluated against the untouched store before anything is written,
//! so a failing call leaves the store exactly as it was.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::clock::{Clock, DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::error::ToolError;
use crate::record::{value_as_f64, value_as_id, Record, RecordExt};
use crate::store::Store;
use crate::table::TableSchema;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").ok());

/// One constraint on a single field.
///
/// Absent and `null` values satisfy every rule except [`Rule::Required`].
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Must be present and not null (create), or not null when given (update).
    Required,
    /// Strings must contain a non-whitespace character.
    NonEmpty,
    OneOf(&'static [&'static str]),
    /// Value is the id of an existing row of the given table.
    ForeignKey(TableSchema),
    /// Like `ForeignKey`, and the row has `status == "active"`.
    ActiveForeignKey(TableSchema),
    NonNegative,
    Range { min: f64, max: f64 },
    /// `YYYY-MM-DD`.
    Date,
    Email,
    /// No other row of the target table holds the same value (case-insensitive).
    Unique,
    Text,
    Number,
    Boolean,
}

/// Ordered per-field rule list.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: &[Rule]) -> Self {
        self.fields.push((name, rules.to_vec()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check `values` against every rule, in declaration order.
    ///
    /// `target` and `own_id` scope `Unique`: the row being updated does not
    /// collide with itself.
    pub fn check(
        &self,
        store: &Store,
        target: &TableSchema,
        own_id: Option<&str>,
        values: &Record,
        creating: bool,
    ) -> Result<(), ToolError> {
        for (field, rules) in &self.fields {
            let value = values.get(*field);
            for rule in rules {
                check_rule(store, target, own_id, field, value, *rule, creating)?;
            }
        }
        Ok(())
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_rule(
    store: &Store,
    target: &TableSchema,
    own_id: Option<&str>,
    field: &str,
    value: Option<&Value>,
    rule: Rule,
    creating: bool,
) -> Result<(), ToolError> {
    if let Rule::Required = rule {
        let missing = match value {
            None => creating,
            Some(v) => v.is_null(),
        };
        if missing {
            return Err(ToolError::malformed(format!("{} is required", field)));
        }
        return Ok(());
    }

    let Some(value) = present(value) else {
        return Ok(());
    };

    match rule {
        Rule::Required => Ok(()),
        Rule::Text => value
            .as_str()
            .map(|_| ())
            .ok_or_else(|| ToolError::malformed(format!("{} must be a string", field))),
        Rule::Number => value
            .as_f64()
            .map(|_| ())
            .ok_or_else(|| ToolError::malformed(format!("{} must be a number", field))),
        Rule::Boolean => value
            .as_bool()
            .map(|_| ())
            .ok_or_else(|| ToolError::malformed(format!("{} must be a boolean", field))),
        Rule::NonEmpty => match value.as_str() {
            Some(s) if s.trim().is_empty() => {
                Err(ToolError::malformed(format!("{} cannot be empty", field)))
            }
            _ => Ok(()),
        },
        Rule::OneOf(allowed) => {
            let shown = display(value);
            if allowed.contains(&shown.as_str()) {
                Ok(())
            } else {
                Err(ToolError::invalid_choice(field, &shown, allowed))
            }
        }
        Rule::ForeignKey(schema) => {
            let id = value_as_id(value)
                .ok_or_else(|| ToolError::malformed(format!("{} must be an id", field)))?;
            store.require(&schema, &id).map(|_| ())
        }
        Rule::ActiveForeignKey(schema) => {
            let id = value_as_id(value)
                .ok_or_else(|| ToolError::malformed(format!("{} must be an id", field)))?;
            let row = store.require(&schema, &id)?;
            if row.has_status("active") {
                Ok(())
            } else {
                Err(ToolError::referential(format!(
                    "{} '{}' is not active",
                    schema.entity, id
                )))
            }
        }
        Rule::NonNegative => match value_as_f64(value) {
            Some(n) if n >= 0.0 => Ok(()),
            Some(_) => Err(ToolError::rule(format!("{} must be non-negative", field))),
            None => Err(ToolError::malformed(format!("{} must be a number", field))),
        },
        Rule::Range { min, max } => match value_as_f64(value) {
            Some(n) if n >= min && n <= max => Ok(()),
            Some(_) => Err(ToolError::rule(format!(
                "{} must be between {} and {}",
                field, min, max
            ))),
            None => Err(ToolError::malformed(format!("{} must be a number", field))),
        },
        Rule::Date => {
            let s = value
                .as_str()
                .ok_or_else(|| ToolError::malformed(format!("{} must be a date string", field)))?;
            check_date(s, field).map(|_| ())
        }
        Rule::Email => {
            let s = value.as_str().unwrap_or_default();
            let valid = EMAIL_RE.as_ref().is_some_and(|re| re.is_match(s.trim()));
            if valid {
                Ok(())
            } else {
                Err(ToolError::malformed(format!("Invalid email format: {}", display(value))))
            }
        }
        Rule::Unique => {
            let wanted = display(value).to_lowercase();
            let clash = store.table(target.name).and_then(|table| {
                table.iter().find(|(id, rec)| {
                    Some(*id) != own_id
                        && rec.get(field).map(|v| display(v).to_lowercase()) == Some(wanted.clone())
                })
            });
            match clash {
                Some((id, _)) => Err(ToolError::rule(format!(
                    "{} with {} '{}' already exists ({}: '{}')",
                    target.entity,
                    field,
                    display(value),
                    target.id_field,
                    id
                ))),
                None => Ok(()),
            }
        }
    }
}

/// Required, non-blank string argument.
pub fn require_text<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ToolError> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ToolError::malformed(format!("{} is required", field))),
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn check_date(value: &str, field: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ToolError::malformed(format!(
            "Invalid {} '{}'. Expected format YYYY-MM-DD",
            field, value
        ))
    })
}

pub fn check_timestamp(value: &str, field: &str) -> Result<NaiveDateTime, ToolError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        ToolError::malformed(format!(
            "Invalid {} '{}'. Expected format YYYY-MM-DDTHH:MM:SS",
            field, value
        ))
    })
}

/// Enum membership for a plain argument.
pub fn check_choice(value: &str, field: &str, allowed: &[&str]) -> Result<(), ToolError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ToolError::invalid_choice(field, value, allowed))
    }
}

/// Validated create-or-update of one row.
///
/// * `record_id = Some(id)`: the row must exist and `updates` must be
///   non-empty; the merged row gets `schema.updated_field` stamped.
/// * `record_id = None`: a new row is created under `store.next_id(schema)`
///   with the id field, `created_at` and the updated field stamped.
///
/// Rules run before any write; on error the store is untouched.
pub fn apply_mutation(
    store: &mut Store,
    clock: &dyn Clock,
    schema: &TableSchema,
    record_id: Option<&str>,
    updates: Record,
    rules: &FieldRules,
) -> Result<Record, ToolError> {
    let now = clock.timestamp();
    match record_id {
        Some(id) => {
            store.require(schema, id)?;
            if updates.is_empty() {
                return Err(ToolError::NoFieldsToUpdate);
            }
            rules.check(store, schema, Some(id), &updates, false)?;

            let row = store.require_mut(schema, id)?;
            for (k, v) in updates {
                row.insert(k, v);
            }
            row.insert(schema.updated_field.to_string(), Value::String(now));
            debug!(table = schema.name, id, "record updated");
            Ok(row.clone())
        }
        None => {
            rules.check(store, schema, None, &updates, true)?;

            let id = store.next_id(schema);
            let mut row = Record::new();
            row.insert(schema.id_field.to_string(), Value::String(id.clone()));
            for (k, v) in updates {
                row.insert(k, v);
            }
            row.insert("created_at".to_string(), Value::String(now.clone()));
            row.insert(schema.updated_field.to_string(), Value::String(now));
            store.insert(schema, id.clone(), row.clone());
            debug!(table = schema.name, id = id.as_str(), "record created");
            Ok(row)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::record::record_from;
    use serde_json::json;

    const DEPARTMENTS: TableSchema = TableSchema::new("departments", "department_id", "Department");
    const EMPLOYEES: TableSchema = TableSchema::new("employees", "employee_id", "Employee");

    fn store() -> Store {
        Store::from_json_str(
            &json!({
                "departments": {"1": {"department_id": "1", "status": "active"},
                                "2": {"department_id": "2", "status": "inactive"}},
                "employees": {"1": {"employee_id": "1", "email": "ann@co.com", "status": "active"}}
            })
            .to_string(),
        )
        .unwrap()
    }

    fn rules() -> FieldRules {
        FieldRules::new()
            .field("full_name", &[Rule::Required, Rule::Text, Rule::NonEmpty])
            .field("email", &[Rule::Required, Rule::Email, Rule::Unique])
            .field("department_id", &[Rule::ActiveForeignKey(DEPARTMENTS)])
            .field("status", &[Rule::OneOf(&["active", "inactive"])])
            .field("salary", &[Rule::NonNegative])
    }

    #[test]
    fn test_create_assigns_next_id_and_stamps() {
        let mut store = store();
        let clock = FixedClock::fixture();
        let row = apply_mutation(
            &mut store,
            &clock,
            &EMPLOYEES,
            None,
            record_from(json!({"full_name": "Bo", "email": "bo@co.com", "department_id": "1"})),
            &rules(),
        )
        .unwrap();
        assert_eq!(row["employee_id"], "2");
        assert_eq!(row["created_at"], "2025-12-12T12:00:00");
        assert_eq!(row["updated_at"], "2025-12-12T12:00:00");
        assert!(store.contains("employees", "2"));
    }

    #[test]
    fn test_create_missing_required() {
        let mut store = store();
        let before = store.clone();
        let err = apply_mutation(
            &mut store,
            &FixedClock::fixture(),
            &EMPLOYEES,
            None,
            record_from(json!({"email": "x@co.com"})),
            &rules(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "full_name is required");
        assert_eq!(store, before);
    }

    #[test]
    fn test_update_no_fields() {
        let mut store = store();
        let before = store.clone();
        let err = apply_mutation(
            &mut store,
            &FixedClock::fixture(),
            &EMPLOYEES,
            Some("1"),
            Record::new(),
            &rules(),
        )
        .unwrap_err();
        assert_eq!(err, ToolError::NoFieldsToUpdate);
        assert_eq!(store, before);
    }

    #[test]
    fn test_update_missing_record() {
        let mut store = store();
        let err = apply_mutation(
            &mut store,
            &FixedClock::fixture(),
            &EMPLOYEES,
            Some("99"),
            record_from(json!({"status": "inactive"})),
            &rules(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Employee with ID '99' not found");
    }

    #[test]
    fn test_update_rejects_bad_fk_without_partial_write() {
        let mut store = store();
        let before = store.clone();
        for dept in ["2", "7"] {
            let err = apply_mutation(
                &mut store,
                &FixedClock::fixture(),
                &EMPLOYEES,
                Some("1"),
                record_from(json!({"status": "inactive", "department_id": dept})),
                &rules(),
            );
            assert!(err.is_err());
        }
        assert_eq!(store, before);
    }

    #[test]
    fn test_unique_ignores_self() {
        let mut store = store();
        let row = apply_mutation(
            &mut store,
            &FixedClock::fixture(),
            &EMPLOYEES,
            Some("1"),
            record_from(json!({"email": "ANN@co.com"})),
            &rules(),
        )
        .unwrap();
        assert_eq!(row["email"], "ANN@co.com");

        let err = apply_mutation(
            &mut store,
            &FixedClock::fixture(),
            &EMPLOYEES,
            None,
            record_from(json!({"full_name": "Dup", "email": "ann@co.com"})),
            &rules(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_scalar_rules() {
        let s = store();
        let r = FieldRules::new()
            .field("n", &[Rule::Range { min: 0.0, max: 100.0 }])
            .field("d", &[Rule::Date])
            .field("b", &[Rule::Boolean]);
        let ok = record_from(json!({"n": 50, "d": "2025-02-28", "b": true}));
        assert!(r.check(&s, &EMPLOYEES, None, &ok, false).is_ok());
        for bad in [json!({"n": 101}), json!({"d": "2025-02-30"}), json!({"b": "yes"})] {
            assert!(r.check(&s, &EMPLOYEES, None, &record_from(bad), false).is_err());
        }
    }

    #[test]
    fn test_helpers() {
        assert_eq!(require_text(Some("  x "), "name").unwrap(), "x");
        assert!(require_text(Some("  "), "name").is_err());
        assert!(require_text(None, "name").is_err());
        assert!(check_choice("a", "kind", &["a", "b"]).is_ok());
        assert!(check_date("2025-13-01", "start_date").is_err());
        assert!(check_timestamp("2025-10-01T08:30:00", "installed_at").is_ok());
        assert!(check_timestamp("2025-10-01", "installed_at").is_err());
    }
}
