// crates/core/src/filter.rs

//! Linear-scan lookup helpers.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::record::{value_as_f64, Record};
use crate::table::Table;

/// Every row satisfying `pred`, in table id order.
pub fn filter_records<'a, F>(table: &'a Table, mut pred: F) -> Vec<&'a Record>
where
    F: FnMut(&Record) -> bool,
{
    table.values().filter(|rec| pred(rec)).collect()
}

pub fn find_record<'a, F>(table: &'a Table, mut pred: F) -> Option<(&'a str, &'a Record)>
where
    F: FnMut(&Record) -> bool,
{
    table.iter().find(|(_, rec)| pred(rec))
}

/// Equality filter: every key of `filters` must match the record's field.
///
/// Strings compare case-insensitively; numbers and numeric strings compare
/// by value, so `{"employee_id": 3}` matches `"employee_id": "3"`.
pub fn matches_fields(record: &Record, filters: &Map<String, Value>) -> bool {
    filters.iter().all(|(key, wanted)| match record.get(key) {
        Some(have) => loose_eq(have, wanted),
        None => wanted.is_null(),
    })
}

fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.eq_ignore_ascii_case(y),
        (Value::Number(_), _) | (_, Value::Number(_)) => {
            match (value_as_f64(a), value_as_f64(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        _ => a == b,
    }
}

fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(x), Some(y)) => match (value_as_f64(x), value_as_f64(y)) {
            (Some(p), Some(q)) => p.partial_cmp(&q).unwrap_or(Ordering::Equal),
            _ => x.as_str().unwrap_or_default().cmp(y.as_str().unwrap_or_default()),
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Stable ascending sort by one field (missing values first).
pub fn sort_by_field_asc(rows: &mut [&Record], field: &str) {
    rows.sort_by(|a, b| compare_field(a, b, field));
}

/// Stable descending sort by one field (missing values last).
pub fn sort_by_field_desc(rows: &mut [&Record], field: &str) {
    rows.sort_by(|a, b| compare_field(b, a, field));
}

/// Clone rows into a JSON array.
pub fn to_json_array(rows: &[&Record]) -> Value {
    Value::Array(rows.iter().map(|r| Value::Object((*r).clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record_from;
    use serde_json::json;

    fn table() -> Table {
        let mut t = Table::new();
        t.insert("1", record_from(json!({"kind": "Loan", "date": "2025-01-05", "amt": "10"})));
        t.insert("2", record_from(json!({"kind": "tax", "date": "2025-03-01", "amt": 5})));
        t.insert("3", record_from(json!({"kind": "loan", "date": "2025-02-10"})));
        t
    }

    #[test]
    fn test_filter_and_sort_desc() {
        let t = table();
        let mut rows = filter_records(&t, |r| {
            matches_fields(r, &record_from(json!({"kind": "loan"})))
        });
        assert_eq!(rows.len(), 2);
        sort_by_field_desc(&mut rows, "date");
        assert_eq!(rows[0]["date"], "2025-02-10");
    }

    #[test]
    fn test_matches_numeric_string() {
        let t = table();
        let (id, _) = find_record(&t, |r| matches_fields(r, &record_from(json!({"amt": 10}))))
            .unwrap();
        assert_eq!(id, "1");
    }

    #[test]
    fn test_sort_asc_missing_first() {
        let t = table();
        let mut rows = filter_records(&t, |_| true);
        sort_by_field_asc(&mut rows, "amt");
        assert!(rows[0].get("amt").is_none());
        assert_eq!(rows[2]["amt"], "10");
    }
}
