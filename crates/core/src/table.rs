// crates/core/src/table.rs

//! Tables: ordered id → record maps with a monotonic id counter.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::Record;

/// Static description of one entity table.
///
/// Every tool pack declares one `const` per table so that table names,
/// id fields and timestamp conventions live in a single place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Key of the table inside the store, e.g. `"employees"`.
    pub name: &'static str,
    /// Synthetic id field carried by every row, e.g. `"employee_id"`.
    pub id_field: &'static str,
    /// Human-readable entity name used in error messages.
    pub entity: &'static str,
    /// Field stamped on every mutation (`updated_at` or `last_updated`).
    pub updated_field: &'static str,
}

impl TableSchema {
    pub const fn new(name: &'static str, id_field: &'static str, entity: &'static str) -> Self {
        Self {
            name,
            id_field,
            entity,
            updated_field: "updated_at",
        }
    }

    pub const fn with_updated_field(mut self, field: &'static str) -> Self {
        self.updated_field = field;
        self
    }
}

/// Rows of one table.
///
/// `high_water` remembers the largest numeric id ever inserted, so ids are
/// never reused after a delete. Non-numeric keys are stored but ignored for
/// id generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: BTreeMap<String, Record>,
    high_water: u64,
}

fn numeric_key(key: &str) -> Option<u64> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Numeric ids first in numeric order, then everything else lexically.
fn id_order(a: &str, b: &str) -> Ordering {
    match (numeric_key(a), numeric_key(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: BTreeMap<String, Record>) -> Self {
        let high_water = rows.keys().filter_map(|k| numeric_key(k)).max().unwrap_or(0);
        Self { rows, high_water }
    }

    /// Id the next created row should use.
    ///
    /// `"1"` for a table that never held a numeric id, otherwise one past the
    /// highest numeric id seen. Does not reserve the id.
    pub fn next_id(&self) -> String {
        (self.high_water + 1).to_string()
    }

    /// Insert or replace a row. Returns the previous row under that id.
    pub fn insert(&mut self, id: impl Into<String>, record: Record) -> Option<Record> {
        let id = id.into();
        if let Some(n) = numeric_key(&id) {
            self.high_water = self.high_water.max(n);
        }
        self.rows.insert(id, record)
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.rows.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.rows.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Record> {
        self.rows.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All ids, numeric ids in numeric order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| id_order(a, b));
        ids
    }

    /// Rows in id order (numeric ids compare numerically).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.ids()
            .into_iter()
            .filter_map(move |id| self.rows.get_key_value(id))
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Record> {
        self.iter().map(|(_, rec)| rec)
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = BTreeMap::<String, Record>::deserialize(deserializer)?;
        Ok(Self::from_rows(rows))
    }
}
