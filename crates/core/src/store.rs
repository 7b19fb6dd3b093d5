// crates/core/src/store.rs

//! The shared mock store: table name → [`Table`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::record::{Record, RecordExt};
use crate::table::{Table, TableSchema};

/// All tables of one domain.
///
/// The harness owns the store; tools receive `&mut Store` for the duration of
/// one call and mutate it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    tables: BTreeMap<String, Table>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("store JSON must be an object of tables of records")
    }

    /// Load a store from a JSON file laid out as `{table: {id: record}}`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read store file {:?}", path))?;
        Self::from_json_str(&data).with_context(|| format!("failed to parse {:?}", path))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("failed to serialize store")?;
        fs::write(path, data).with_context(|| format!("failed to write store file {:?}", path))
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Mutable table, created empty on first use.
    pub fn table_mut(&mut self, name: &str) -> &mut Table {
        self.tables.entry(name.to_string()).or_default()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn get(&self, table: &str, id: &str) -> Option<&Record> {
        self.table(table)?.get(id)
    }

    pub fn get_mut(&mut self, table: &str, id: &str) -> Option<&mut Record> {
        self.tables.get_mut(table)?.get_mut(id)
    }

    pub fn contains(&self, table: &str, id: &str) -> bool {
        self.get(table, id).is_some()
    }

    /// Row that must exist, or `<Entity> with ID '<id>' not found`.
    pub fn require(&self, schema: &TableSchema, id: &str) -> Result<&Record, ToolError> {
        self.get(schema.name, id)
            .ok_or_else(|| ToolError::not_found(schema.entity, id))
    }

    pub fn require_mut(&mut self, schema: &TableSchema, id: &str) -> Result<&mut Record, ToolError> {
        self.get_mut(schema.name, id)
            .ok_or_else(|| ToolError::not_found(schema.entity, id))
    }

    /// Next id for `schema`'s table (`"1"` when the table is absent or empty).
    pub fn next_id(&self, schema: &TableSchema) -> String {
        self.table(schema.name)
            .map(Table::next_id)
            .unwrap_or_else(|| "1".to_string())
    }

    /// Insert a row under `id`, creating the table on demand.
    pub fn insert(&mut self, schema: &TableSchema, id: impl Into<String>, record: Record) {
        self.table_mut(schema.name).insert(id, record);
    }

    /// Bulk-load rows given as a `{id: record}` object. Non-object values are
    /// skipped; the id field is filled in when a row omits it.
    pub fn seed_table(&mut self, schema: &TableSchema, rows: Value) {
        let Value::Object(rows) = rows else {
            return;
        };
        let table = self.table_mut(schema.name);
        for (id, row) in rows {
            if let Value::Object(mut record) = row {
                record
                    .entry(schema.id_field.to_string())
                    .or_insert_with(|| Value::String(id.clone()));
                table.insert(id, record);
            }
        }
    }

    pub fn remove(&mut self, table: &str, id: &str) -> Option<Record> {
        self.tables.get_mut(table)?.remove(id)
    }

    /// First row whose string `field` equals `value` (ids compared as strings).
    pub fn find_by(&self, table: &str, field: &str, value: &str) -> Option<(&str, &Record)> {
        self.table(table)?
            .iter()
            .find(|(_, rec)| rec.refers_to(field, value))
    }

    pub fn len(&self, table: &str) -> usize {
        self.table(table).map_or(0, Table::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EMPLOYEES: TableSchema = TableSchema::new("employees", "employee_id", "Employee");

    fn sample() -> Store {
        Store::from_json_str(
            &json!({
                "employees": {
                    "1": {"employee_id": "1", "email": "a@co.com"},
                    "4": {"employee_id": "4", "email": "b@co.com"}
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_require_reports_entity() {
        let store = sample();
        assert!(store.require(&EMPLOYEES, "1").is_ok());
        let err = store.require(&EMPLOYEES, "9").unwrap_err();
        assert_eq!(err.to_string(), "Employee with ID '9' not found");
    }

    #[test]
    fn test_next_id_on_missing_table() {
        let store = Store::new();
        assert_eq!(store.next_id(&EMPLOYEES), "1");
        assert_eq!(sample().next_id(&EMPLOYEES), "5");
    }

    #[test]
    fn test_find_by() {
        let store = sample();
        let (id, _) = store.find_by("employees", "email", "b@co.com").unwrap();
        assert_eq!(id, "4");
        assert!(store.find_by("employees", "email", "zz@co.com").is_none());
        assert!(store.find_by("nope", "email", "a@co.com").is_none());
    }

    #[test]
    fn test_save_and_load_file() {
        let store = sample();
        let path = std::env::temp_dir().join(format!("mock_store_{}.json", std::process::id()));
        store.save_to_file(&path).unwrap();
        let loaded = Store::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_seed_table_fills_id_field() {
        let mut store = Store::new();
        store.seed_table(&EMPLOYEES, json!({"3": {"email": "c@co.com"}, "4": 5}));
        assert_eq!(store.len("employees"), 1);
        assert_eq!(store.get("employees", "3").unwrap()["employee_id"], "3");
        assert_eq!(store.next_id(&EMPLOYEES), "4");
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(Store::from_json_str("[1, 2]").is_err());
    }
}
