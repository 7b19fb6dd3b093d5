// crates/core/src/cascade.rs

//! Transitive delete over parent/child tables.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Value};
use tracing::info;

use crate::error::ToolError;
use crate::record::RecordExt;
use crate::store::Store;
use crate::table::TableSchema;

/// A dependent table of some parent row.
///
/// Rows of `table` whose `foreign_key` equals the parent's id are removed
/// along with the parent. `scope` narrows the match to rows where another
/// field has a fixed value (polymorphic references such as
/// `content_type = "page"`). `children` apply to each matched row in turn.
#[derive(Debug, Clone, Copy)]
pub struct CascadeRule {
    pub table: &'static str,
    pub foreign_key: &'static str,
    pub scope: Option<(&'static str, &'static str)>,
    pub children: &'static [CascadeRule],
}

impl CascadeRule {
    pub const fn new(table: &'static str, foreign_key: &'static str) -> Self {
        Self {
            table,
            foreign_key,
            scope: None,
            children: &[],
        }
    }

    pub const fn scoped(mut self, field: &'static str, value: &'static str) -> Self {
        self.scope = Some((field, value));
        self
    }

    pub const fn with_children(mut self, children: &'static [CascadeRule]) -> Self {
        self.children = children;
        self
    }
}

/// What a cascade removed: table → ids, root included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub root: (String, String),
    pub removed: BTreeMap<String, Vec<String>>,
}

impl CascadeReport {
    pub fn total_removed(&self) -> usize {
        self.removed.values().map(Vec::len).sum()
    }

    pub fn removed_from(&self, table: &str) -> &[String] {
        self.removed.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `{table: count}` summary for tool payloads.
    pub fn counts_json(&self) -> Value {
        Value::Object(
            self.removed
                .iter()
                .map(|(t, ids)| (t.clone(), json!(ids.len())))
                .collect(),
        )
    }

    pub fn to_json(&self) -> Value {
        json!({
            "table": self.root.0,
            "id": self.root.1,
            "removed": self.removed,
            "total_removed": self.total_removed(),
        })
    }
}

fn collect(
    store: &Store,
    parent_id: &str,
    rules: &[CascadeRule],
    depth: usize,
    seen: &mut BTreeSet<(String, String)>,
    out: &mut Vec<(usize, String, String)>,
) {
    for rule in rules {
        let Some(table) = store.table(rule.table) else {
            continue;
        };
        let matched: Vec<String> = table
            .iter()
            .filter(|(_, rec)| rec.refers_to(rule.foreign_key, parent_id))
            .filter(|(_, rec)| match rule.scope {
                Some((field, value)) => rec.str_field(field) == Some(value),
                None => true,
            })
            .map(|(id, _)| id.to_string())
            .collect();

        for id in matched {
            if !seen.insert((rule.table.to_string(), id.clone())) {
                continue;
            }
            collect(store, &id, rule.children, depth + 1, seen, out);
            out.push((depth, rule.table.to_string(), id));
        }
    }
}

/// Delete `root_id` from `schema`'s table and every row that depends on it.
///
/// The full dependent set is gathered in a read-only pass before anything is
/// removed; rows are then dropped deepest first and the root last.
pub fn cascade_delete(
    store: &mut Store,
    schema: &TableSchema,
    root_id: &str,
    rules: &[CascadeRule],
) -> Result<CascadeReport, ToolError> {
    store.require(schema, root_id)?;

    let mut seen = BTreeSet::new();
    seen.insert((schema.name.to_string(), root_id.to_string()));
    let mut doomed = Vec::new();
    collect(store, root_id, rules, 1, &mut seen, &mut doomed);
    doomed.sort_by(|a, b| b.0.cmp(&a.0));

    let mut report = CascadeReport {
        root: (schema.name.to_string(), root_id.to_string()),
        removed: BTreeMap::new(),
    };
    for (_, table, id) in doomed {
        if store.remove(&table, &id).is_some() {
            report.removed.entry(table).or_default().push(id);
        }
    }
    store.remove(schema.name, root_id);
    report
        .removed
        .entry(schema.name.to_string())
        .or_default()
        .push(root_id.to_string());

    info!(
        table = schema.name,
        id = root_id,
        removed = report.total_removed(),
        "cascade delete"
    );
    Ok(report)
}
