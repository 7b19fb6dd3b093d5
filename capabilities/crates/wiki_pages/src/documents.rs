// capabilities/crates/wiki_pages/src/documents.rs

//! Document presentation, version snapshots and hierarchy walks.

use std::collections::BTreeSet;

use mock_store_core::{
    apply_mutation, record_from, FieldRules, Record, RecordExt, Store, ToolContext, ToolError,
};
use serde_json::{json, Map, Value};

use crate::tables::{PAGES, PAGE_VERSIONS, USERS};

/// Page row under the names the tools use.
pub fn present_document(page: &Record) -> Value {
    json!({
        "document_id": page.get("page_id"),
        "title": page.get("title"),
        "workspace_id": page.get("space_id"),
        "parent_document_id": page.get("parent_page_id"),
        "body_storage": page.get("body_storage"),
        "status": page.get("status"),
        "created_by": page.get("created_by"),
        "created_at": page.get("created_at"),
        "updated_by": page.get("updated_by"),
        "updated_at": page.get("updated_at"),
    })
}

pub fn present_version(version: &Record) -> Value {
    json!({
        "version_id": version.get("page_version_id"),
        "document_id": version.get("page_id"),
        "version_number": version.get("version_number"),
        "title": version.get("title"),
        "body_storage": version.get("body_storage"),
        "created_by": version.get("created_by"),
        "created_at": version.get("created_at"),
    })
}

/// Snapshot the page's current title and body as its next version.
pub fn record_version(
    store: &mut Store,
    ctx: &ToolContext,
    page_id: &str,
    author: &str,
) -> Result<Record, ToolError> {
    let page = store.require(&PAGES, page_id)?;
    let title = page.get("title").cloned().unwrap_or(Value::Null);
    let body = page.get("body_storage").cloned().unwrap_or(Value::Null);
    let latest = store
        .table(PAGE_VERSIONS.name)
        .into_iter()
        .flat_map(|t| t.values())
        .filter(|v| v.refers_to("page_id", page_id))
        .filter_map(|v| v.f64_field("version_number"))
        .fold(0.0_f64, f64::max);

    apply_mutation(
        store,
        ctx.clock(),
        &PAGE_VERSIONS,
        None,
        record_from(json!({
            "page_id": page_id,
            "version_number": latest as u64 + 1,
            "title": title,
            "body_storage": body,
            "created_by": author,
        })),
        &FieldRules::new(),
    )
}

/// Ancestors of a page, nearest first, ending with its space:
/// `("page", id)` entries then `("space", id)`.
pub fn ancestors(store: &Store, page_id: &str) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();
    let mut visited = BTreeSet::new();
    let mut current = page_id.to_string();
    while visited.insert(current.clone()) {
        let Some(page) = store.get(PAGES.name, &current) else {
            break;
        };
        match page.id_field("parent_page_id").filter(|p| !p.is_empty()) {
            Some(parent) => {
                out.push(("page", parent.clone()));
                current = parent;
            }
            None => {
                if let Some(space) = page.id_field("space_id") {
                    out.push(("space", space));
                }
                break;
            }
        }
    }
    out
}

/// True when another document in the same space and under the same parent
/// already has `title`.
pub fn title_taken(
    store: &Store,
    space_id: &str,
    parent_id: Option<&str>,
    title: &str,
    except_id: Option<&str>,
) -> bool {
    store.table(PAGES.name).is_some_and(|t| {
        t.iter().any(|(id, page)| {
            Some(id) != except_id
                && page.refers_to("space_id", space_id)
                && page.id_field("parent_page_id").as_deref() == parent_id
                && page
                    .str_field("title")
                    .is_some_and(|existing| existing.trim().eq_ignore_ascii_case(title.trim()))
        })
    })
}

/// User by id that must also be active.
pub fn require_active_user<'a>(store: &'a Store, user_id: &str) -> Result<&'a Record, ToolError> {
    let user = store.require(&USERS, user_id)?;
    if !user.has_status("active") {
        return Err(ToolError::referential(format!(
            "User with ID '{}' is not active",
            user_id
        )));
    }
    Ok(user)
}

/// Accept an object or the same object encoded as a JSON string; absent
/// means no filtering.
pub fn filter_object(value: Value, field: &str) -> Result<Map<String, Value>, ToolError> {
    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        Value::String(s) => match serde_json::from_str(&s) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(ToolError::malformed(format!("{} must be a JSON object", field))),
        },
        _ => Err(ToolError::malformed(format!("{} must be a JSON object", field))),
    }
}

/// Rename tool-facing filter keys to stored field names, rejecting keys
/// outside `mapping`.
pub fn map_filters(
    filters: Map<String, Value>,
    mapping: &[(&str, &str)],
) -> Result<Map<String, Value>, ToolError> {
    let mut out = Map::new();
    for (key, value) in filters {
        let stored = mapping.iter().find(|(surface, _)| *surface == key).map(|(_, s)| *s);
        match stored {
            Some(stored) => {
                out.insert(stored.to_string(), value);
            }
            None => {
                let allowed: Vec<&str> = mapping.iter().map(|(s, _)| *s).collect();
                return Err(ToolError::malformed(format!(
                    "Unsupported filter '{}'. Supported filters: {}",
                    key,
                    allowed.join(", ")
                )));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::seed_store;

    #[test]
    fn test_ancestors_end_at_space() {
        let store = seed_store();
        assert_eq!(
            ancestors(&store, "5"),
            vec![
                ("page", "2".to_string()),
                ("page", "1".to_string()),
                ("space", "1".to_string())
            ]
        );
        assert_eq!(ancestors(&store, "3"), vec![("space", "2".to_string())]);
    }

    #[test]
    fn test_ancestors_stop_on_cycle() {
        let mut store = seed_store();
        if let Some(page) = store.get_mut("pages", "1") {
            page.insert("parent_page_id".into(), json!("5"));
        }
        let chain = ancestors(&store, "5");
        assert_eq!(chain.len(), 3);
        assert!(chain.iter().all(|(kind, _)| *kind == "page"));
    }

    #[test]
    fn test_title_taken_per_level() {
        let store = seed_store();
        assert!(title_taken(&store, "1", Some("1"), " architecture ", None));
        assert!(!title_taken(&store, "1", None, "Architecture", None));
        assert!(!title_taken(&store, "1", Some("1"), "Architecture", Some("2")));
    }

    #[test]
    fn test_map_filters_rejects_unknown_keys() {
        let filters = filter_object(json!(r#"{"colour": "red"}"#), "filters").unwrap();
        let err = map_filters(filters, &[("document_id", "page_id")]).unwrap_err();
        assert!(err.to_string().starts_with("Unsupported filter 'colour'"));
    }
}
