// capabilities/crates/wiki_pages/src/collect_document_versions.rs

use mock_store_core::filter::{filter_records, matches_fields, sort_by_field_desc};
use mock_store_core::{parse_args, Store, Tool, ToolContext, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::documents::{filter_object, map_filters, present_version};
use crate::tables::PAGE_VERSIONS;

const FILTERS: &[(&str, &str)] = &[
    ("version_id", "page_version_id"),
    ("document_id", "page_id"),
    ("version_number", "version_number"),
    ("title", "title"),
];

#[derive(Deserialize)]
struct CollectVersionsInput {
    #[serde(default)]
    filters: Value,
}

pub struct CollectDocumentVersions;

impl Tool for CollectDocumentVersions {
    fn name(&self) -> &'static str {
        "collect_document_versions"
    }

    fn description(&self) -> &'static str {
        "List document version snapshots, newest version first. Filters: version_id, \
         document_id, version_number, title."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filters": {
                    "type": "object",
                    "properties": {
                        "version_id": {"type": "string"},
                        "document_id": {"type": "string"},
                        "version_number": {"type": "integer"},
                        "title": {"type": "string"}
                    }
                }
            }
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: CollectVersionsInput = parse_args(args)?;
        let filters = map_filters(filter_object(input.filters, "filters")?, FILTERS)?;

        let mut rows = store
            .table(PAGE_VERSIONS.name)
            .map(|t| filter_records(t, |v| matches_fields(v, &filters)))
            .unwrap_or_default();
        sort_by_field_desc(&mut rows, "version_number");
        let results: Vec<Value> = rows.into_iter().map(present_version).collect();

        Ok(json!({
            "entity_type": "document_versions",
            "count": results.len(),
            "results": results,
        }))
    }
}
