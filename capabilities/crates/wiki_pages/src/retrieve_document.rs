// capabilities/crates/wiki_pages/src/retrieve_document.rs

use mock_store_core::filter::{filter_records, matches_fields};
use mock_store_core::{parse_args, Store, Tool, ToolContext, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::documents::{filter_object, map_filters, present_document};
use crate::tables::{DOCUMENT_STATUSES, PAGES};

const FILTERS: &[(&str, &str)] = &[
    ("document_id", "page_id"),
    ("title", "title"),
    ("workspace_id", "space_id"),
    ("parent_document_id", "parent_page_id"),
    ("status", "status"),
    ("created_by", "created_by"),
    ("updated_by", "updated_by"),
];

#[derive(Deserialize)]
struct RetrieveDocumentInput {
    #[serde(default)]
    filters: Value,
}

pub struct RetrieveDocument;

impl Tool for RetrieveDocument {
    fn name(&self) -> &'static str {
        "retrieve_document"
    }

    fn description(&self) -> &'static str {
        "List documents matching every given filter. parent_document_id null selects root \
         documents of a workspace."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filters": {
                    "type": "object",
                    "properties": {
                        "document_id": {"type": "string"},
                        "title": {"type": "string"},
                        "workspace_id": {"type": "string"},
                        "parent_document_id": {"type": ["string", "null"]},
                        "status": {"type": "string", "enum": DOCUMENT_STATUSES},
                        "created_by": {"type": "string"},
                        "updated_by": {"type": "string"}
                    }
                }
            }
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: RetrieveDocumentInput = parse_args(args)?;
        let filters = map_filters(filter_object(input.filters, "filters")?, FILTERS)?;

        let results: Vec<Value> = store
            .table(PAGES.name)
            .map(|t| filter_records(t, |page| matches_fields(page, &filters)))
            .unwrap_or_default()
            .into_iter()
            .map(present_document)
            .collect();

        Ok(json!({
            "entity_type": "documents",
            "count": results.len(),
            "results": results,
        }))
    }
}
