// capabilities/crates/wiki_pages/src/delete_document.rs

use mock_store_core::{
    apply_mutation, cascade_delete, de_id, parse_args, record_from, FieldRules, RecordExt, Store,
    Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::documents::present_document;
use crate::tables::{PAGES, PAGE_CASCADE, USERS};

#[derive(Deserialize)]
struct DeleteOptions {
    #[serde(deserialize_with = "de_id")]
    updated_by: String,
    #[serde(default)]
    hard_delete: bool,
}

#[derive(Deserialize)]
struct DeleteDocumentInput {
    #[serde(deserialize_with = "de_id")]
    document_id: String,
    options: DeleteOptions,
}

/// Soft delete marks the document `deleted`. Hard delete removes it with
/// its versions, attachments and direct permissions, and is refused while
/// child documents exist.
pub struct DeleteDocument;

impl Tool for DeleteDocument {
    fn name(&self) -> &'static str {
        "delete_document"
    }

    fn description(&self) -> &'static str {
        "Delete a document. By default the document is only marked deleted. With \
         options.hard_delete it is removed permanently together with its versions, attachments \
         and direct permissions; documents with children cannot be hard deleted."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "document_id": {"type": "string"},
                "options": {
                    "type": "object",
                    "properties": {
                        "updated_by": {"type": "string"},
                        "hard_delete": {"type": "boolean", "description": "Defaults to false"}
                    },
                    "required": ["updated_by"]
                }
            },
            "required": ["document_id", "options"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: DeleteDocumentInput = parse_args(args)?;
        let document_id = input.document_id.as_str();
        store.require(&PAGES, document_id)?;
        store.require(&USERS, &input.options.updated_by)?;

        if !input.options.hard_delete {
            let page = apply_mutation(
                store,
                ctx.clock(),
                &PAGES,
                Some(document_id),
                record_from(json!({
                    "status": "deleted",
                    "updated_by": &input.options.updated_by,
                })),
                &FieldRules::new(),
            )?;
            return Ok(json!({
                "document": present_document(&page),
                "hard_deleted": false,
            }));
        }

        let has_children = store
            .table(PAGES.name)
            .is_some_and(|t| t.values().any(|p| p.refers_to("parent_page_id", document_id)));
        if has_children {
            return Err(ToolError::rule(format!(
                "Cannot hard delete document with ID '{}' because it has child documents. \
                 Delete or reassign child documents first.",
                document_id
            )));
        }

        let snapshot = store.require(&PAGES, document_id).map(present_document)?;
        let report = cascade_delete(store, &PAGES, document_id, PAGE_CASCADE)?;
        info!(
            document = document_id,
            removed = report.total_removed(),
            "document hard deleted"
        );

        Ok(json!({
            "document": snapshot,
            "hard_deleted": true,
            "removed": report.counts_json(),
        }))
    }
}
