// capabilities/crates/wiki_pages/src/insert_document.rs

use mock_store_core::validate::{check_choice, require_text};
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, record_from, FieldRules, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::documents::{present_document, present_version, record_version, require_active_user, title_taken};
use crate::tables::{DOCUMENT_STATUSES, PAGES, SPACES};

#[derive(Deserialize)]
struct InsertDocumentInput {
    title: Option<String>,
    #[serde(deserialize_with = "de_id")]
    workspace_id: String,
    #[serde(deserialize_with = "de_id")]
    created_by: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    parent_document_id: Option<String>,
    body_storage: Option<String>,
    status: Option<String>,
}

pub struct InsertDocument;

impl Tool for InsertDocument {
    fn name(&self) -> &'static str {
        "insert_document"
    }

    fn description(&self) -> &'static str {
        "Create a document in a workspace, optionally under a parent document of the same \
         workspace. The creator must be an active user. Titles are unique per hierarchy level. \
         The first version of the document is recorded."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {"type": "string"},
                "workspace_id": {"type": "string"},
                "created_by": {"type": "string", "description": "User id of an active user"},
                "parent_document_id": {"type": "string"},
                "body_storage": {"type": "string"},
                "status": {"type": "string", "enum": DOCUMENT_STATUSES, "description": "Defaults to current"}
            },
            "required": ["title", "workspace_id", "created_by"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: InsertDocumentInput = parse_args(args)?;
        let title = require_text(input.title.as_deref(), "title")?;
        store.require(&SPACES, &input.workspace_id)?;
        require_active_user(store, &input.created_by)?;

        let parent_id = input.parent_document_id.as_deref().filter(|p| !p.is_empty());
        if let Some(parent_id) = parent_id {
            let parent = store
                .get(PAGES.name, parent_id)
                .ok_or_else(|| {
                    ToolError::missing(format!("Parent document with ID '{}' not found", parent_id))
                })?;
            if !parent.refers_to("space_id", &input.workspace_id) {
                return Err(ToolError::referential(
                    "Parent document must be in the same workspace",
                ));
            }
        }
        let status = input.status.as_deref().unwrap_or("current");
        check_choice(status, "status", DOCUMENT_STATUSES)?;
        if title_taken(store, &input.workspace_id, parent_id, title, None) {
            return Err(ToolError::rule(format!(
                "Document with title '{}' already exists at this hierarchy level",
                title
            )));
        }

        let page = apply_mutation(
            store,
            ctx.clock(),
            &PAGES,
            None,
            record_from(json!({
                "title": title,
                "space_id": &input.workspace_id,
                "parent_page_id": parent_id,
                "body_storage": &input.body_storage,
                "status": status,
                "created_by": &input.created_by,
                "updated_by": &input.created_by,
            })),
            &FieldRules::new(),
        )?;
        let page_id = page.id_field("page_id").unwrap_or_default();
        let version = record_version(store, ctx, &page_id, &input.created_by)?;
        info!(document = page_id.as_str(), workspace = input.workspace_id.as_str(), "document created");

        Ok(json!({
            "document_id": &page_id,
            "document": present_document(&page),
            "version": present_version(&version),
        }))
    }
}
