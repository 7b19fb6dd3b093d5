// capabilities/crates/wiki_pages/src/alter_document.rs

use mock_store_core::validate::check_choice;
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, FieldRules, Record, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::documents::{ancestors, present_document, present_version, record_version, title_taken};
use crate::tables::{DOCUMENT_STATUSES, PAGES, USERS};

#[derive(Deserialize)]
struct AlterFields {
    #[serde(deserialize_with = "de_id")]
    document_id: String,
    #[serde(deserialize_with = "de_id")]
    updated_by: String,
    title: Option<String>,
    /// `""` moves the document to the workspace root.
    #[serde(default, deserialize_with = "de_opt_id")]
    parent_document_id: Option<String>,
    body_storage: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
struct AlterDocumentInput {
    fields: AlterFields,
}

pub struct AlterDocument;

impl Tool for AlterDocument {
    fn name(&self) -> &'static str {
        "alter_document"
    }

    fn description(&self) -> &'static str {
        "Edit a document: title, body, parent (\"\" for the workspace root) or status. \
         fields.document_id and fields.updated_by are required. A change of title or body \
         records a new document version."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "fields": {
                    "type": "object",
                    "properties": {
                        "document_id": {"type": "string"},
                        "updated_by": {"type": "string"},
                        "title": {"type": "string"},
                        "parent_document_id": {"type": "string"},
                        "body_storage": {"type": "string"},
                        "status": {"type": "string", "enum": DOCUMENT_STATUSES}
                    },
                    "required": ["document_id", "updated_by"]
                }
            },
            "required": ["fields"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let AlterDocumentInput { fields } = parse_args(args)?;
        let document_id = fields.document_id.as_str();
        let page = store.require(&PAGES, document_id)?;
        store.require(&USERS, &fields.updated_by)?;
        let space_id = page.id_field("space_id").unwrap_or_default();
        let current_parent = page.id_field("parent_page_id");
        let current_title = page.str_field("title").unwrap_or_default().to_string();
        let current_body = page.str_field("body_storage").map(String::from);

        let mut updates = Record::new();
        if let Some(status) = fields.status.as_deref() {
            check_choice(status, "status", DOCUMENT_STATUSES)?;
            updates.insert("status".into(), json!(status));
        }

        let mut parent = current_parent;
        if let Some(new_parent) = fields.parent_document_id.as_deref() {
            if new_parent.is_empty() {
                parent = None;
            } else {
                if new_parent == document_id {
                    return Err(ToolError::rule("A document cannot be its own parent"));
                }
                let parent_page = store.get(PAGES.name, new_parent).ok_or_else(|| {
                    ToolError::missing(format!("Parent document with ID '{}' not found", new_parent))
                })?;
                if !parent_page.refers_to("space_id", &space_id) {
                    return Err(ToolError::referential(
                        "Parent document must be in the same workspace",
                    ));
                }
                if ancestors(store, new_parent)
                    .iter()
                    .any(|(kind, id)| *kind == "page" && id == document_id)
                {
                    return Err(ToolError::rule(format!(
                        "Document '{}' cannot be moved under its own descendant '{}'",
                        document_id, new_parent
                    )));
                }
                parent = Some(new_parent.to_string());
            }
            updates.insert("parent_page_id".into(), json!(&parent));
        }

        let title = match fields.title.as_deref().map(str::trim) {
            Some("") => return Err(ToolError::malformed("title cannot be empty")),
            Some(title) => title.to_string(),
            None => current_title.clone(),
        };
        let moved_or_renamed = fields.title.is_some() || fields.parent_document_id.is_some();
        if moved_or_renamed
            && title_taken(store, &space_id, parent.as_deref(), &title, Some(document_id))
        {
            return Err(ToolError::rule(format!(
                "Document with title '{}' already exists at this hierarchy level",
                title
            )));
        }
        if fields.title.is_some() {
            updates.insert("title".into(), json!(&title));
        }
        if let Some(body) = fields.body_storage.as_deref() {
            updates.insert("body_storage".into(), json!(body));
        }
        if updates.is_empty() {
            return Err(ToolError::NoFieldsToUpdate);
        }
        updates.insert("updated_by".into(), json!(&fields.updated_by));

        let content_changed = (fields.title.is_some() && title != current_title)
            || (fields.body_storage.is_some() && fields.body_storage != current_body);
        let page = apply_mutation(
            store,
            ctx.clock(),
            &PAGES,
            Some(document_id),
            updates,
            &FieldRules::new(),
        )?;
        let version = if content_changed {
            let version = record_version(store, ctx, document_id, &fields.updated_by)?;
            present_version(&version)
        } else {
            Value::Null
        };

        Ok(json!({
            "document": present_document(&page),
            "version": version,
        }))
    }
}
