// capabilities/crates/wiki_pages/src/add_attachment_entity.rs

use mock_store_core::validate::{check_choice, require_text};
use mock_store_core::{
    apply_mutation, de_opt_id, parse_args, record_from, FieldRules, Store, Tool, ToolContext,
    ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{ATTACHMENTS, ATTACHMENT_STATUSES, ATTACHMENT_TARGETS, PAGES, USERS};

#[derive(Deserialize)]
struct AttachmentFields {
    #[serde(default, deserialize_with = "de_opt_id")]
    content_id: Option<String>,
    content_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    host_page_id: Option<String>,
    file_name: Option<String>,
    file_url: Option<String>,
    status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    uploaded_by: Option<String>,
}

#[derive(Deserialize)]
struct AddAttachmentInput {
    fields: AttachmentFields,
}

pub struct AddAttachmentEntity;

impl Tool for AddAttachmentEntity {
    fn name(&self) -> &'static str {
        "add_attachment_entity"
    }

    fn description(&self) -> &'static str {
        "Attach a file to a document, table, whiteboard or pack card. host_page_id optionally \
         names the document that displays it. Status defaults to current."
    }

    fn parameters_schema(&self) -> Value {
        let targets: Vec<&str> = ATTACHMENT_TARGETS.iter().map(|(s, _, _)| *s).collect();
        json!({
            "type": "object",
            "properties": {
                "fields": {
                    "type": "object",
                    "properties": {
                        "content_id": {"type": "string"},
                        "content_type": {"type": "string", "enum": targets},
                        "host_page_id": {"type": "string"},
                        "file_name": {"type": "string"},
                        "file_url": {"type": "string"},
                        "status": {"type": "string", "enum": ATTACHMENT_STATUSES},
                        "uploaded_by": {"type": "string"}
                    },
                    "required": ["content_id", "content_type", "file_name", "file_url", "uploaded_by"]
                }
            },
            "required": ["fields"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let AddAttachmentInput { fields } = parse_args(args)?;
        let content_id = require_text(fields.content_id.as_deref(), "content_id")?;
        let surface_type = require_text(fields.content_type.as_deref(), "content_type")?;
        let file_name = require_text(fields.file_name.as_deref(), "file_name")?;
        let file_url = require_text(fields.file_url.as_deref(), "file_url")?;
        let uploaded_by = require_text(fields.uploaded_by.as_deref(), "uploaded_by")?;

        let (_, stored_type, target) = ATTACHMENT_TARGETS
            .iter()
            .find(|(s, _, _)| *s == surface_type)
            .ok_or_else(|| {
                ToolError::malformed(format!("Unsupported content_type '{}'", surface_type))
            })?;
        let status = fields.status.as_deref().unwrap_or("current");
        check_choice(status, "status", ATTACHMENT_STATUSES)?;
        store.require(&USERS, uploaded_by)?;
        let host_page_id = fields.host_page_id.as_deref().filter(|h| !h.is_empty());
        if let Some(host) = host_page_id {
            if !store.contains(PAGES.name, host) {
                return Err(ToolError::missing(format!("Host page '{}' not found", host)));
            }
        }
        store.require(target, content_id)?;

        let now = ctx.timestamp();
        let mut attachment = apply_mutation(
            store,
            ctx.clock(),
            &ATTACHMENTS,
            None,
            record_from(json!({
                "content_id": content_id,
                "content_type": stored_type,
                "host_page_id": host_page_id,
                "file_name": file_name,
                "file_url": file_url,
                "status": status,
                "uploaded_by": uploaded_by,
                "uploaded_at": now,
            })),
            &FieldRules::new(),
        )?;
        attachment.insert("content_type".into(), json!(surface_type));

        Ok(json!({
            "message": format!("Attached '{}' to {} '{}'", file_name, surface_type, content_id),
            "attachment": attachment,
        }))
    }
}
