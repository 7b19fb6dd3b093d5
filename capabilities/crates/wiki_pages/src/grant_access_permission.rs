// capabilities/crates/wiki_pages/src/grant_access_permission.rs

use mock_store_core::validate::{check_choice, require_text};
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, record_from, FieldRules, Record, RecordExt,
    Store, Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::documents::require_active_user;
use crate::tables::{
    stored_content_type, surface_content_type, OPERATIONS, PAGES, PERMISSIONS, SPACES, USERS,
};

#[derive(Deserialize)]
struct ContentRef {
    #[serde(deserialize_with = "de_id")]
    content_id: String,
    content_type: Option<String>,
}

#[derive(Deserialize)]
struct GrantInput {
    content: ContentRef,
    operation: Option<String>,
    #[serde(deserialize_with = "de_id")]
    user_id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    granted_by: Option<String>,
}

/// Permission row under the names the tools use.
pub(crate) fn present_permission(permission: &Record) -> Value {
    let stored = permission.str_field("content_type").unwrap_or_default();
    json!({
        "permission_id": permission.get("permission_id"),
        "content_id": permission.get("content_id"),
        "content_type": surface_content_type(stored),
        "user_id": permission.get("user_id"),
        "operation": permission.get("operation"),
        "granted_by": permission.get("granted_by"),
        "granted_at": permission.get("granted_at"),
    })
}

/// Another permission row with the same target, holder and operation.
pub(crate) fn duplicate_of(
    store: &Store,
    content_id: &str,
    content_type: &str,
    user_id: &str,
    operation: &str,
    except_id: Option<&str>,
) -> Option<String> {
    store.table(PERMISSIONS.name)?.iter().find_map(|(id, p)| {
        (Some(id) != except_id
            && p.refers_to("content_id", content_id)
            && p.str_field("content_type") == Some(content_type)
            && p.refers_to("user_id", user_id)
            && p.str_field("operation") == Some(operation))
        .then(|| id.to_string())
    })
}

pub struct GrantAccessPermission;

impl Tool for GrantAccessPermission {
    fn name(&self) -> &'static str {
        "grant_access_permission"
    }

    fn description(&self) -> &'static str {
        "Grant a user an operation on a workspace or document. The user must be active and \
         the exact same grant must not already exist."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "object",
                    "properties": {
                        "content_id": {"type": "string"},
                        "content_type": {"type": "string", "enum": ["workspace", "document"]}
                    },
                    "required": ["content_id", "content_type"]
                },
                "operation": {"type": "string", "enum": OPERATIONS},
                "user_id": {"type": "string"},
                "granted_by": {"type": "string"}
            },
            "required": ["content", "operation", "user_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: GrantInput = parse_args(args)?;
        let surface_type = require_text(input.content.content_type.as_deref(), "content.content_type")?;
        let content_type = stored_content_type(surface_type).ok_or_else(|| {
            ToolError::malformed("Invalid content_type. Allowed values: 'workspace', 'document'")
        })?;
        let operation = require_text(input.operation.as_deref(), "operation")?;
        check_choice(operation, "operation", OPERATIONS)?;

        let content_id = input.content.content_id.as_str();
        let target = if content_type == "space" { SPACES } else { PAGES };
        store.require(&target, content_id)?;
        require_active_user(store, &input.user_id)?;
        if let Some(granted_by) = input.granted_by.as_deref() {
            if !store.contains(USERS.name, granted_by) {
                return Err(ToolError::missing(format!(
                    "Granting user with ID '{}' not found",
                    granted_by
                )));
            }
        }
        if let Some(existing) =
            duplicate_of(store, content_id, content_type, &input.user_id, operation, None)
        {
            return Err(ToolError::rule(format!(
                "A permission with the same content, user and operation already exists \
                 (permission_id: '{}')",
                existing
            )));
        }

        let permission = apply_mutation(
            store,
            ctx.clock(),
            &PERMISSIONS,
            None,
            record_from(json!({
                "content_id": content_id,
                "content_type": content_type,
                "user_id": &input.user_id,
                "operation": operation,
                "granted_by": &input.granted_by,
                "granted_at": ctx.timestamp(),
            })),
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!(
                "Granted '{}' on {} '{}' to user '{}'",
                operation, surface_type, content_id, input.user_id
            ),
            "permission": present_permission(&permission),
        }))
    }
}
