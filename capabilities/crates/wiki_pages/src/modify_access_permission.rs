// capabilities/crates/wiki_pages/src/modify_access_permission.rs

use mock_store_core::validate::check_choice;
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, FieldRules, Record, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::grant_access_permission::{duplicate_of, present_permission};
use crate::tables::{OPERATIONS, PERMISSIONS, USERS};

#[derive(Deserialize)]
struct ModifyPermissionInput {
    #[serde(deserialize_with = "de_id")]
    permission_id: String,
    operation: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    user_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    granted_by: Option<String>,
    #[serde(default)]
    revoke: bool,
}

pub struct ModifyAccessPermission;

impl Tool for ModifyAccessPermission {
    fn name(&self) -> &'static str {
        "modify_access_permission"
    }

    fn description(&self) -> &'static str {
        "Change a direct permission's operation, holder or granter, or revoke it with \
         revoke=true. Inherited permissions are changed on the document or workspace that \
         holds them."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "permission_id": {"type": "string"},
                "operation": {"type": "string", "enum": OPERATIONS},
                "user_id": {"type": "string"},
                "granted_by": {"type": "string"},
                "revoke": {"type": "boolean", "description": "Remove the permission; other fields must be omitted"}
            },
            "required": ["permission_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: ModifyPermissionInput = parse_args(args)?;
        let permission_id = input.permission_id.as_str();
        let current = store.require(&PERMISSIONS, permission_id)?.clone();

        if input.revoke {
            if input.operation.is_some() || input.user_id.is_some() || input.granted_by.is_some() {
                return Err(ToolError::malformed(
                    "revoke cannot be combined with operation, user_id or granted_by",
                ));
            }
            store.remove(PERMISSIONS.name, permission_id);
            info!(permission = permission_id, "permission revoked");
            return Ok(json!({
                "message": format!("Permission '{}' revoked", permission_id),
                "revoked": true,
                "permission": present_permission(&current),
            }));
        }

        let mut updates = Record::new();
        if let Some(operation) = input.operation.as_deref() {
            check_choice(operation, "operation", OPERATIONS)?;
            updates.insert("operation".into(), json!(operation));
        }
        if let Some(user_id) = input.user_id.as_deref() {
            store.require(&USERS, user_id)?;
            updates.insert("user_id".into(), json!(user_id));
        }
        if let Some(granted_by) = input.granted_by.as_deref() {
            if !store.contains(USERS.name, granted_by) {
                return Err(ToolError::missing(format!(
                    "Granting user with ID '{}' not found",
                    granted_by
                )));
            }
            updates.insert("granted_by".into(), json!(granted_by));
        }
        if updates.is_empty() {
            return Err(ToolError::NoFieldsToUpdate);
        }

        let holder = input
            .user_id
            .clone()
            .or_else(|| current.id_field("user_id"))
            .unwrap_or_default();
        let operation = input
            .operation
            .as_deref()
            .or_else(|| current.str_field("operation"))
            .unwrap_or_default();
        let content_id = current.id_field("content_id").unwrap_or_default();
        let content_type = current.str_field("content_type").unwrap_or_default();
        if let Some(existing) = duplicate_of(
            store,
            &content_id,
            content_type,
            &holder,
            operation,
            Some(permission_id),
        ) {
            return Err(ToolError::rule(format!(
                "A permission with the same content, user and operation already exists \
                 (permission_id: '{}')",
                existing
            )));
        }
        updates.insert("granted_at".into(), json!(ctx.timestamp()));

        let permission = apply_mutation(
            store,
            ctx.clock(),
            &PERMISSIONS,
            Some(permission_id),
            updates,
            &FieldRules::new(),
        )?;
        Ok(json!({
            "message": format!("Permission '{}' updated", permission_id),
            "revoked": false,
            "permission": present_permission(&permission),
        }))
    }
}
