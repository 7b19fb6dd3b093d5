// capabilities/crates/smart_home/src/remove_home.rs

use mock_store_core::{cascade_delete, parse_args, RecordExt, Store, Tool, ToolContext, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::lookup::{home_by_name, is_home_admin, user_by_email};
use crate::tables::{ADDRESSES, HOMES, HOME_CASCADE};

#[derive(Deserialize)]
struct RemoveHomeInput {
    home_name: Option<String>,
    requested_by_email: Option<String>,
}

/// Deletes a home with every room, accessory, member, scene and automation
/// attached to it. The address goes too unless another home shares it.
pub struct RemoveHome;

impl Tool for RemoveHome {
    fn name(&self) -> &'static str {
        "remove_home"
    }

    fn description(&self) -> &'static str {
        "Remove a home and everything in it: memberships, rooms, accessories, scenes and \
         automations with their actions, triggers and schedules. Only a home admin may do this."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "requested_by_email": {"type": "string", "description": "E-mail of a home admin"}
            },
            "required": ["home_name", "requested_by_email"]
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: RemoveHomeInput = parse_args(args)?;
        let (home_id, home) = home_by_name(store, input.home_name.as_deref())?;
        let home_name = home.str_field("home_name").unwrap_or_default().to_string();
        let address_id = home.id_field("address_id");
        let (user_id, user) =
            user_by_email(store, input.requested_by_email.as_deref(), "requested_by_email")?;
        if !is_home_admin(store, &home_id, &user_id) {
            return Err(ToolError::referential(format!(
                "User '{}' must be an admin of home '{}' to remove it",
                user.str_field("email").unwrap_or_default(),
                home_name
            )));
        }

        let report = cascade_delete(store, &HOMES, &home_id, HOME_CASCADE)?;

        let mut address_removed = false;
        if let Some(address_id) = address_id.as_deref() {
            let shared = store
                .table(HOMES.name)
                .is_some_and(|t| t.values().any(|h| h.refers_to("address_id", address_id)));
            if !shared {
                address_removed = store.remove(ADDRESSES.name, address_id).is_some();
            }
        }

        Ok(json!({
            "message": format!(
                "Home '{}' removed with {} dependent record(s)",
                home_name,
                report.total_removed() - 1
            ),
            "home_id": home_id,
            "removed": report.counts_json(),
            "address_removed": address_removed,
        }))
    }
}
