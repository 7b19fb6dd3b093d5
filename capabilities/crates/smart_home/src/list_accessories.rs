// capabilities/crates/smart_home/src/list_accessories.rs

use mock_store_core::validate::check_choice;
use mock_store_core::{de_opt_id, parse_args, Record, RecordExt, Store, Tool, ToolContext, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::lookup::{clean, home_by_name};
use crate::tables::{ACCESSORY_TYPES, DEVICES, DEVICE_STATUSES};

#[derive(Deserialize)]
struct ListAccessoriesInput {
    home_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    room_id: Option<String>,
    accessory_type: Option<String>,
    status: Option<String>,
}

pub struct ListAccessories;

fn present(device: &Record) -> Value {
    json!({
        "accessory_id": device.get("device_id"),
        "accessory_name": device.get("device_name"),
        "accessory_type": device.get("device_type"),
        "room_id": device.get("room_id"),
        "serial_number": device.get("serial_number"),
        "status": device.get("status"),
        "support_automation": device.get("support_automation"),
        "installed_at": device.get("installed_at"),
        "last_seen": device.get("last_seen"),
        "created_at": device.get("created_at"),
        "updated_at": device.get("updated_at"),
    })
}

impl Tool for ListAccessories {
    fn name(&self) -> &'static str {
        "list_accessories"
    }

    fn description(&self) -> &'static str {
        "List the accessories of a home, optionally filtered by room, type and status."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "room_id": {"type": "string"},
                "accessory_type": {"type": "string", "enum": ACCESSORY_TYPES},
                "status": {"type": "string", "enum": DEVICE_STATUSES}
            },
            "required": ["home_name"]
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: ListAccessoriesInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;

        let accessory_type = clean(input.accessory_type.as_deref()).map(|s| s.to_lowercase());
        if let Some(t) = accessory_type.as_deref() {
            check_choice(t, "accessory_type", ACCESSORY_TYPES)?;
        }
        let status = clean(input.status.as_deref()).map(|s| s.to_lowercase());
        if let Some(s) = status.as_deref() {
            check_choice(s, "status", DEVICE_STATUSES)?;
        }

        let accessories: Vec<Value> = store
            .table(DEVICES.name)
            .into_iter()
            .flat_map(|t| t.values())
            .filter(|d| d.refers_to("home_id", &home_id))
            .filter(|d| input.room_id.as_deref().map_or(true, |r| d.refers_to("room_id", r)))
            .filter(|d| accessory_type.as_deref().map_or(true, |t| d.str_field("device_type") == Some(t)))
            .filter(|d| status.as_deref().map_or(true, |s| d.has_status(s)))
            .map(present)
            .collect();

        Ok(json!({
            "count": accessories.len(),
            "accessories": accessories,
        }))
    }
}
