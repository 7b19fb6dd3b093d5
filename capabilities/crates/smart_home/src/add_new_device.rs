// capabilities/crates/smart_home/src/add_new_device.rs

use mock_store_core::validate::{check_choice, check_timestamp, require_text};
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, record_from, FieldRules, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::lookup::clean;
use crate::tables::{DEVICES, DEVICE_STATUSES, DEVICE_TYPES, HOMES, ROOMS};

#[derive(Deserialize)]
struct AddDeviceInput {
    #[serde(deserialize_with = "de_id")]
    home_id: String,
    device_name: Option<String>,
    device_type: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    room_id: Option<String>,
    serial_number: Option<String>,
    status: Option<String>,
    #[serde(default)]
    support_automation: bool,
    installed_at: Option<String>,
}

/// Serial assigned when none is given: `SN-` and the zero-padded device id.
pub fn default_serial(device_id: &str) -> String {
    format!("SN-{:0>8}", device_id)
}

pub struct AddNewDevice;

impl Tool for AddNewDevice {
    fn name(&self) -> &'static str {
        "add_new_device"
    }

    fn description(&self) -> &'static str {
        "Register a device in a home, optionally in one of its rooms. Serial numbers default \
         to SN-<8 digit id>; status defaults to online."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_id": {"type": "string"},
                "device_name": {"type": "string"},
                "device_type": {"type": "string", "enum": DEVICE_TYPES},
                "room_id": {"type": "string"},
                "serial_number": {"type": "string"},
                "status": {"type": "string", "enum": DEVICE_STATUSES},
                "support_automation": {"type": "boolean"},
                "installed_at": {"type": "string", "description": "YYYY-MM-DDTHH:MM:SS; defaults to now"}
            },
            "required": ["home_id", "device_name", "device_type"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: AddDeviceInput = parse_args(args)?;
        let device_name = require_text(input.device_name.as_deref(), "device_name")?;
        check_choice(&input.device_type, "device_type", DEVICE_TYPES)?;
        let status = input.status.as_deref().unwrap_or("online");
        check_choice(status, "status", DEVICE_STATUSES)?;
        let installed_at = clean(input.installed_at.as_deref());
        if let Some(at) = installed_at.as_deref() {
            check_timestamp(at, "installed_at")?;
        }

        store.require(&HOMES, &input.home_id)?;
        if let Some(room_id) = input.room_id.as_deref() {
            let room = store.require(&ROOMS, room_id)?;
            if !room.refers_to("home_id", &input.home_id) {
                return Err(ToolError::referential(format!(
                    "Room '{}' does not belong to home '{}'",
                    room_id, input.home_id
                )));
            }
        }

        let now = ctx.timestamp();
        let serial_number = clean(input.serial_number.as_deref())
            .unwrap_or_else(|| default_serial(&store.next_id(&DEVICES)));
        let device = apply_mutation(
            store,
            ctx.clock(),
            &DEVICES,
            None,
            record_from(json!({
                "home_id": &input.home_id,
                "room_id": &input.room_id,
                "device_name": device_name,
                "device_type": &input.device_type,
                "serial_number": serial_number,
                "status": status,
                "support_automation": input.support_automation,
                "installed_at": installed_at.unwrap_or_else(|| now.clone()),
                "last_seen": (status == "online").then(|| now.clone()),
            })),
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!("Device '{}' added successfully", device_name),
            "device_id": device.get("device_id"),
            "device": device,
        }))
    }
}
