// capabilities/crates/smart_home/src/add_action_to_scene.rs

use mock_store_core::validate::require_text;
use mock_store_core::{
    apply_mutation, de_id, parse_args, record_from, FieldRules, Record, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::attributes::validate_attribute;
use crate::lookup::{home_by_name, require_in_home};
use crate::tables::{DEVICES, SCENES, SCENE_ACTIONS, SCENE_ACTION_ATTRIBUTES};

#[derive(Deserialize)]
struct SceneActionInput {
    home_name: Option<String>,
    #[serde(deserialize_with = "de_id")]
    scene_id: String,
    #[serde(deserialize_with = "de_id")]
    accessory_id: String,
    command: Option<String>,
    value: Option<String>,
}

/// Write one scene action with its single attribute. Callers validate first.
pub(crate) fn insert_scene_action(
    store: &mut Store,
    ctx: &ToolContext,
    scene_id: &str,
    device_id: &str,
    command: &str,
    value: &str,
) -> Result<(Record, Record), ToolError> {
    let action = apply_mutation(
        store,
        ctx.clock(),
        &SCENE_ACTIONS,
        None,
        record_from(json!({"scene_id": scene_id, "device_id": device_id})),
        &FieldRules::new(),
    )?;
    let attribute = apply_mutation(
        store,
        ctx.clock(),
        &SCENE_ACTION_ATTRIBUTES,
        None,
        record_from(json!({
            "scene_action_id": action.get("scene_action_id"),
            "attribute_name": command,
            "attribute_value": value,
        })),
        &FieldRules::new(),
    )?;
    Ok((action, attribute))
}

pub struct AddActionToScene;

impl Tool for AddActionToScene {
    fn name(&self) -> &'static str {
        "add_action_to_scene"
    }

    fn description(&self) -> &'static str {
        "Add an accessory control action to a scene. The command must be a writable attribute \
         of the accessory's type and the value must fit its enum or numeric range."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "scene_id": {"type": "string"},
                "accessory_id": {"type": "string"},
                "command": {"type": "string", "description": "Attribute name, e.g. power or brightness"},
                "value": {"type": "string", "description": "Attribute value, e.g. on or 40"}
            },
            "required": ["home_name", "scene_id", "accessory_id", "command", "value"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: SceneActionInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;
        let home_name = input.home_name.as_deref().unwrap_or_default();
        let command = require_text(input.command.as_deref(), "command")?;
        let value = require_text(input.value.as_deref(), "value")?;

        require_in_home(store, &SCENES, &input.scene_id, &home_id, home_name)?;
        let device = require_in_home(store, &DEVICES, &input.accessory_id, &home_id, home_name)?;
        let device_type = device.str_field("device_type").unwrap_or_default().to_string();
        validate_attribute(&device_type, command, value, false)?;

        let (action, attribute) =
            insert_scene_action(store, ctx, &input.scene_id, &input.accessory_id, command, value)?;

        Ok(json!({
            "message": format!(
                "Action '{} = {}' added to scene '{}'",
                command, value, input.scene_id
            ),
            "scene_action": action,
            "attributes": [attribute],
        }))
    }
}
