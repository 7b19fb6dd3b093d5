// capabilities/crates/smart_home/src/edit_scene.rs

use mock_store_core::validate::check_choice;
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, FieldRules, Record, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::add_action_to_scene::insert_scene_action;
use crate::attributes::validate_attribute;
use crate::lookup::{clean, home_by_name, name_taken_in_home, require_in_home};
use crate::tables::{DEVICES, SCENES, SCENE_ACTIONS, SCENE_ACTION_ATTRIBUTES, TOGGLE_STATUSES};

#[derive(Deserialize)]
struct EditSceneInput {
    home_name: Option<String>,
    #[serde(deserialize_with = "de_id")]
    scene_id: String,
    status: Option<String>,
    scene_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    accessory_id: Option<String>,
    /// Exactly one `{attribute: value}` pair.
    state: Option<Map<String, Value>>,
}

pub struct EditScene;

fn state_pair(state: &Map<String, Value>) -> Result<(String, String), ToolError> {
    let mut pairs = state.iter();
    match (pairs.next(), pairs.next()) {
        (Some((name, value)), None) => {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok((name.clone(), value))
        }
        _ => Err(ToolError::malformed(
            "state must be a JSON object with exactly one attribute",
        )),
    }
}

/// Scene actions with their attributes, in id order.
fn scene_actions(store: &Store, scene_id: &str) -> Vec<Value> {
    let attributes: Vec<&Record> = store
        .table(SCENE_ACTION_ATTRIBUTES.name)
        .map(|t| t.values().collect())
        .unwrap_or_default();
    store
        .table(SCENE_ACTIONS.name)
        .into_iter()
        .flat_map(|t| t.iter())
        .filter(|(_, a)| a.refers_to("scene_id", scene_id))
        .map(|(action_id, action)| {
            let attrs: Vec<Value> = attributes
                .iter()
                .filter(|attr| attr.refers_to("scene_action_id", action_id))
                .map(|attr| {
                    json!({
                        "attribute_name": attr.get("attribute_name"),
                        "attribute_value": attr.get("attribute_value"),
                    })
                })
                .collect();
            json!({
                "scene_action_id": action_id,
                "accessory_id": action.get("device_id"),
                "attributes": attrs,
            })
        })
        .collect()
}

impl Tool for EditScene {
    fn name(&self) -> &'static str {
        "edit_scene"
    }

    fn description(&self) -> &'static str {
        "Enable or disable a scene, rename it, or add one accessory state to it. accessory_id \
         and state (a single {attribute: value} pair) go together."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "scene_id": {"type": "string"},
                "status": {"type": "string", "enum": TOGGLE_STATUSES},
                "scene_name": {"type": "string"},
                "accessory_id": {"type": "string"},
                "state": {"type": "object", "description": "e.g. {\"power\": \"on\"}"}
            },
            "required": ["home_name", "scene_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: EditSceneInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;
        let home_name = input.home_name.as_deref().unwrap_or_default();
        require_in_home(store, &SCENES, &input.scene_id, &home_id, home_name)?;

        let mut updates = Record::new();
        if let Some(status) = input.status.as_deref() {
            let status = status.trim().to_lowercase();
            check_choice(&status, "status", TOGGLE_STATUSES)?;
            updates.insert("status".into(), json!(status));
        }
        if let Some(name) = input.scene_name.as_deref() {
            let name = clean(Some(name))
                .ok_or_else(|| ToolError::malformed("scene_name cannot be empty"))?;
            let own_id = Some(input.scene_id.as_str());
            if name_taken_in_home(store, SCENES.name, "scene_name", &home_id, &name, own_id) {
                return Err(ToolError::rule(format!("Scene '{}' already exists in this home", name)));
            }
            updates.insert("scene_name".into(), json!(name));
        }

        let new_action = match (input.accessory_id.as_deref(), input.state.as_ref()) {
            (None, None) => None,
            (Some(accessory_id), Some(state)) => {
                let device = require_in_home(store, &DEVICES, accessory_id, &home_id, home_name)?;
                let (command, value) = state_pair(state)?;
                validate_attribute(
                    device.str_field("device_type").unwrap_or_default(),
                    &command,
                    &value,
                    false,
                )?;
                Some((accessory_id, command, value))
            }
            _ => {
                return Err(ToolError::malformed(
                    "Provide both accessory_id and state, or neither",
                ))
            }
        };
        if updates.is_empty() && new_action.is_none() {
            return Err(ToolError::NoFieldsToUpdate);
        }

        if let Some((accessory_id, command, value)) = &new_action {
            insert_scene_action(store, ctx, &input.scene_id, accessory_id, command, value)?;
        }
        if updates.is_empty() {
            // Adding an action still counts as an edit of the scene.
            updates.insert("updated_at".into(), json!(ctx.timestamp()));
        }
        let scene = apply_mutation(
            store,
            ctx.clock(),
            &SCENES,
            Some(input.scene_id.as_str()),
            updates,
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!("Scene '{}' updated", input.scene_id),
            "scene": scene,
            "actions": scene_actions(store, &input.scene_id),
        }))
    }
}
