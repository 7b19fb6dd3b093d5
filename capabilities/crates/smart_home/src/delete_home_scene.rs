// capabilities/crates/smart_home/src/delete_home_scene.rs

use mock_store_core::{
    cascade_delete, de_id, parse_args, RecordExt, Store, Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::lookup::{home_by_name, require_in_home};
use crate::tables::{ROUTINE_ACTIONS, SCENES, SCENE_CASCADE, SCENE_CASCADE_WITH_AUTOMATIONS};

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct DeleteSceneInput {
    home_name: Option<String>,
    #[serde(deserialize_with = "de_id")]
    scene_id: String,
    #[serde(default = "default_true")]
    delete_automation_actions: bool,
}

pub struct DeleteHomeScene;

impl Tool for DeleteHomeScene {
    fn name(&self) -> &'static str {
        "delete_home_scene"
    }

    fn description(&self) -> &'static str {
        "Delete a scene with its actions and their attributes. Unless \
         delete_automation_actions is false, automation actions that activate the scene are \
         deleted too."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "scene_id": {"type": "string"},
                "delete_automation_actions": {"type": "boolean", "description": "Defaults to true"}
            },
            "required": ["home_name", "scene_id"]
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: DeleteSceneInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;
        let home_name = input.home_name.as_deref().unwrap_or_default();
        let scene = require_in_home(store, &SCENES, &input.scene_id, &home_id, home_name)?;
        let scene_name = scene.get("scene_name").cloned().unwrap_or(Value::Null);

        // Captured before the cascade removes them.
        let automation_actions: Vec<Value> = if input.delete_automation_actions {
            store
                .table(ROUTINE_ACTIONS.name)
                .into_iter()
                .flat_map(|t| t.iter())
                .filter(|(_, a)| a.refers_to("target_scene_id", &input.scene_id))
                .map(|(id, a)| json!({"action_id": id, "automation_id": a.get("routine_id")}))
                .collect()
        } else {
            Vec::new()
        };

        let rules = if input.delete_automation_actions {
            SCENE_CASCADE_WITH_AUTOMATIONS
        } else {
            SCENE_CASCADE
        };
        let report = cascade_delete(store, &SCENES, &input.scene_id, rules)?;

        Ok(json!({
            "message": format!("Scene '{}' deleted", input.scene_id),
            "deleted_scene": {
                "scene_id": &input.scene_id,
                "scene_name": scene_name,
            },
            "deleted_automation_actions": automation_actions,
            "removed": report.counts_json(),
        }))
    }
}
