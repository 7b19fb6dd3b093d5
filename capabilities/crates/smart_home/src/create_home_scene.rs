// capabilities/crates/smart_home/src/create_home_scene.rs

use mock_store_core::validate::require_text;
use mock_store_core::{
    apply_mutation, parse_args, record_from, FieldRules, Store, Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::lookup::{clean, home_by_name, is_home_admin, name_taken_in_home, user_by_email};
use crate::tables::SCENES;

#[derive(Deserialize)]
struct CreateSceneInput {
    home_name: Option<String>,
    created_by_user_email: Option<String>,
    scene_name: Option<String>,
    description: Option<String>,
    voice_control_phrase: Option<String>,
}

pub struct CreateHomeScene;

impl Tool for CreateHomeScene {
    fn name(&self) -> &'static str {
        "create_home_scene"
    }

    fn description(&self) -> &'static str {
        "Create a scene in a home. Only home admins may create scenes; new scenes start \
         disabled. Scene names are unique within a home."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "created_by_user_email": {"type": "string"},
                "scene_name": {"type": "string"},
                "description": {"type": "string"},
                "voice_control_phrase": {"type": "string"}
            },
            "required": ["home_name", "created_by_user_email", "scene_name"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: CreateSceneInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;
        let (user_id, _) = user_by_email(
            store,
            input.created_by_user_email.as_deref(),
            "created_by_user_email",
        )?;
        let email = input.created_by_user_email.as_deref().unwrap_or_default().trim().to_lowercase();
        let home_name = input.home_name.as_deref().unwrap_or_default().trim();
        if !is_home_admin(store, &home_id, &user_id) {
            return Err(ToolError::referential(format!(
                "User '{}' must be an admin of home '{}' to create scenes",
                email, home_name
            )));
        }

        let scene_name = require_text(input.scene_name.as_deref(), "scene_name")?;
        if name_taken_in_home(store, SCENES.name, "scene_name", &home_id, scene_name, None) {
            return Err(ToolError::rule(format!(
                "Scene '{}' already exists in this home",
                scene_name
            )));
        }

        let scene = apply_mutation(
            store,
            ctx.clock(),
            &SCENES,
            None,
            record_from(json!({
                "home_id": &home_id,
                "created_by_user_id": &user_id,
                "scene_name": scene_name,
                "description": clean(input.description.as_deref()),
                "status": "disabled",
                "voice_control_phrase": clean(input.voice_control_phrase.as_deref()),
            })),
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!("Scene '{}' created in home '{}'", scene_name, home_name),
            "scene": scene,
            "created_by_user_email": email,
        }))
    }
}
