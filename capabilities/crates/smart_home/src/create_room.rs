// capabilities/crates/smart_home/src/create_room.rs

use mock_store_core::validate::require_text;
use mock_store_core::{
    apply_mutation, de_id, parse_args, record_from, FieldRules, Rule, Store, Tool, ToolContext,
    ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{HOMES, ROOMS, ROOM_TYPES};

#[derive(Deserialize)]
struct CreateRoomInput {
    #[serde(deserialize_with = "de_id")]
    home_id: String,
    room_name: Option<String>,
    room_type: String,
}

pub struct CreateRoom;

impl Tool for CreateRoom {
    fn name(&self) -> &'static str {
        "create_room"
    }

    fn description(&self) -> &'static str {
        "Create a room in an existing home."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_id": {"type": "string"},
                "room_name": {"type": "string"},
                "room_type": {"type": "string", "enum": ROOM_TYPES}
            },
            "required": ["home_id", "room_name", "room_type"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: CreateRoomInput = parse_args(args)?;
        let room_name = require_text(input.room_name.as_deref(), "room_name")?;

        let rules = FieldRules::new()
            .field("home_id", &[Rule::Required, Rule::ForeignKey(HOMES)])
            .field("room_type", &[Rule::Required, Rule::OneOf(ROOM_TYPES)]);
        let room = apply_mutation(
            store,
            ctx.clock(),
            &ROOMS,
            None,
            record_from(json!({
                "home_id": &input.home_id,
                "room_name": room_name,
                "room_type": &input.room_type,
            })),
            &rules,
        )?;

        Ok(json!({
            "message": format!("Room '{}' created in home {}", room_name, input.home_id),
            "room": room,
        }))
    }
}
