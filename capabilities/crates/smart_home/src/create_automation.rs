// capabilities/crates/smart_home/src/create_automation.rs

use mock_store_core::validate::{check_choice, require_text};
use mock_store_core::{
    apply_mutation, parse_args, record_from, FieldRules, Record, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::lookup::{clean, home_by_name, membership_role, name_taken_in_home, user_by_email};
use crate::tables::{ROUTINES, TOGGLE_STATUSES};

#[derive(Deserialize)]
struct CreateAutomationInput {
    home_name: Option<String>,
    automation_name: Option<String>,
    created_by_user_email: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

/// Automation as the tool surface names its fields.
pub(crate) fn present_automation(routine: &Record) -> Value {
    json!({
        "automation_id": routine.get("routine_id"),
        "automation_name": routine.get("routine_name"),
        "status": routine.get("status"),
        "description": routine.get("description"),
        "created_at": routine.get("created_at"),
        "updated_at": routine.get("updated_at"),
    })
}

pub struct CreateAutomation;

impl Tool for CreateAutomation {
    fn name(&self) -> &'static str {
        "create_automation"
    }

    fn description(&self) -> &'static str {
        "Create an automation in a home. The creator must be an active member of the home. \
         Names are unique within a home; status defaults to enabled."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "automation_name": {"type": "string"},
                "created_by_user_email": {"type": "string"},
                "description": {"type": "string"},
                "status": {"type": "string", "enum": TOGGLE_STATUSES}
            },
            "required": ["home_name", "automation_name", "created_by_user_email"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: CreateAutomationInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;
        let home_name = input.home_name.as_deref().unwrap_or_default().trim();
        let (user_id, user) = user_by_email(
            store,
            input.created_by_user_email.as_deref(),
            "created_by_user_email",
        )?;
        let email = user.str_field("email").unwrap_or_default().to_lowercase();
        if !user.has_status("active") {
            return Err(ToolError::referential(format!(
                "User with email '{}' is not active",
                email
            )));
        }
        if membership_role(store, &home_id, &user_id).is_none() {
            return Err(ToolError::referential(format!(
                "User with email '{}' does not have access to home '{}'",
                email, home_name
            )));
        }

        let name = require_text(input.automation_name.as_deref(), "automation_name")?;
        if name_taken_in_home(store, ROUTINES.name, "routine_name", &home_id, name, None) {
            return Err(ToolError::rule(format!(
                "Automation '{}' already exists in this home",
                name
            )));
        }
        let status = input
            .status
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| "enabled".to_string());
        check_choice(&status, "status", TOGGLE_STATUSES)?;

        let routine = apply_mutation(
            store,
            ctx.clock(),
            &ROUTINES,
            None,
            record_from(json!({
                "home_id": &home_id,
                "created_by_user_id": &user_id,
                "routine_name": name,
                "status": status,
                "description": clean(input.description.as_deref()),
            })),
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!("Automation '{}' created in home '{}'", name, home_name),
            "automation": present_automation(&routine),
        }))
    }
}
