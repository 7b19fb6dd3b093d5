// capabilities/crates/smart_home/src/manage_automation.rs

use mock_store_core::validate::check_choice;
use mock_store_core::{
    apply_mutation, cascade_delete, de_opt_id, parse_args, FieldRules, Record, RecordExt, Store,
    Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::create_automation::present_automation;
use crate::lookup::{clean, home_by_name, name_taken_in_home, require_in_home};
use crate::tables::{ROUTINES, ROUTINE_CASCADE, TOGGLE_STATUSES};

#[derive(Deserialize)]
struct ManageAutomationInput {
    home_name: Option<String>,
    action: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    automation_id: Option<String>,
    automation_name: Option<String>,
    new_automation_name: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

pub struct ManageAutomation;

fn resolve_automation(
    store: &Store,
    input: &ManageAutomationInput,
    home_id: &str,
    home_name: &str,
) -> Result<String, ToolError> {
    match (input.automation_id.as_deref(), input.automation_name.as_deref()) {
        (Some(id), None) => {
            require_in_home(store, &ROUTINES, id, home_id, home_name)?;
            Ok(id.to_string())
        }
        (None, Some(name)) => {
            let name = name.trim();
            let matches: Vec<&str> = store
                .table(ROUTINES.name)
                .into_iter()
                .flat_map(|t| t.iter())
                .filter(|(_, r)| {
                    r.refers_to("home_id", home_id)
                        && r.str_field("routine_name")
                            .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
                })
                .map(|(id, _)| id)
                .collect();
            match matches.as_slice() {
                [id] => Ok(id.to_string()),
                [] => Err(ToolError::missing(format!("Automation '{}' not found", name))),
                _ => Err(ToolError::rule(format!(
                    "Multiple automations named '{}' found in home '{}'",
                    name, home_name
                ))),
            }
        }
        _ => Err(ToolError::malformed(
            "Provide exactly one of automation_id or automation_name",
        )),
    }
}

impl Tool for ManageAutomation {
    fn name(&self) -> &'static str {
        "manage_automation"
    }

    fn description(&self) -> &'static str {
        "Update (rename, describe, enable or disable) or delete an automation, identified by \
         exactly one of automation_id or automation_name. Deleting removes its triggers, \
         trigger attributes, schedules, actions and action attributes."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "action": {"type": "string", "enum": ["update", "delete"]},
                "automation_id": {"type": "string"},
                "automation_name": {"type": "string"},
                "new_automation_name": {"type": "string"},
                "description": {"type": "string"},
                "status": {"type": "string", "enum": TOGGLE_STATUSES}
            },
            "required": ["home_name", "action"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: ManageAutomationInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;
        let home_name = input.home_name.as_deref().unwrap_or_default().trim();
        let automation_id = resolve_automation(store, &input, &home_id, home_name)?;

        let action = input.action.trim().to_lowercase();
        check_choice(&action, "action", &["update", "delete"])?;

        if action == "delete" {
            let deleted = store.require(&ROUTINES, &automation_id)?;
            let deleted = present_automation(deleted);
            let report = cascade_delete(store, &ROUTINES, &automation_id, ROUTINE_CASCADE)?;
            return Ok(json!({
                "message": format!("Automation '{}' deleted", automation_id),
                "deleted_automation": deleted,
                "removed": report.counts_json(),
            }));
        }

        let mut updates = Record::new();
        if let Some(name) = input.new_automation_name.as_deref() {
            let name = clean(Some(name))
                .ok_or_else(|| ToolError::malformed("new_automation_name must be a non-empty string"))?;
            let own_id = Some(automation_id.as_str());
            if name_taken_in_home(store, ROUTINES.name, "routine_name", &home_id, &name, own_id) {
                return Err(ToolError::rule(format!(
                    "Automation '{}' already exists in this home",
                    name
                )));
            }
            updates.insert("routine_name".into(), json!(name));
        }
        if let Some(description) = input.description.as_deref() {
            updates.insert("description".into(), json!(clean(Some(description))));
        }
        if let Some(status) = input.status.as_deref() {
            let status = status.trim().to_lowercase();
            check_choice(&status, "status", TOGGLE_STATUSES)?;
            updates.insert("status".into(), json!(status));
        }

        let routine = apply_mutation(
            store,
            ctx.clock(),
            &ROUTINES,
            Some(automation_id.as_str()),
            updates,
            &FieldRules::new(),
        )?;
        Ok(json!({
            "message": format!("Automation '{}' updated", automation_id),
            "automation": present_automation(&routine),
        }))
    }
}
