// capabilities/crates/hr_admin/src/create_new_checklist.rs

use mock_store_core::validate::check_choice;
use mock_store_core::{
    apply_mutation, de_id, parse_args, record_from, FieldRules, Store, Tool, ToolContext,
    ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{
    ChecklistStatus, CHECKLISTS, CHECKLIST_TASKS, CHECKLIST_TYPES, EMPLOYEES, OFFBOARDING_TASKS,
    ONBOARDING_TASKS,
};

#[derive(Deserialize)]
struct NewChecklistInput {
    #[serde(deserialize_with = "de_id")]
    employee_id: String,
    checklist_type: String,
    name: Option<String>,
    status: Option<String>,
}

/// Creates a checklist and seeds it with the standard task list for its type.
pub struct CreateNewChecklist;

impl Tool for CreateNewChecklist {
    fn name(&self) -> &'static str {
        "create_new_checklist"
    }

    fn description(&self) -> &'static str {
        "Create an onboarding or offboarding checklist for an existing employee. The checklist \
         is seeded with the standard pending tasks for its type. status defaults to 'pending' and \
         may not be 'completed'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "employee_id": {"type": "string"},
                "checklist_type": {"type": "string", "enum": CHECKLIST_TYPES},
                "name": {"type": "string"},
                "status": {"type": "string", "enum": ["pending", "in_progress"]}
            },
            "required": ["employee_id", "checklist_type"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: NewChecklistInput = parse_args(args)?;
        check_choice(&input.checklist_type, "checklist_type", CHECKLIST_TYPES)?;
        store.require(&EMPLOYEES, &input.employee_id)?;
        let status = match input.status.as_deref() {
            Some(s) => ChecklistStatus::parse("status", s)?,
            None => ChecklistStatus::Pending,
        };
        if status == ChecklistStatus::Completed {
            return Err(ToolError::rule(
                "A new checklist cannot be completed: its default tasks start pending",
            ));
        }

        let mut row = record_from(json!({
            "checklist_type": &input.checklist_type,
            "employee_id": &input.employee_id,
            "status": status.as_str(),
        }));
        if let Some(name) = input.name {
            row.insert("name".into(), json!(name));
        }
        let checklist = apply_mutation(store, ctx.clock(), &CHECKLISTS, None, row, &FieldRules::new())?;
        let checklist_id = checklist
            .get("checklist_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let defaults = if input.checklist_type == "onboarding" {
            ONBOARDING_TASKS
        } else {
            OFFBOARDING_TASKS
        };
        let mut tasks = Vec::with_capacity(defaults.len());
        for task_name in defaults {
            let task = record_from(json!({
                "assigned_manager_id": null,
                "checklist_id": &checklist_id,
                "name": task_name,
                "status": "pending",
                "due_date": null,
            }));
            tasks.push(apply_mutation(
                store,
                ctx.clock(),
                &CHECKLIST_TASKS,
                None,
                task,
                &FieldRules::new(),
            )?);
        }

        Ok(json!({
            "message": format!(
                "Checklist {} created successfully for employee {}",
                checklist_id, input.employee_id
            ),
            "checklist_id": &checklist_id,
            "checklist_data": checklist,
            "tasks": tasks,
        }))
    }
}
