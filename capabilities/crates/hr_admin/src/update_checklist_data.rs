// capabilities/crates/hr_admin/src/update_checklist_data.rs

use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, FieldRules, Record, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{ChecklistStatus, CHECKLISTS, CHECKLIST_TASKS, EMPLOYEES, MANAGERS};

#[derive(Deserialize)]
struct UpdateChecklistInput {
    #[serde(deserialize_with = "de_id")]
    employee_id: String,
    #[serde(deserialize_with = "de_id")]
    checklist_id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    task_id: Option<String>,
    task_status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    assigned_manager_id: Option<String>,
    name: Option<String>,
    status: Option<String>,
}

/// Updates a checklist, one of its tasks, or both in a single call.
///
/// A checklist can only move to `completed` once every task is completed,
/// counting the task change made by the same call. `completed` is terminal
/// for both, and the tasks of a completed checklist stay completed.
pub struct UpdateChecklistData;

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Tool for UpdateChecklistData {
    fn name(&self) -> &'static str {
        "update_checklist_data"
    }

    fn description(&self) -> &'static str {
        "Update an employee's checklist (name, status) and/or one of its tasks (task_status, \
         assigned_manager_id). Statuses: pending, in_progress, completed. Marking the checklist \
         completed requires all of its tasks to be completed."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "employee_id": {"type": "string"},
                "checklist_id": {"type": "string"},
                "task_id": {"type": "string"},
                "task_status": {"type": "string", "enum": ChecklistStatus::ALL},
                "assigned_manager_id": {"type": "string"},
                "name": {"type": "string"},
                "status": {"type": "string", "enum": ChecklistStatus::ALL}
            },
            "required": ["employee_id", "checklist_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: UpdateChecklistInput = parse_args(args)?;
        let status = blank_to_none(input.status);
        let task_status = blank_to_none(input.task_status);

        let checklist = store.require(&CHECKLISTS, &input.checklist_id)?;
        store.require(&EMPLOYEES, &input.employee_id)?;
        if !checklist.refers_to("employee_id", &input.employee_id) {
            return Err(ToolError::referential(format!(
                "Checklist {} does not belong to employee {}",
                input.checklist_id, input.employee_id
            )));
        }
        let checklist_status = ChecklistStatus::of(checklist)?;

        let mut task_updates = Record::new();
        if let Some(task_id) = input.task_id.as_deref() {
            let task = store.require(&CHECKLIST_TASKS, task_id)?;
            if !task.refers_to("checklist_id", &input.checklist_id) {
                return Err(ToolError::referential(format!(
                    "Task {} does not belong to checklist {}",
                    task_id, input.checklist_id
                )));
            }
            if let Some(s) = task_status.as_deref() {
                let parsed = ChecklistStatus::parse("task_status", s)?;
                ChecklistStatus::of(task)?.check_transition(parsed, "task")?;
                if checklist_status == ChecklistStatus::Completed && parsed != ChecklistStatus::Completed {
                    return Err(ToolError::rule(format!(
                        "Checklist {} is completed; its tasks cannot be moved to '{}'",
                        input.checklist_id,
                        parsed.as_str()
                    )));
                }
                task_updates.insert("status".into(), json!(parsed.as_str()));
            }
            if let Some(manager_id) = input.assigned_manager_id.as_deref() {
                store.require(&MANAGERS, manager_id)?;
                task_updates.insert("assigned_manager_id".into(), json!(manager_id));
            }
        } else if task_status.is_some() || input.assigned_manager_id.is_some() {
            return Err(ToolError::malformed(
                "task_id is required when updating task_status or assigned_manager_id",
            ));
        }

        let mut checklist_updates = Record::new();
        if let Some(name) = input.name {
            checklist_updates.insert("name".into(), json!(name));
        }
        if let Some(s) = status.as_deref() {
            let parsed = ChecklistStatus::parse("status", s)?;
            checklist_status.check_transition(parsed, "checklist")?;
            if parsed == ChecklistStatus::Completed {
                let pending = pending_tasks(store, &input.checklist_id, input.task_id.as_deref(), &task_updates);
                if !pending.is_empty() {
                    return Err(ToolError::rule(format!(
                        "Cannot mark checklist as completed. There are {} pending task(s): {}",
                        pending.len(),
                        pending.join(", ")
                    )));
                }
            }
            checklist_updates.insert("status".into(), json!(parsed.as_str()));
        }

        if task_updates.is_empty() && checklist_updates.is_empty() {
            return Err(ToolError::NoFieldsToUpdate);
        }

        let mut applied_updates = Vec::new();
        let mut task_data = Value::Null;
        if let Some(task_id) = input.task_id.as_deref() {
            if !task_updates.is_empty() {
                let fields: Vec<String> = task_updates.keys().cloned().collect();
                let task = apply_mutation(
                    store,
                    ctx.clock(),
                    &CHECKLIST_TASKS,
                    Some(task_id),
                    task_updates,
                    &FieldRules::new(),
                )?;
                applied_updates.push(json!({"target": "task", "task_id": task_id, "updated_fields": fields}));
                task_data = Value::Object(task);
            }
        }

        let checklist = if checklist_updates.is_empty() {
            store.require(&CHECKLISTS, &input.checklist_id)?.clone()
        } else {
            let fields: Vec<String> = checklist_updates.keys().cloned().collect();
            let row = apply_mutation(
                store,
                ctx.clock(),
                &CHECKLISTS,
                Some(input.checklist_id.as_str()),
                checklist_updates,
                &FieldRules::new(),
            )?;
            applied_updates.push(json!({"target": "checklist", "updated_fields": fields}));
            row
        };

        Ok(json!({
            "message": format!("Checklist {} updated successfully", input.checklist_id),
            "applied_updates": applied_updates,
            "checklist_data": checklist,
            "task_data": task_data,
        }))
    }
}

/// Ids of the checklist's tasks that would not be completed after this call.
fn pending_tasks(
    store: &Store,
    checklist_id: &str,
    updating_task: Option<&str>,
    task_updates: &Record,
) -> Vec<String> {
    let Some(tasks) = store.table(CHECKLIST_TASKS.name) else {
        return Vec::new();
    };
    tasks
        .iter()
        .filter(|(_, task)| task.refers_to("checklist_id", checklist_id))
        .filter(|(id, task)| {
            let status = match (updating_task, task_updates.get("status")) {
                (Some(t), Some(new_status)) if t == *id => new_status.as_str(),
                _ => task.str_field("status"),
            };
            status != Some(ChecklistStatus::Completed.as_str())
        })
        .map(|(id, _)| id.to_string())
        .collect()
}
