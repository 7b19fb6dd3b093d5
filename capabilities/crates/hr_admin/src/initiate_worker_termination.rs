// capabilities/crates/hr_admin/src/initiate_worker_termination.rs

use mock_store_core::validate::{check_choice, check_date};
use mock_store_core::{
    apply_mutation, de_id, parse_args, record_from, FieldRules, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::tables::{EMPLOYEES, EXIT_CASES, TERMINATION_REASONS};

#[derive(Deserialize)]
struct TerminationInput {
    #[serde(deserialize_with = "de_id")]
    employee_id: String,
    reason: String,
    exit_date: String,
}

pub struct InitiateWorkerTermination;

impl Tool for InitiateWorkerTermination {
    fn name(&self) -> &'static str {
        "initiate_worker_termination"
    }

    fn description(&self) -> &'static str {
        "Open an exit case for an active employee and mark the employee inactive. \
         reason: voluntary_resignation, layoff, misconduct, policy_violation, security_breach. \
         Each employee can have at most one exit case; clearance starts as 'pending'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "employee_id": {"type": "string"},
                "reason": {"type": "string", "enum": TERMINATION_REASONS},
                "exit_date": {"type": "string", "description": "YYYY-MM-DD"}
            },
            "required": ["employee_id", "reason", "exit_date"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: TerminationInput = parse_args(args)?;

        let employee = store.require(&EMPLOYEES, &input.employee_id)?;
        if !employee.has_status("active") {
            return Err(ToolError::referential(format!(
                "Employee '{}' does not have 'active' status. Current status: '{}'",
                input.employee_id,
                employee.str_field("status").unwrap_or("unknown")
            )));
        }
        let full_name = employee.str_field("full_name").unwrap_or_default().to_string();
        check_choice(&input.reason, "reason", TERMINATION_REASONS)?;
        let exit_date = check_date(&input.exit_date, "exit_date")?;

        if let Some((case_id, _)) = store.find_by(EXIT_CASES.name, "employee_id", &input.employee_id) {
            return Err(ToolError::rule(format!(
                "Exit case already exists for employee '{}' (exit_case_id: '{}')",
                input.employee_id, case_id
            )));
        }

        let exit_date = exit_date.format("%Y-%m-%d").to_string();
        let row = record_from(json!({
            "employee_id": &input.employee_id,
            "reason": &input.reason,
            "exit_date": exit_date,
            "exit_clearance_status": "pending",
        }));
        let exit_case = apply_mutation(store, ctx.clock(), &EXIT_CASES, None, row, &FieldRules::new())?;
        apply_mutation(
            store,
            ctx.clock(),
            &EMPLOYEES,
            Some(input.employee_id.as_str()),
            record_from(json!({"status": "inactive"})),
            &FieldRules::new(),
        )?;
        info!(employee_id = input.employee_id.as_str(), "termination initiated");

        Ok(json!({
            "message": format!(
                "Worker termination has been initiated for employee '{}' ({}) with reason '{}' and exit date '{}'",
                full_name, input.employee_id, input.reason, exit_date
            ),
            "exit_case": exit_case,
            "employee_status_updated": "inactive",
            "action": "created",
        }))
    }
}
