// capabilities/crates/hr_admin/src/compute_exit_settlement.rs

use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, record_from, FieldRules, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{money, EMPLOYEES, EXIT_CASES, FINANCE_SETTLEMENTS, PAYROLL_CYCLES};

#[derive(Deserialize)]
struct SettlementInput {
    #[serde(deserialize_with = "de_id")]
    employee_id: String,
    settlement_amount: f64,
    #[serde(deserialize_with = "de_id")]
    exit_case_id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    cycle_id: Option<String>,
}

/// Records the final settlement for a leaver and clears their exit case.
///
/// A second settlement for the same employee overwrites the amount of the
/// first. Clearance is terminal: a cleared exit case is not settled again.
pub struct ComputeExitSettlement;

impl Tool for ComputeExitSettlement {
    fn name(&self) -> &'static str {
        "compute_exit_settlement"
    }

    fn description(&self) -> &'static str {
        "Create (or update) the finance settlement for an employee's exit case and move the \
         exit case clearance from 'pending' to 'cleared'. settlement_amount must be non-negative."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "employee_id": {"type": "string"},
                "settlement_amount": {"type": "number"},
                "exit_case_id": {"type": "string"},
                "cycle_id": {"type": "string", "description": "Payroll cycle the settlement is paid in"}
            },
            "required": ["employee_id", "settlement_amount", "exit_case_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: SettlementInput = parse_args(args)?;

        let employee = store.require(&EMPLOYEES, &input.employee_id)?;
        let full_name = employee.str_field("full_name").unwrap_or_default().to_string();

        let exit_case = store.require(&EXIT_CASES, &input.exit_case_id)?;
        if !exit_case.refers_to("employee_id", &input.employee_id) {
            return Err(ToolError::referential(format!(
                "Exit case '{}' does not belong to employee '{}'",
                input.exit_case_id, input.employee_id
            )));
        }
        let old_status = exit_case
            .str_field("exit_clearance_status")
            .unwrap_or("pending")
            .to_string();
        if old_status == "cleared" {
            return Err(ToolError::rule(format!(
                "Exit case '{}' is already cleared",
                input.exit_case_id
            )));
        }

        if input.settlement_amount < 0.0 || !input.settlement_amount.is_finite() {
            return Err(ToolError::rule("settlement_amount must be non-negative"));
        }
        if let Some(cycle_id) = input.cycle_id.as_deref() {
            store.require(&PAYROLL_CYCLES, cycle_id)?;
        }

        let existing = store
            .find_by(FINANCE_SETTLEMENTS.name, "employee_id", &input.employee_id)
            .map(|(id, _)| id.to_string());

        let mut fields = record_from(json!({
            "amount": money(input.settlement_amount),
            "is_cleared": false,
        }));
        if let Some(cycle_id) = &input.cycle_id {
            fields.insert("cycle_id".into(), json!(cycle_id));
        }

        let (settlement, action) = match existing {
            Some(id) => (
                apply_mutation(
                    store,
                    ctx.clock(),
                    &FINANCE_SETTLEMENTS,
                    Some(id.as_str()),
                    fields,
                    &FieldRules::new(),
                )?,
                "updated",
            ),
            None => {
                fields.insert("employee_id".into(), json!(&input.employee_id));
                (
                    apply_mutation(
                        store,
                        ctx.clock(),
                        &FINANCE_SETTLEMENTS,
                        None,
                        fields,
                        &FieldRules::new(),
                    )?,
                    "created",
                )
            }
        };

        let exit_case = apply_mutation(
            store,
            ctx.clock(),
            &EXIT_CASES,
            Some(input.exit_case_id.as_str()),
            record_from(json!({"exit_clearance_status": "cleared"})),
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!(
                "Exit settlement {} for employee '{}' ({}). Exit clearance status updated from '{}' to 'cleared'. Settlement amount: ${:.2}",
                action, full_name, input.employee_id, old_status, input.settlement_amount
            ),
            "settlement_id": settlement.get("settlement_id").cloned().unwrap_or(Value::Null),
            "exit_case_id": input.exit_case_id,
            "settlement": settlement,
            "exit_case": exit_case,
            "action": action,
        }))
    }
}
