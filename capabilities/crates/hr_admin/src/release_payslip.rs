// capabilities/crates/hr_admin/src/release_payslip.rs

use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, record_from, FieldRules, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{PayslipStatus, EMPLOYEES, PAYROLL_CYCLES, PAYSLIPS};

#[derive(Deserialize)]
struct ReleasePayslipInput {
    #[serde(deserialize_with = "de_id")]
    payslip_id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    employee_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    cycle_id: Option<String>,
}

pub struct ReleasePayslip;

impl Tool for ReleasePayslip {
    fn name(&self) -> &'static str {
        "release_payslip"
    }

    fn description(&self) -> &'static str {
        "Release a draft or updated payslip. Released is final: releasing twice fails. \
         Optional employee_id and cycle_id are checked against the payslip."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "payslip_id": {"type": "string"},
                "employee_id": {"type": "string"},
                "cycle_id": {"type": "string"}
            },
            "required": ["payslip_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: ReleasePayslipInput = parse_args(args)?;
        let payslip = store.require(&PAYSLIPS, &input.payslip_id)?;

        if let Some(employee_id) = input.employee_id.as_deref() {
            if !payslip.refers_to("employee_id", employee_id) {
                return Err(ToolError::referential(format!(
                    "Payslip '{}' does not belong to employee '{}'. It belongs to employee '{}'.",
                    input.payslip_id,
                    employee_id,
                    payslip.id_field("employee_id").unwrap_or_default()
                )));
            }
            store.require(&EMPLOYEES, employee_id)?;
        }
        if let Some(cycle_id) = input.cycle_id.as_deref() {
            if !payslip.refers_to("cycle_id", cycle_id) {
                return Err(ToolError::referential(format!(
                    "Payslip '{}' does not belong to cycle '{}'. It belongs to cycle '{}'.",
                    input.payslip_id,
                    cycle_id,
                    payslip.id_field("cycle_id").unwrap_or_default()
                )));
            }
            store.require(&PAYROLL_CYCLES, cycle_id)?;
        }

        let current = payslip.str_field("status").unwrap_or_default().to_string();
        let releasable = match PayslipStatus::parse(&current) {
            Ok(PayslipStatus::Released) => {
                return Err(ToolError::rule(format!(
                    "Payslip '{}' is already released. Cannot release again.",
                    input.payslip_id
                )));
            }
            Ok(status) => status.can_release(),
            Err(_) => false,
        };
        if !releasable {
            return Err(ToolError::rule(format!(
                "Payslip '{}' has status '{}'. Can only release payslips with status 'draft' or 'updated'.",
                input.payslip_id, current
            )));
        }

        let payslip = apply_mutation(
            store,
            ctx.clock(),
            &PAYSLIPS,
            Some(input.payslip_id.as_str()),
            record_from(json!({"status": PayslipStatus::Released.as_str()})),
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!(
                "Payslip '{}' has been released successfully for employee '{}' in cycle '{}'",
                input.payslip_id,
                payslip.id_field("employee_id").unwrap_or_default(),
                payslip.id_field("cycle_id").unwrap_or_default()
            ),
            "payslip": payslip,
            "previous_status": current,
            "action": "released",
        }))
    }
}
