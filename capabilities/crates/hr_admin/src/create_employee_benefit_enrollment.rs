// capabilities/crates/hr_admin/src/create_employee_benefit_enrollment.rs

use mock_store_core::validate::{check_date, require_text};
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, record_from, FieldRules, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{BENEFIT_ENROLLMENTS, BENEFIT_PLANS, EMPLOYEES};

#[derive(Deserialize)]
struct EnrollmentInput {
    #[serde(deserialize_with = "de_id")]
    plan_id: String,
    start_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    employee_id: Option<String>,
    employee_email: Option<String>,
}

pub struct CreateEmployeeBenefitEnrollment;

impl CreateEmployeeBenefitEnrollment {
    /// Resolve the employee from an id, an email, or both (which must agree).
    fn resolve_employee(
        store: &Store,
        employee_id: Option<&str>,
        employee_email: Option<&str>,
    ) -> Result<String, ToolError> {
        match (employee_id, employee_email) {
            (Some(id), email) => {
                let employee = store.require(&EMPLOYEES, id)?;
                if let Some(email) = email {
                    let actual = employee.str_field("email").unwrap_or_default();
                    if actual != email {
                        return Err(ToolError::referential(format!(
                            "Employee email mismatch. Provided email '{}' does not match the email '{}' for employee ID '{}'",
                            email, actual, id
                        )));
                    }
                }
                Ok(id.to_string())
            }
            (None, Some(email)) => store
                .find_by(EMPLOYEES.name, "email", email)
                .map(|(id, _)| id.to_string())
                .ok_or_else(|| {
                    ToolError::missing(format!("Employee with email '{}' not found", email))
                }),
            (None, None) => Err(ToolError::malformed(
                "Either employee_id or employee_email is required",
            )),
        }
    }
}

impl Tool for CreateEmployeeBenefitEnrollment {
    fn name(&self) -> &'static str {
        "create_employee_benefit_enrollment"
    }

    fn description(&self) -> &'static str {
        "Enroll an active employee in an active benefit plan. Identify the employee by \
         employee_id or employee_email (if both are given they must match). An employee can be \
         enrolled in the same plan only once."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "plan_id": {"type": "string"},
                "start_date": {"type": "string", "description": "YYYY-MM-DD"},
                "employee_id": {"type": "string"},
                "employee_email": {"type": "string"}
            },
            "required": ["plan_id", "start_date"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: EnrollmentInput = parse_args(args)?;
        let start_date = require_text(input.start_date.as_deref(), "start_date")?;

        let employee_id = Self::resolve_employee(
            store,
            input.employee_id.as_deref(),
            input.employee_email.as_deref(),
        )?;
        let employee = store.require(&EMPLOYEES, &employee_id)?;
        if !employee.has_status("active") {
            return Err(ToolError::referential(format!(
                "Employee '{}' must have 'active' status. Current status: '{}'",
                employee_id,
                employee.str_field("status").unwrap_or("unknown")
            )));
        }
        let employee_name = employee.str_field("full_name").unwrap_or_default().to_string();

        let plan = store.require(&BENEFIT_PLANS, &input.plan_id)?;
        if !plan.has_status("active") {
            return Err(ToolError::referential(format!(
                "Benefit plan '{}' must be 'active'. Current status: '{}'",
                input.plan_id,
                plan.str_field("status").unwrap_or("unknown")
            )));
        }
        let plan_name = plan.str_field("name").unwrap_or_default().to_string();

        let start_date = check_date(start_date, "start_date")?;

        let existing = store.table(BENEFIT_ENROLLMENTS.name).and_then(|table| {
            table.iter().find(|(_, rec)| {
                rec.refers_to("employee_id", &employee_id) && rec.refers_to("plan_id", &input.plan_id)
            })
        });
        if let Some((enrollment_id, _)) = existing {
            return Err(ToolError::rule(format!(
                "Enrollment already exists for employee '{}' in plan '{}' (enrollment_id: '{}'). An employee can only be enrolled in the same plan once.",
                employee_id, input.plan_id, enrollment_id
            )));
        }

        let row = record_from(json!({
            "employee_id": &employee_id,
            "plan_id": &input.plan_id,
            "start_date": start_date.format("%Y-%m-%d").to_string(),
            "is_active": true,
        }));
        let enrollment = apply_mutation(
            store,
            ctx.clock(),
            &BENEFIT_ENROLLMENTS,
            None,
            row,
            &FieldRules::new(),
        )?;

        Ok(json!({
            "message": format!(
                "Benefit enrollment created successfully for employee '{}' ({}) in plan '{}' ({})",
                employee_name, employee_id, plan_name, input.plan_id
            ),
            "enrollment": enrollment,
        }))
    }
}
