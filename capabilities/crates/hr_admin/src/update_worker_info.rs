// capabilities/crates/hr_admin/src/update_worker_info.rs

use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, FieldRules, Record, Rule, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{money, DEPARTMENTS, EMPLOYEES, EMPLOYEE_STATUSES, MANAGERS, ROLES};

#[derive(Deserialize)]
struct UpdateWorkerInput {
    #[serde(deserialize_with = "de_id")]
    employee_id: String,
    full_name: Option<String>,
    email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    department_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    manager_id: Option<String>,
    status: Option<String>,
    base_salary: Option<f64>,
    location: Option<String>,
    role: Option<String>,
    tenure_months: Option<i64>,
}

pub struct UpdateWorkerInfo;

impl Tool for UpdateWorkerInfo {
    fn name(&self) -> &'static str {
        "update_worker_info"
    }

    fn description(&self) -> &'static str {
        "Update an existing worker. Only the provided fields change; at least one is required. \
         status: active, inactive, probation, on_leave. role: admin, non_admin. \
         email must stay unique; department and manager must exist."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "employee_id": {"type": "string"},
                "full_name": {"type": "string"},
                "email": {"type": "string"},
                "department_id": {"type": "string"},
                "manager_id": {"type": "string"},
                "status": {"type": "string", "enum": EMPLOYEE_STATUSES},
                "base_salary": {"type": "number"},
                "location": {"type": "string"},
                "role": {"type": "string", "enum": ROLES},
                "tenure_months": {"type": "integer"}
            },
            "required": ["employee_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: UpdateWorkerInput = parse_args(args)?;

        if input.manager_id.as_deref() == Some(input.employee_id.as_str()) {
            return Err(ToolError::rule(format!(
                "Employee '{}' cannot be their own manager",
                input.employee_id
            )));
        }

        let mut updates = Record::new();
        if let Some(v) = input.full_name {
            updates.insert("full_name".into(), json!(v));
        }
        if let Some(v) = input.email {
            updates.insert("email".into(), json!(v));
        }
        if let Some(v) = input.department_id {
            updates.insert("department_id".into(), json!(v));
        }
        if let Some(v) = input.manager_id {
            updates.insert("manager_id".into(), json!(v));
        }
        if let Some(v) = input.status {
            updates.insert("status".into(), json!(v));
        }
        if let Some(v) = input.base_salary {
            updates.insert("base_salary".into(), json!(money(v)));
        }
        if let Some(v) = input.location {
            updates.insert("location".into(), json!(v));
        }
        if let Some(v) = input.role {
            updates.insert("role".into(), json!(v));
        }
        if let Some(v) = input.tenure_months {
            updates.insert("tenure_months".into(), json!(v));
        }
        let updated_fields: Vec<String> = updates.keys().cloned().collect();

        let rules = FieldRules::new()
            .field("full_name", &[Rule::Required, Rule::NonEmpty])
            .field("email", &[Rule::Email, Rule::Unique])
            .field("department_id", &[Rule::ForeignKey(DEPARTMENTS)])
            .field("manager_id", &[Rule::ForeignKey(MANAGERS)])
            .field("status", &[Rule::OneOf(EMPLOYEE_STATUSES)])
            .field("role", &[Rule::OneOf(ROLES)])
            .field("base_salary", &[Rule::NonNegative])
            .field("tenure_months", &[Rule::NonNegative]);

        let employee = apply_mutation(
            store,
            ctx.clock(),
            &EMPLOYEES,
            Some(input.employee_id.as_str()),
            updates,
            &rules,
        )?;

        Ok(json!({
            "message": format!("Employee {} updated successfully", input.employee_id),
            "updated_fields": updated_fields,
            "employee_data": employee,
        }))
    }
}
