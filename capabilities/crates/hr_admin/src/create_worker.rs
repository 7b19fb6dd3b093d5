// capabilities/crates/hr_admin/src/create_worker.rs

use chrono::{Datelike, NaiveDate};
use mock_store_core::validate::{check_date, require_text};
use mock_store_core::{
    apply_mutation, de_id, de_opt_id, parse_args, record_from, FieldRules, Rule, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{money, DEPARTMENTS, EMPLOYEES, MANAGERS};

#[derive(Deserialize)]
struct CreateWorkerInput {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(deserialize_with = "de_id")]
    department_id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    manager_id: Option<String>,
    start_date: Option<String>,
    #[serde(default)]
    base_salary: f64,
    location: Option<String>,
    role: Option<String>,
}

/// Whole months from `start` to `today`, never negative.
pub fn tenure_months(start: NaiveDate, today: NaiveDate) -> i64 {
    let mut months = i64::from(today.year() - start.year()) * 12 + i64::from(today.month())
        - i64::from(start.month());
    if today.day() < start.day() {
        months -= 1;
    }
    months.max(0)
}

pub struct CreateWorker;

impl Tool for CreateWorker {
    fn name(&self) -> &'static str {
        "create_worker"
    }

    fn description(&self) -> &'static str {
        "Create a new worker (employee). Requires full_name, email and department_id. \
         start_date defaults to today, base_salary to 0, role to non_admin ('admin' for admins). \
         New workers start with status 'active'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "full_name": {"type": "string", "description": "Full name of the worker"},
                "email": {"type": "string", "description": "Email address (must be unique)"},
                "department_id": {"type": "string", "description": "Department the worker joins"},
                "manager_id": {"type": "string", "description": "Existing employee acting as manager"},
                "start_date": {"type": "string", "description": "Start date, YYYY-MM-DD"},
                "base_salary": {"type": "number", "description": "Annual base salary"},
                "location": {"type": "string"},
                "role": {"type": "string", "description": "'admin' or anything else for non_admin"}
            },
            "required": ["full_name", "email", "department_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: CreateWorkerInput = parse_args(args)?;
        let full_name = require_text(input.full_name.as_deref(), "full_name")?;
        let email = require_text(input.email.as_deref(), "email")?;

        let start_date = match input.start_date.as_deref() {
            Some(s) => check_date(s, "start_date")?,
            None => ctx.today(),
        };
        let role = match input.role.as_deref() {
            Some(r) if r.eq_ignore_ascii_case("admin") => "admin",
            _ => "non_admin",
        };

        let rules = FieldRules::new()
            .field("full_name", &[Rule::Required, Rule::NonEmpty])
            .field("email", &[Rule::Required, Rule::Email, Rule::Unique])
            .field("department_id", &[Rule::Required, Rule::ForeignKey(DEPARTMENTS)])
            .field("manager_id", &[Rule::ForeignKey(MANAGERS)])
            .field("base_salary", &[Rule::NonNegative]);

        let row = record_from(json!({
            "manager_id": input.manager_id,
            "department_id": input.department_id,
            "start_date": start_date.format("%Y-%m-%d").to_string(),
            "full_name": full_name,
            "email": email,
            "status": "active",
            "tenure_months": tenure_months(start_date, ctx.today()),
            "performance_rating": null,
            "base_salary": money(input.base_salary),
            "location": input.location,
            "role": role,
            "flag_financial_counseling_recommended": false,
            "flag_potential_overtime_violation": false,
            "flag_requires_payroll_review": false,
            "flag_high_offboard_risk": false,
            "flag_pending_settlement": false,
            "flag_requires_finance_approval": false,
        }));

        let employee = apply_mutation(store, ctx.clock(), &EMPLOYEES, None, row, &rules)?;
        Ok(Value::Object(employee))
    }
}
