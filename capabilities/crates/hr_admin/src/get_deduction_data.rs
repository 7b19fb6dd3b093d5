// capabilities/crates/hr_admin/src/get_deduction_data.rs

use mock_store_core::filter::{sort_by_field_desc, to_json_array};
use mock_store_core::validate::check_choice;
use mock_store_core::record::value_as_id;
use mock_store_core::{parse_args, Record, RecordExt, Store, Tool, ToolContext, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{DEDUCTIONS, DEDUCTION_RULES, DEDUCTION_TYPES, EMPLOYEES};

#[derive(Deserialize)]
struct DeductionDataInput {
    target: String,
    /// Object, or the same object encoded as a JSON string.
    #[serde(default)]
    filters: Value,
}

pub struct GetDeductionData;

impl Tool for GetDeductionData {
    fn name(&self) -> &'static str {
        "get_deduction_data"
    }

    fn description(&self) -> &'static str {
        "target 'deduction_rules' lists every deduction rule. target 'deduction_data' lists an \
         employee's deductions joined with their rule, most recent first; filters: employee_id \
         (required), deduction_type (optional)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "target": {"type": "string", "enum": ["deduction_rules", "deduction_data"]},
                "filters": {
                    "type": "object",
                    "properties": {
                        "employee_id": {"type": "string"},
                        "deduction_type": {"type": "string", "enum": DEDUCTION_TYPES}
                    }
                }
            },
            "required": ["target"]
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: DeductionDataInput = parse_args(args)?;
        match input.target.as_str() {
            "deduction_rules" => {
                let rules: Vec<&Record> = store
                    .table(DEDUCTION_RULES.name)
                    .map(|t| t.values().collect())
                    .unwrap_or_default();
                Ok(json!({
                    "message": format!("Found {} deduction rule(s)", rules.len()),
                    "deduction_rules": to_json_array(&rules),
                    "count": rules.len(),
                }))
            }
            "deduction_data" => deduction_data(store, input.filters),
            other => Err(ToolError::malformed(format!(
                "Invalid target '{}'. Must be 'deduction_data' or 'deduction_rules'",
                other
            ))),
        }
    }
}

fn deduction_data(store: &Store, filters: Value) -> Result<Value, ToolError> {
    let filters = match filters {
        Value::String(s) => serde_json::from_str(&s)
            .map_err(|e| ToolError::malformed(format!("filters must be a JSON object: {}", e)))?,
        other => other,
    };
    let employee_id = filters
        .get("employee_id")
        .and_then(value_as_id)
        .ok_or_else(|| ToolError::malformed("employee_id is required"))?;
    let deduction_type = filters.get("deduction_type").and_then(Value::as_str);

    let employee = store.require(&EMPLOYEES, &employee_id)?;
    if let Some(kind) = deduction_type {
        check_choice(kind, "deduction_type", DEDUCTION_TYPES)?;
    }

    let rule_for = |rule_id: Option<String>| {
        rule_id.and_then(|id| store.get(DEDUCTION_RULES.name, &id))
    };

    let mut rows: Vec<&Record> = store
        .table(DEDUCTIONS.name)
        .map(|t| {
            t.values()
                .filter(|d| d.refers_to("employee_id", &employee_id))
                .filter(|d| match deduction_type {
                    Some(kind) => rule_for(d.id_field("deduction_rule_id"))
                        .and_then(|r| r.str_field("deduction_type"))
                        == Some(kind),
                    None => true,
                })
                .collect()
        })
        .unwrap_or_default();
    sort_by_field_desc(&mut rows, "deduction_date");

    let deductions: Vec<Value> = rows
        .iter()
        .map(|d| {
            let mut out = (*d).clone();
            let rule = rule_for(d.id_field("deduction_rule_id")).map(|r| {
                json!({
                    "rule_id": r.get("rule_id"),
                    "deduction_type": r.get("deduction_type"),
                    "max_percent_of_net_pay": r.get("max_percent_of_net_pay"),
                    "status": r.get("status"),
                })
            });
            out.insert("deduction_rule".into(), rule.unwrap_or(Value::Null));
            Value::Object(out)
        })
        .collect();

    let mut message = format!(
        "Found {} deduction(s) for employee '{}' ({})",
        deductions.len(),
        employee.str_field("full_name").unwrap_or_default(),
        employee_id
    );
    if let Some(kind) = deduction_type {
        message.push_str(&format!(" with deduction_type '{}'", kind));
    }
    Ok(json!({
        "message": message,
        "count": deductions.len(),
        "deductions": deductions,
    }))
}
