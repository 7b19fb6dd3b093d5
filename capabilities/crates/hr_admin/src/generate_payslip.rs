// capabilities/crates/hr_admin/src/generate_payslip.rs

use mock_store_core::{
    apply_mutation, de_id, parse_args, record_from, FieldRules, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::{
    money, PayslipStatus, ANNUAL_HOURS, DAMAGED_ASSET_CHARGE, DEDUCTIONS, DEFAULT_PERIOD_HOURS,
    EMPLOYEES, EMPLOYEE_ASSETS, MISSING_ASSET_CHARGE, OVERTIME_MULTIPLIER, PAYROLL_CYCLES,
    PAYROLL_EARNINGS, PAYROLL_INPUTS, PAYSLIPS,
};

#[derive(Deserialize)]
struct GeneratePayslipInput {
    #[serde(deserialize_with = "de_id")]
    employee_id: String,
    #[serde(deserialize_with = "de_id")]
    cycle_id: String,
    status: Option<String>,
}

/// Inputs and intermediate amounts of one net pay calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct NetPay {
    pub hourly_rate: f64,
    pub hours_worked: f64,
    pub overtime_hours: f64,
    pub gross_pay: f64,
    pub approved_earnings: f64,
    pub deductions: f64,
    pub asset_charges: f64,
    pub net_pay: f64,
}

impl NetPay {
    fn to_json(&self) -> Value {
        json!({
            "hourly_rate": money(self.hourly_rate),
            "hours_worked": self.hours_worked,
            "overtime_hours": self.overtime_hours,
            "gross_pay": money(self.gross_pay),
            "approved_earnings": money(self.approved_earnings),
            "deductions": money(self.deductions),
            "asset_charges": money(self.asset_charges),
        })
    }
}

/// Net pay of `employee_id` for `cycle_id`:
///
/// ```text
/// rate  = base_salary / 2080
/// gross = hours × rate + overtime × rate × 1.5      (80h / 0 overtime without input)
/// net   = gross + approved earnings − valid deductions − asset charges
/// ```
///
/// Deductions count when their cycle is unset or equals `cycle_id`. Each
/// missing asset costs 500, each damaged asset 250.
pub fn compute_net_pay(store: &Store, employee_id: &str, cycle_id: &str) -> NetPay {
    let rows = |table: &str| store.table(table).into_iter().flat_map(|t| t.values());
    let base_salary = store
        .get(EMPLOYEES.name, employee_id)
        .and_then(|e| e.f64_field("base_salary"))
        .unwrap_or(0.0);
    let hourly_rate = base_salary / ANNUAL_HOURS;

    let input = rows(PAYROLL_INPUTS.name)
        .find(|p| p.refers_to("employee_id", employee_id) && p.refers_to("cycle_id", cycle_id));
    let (hours_worked, overtime_hours) = match input {
        Some(p) => (
            p.f64_field("hours_worked").unwrap_or(0.0),
            p.f64_field("overtime_hours").unwrap_or(0.0),
        ),
        None => (DEFAULT_PERIOD_HOURS, 0.0),
    };
    let gross_pay = hours_worked * hourly_rate + overtime_hours * hourly_rate * OVERTIME_MULTIPLIER;

    let approved_earnings: f64 = rows(PAYROLL_EARNINGS.name)
        .filter(|e| e.refers_to("employee_id", employee_id) && e.has_status("approved"))
        .filter_map(|e| e.f64_field("amount"))
        .sum();

    let deductions: f64 = rows(DEDUCTIONS.name)
        .filter(|d| d.refers_to("employee_id", employee_id) && d.has_status("valid"))
        .filter(|d| match d.get("cycle_id") {
            None | Some(Value::Null) => true,
            Some(_) => d.refers_to("cycle_id", cycle_id),
        })
        .filter_map(|d| d.f64_field("amount"))
        .sum();

    let asset_charges: f64 = rows(EMPLOYEE_ASSETS.name)
        .filter(|a| a.refers_to("employee_id", employee_id))
        .map(|a| match a.str_field("status") {
            Some("missing") => MISSING_ASSET_CHARGE,
            Some("damaged") => DAMAGED_ASSET_CHARGE,
            _ => 0.0,
        })
        .sum();

    NetPay {
        hourly_rate,
        hours_worked,
        overtime_hours,
        gross_pay,
        approved_earnings,
        deductions,
        asset_charges,
        net_pay: gross_pay + approved_earnings - deductions - asset_charges,
    }
}

pub struct GeneratePayslip;

impl Tool for GeneratePayslip {
    fn name(&self) -> &'static str {
        "generate_payslip"
    }

    fn description(&self) -> &'static str {
        "Generate a payslip for an employee in a payroll cycle. Net pay = hours × (base/2080) + \
         overtime × rate × 1.5 + approved earnings − valid deductions − asset charges \
         (missing 500, damaged 250). One payslip per employee and cycle. status defaults to draft."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "employee_id": {"type": "string"},
                "cycle_id": {"type": "string"},
                "status": {"type": "string", "enum": PayslipStatus::ALL}
            },
            "required": ["employee_id", "cycle_id"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: GeneratePayslipInput = parse_args(args)?;
        let status = match input.status.as_deref() {
            Some(s) => PayslipStatus::parse(s)?,
            None => PayslipStatus::default(),
        };

        let employee = store.require(&EMPLOYEES, &input.employee_id)?;
        let full_name = employee.str_field("full_name").unwrap_or_default().to_string();
        store.require(&PAYROLL_CYCLES, &input.cycle_id)?;

        let duplicate = store.table(PAYSLIPS.name).and_then(|t| {
            t.iter().find(|(_, p)| {
                p.refers_to("employee_id", &input.employee_id) && p.refers_to("cycle_id", &input.cycle_id)
            })
        });
        if let Some((payslip_id, _)) = duplicate {
            return Err(ToolError::rule(format!(
                "Payslip already exists for employee '{}' in cycle '{}' (payslip_id: '{}')",
                input.employee_id, input.cycle_id, payslip_id
            )));
        }

        let pay = compute_net_pay(store, &input.employee_id, &input.cycle_id);
        let row = record_from(json!({
            "employee_id": &input.employee_id,
            "cycle_id": &input.cycle_id,
            "net_pay_value": money(pay.net_pay),
            "status": status.as_str(),
        }));
        let payslip = apply_mutation(store, ctx.clock(), &PAYSLIPS, None, row, &FieldRules::new())?;

        Ok(json!({
            "message": format!(
                "Payslip has been generated successfully for employee '{}' ({}) in cycle '{}'",
                full_name, input.employee_id, input.cycle_id
            ),
            "payslip": payslip,
            "calculation": pay.to_json(),
            "action": "created",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::seed_store;

    #[test]
    fn test_net_pay_with_input_earnings_deductions_and_assets() {
        let store = seed_store();
        let pay = compute_net_pay(&store, "1", "2");
        assert_eq!(pay.hourly_rate, 50.0);
        assert_eq!(pay.gross_pay, 4300.0);
        assert_eq!(pay.approved_earnings, 200.0);
        assert_eq!(pay.deductions, 150.0);
        assert_eq!(pay.asset_charges, 250.0);
        assert_eq!(money(pay.net_pay), "4100.00");
    }

    #[test]
    fn test_net_pay_defaults_to_eighty_hours() {
        let store = seed_store();
        // 62400 / 2080 = 30 per hour, one missing asset.
        let pay = compute_net_pay(&store, "4", "2");
        assert_eq!(pay.hours_worked, 80.0);
        assert_eq!(pay.gross_pay, 2400.0);
        assert_eq!(money(pay.net_pay), "1900.00");
    }
}
