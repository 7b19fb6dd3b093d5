// capabilities/crates/hr_admin/src/open_payroll_period.rs

use chrono::NaiveDate;
use mock_store_core::filter::{filter_records, to_json_array};
use mock_store_core::validate::check_date;
use mock_store_core::{
    de_opt_id, parse_args, Record, RecordExt, Store, Table, Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tables::PAYROLL_CYCLES;

#[derive(Deserialize)]
struct PayrollPeriodInput {
    #[serde(default, deserialize_with = "de_opt_id")]
    cycle_id: Option<String>,
    status: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Looks up payroll cycles. Without any filter only open cycles are returned.
pub struct OpenPayrollPeriod;

fn cycle_bounds(cycle: &Record) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(cycle.str_field("start_date")?, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(cycle.str_field("end_date")?, "%Y-%m-%d").ok()?;
    Some((start, end))
}

impl Tool for OpenPayrollPeriod {
    fn name(&self) -> &'static str {
        "open_payroll_period"
    }

    fn description(&self) -> &'static str {
        "Retrieve payroll cycles. With cycle_id returns that cycle. Otherwise filters by status \
         and by date: start_date alone matches cycles containing it, start_date with end_date \
         matches overlapping cycles, end_date alone matches cycles containing it. With no \
         filters, returns the open cycles."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "cycle_id": {"type": "string"},
                "status": {"type": "string", "description": "e.g. open, approved, closed"},
                "start_date": {"type": "string", "description": "YYYY-MM-DD"},
                "end_date": {"type": "string", "description": "YYYY-MM-DD"}
            },
            "required": []
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: PayrollPeriodInput = parse_args(args)?;

        if let Some(cycle_id) = input.cycle_id.as_deref() {
            let cycle = store.require(&PAYROLL_CYCLES, cycle_id)?;
            return Ok(json!({ "cycle": cycle }));
        }

        let from = input
            .start_date
            .as_deref()
            .map(|s| check_date(s, "start_date"))
            .transpose()?;
        let to = input
            .end_date
            .as_deref()
            .map(|s| check_date(s, "end_date"))
            .transpose()?;
        let no_filters = input.status.is_none() && from.is_none() && to.is_none();
        let wanted_status = if no_filters { Some("open") } else { input.status.as_deref() };

        let empty = Table::new();
        let table = store.table(PAYROLL_CYCLES.name).unwrap_or(&empty);
        let cycles = filter_records(table, |cycle| {
            if let Some(status) = wanted_status {
                if !cycle.has_status(status) {
                    return false;
                }
            }
            let Some((start, end)) = cycle_bounds(cycle) else {
                return true;
            };
            match (from, to) {
                (Some(f), Some(t)) => start <= t && f <= end,
                (Some(f), None) => start <= f && f <= end,
                (None, Some(t)) => start <= t && t <= end,
                (None, None) => true,
            }
        });

        let mut out = json!({
            "count": cycles.len(),
            "cycles": to_json_array(&cycles),
        });
        if cycles.is_empty() {
            let mut filters = Vec::new();
            if let Some(s) = &input.status {
                filters.push(format!("status='{}'", s));
            }
            if let Some(s) = &input.start_date {
                filters.push(format!("start_date='{}'", s));
            }
            if let Some(s) = &input.end_date {
                filters.push(format!("end_date='{}'", s));
            }
            out["message"] = json!(if filters.is_empty() {
                "No open payroll cycles found".to_string()
            } else {
                format!("No payroll cycles found with {}", filters.join(", "))
            });
        }
        Ok(out)
    }
}
