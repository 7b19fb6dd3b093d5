// capabilities/crates/hr_admin/src/tables.rs

//! Table schemas, enumerations and payroll constants for the HR domain.

use mock_store_core::{Record, RecordExt, TableSchema, ToolError};
use serde::{Deserialize, Serialize};

const fn hr_table(name: &'static str, id_field: &'static str, entity: &'static str) -> TableSchema {
    TableSchema::new(name, id_field, entity).with_updated_field("last_updated")
}

pub const EMPLOYEES: TableSchema = hr_table("employees", "employee_id", "Employee");
pub const DEPARTMENTS: TableSchema = hr_table("departments", "department_id", "Department");
/// Same table as [`EMPLOYEES`], named for manager references in errors.
pub const MANAGERS: TableSchema = hr_table("employees", "employee_id", "Manager");
pub const BENEFIT_PLANS: TableSchema = hr_table("benefit_plans", "plan_id", "Benefit plan");
pub const BENEFIT_ENROLLMENTS: TableSchema =
    hr_table("benefit_enrollments", "enrollment_id", "Benefit enrollment");
pub const CHECKLISTS: TableSchema = hr_table("checklists", "checklist_id", "Checklist");
pub const CHECKLIST_TASKS: TableSchema = hr_table("checklist_tasks", "task_id", "Task");
pub const EXIT_CASES: TableSchema = hr_table("exit_cases", "exit_case_id", "Exit case");
pub const FINANCE_SETTLEMENTS: TableSchema =
    hr_table("finance_settlements", "settlement_id", "Settlement");
pub const PAYROLL_CYCLES: TableSchema = hr_table("payroll_cycles", "cycle_id", "Payroll cycle");
pub const PAYROLL_INPUTS: TableSchema = hr_table("payroll_inputs", "input_id", "Payroll input");
pub const PAYROLL_EARNINGS: TableSchema =
    hr_table("payroll_earnings", "earning_id", "Payroll earning");
pub const PAYSLIPS: TableSchema = hr_table("payslips", "payslip_id", "Payslip");
pub const DEDUCTIONS: TableSchema = hr_table("deductions", "deduction_id", "Deduction");
pub const DEDUCTION_RULES: TableSchema = hr_table("deduction_rules", "rule_id", "Deduction rule");
pub const EMPLOYEE_ASSETS: TableSchema = hr_table("employee_assets", "asset_id", "Asset");

pub const EMPLOYEE_STATUSES: &[&str] = &["active", "inactive", "probation", "on_leave"];
pub const ROLES: &[&str] = &["admin", "non_admin"];
pub const CHECKLIST_TYPES: &[&str] = &["onboarding", "offboarding"];
pub const TERMINATION_REASONS: &[&str] = &[
    "voluntary_resignation",
    "layoff",
    "misconduct",
    "policy_violation",
    "security_breach",
];
pub const DEDUCTION_TYPES: &[&str] = &[
    "benefit_contribution",
    "loan",
    "retirement",
    "insurance",
    "tax",
    "garnishment",
    "repayment_of_overpayment",
];

pub const ONBOARDING_TASKS: &[&str] = &[
    "HR Documentation & Compliance Forms",
    "Workstation Setup",
    "Safety Training",
    "Orientation Session",
    "Manager Introduction",
];
pub const OFFBOARDING_TASKS: &[&str] = &[
    "Initiate Termination Request",
    "Collect Resignation Letter",
    "Manager Exit Approval",
    "Exit Interview",
];

/// 52 weeks × 40 hours.
pub const ANNUAL_HOURS: f64 = 2080.0;
/// Bi-weekly hours assumed when no payroll input exists.
pub const DEFAULT_PERIOD_HOURS: f64 = 80.0;
pub const OVERTIME_MULTIPLIER: f64 = 1.5;
pub const MISSING_ASSET_CHARGE: f64 = 500.0;
pub const DAMAGED_ASSET_CHARGE: f64 = 250.0;

/// Lifecycle of a payslip. `Released` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayslipStatus {
    #[default]
    Draft,
    Released,
    Updated,
}

impl PayslipStatus {
    pub const ALL: &'static [&'static str] = &["draft", "released", "updated"];

    pub fn parse(s: &str) -> Result<Self, ToolError> {
        match s {
            "draft" => Ok(Self::Draft),
            "released" => Ok(Self::Released),
            "updated" => Ok(Self::Updated),
            other => Err(ToolError::invalid_choice("status", other, Self::ALL)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Released => "released",
            Self::Updated => "updated",
        }
    }

    pub fn can_release(self) -> bool {
        matches!(self, Self::Draft | Self::Updated)
    }
}

/// Status shared by checklists and their tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl ChecklistStatus {
    pub const ALL: &'static [&'static str] = &["pending", "in_progress", "completed"];

    pub fn parse(field: &str, s: &str) -> Result<Self, ToolError> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ToolError::invalid_choice(field, other, Self::ALL)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Reads the stored status of a checklist or task row. Rows without one
    /// count as pending.
    pub fn of(record: &Record) -> Result<Self, ToolError> {
        match record.str_field("status") {
            Some(s) => Self::parse("status", s),
            None => Ok(Self::Pending),
        }
    }

    /// `completed` is terminal. Moves between the open states are free.
    pub fn check_transition(self, next: Self, what: &str) -> Result<(), ToolError> {
        if self == Self::Completed && next != Self::Completed {
            return Err(ToolError::rule(format!(
                "Cannot change status of a completed {} to '{}'",
                what,
                next.as_str()
            )));
        }
        Ok(())
    }
}

/// Money is stored as a two-decimal string.
pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}
