// capabilities/crates/hr_admin/src/fixtures.rs

//! Deterministic demo data for the HR domain.

use mock_store_core::Store;
use serde_json::json;

use crate::tables::*;

/// A small company: two departments, four employees, one open and one
/// closed payroll cycle, and enough benefits, checklists and deductions to
/// exercise every tool.
pub fn seed_store() -> Store {
    let mut store = Store::new();
    let ts = "2025-11-01T09:00:00";

    store.seed_table(
        &DEPARTMENTS,
        json!({
            "1": {"name": "Engineering", "status": "active", "created_at": ts, "last_updated": ts},
            "2": {"name": "Finance", "status": "active", "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &EMPLOYEES,
        json!({
            "1": {"full_name": "Sarah Chen", "email": "sarah.chen@co.com", "department_id": "1",
                  "manager_id": null, "start_date": "2021-03-15", "status": "active",
                  "role": "admin", "base_salary": "104000.00", "location": "Seattle",
                  "tenure_months": 56, "created_at": ts, "last_updated": ts},
            "2": {"full_name": "Marcus Johnson", "email": "marcus.johnson@co.com", "department_id": "1",
                  "manager_id": "1", "start_date": "2025-10-01", "status": "active",
                  "role": "non_admin", "base_salary": "78000.00", "location": "Seattle",
                  "tenure_months": 2, "created_at": ts, "last_updated": ts},
            "3": {"full_name": "Emily Rodriguez", "email": "emily.rodriguez@co.com", "department_id": "2",
                  "manager_id": "1", "start_date": "2019-06-01", "status": "inactive",
                  "role": "non_admin", "base_salary": "91000.00", "location": "Austin",
                  "tenure_months": 78, "created_at": ts, "last_updated": ts},
            "4": {"full_name": "David Kim", "email": "david.kim@co.com", "department_id": "2",
                  "manager_id": "1", "start_date": "2023-01-09", "status": "active",
                  "role": "non_admin", "base_salary": "62400.00", "location": "Remote",
                  "tenure_months": 35, "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &BENEFIT_PLANS,
        json!({
            "1": {"name": "Health Plus", "plan_type": "health", "status": "active",
                  "created_at": ts, "last_updated": ts},
            "2": {"name": "Legacy Dental", "plan_type": "dental", "status": "inactive",
                  "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &BENEFIT_ENROLLMENTS,
        json!({
            "1": {"employee_id": "2", "plan_id": "1", "start_date": "2025-10-01",
                  "is_active": true, "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &CHECKLISTS,
        json!({
            "1": {"checklist_type": "onboarding", "employee_id": "2", "status": "in_progress",
                  "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &CHECKLIST_TASKS,
        json!({
            "1": {"checklist_id": "1", "name": "Workstation Setup", "status": "completed",
                  "assigned_manager_id": "1", "due_date": null, "created_at": ts, "last_updated": ts},
            "2": {"checklist_id": "1", "name": "Safety Training", "status": "pending",
                  "assigned_manager_id": null, "due_date": null, "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &EXIT_CASES,
        json!({
            "1": {"employee_id": "3", "reason": "voluntary_resignation", "exit_date": "2025-11-30",
                  "exit_clearance_status": "pending", "created_at": ts, "last_updated": ts}
        }),
    );
    store.seed_table(&FINANCE_SETTLEMENTS, json!({}));

    store.seed_table(
        &PAYROLL_CYCLES,
        json!({
            "1": {"start_date": "2025-11-01", "end_date": "2025-11-15", "frequency": "bi_weekly",
                  "status": "closed", "created_at": ts, "last_updated": ts},
            "2": {"start_date": "2025-12-01", "end_date": "2025-12-15", "frequency": "bi_weekly",
                  "status": "open", "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &PAYROLL_INPUTS,
        json!({
            "1": {"employee_id": "1", "cycle_id": "2", "hours_worked": "80", "overtime_hours": "4",
                  "status": "approved", "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &PAYROLL_EARNINGS,
        json!({
            "1": {"employee_id": "1", "cycle_id": "2", "earning_type": "bonus", "amount": "200.00",
                  "status": "approved", "created_at": ts, "last_updated": ts},
            "2": {"employee_id": "1", "cycle_id": "2", "earning_type": "bonus", "amount": "999.00",
                  "status": "pending", "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &DEDUCTION_RULES,
        json!({
            "1": {"deduction_type": "tax", "max_percent_of_net_pay": "30", "status": "active",
                  "created_at": ts, "last_updated": ts},
            "2": {"deduction_type": "loan", "max_percent_of_net_pay": "10", "status": "active",
                  "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &DEDUCTIONS,
        json!({
            "1": {"employee_id": "1", "cycle_id": "2", "deduction_rule_id": "1", "amount": "100.00",
                  "deduction_date": "2025-12-10", "status": "valid", "created_at": ts, "last_updated": ts},
            "2": {"employee_id": "1", "cycle_id": null, "deduction_rule_id": "2", "amount": "50.00",
                  "deduction_date": "2025-12-01", "status": "valid", "created_at": ts, "last_updated": ts},
            "3": {"employee_id": "1", "cycle_id": "1", "deduction_rule_id": "1", "amount": "70.00",
                  "deduction_date": "2025-11-12", "status": "valid", "created_at": ts, "last_updated": ts},
            "4": {"employee_id": "1", "cycle_id": "2", "deduction_rule_id": "2", "amount": "999.00",
                  "deduction_date": "2025-12-11", "status": "invalid", "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &EMPLOYEE_ASSETS,
        json!({
            "1": {"employee_id": "1", "asset_tag": "LT-1001", "status": "damaged",
                  "created_at": ts, "last_updated": ts},
            "2": {"employee_id": "4", "asset_tag": "LT-1002", "status": "missing",
                  "created_at": ts, "last_updated": ts}
        }),
    );

    store.seed_table(
        &PAYSLIPS,
        json!({
            "1": {"employee_id": "2", "cycle_id": "1", "net_pay_value": "2800.00", "status": "released",
                  "created_at": ts, "last_updated": ts},
            "2": {"employee_id": "2", "cycle_id": "2", "net_pay_value": "3000.00", "status": "draft",
                  "created_at": ts, "last_updated": ts}
        }),
    );

    store
}
