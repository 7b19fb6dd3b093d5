// capabilities/crates/hr_admin/src/lib.rs

//! HR administration tools: workforce lifecycle and payroll.
//!
//! `interface_1` covers hiring, benefits, checklists and exits;
//! `interface_2` covers payroll cycles, payslips and deductions.

pub mod fixtures;
pub mod tables;

mod compute_exit_settlement;
mod create_employee_benefit_enrollment;
mod create_new_checklist;
mod create_worker;
mod generate_payslip;
mod get_deduction_data;
mod initiate_worker_termination;
mod open_payroll_period;
mod release_payslip;
mod update_checklist_data;
mod update_worker_info;

use mock_store_core::Interface;

pub use compute_exit_settlement::ComputeExitSettlement;
pub use create_employee_benefit_enrollment::CreateEmployeeBenefitEnrollment;
pub use create_new_checklist::CreateNewChecklist;
pub use create_worker::{tenure_months, CreateWorker};
pub use generate_payslip::{compute_net_pay, GeneratePayslip, NetPay};
pub use get_deduction_data::GetDeductionData;
pub use initiate_worker_termination::InitiateWorkerTermination;
pub use open_payroll_period::OpenPayrollPeriod;
pub use release_payslip::ReleasePayslip;
pub use update_checklist_data::UpdateChecklistData;
pub use update_worker_info::UpdateWorkerInfo;

pub const DOMAIN: &str = "hr_admin";

pub fn interface_1() -> Interface {
    Interface::new("interface_1", "Workforce lifecycle: hiring, benefits, checklists, exits")
        .with_tool(CreateWorker)
        .with_tool(UpdateWorkerInfo)
        .with_tool(CreateEmployeeBenefitEnrollment)
        .with_tool(CreateNewChecklist)
        .with_tool(UpdateChecklistData)
        .with_tool(InitiateWorkerTermination)
        .with_tool(ComputeExitSettlement)
}

pub fn interface_2() -> Interface {
    Interface::new("interface_2", "Payroll: cycles, payslips, deductions")
        .with_tool(OpenPayrollPeriod)
        .with_tool(GeneratePayslip)
        .with_tool(ReleasePayslip)
        .with_tool(GetDeductionData)
}

pub fn interfaces() -> Vec<Interface> {
    vec![interface_1(), interface_2()]
}
