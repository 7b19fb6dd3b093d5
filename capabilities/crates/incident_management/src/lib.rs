// capabilities/crates/incident_management/src/lib.rs

//! Incident tracking tools: registration, lifecycle updates, escalations
//! and lookup.

pub mod fixtures;
pub mod incidents;
pub mod tables;

mod get_incidents;
mod handle_escalations;
mod process_incident;
mod register_incident;

use mock_store_core::Interface;

pub use get_incidents::GetIncidents;
pub use handle_escalations::HandleEscalations;
pub use process_incident::ProcessIncident;
pub use register_incident::RegisterIncident;

pub const DOMAIN: &str = "incident_management";

pub fn interface_1() -> Interface {
    Interface::new("interface_1", "Incident lifecycle and escalations")
        .with_tool(RegisterIncident)
        .with_tool(ProcessIncident)
        .with_tool(HandleEscalations)
        .with_tool(GetIncidents)
}

pub fn interfaces() -> Vec<Interface> {
    vec![interface_1()]
}
