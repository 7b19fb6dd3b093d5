// capabilities/crates/incident_management/src/tables.rs

//! Table schemas and enumerations for incident tracking.

use mock_store_core::{TableSchema, ToolError};
use serde::{Deserialize, Serialize};

pub const USERS: TableSchema = TableSchema::new("users", "user_id", "User");
pub const CLIENTS: TableSchema = TableSchema::new("clients", "client_id", "Client");
pub const COMPONENTS: TableSchema = TableSchema::new("components", "component_id", "Component");
pub const INCIDENTS: TableSchema = TableSchema::new("incidents", "incident_id", "Incident");
pub const ESCALATIONS: TableSchema = TableSchema::new("escalations", "escalation_id", "Escalation");

pub const INCIDENT_CODE_PREFIX: &str = "INC-2025-";
pub const ESCALATION_CODE_PREFIX: &str = "ESC-2025-";

pub const SEVERITIES: &[&str] = &["P1", "P2", "P3", "P4"];
pub const LEVELS: &[&str] = &["critical", "high", "medium", "low"];
pub const CATEGORIES: &[&str] = &[
    "system_outage",
    "performance_degradation",
    "security_incident",
    "data_corruption",
    "integration_failure",
    "network_issue",
    "hardware_failure",
    "software_bug",
    "configuration_error",
    "capacity_issue",
    "backup_failure",
    "authentication_failure",
    "api_error",
    "database_issue",
    "service_unavailable",
];
pub const DETECTION_SOURCES: &[&str] = &[
    "client_reported",
    "internally_detected",
    "monitoring_alert",
    "vendor_reported",
    "scheduled_maintenance",
    "emergency_maintenance",
];
pub const ESCALATION_LEVELS: &[&str] = &["technical", "management", "executive", "vendor"];
pub const ESCALATION_REASONS: &[&str] = &[
    "sla_breach",
    "severity_increase",
    "resource_unavailable",
    "executive_request",
    "client_demand",
];

/// Incident lifecycle. Moves forward only; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl IncidentStatus {
    pub const ALL: &'static [&'static str] = &["open", "in_progress", "resolved", "closed"];

    pub fn parse(s: &str) -> Result<Self, ToolError> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(ToolError::invalid_choice("status", other, Self::ALL)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Escalations may only be raised while work is outstanding.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }

    pub fn check_transition(self, next: Self) -> Result<(), ToolError> {
        if self == Self::Closed && next != Self::Closed {
            return Err(ToolError::rule("Cannot reopen a closed incident"));
        }
        if next < self {
            return Err(ToolError::rule(format!(
                "Invalid status transition from '{}' to '{}'",
                self.as_str(),
                next.as_str()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationStatus {
    Open,
    Acknowledged,
    Resolved,
}

impl EscalationStatus {
    pub const ALL: &'static [&'static str] = &["open", "acknowledged", "resolved"];

    pub fn parse(s: &str) -> Result<Self, ToolError> {
        match s {
            "open" => Ok(Self::Open),
            "acknowledged" => Ok(Self::Acknowledged),
            "resolved" => Ok(Self::Resolved),
            other => Err(ToolError::invalid_choice("status", other, Self::ALL)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
        }
    }

    /// Timestamp field stamped when an escalation enters this status.
    pub fn stamp_field(self) -> Option<&'static str> {
        match self {
            Self::Open => None,
            Self::Acknowledged => Some("acknowledged_at"),
            Self::Resolved => Some("resolved_at"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_status_moves_forward() {
        let open = IncidentStatus::Open;
        assert!(open.check_transition(IncidentStatus::InProgress).is_ok());
        assert!(open.check_transition(IncidentStatus::Resolved).is_ok());
        assert!(IncidentStatus::Resolved.check_transition(IncidentStatus::Open).is_err());
        assert_eq!(
            IncidentStatus::Closed
                .check_transition(IncidentStatus::InProgress)
                .unwrap_err()
                .to_string(),
            "Cannot reopen a closed incident"
        );
    }

    #[test]
    fn test_active_statuses() {
        assert!(IncidentStatus::parse("in_progress").unwrap().is_active());
        assert!(!IncidentStatus::parse("resolved").unwrap().is_active());
        assert!(IncidentStatus::parse("pending").is_err());
    }
}
