// capabilities/crates/incident_management/src/incidents.rs

//! Incident rules, reference codes and severity triage shared by the tools.

use mock_store_core::{FieldRules, RecordExt, Rule, Store, TableSchema, ToolError};
use serde::Deserialize;

use crate::tables::{
    IncidentStatus, CATEGORIES, CLIENTS, COMPONENTS, DETECTION_SOURCES, LEVELS, SEVERITIES, USERS,
};

/// Fields `process_incident` may change. Reporter, client and detection
/// time are fixed at registration.
pub const UPDATABLE_FIELDS: &[&str] = &[
    "title",
    "incident_code",
    "assigned_manager_id",
    "component_id",
    "severity",
    "status",
    "impact",
    "urgency",
    "category",
    "detection_source",
    "resolved_at",
    "closed_at",
    "rto_breach",
    "sla_breach",
    "is_recurring",
    "downtime_minutes",
];

/// Constraints on an incident row, shared by registration and updates.
pub fn incident_rules() -> FieldRules {
    FieldRules::new()
        .field("title", &[Rule::Required, Rule::Text, Rule::NonEmpty])
        .field("incident_code", &[Rule::Text, Rule::Unique])
        .field("reporter_id", &[Rule::Required, Rule::ActiveForeignKey(USERS)])
        .field("assigned_manager_id", &[Rule::ActiveForeignKey(USERS)])
        .field("client_id", &[Rule::Required, Rule::ActiveForeignKey(CLIENTS)])
        .field("component_id", &[Rule::ForeignKey(COMPONENTS)])
        .field("severity", &[Rule::Required, Rule::OneOf(SEVERITIES)])
        .field("status", &[Rule::Required, Rule::OneOf(IncidentStatus::ALL)])
        .field("impact", &[Rule::Required, Rule::OneOf(LEVELS)])
        .field("urgency", &[Rule::Required, Rule::OneOf(LEVELS)])
        .field("category", &[Rule::Required, Rule::OneOf(CATEGORIES)])
        .field("detection_source", &[Rule::Required, Rule::OneOf(DETECTION_SOURCES)])
        .field("rto_breach", &[Rule::Boolean])
        .field("sla_breach", &[Rule::Boolean])
        .field("is_recurring", &[Rule::Boolean])
        .field("downtime_minutes", &[Rule::Number, Rule::NonNegative])
}

/// A component may only be attached to incidents of the client that owns it.
pub fn check_component_owner(
    store: &Store,
    component_id: &str,
    client_id: &str,
) -> Result<(), ToolError> {
    match store.get(COMPONENTS.name, component_id) {
        Some(component) if !component.refers_to("client_id", client_id) => {
            Err(ToolError::referential(format!(
                "Component '{}' does not belong to client '{}'",
                component_id, client_id
            )))
        }
        _ => Ok(()),
    }
}

/// Next `<prefix>#####` code for `field` in `schema`'s table.
///
/// One past the highest existing sequence number under `prefix`; rows with
/// other prefixes or unparseable codes are ignored.
pub fn next_code(store: &Store, schema: &TableSchema, field: &str, prefix: &str) -> String {
    let highest = store
        .table(schema.name)
        .into_iter()
        .flat_map(|t| t.values())
        .filter_map(|row| row.str_field(field)?.strip_prefix(prefix)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:05}", prefix, highest + 1)
}

/// Triage answers used to derive a severity when none is given.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SeverityFactors {
    pub outage_without_workaround: bool,
    pub enterprise_wide: bool,
    pub regulatory_or_financial: bool,
    pub high_priority_client: bool,
    pub major_degradation: bool,
    pub multiple_departments: bool,
    pub sla_at_risk: bool,
    pub localized: bool,
}

impl SeverityFactors {
    pub fn classify(&self) -> &'static str {
        if self.outage_without_workaround
            || self.enterprise_wide
            || self.regulatory_or_financial
            || self.high_priority_client
        {
            "P1"
        } else if self.major_degradation || self.multiple_departments || self.sla_at_risk {
            "P2"
        } else if self.localized {
            "P3"
        } else {
            "P4"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::INCIDENTS;
    use serde_json::json;

    #[test]
    fn test_next_code_follows_highest_sequence() {
        let mut store = Store::new();
        assert_eq!(next_code(&store, &INCIDENTS, "incident_code", "INC-2025-"), "INC-2025-00001");
        store.seed_table(
            &INCIDENTS,
            json!({
                "1": {"incident_code": "INC-2025-00004"},
                "2": {"incident_code": "INC-2024-00090"},
                "3": {"incident_code": "legacy"}
            }),
        );
        assert_eq!(next_code(&store, &INCIDENTS, "incident_code", "INC-2025-"), "INC-2025-00005");
    }

    #[test]
    fn test_severity_classification() {
        let mut factors = SeverityFactors::default();
        assert_eq!(factors.classify(), "P4");
        factors.localized = true;
        assert_eq!(factors.classify(), "P3");
        factors.sla_at_risk = true;
        assert_eq!(factors.classify(), "P2");
        factors.enterprise_wide = true;
        assert_eq!(factors.classify(), "P1");
    }
}
