// capabilities/crates/incident_management/src/register_incident.rs

use mock_store_core::record::value_as_id;
use mock_store_core::{
    apply_mutation, parse_args, record_from, RecordExt, Store, Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::incidents::{check_component_owner, incident_rules, next_code, SeverityFactors};
use crate::tables::{
    IncidentStatus, CATEGORIES, DETECTION_SOURCES, INCIDENTS, INCIDENT_CODE_PREFIX, LEVELS,
    SEVERITIES,
};

#[derive(Deserialize)]
struct RegisterIncidentInput {
    title: Option<String>,
    #[serde(default)]
    reporter_id: Value,
    #[serde(default)]
    client_id: Value,
    #[serde(default)]
    component_id: Value,
    #[serde(default)]
    assigned_manager_id: Value,
    category: Option<String>,
    impact: Option<String>,
    urgency: Option<String>,
    detection_source: Option<String>,
    detected_at: Option<String>,
    severity: Option<String>,
    #[serde(default)]
    severity_factors: SeverityFactors,
}

fn id_or_null(value: &Value) -> Value {
    value_as_id(value).map(Value::String).unwrap_or(Value::Null)
}

pub struct RegisterIncident;

impl Tool for RegisterIncident {
    fn name(&self) -> &'static str {
        "register_incident"
    }

    fn description(&self) -> &'static str {
        "Register a new incident for a client. The incident starts open and receives the next \
         INC-2025-##### code. Without an explicit severity, one is derived from \
         severity_factors (P4 when none apply). Urgency defaults to the impact and detected_at \
         to now."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {"type": "string"},
                "reporter_id": {"type": "string", "description": "Active user reporting the incident"},
                "client_id": {"type": "string", "description": "Active client affected"},
                "component_id": {"type": "string", "description": "Component owned by the client"},
                "assigned_manager_id": {"type": "string"},
                "category": {"type": "string", "enum": CATEGORIES},
                "impact": {"type": "string", "enum": LEVELS},
                "urgency": {"type": "string", "enum": LEVELS},
                "detection_source": {"type": "string", "enum": DETECTION_SOURCES},
                "detected_at": {"type": "string", "description": "YYYY-MM-DDTHH:MM:SS"},
                "severity": {"type": "string", "enum": SEVERITIES},
                "severity_factors": {
                    "type": "object",
                    "properties": {
                        "outage_without_workaround": {"type": "boolean"},
                        "enterprise_wide": {"type": "boolean"},
                        "regulatory_or_financial": {"type": "boolean"},
                        "high_priority_client": {"type": "boolean"},
                        "major_degradation": {"type": "boolean"},
                        "multiple_departments": {"type": "boolean"},
                        "sla_at_risk": {"type": "boolean"},
                        "localized": {"type": "boolean"}
                    }
                }
            },
            "required": ["title", "reporter_id", "client_id", "category", "impact", "detection_source"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: RegisterIncidentInput = parse_args(args)?;
        let severity = match input.severity.as_deref() {
            Some(severity) => severity,
            None => input.severity_factors.classify(),
        };
        let client_id = id_or_null(&input.client_id);
        let component_id = id_or_null(&input.component_id);
        if let (Some(component), Some(client)) = (component_id.as_str(), client_id.as_str()) {
            check_component_owner(store, component, client)?;
        }
        let detected_at = input
            .detected_at
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| ctx.timestamp());
        let code = next_code(store, &INCIDENTS, "incident_code", INCIDENT_CODE_PREFIX);

        let incident = apply_mutation(
            store,
            ctx.clock(),
            &INCIDENTS,
            None,
            record_from(json!({
                "incident_code": &code,
                "title": input.title,
                "reporter_id": id_or_null(&input.reporter_id),
                "assigned_manager_id": id_or_null(&input.assigned_manager_id),
                "client_id": client_id,
                "component_id": component_id,
                "severity": severity,
                "status": IncidentStatus::Open.as_str(),
                "impact": &input.impact,
                "urgency": input.urgency.as_ref().or(input.impact.as_ref()),
                "category": input.category,
                "detection_source": input.detection_source,
                "detected_at": detected_at,
                "resolved_at": null,
                "closed_at": null,
                "rto_breach": false,
                "sla_breach": false,
                "is_recurring": false,
                "downtime_minutes": null,
            })),
            &incident_rules(),
        )?;
        let incident_id = incident.id_field("incident_id").unwrap_or_default();
        info!(incident = incident_id.as_str(), code = code.as_str(), severity, "incident registered");

        Ok(json!({
            "message": format!("Incident {} registered with severity {}", code, severity),
            "incident_id": incident_id,
            "incident_code": code,
            "incident": incident,
        }))
    }
}
