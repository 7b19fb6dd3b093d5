// capabilities/crates/incident_management/src/get_incidents.rs

use mock_store_core::filter::{filter_records, matches_fields, to_json_array};
use mock_store_core::validate::check_choice;
use mock_store_core::{parse_args, Record, Store, Tool, ToolContext, ToolError};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::tables::{IncidentStatus, CATEGORIES, INCIDENTS, LEVELS, SEVERITIES};

const FILTER_KEYS: &[&str] = &[
    "incident_id",
    "incident_code",
    "title",
    "reporter_id",
    "assigned_manager_id",
    "client_id",
    "component_id",
    "severity",
    "status",
    "impact",
    "urgency",
    "category",
    "detection_source",
    "rto_breach",
    "sla_breach",
    "is_recurring",
];

#[derive(Deserialize)]
struct GetIncidentsInput {
    /// Object, or the same object encoded as a JSON string.
    #[serde(default)]
    filters: Value,
}

fn parse_filters(filters: Value) -> Result<Map<String, Value>, ToolError> {
    let filters = match filters {
        Value::String(s) if s.trim().is_empty() => Value::Null,
        Value::String(s) => serde_json::from_str(&s)
            .map_err(|e| ToolError::malformed(format!("filters must be a JSON object: {}", e)))?,
        other => other,
    };
    match filters {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(ToolError::malformed("filters must be a JSON object")),
    }
}

pub struct GetIncidents;

impl Tool for GetIncidents {
    fn name(&self) -> &'static str {
        "get_incidents"
    }

    fn description(&self) -> &'static str {
        "List incidents matching every given filter, in incident id order. Text filters are \
         case-insensitive. Without filters every incident is returned."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filters": {
                    "type": "object",
                    "description": format!("Any of: {}", FILTER_KEYS.join(", "))
                }
            }
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: GetIncidentsInput = parse_args(args)?;
        let filters = parse_filters(input.filters)?;
        if let Some(key) = filters.keys().find(|k| !FILTER_KEYS.contains(&k.as_str())) {
            return Err(ToolError::malformed(format!(
                "Unsupported filter '{}'. Supported filters: {}",
                key,
                FILTER_KEYS.join(", ")
            )));
        }
        let enums: [(&str, &[&str]); 5] = [
            ("status", IncidentStatus::ALL),
            ("severity", SEVERITIES),
            ("impact", LEVELS),
            ("urgency", LEVELS),
            ("category", CATEGORIES),
        ];
        for (field, allowed) in enums {
            if let Some(value) = filters.get(field).and_then(Value::as_str) {
                check_choice(value, field, allowed)?;
            }
        }

        let incidents: Vec<&Record> = store
            .table(INCIDENTS.name)
            .map(|t| filter_records(t, |rec| matches_fields(rec, &filters)))
            .unwrap_or_default();

        Ok(json!({
            "entity_type": "incidents",
            "count": incidents.len(),
            "incidents": to_json_array(&incidents),
        }))
    }
}
