// capabilities/crates/incident_management/src/process_incident.rs

use mock_store_core::record::value_as_id;
use mock_store_core::{
    apply_mutation, de_id, parse_args, Record, RecordExt, Store, Tool, ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::incidents::{check_component_owner, incident_rules, UPDATABLE_FIELDS};
use crate::tables::{IncidentStatus, INCIDENTS};

#[derive(Deserialize)]
struct ProcessIncidentInput {
    #[serde(deserialize_with = "de_id")]
    incident_id: String,
    #[serde(default)]
    fields: Record,
}

pub struct ProcessIncident;

impl Tool for ProcessIncident {
    fn name(&self) -> &'static str {
        "process_incident"
    }

    fn description(&self) -> &'static str {
        "Update an incident. Status moves forward through open, in_progress, resolved and \
         closed; a closed incident cannot be reopened. Moving to resolved stamps resolved_at \
         and moving to closed stamps closed_at unless the caller supplies them. reporter_id, \
         client_id and detected_at cannot be changed."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "incident_id": {"type": "string"},
                "fields": {
                    "type": "object",
                    "description": format!("Any of: {}", UPDATABLE_FIELDS.join(", "))
                }
            },
            "required": ["incident_id", "fields"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let ProcessIncidentInput { incident_id, mut fields } = parse_args(args)?;
        let current = store.require(&INCIDENTS, &incident_id)?.clone();
        if fields.is_empty() {
            return Err(ToolError::NoFieldsToUpdate);
        }
        let unsupported: Vec<&str> = fields
            .keys()
            .map(String::as_str)
            .filter(|k| !UPDATABLE_FIELDS.contains(k))
            .collect();
        if !unsupported.is_empty() {
            return Err(ToolError::malformed(format!(
                "Unsupported fields for incident update: {}. reporter_id, client_id and \
                 detected_at cannot be changed",
                unsupported.join(", ")
            )));
        }

        for key in ["assigned_manager_id", "component_id"] {
            if let Some(id) = fields.get(key).and_then(value_as_id) {
                fields.insert(key.into(), Value::String(id));
            }
        }
        if let Some(component) = fields.get("component_id").and_then(Value::as_str) {
            let client = current.id_field("client_id").unwrap_or_default();
            check_component_owner(store, component, &client)?;
        }

        let previous = IncidentStatus::parse(current.str_field("status").unwrap_or("open"))?;
        let next = match fields.get("status") {
            Some(Value::String(s)) => Some(IncidentStatus::parse(s)?),
            Some(Value::Null) | None => None,
            Some(_) => return Err(ToolError::malformed("status must be a string")),
        };
        if let Some(next) = next {
            previous.check_transition(next)?;
            let now = ctx.timestamp();
            let mut stamp = |field: &str| {
                let unset = current.get(field).map_or(true, Value::is_null);
                if unset && !fields.contains_key(field) {
                    fields.insert(field.into(), json!(now));
                }
            };
            if next >= IncidentStatus::Resolved && previous < IncidentStatus::Resolved {
                stamp("resolved_at");
            }
            if next == IncidentStatus::Closed && previous != IncidentStatus::Closed {
                stamp("closed_at");
            }
        }

        let incident = apply_mutation(
            store,
            ctx.clock(),
            &INCIDENTS,
            Some(&incident_id),
            fields,
            &incident_rules(),
        )?;
        let status = incident.str_field("status").unwrap_or_default();
        info!(incident = incident_id.as_str(), from = previous.as_str(), to = status, "incident updated");

        Ok(json!({
            "message": format!("Incident {} updated", incident_id),
            "incident_id": &incident_id,
            "previous_status": previous.as_str(),
            "incident": &incident,
        }))
    }
}
