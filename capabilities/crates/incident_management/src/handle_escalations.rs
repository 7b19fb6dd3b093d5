// capabilities/crates/incident_management/src/handle_escalations.rs

use mock_store_core::record::value_as_id;
use mock_store_core::{
    apply_mutation, de_opt_id, parse_args, FieldRules, Record, RecordExt, Rule, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::incidents::next_code;
use crate::tables::{
    EscalationStatus, IncidentStatus, ESCALATIONS, ESCALATION_CODE_PREFIX, ESCALATION_LEVELS,
    ESCALATION_REASONS, INCIDENTS, USERS,
};

const CREATE_FIELDS: &[&str] = &[
    "incident_id",
    "escalated_by_id",
    "escalated_to_id",
    "escalation_reason",
    "escalation_level",
    "escalated_at",
];
const UPDATE_FIELDS: &[&str] = &[
    "escalated_to_id",
    "escalation_level",
    "status",
    "acknowledged_at",
    "resolved_at",
];
const ID_FIELDS: &[&str] = &["incident_id", "escalated_by_id", "escalated_to_id"];

#[derive(Deserialize)]
struct HandleEscalationsInput {
    action: String,
    #[serde(default)]
    escalation_data: Record,
    #[serde(default, deserialize_with = "de_opt_id")]
    escalation_id: Option<String>,
}

fn escalation_rules() -> FieldRules {
    FieldRules::new()
        .field("incident_id", &[Rule::Required, Rule::ForeignKey(INCIDENTS)])
        .field("escalated_by_id", &[Rule::Required, Rule::ActiveForeignKey(USERS)])
        .field("escalated_to_id", &[Rule::Required, Rule::ForeignKey(USERS)])
        .field("escalation_reason", &[Rule::Required, Rule::OneOf(ESCALATION_REASONS)])
        .field("escalation_level", &[Rule::Required, Rule::OneOf(ESCALATION_LEVELS)])
        .field("status", &[Rule::Required, Rule::OneOf(EscalationStatus::ALL)])
}

fn reject_unknown(data: &Record, allowed: &[&str], action: &str) -> Result<(), ToolError> {
    let unknown: Vec<&str> = data
        .keys()
        .map(String::as_str)
        .filter(|k| !allowed.contains(k))
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ToolError::malformed(format!(
            "Invalid fields for escalation {}: {}",
            action,
            unknown.join(", ")
        )))
    }
}

fn normalize_ids(data: &mut Record) {
    for key in ID_FIELDS {
        if let Some(id) = data.get(*key).and_then(value_as_id) {
            data.insert((*key).into(), Value::String(id));
        }
    }
}

pub struct HandleEscalations;

impl Tool for HandleEscalations {
    fn name(&self) -> &'static str {
        "handle_escalations"
    }

    fn description(&self) -> &'static str {
        "action 'create' escalates an open or in_progress incident and assigns the next \
         ESC-2025-##### code; the escalating user must be active. action 'update' changes an \
         escalation given escalation_id. Escalation status moves forward through open, \
         acknowledged and resolved, stamping acknowledged_at or resolved_at."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {"type": "string", "enum": ["create", "update"]},
                "escalation_id": {"type": "string", "description": "Required for update"},
                "escalation_data": {
                    "type": "object",
                    "properties": {
                        "incident_id": {"type": "string"},
                        "escalated_by_id": {"type": "string"},
                        "escalated_to_id": {"type": "string"},
                        "escalation_reason": {"type": "string", "enum": ESCALATION_REASONS},
                        "escalation_level": {"type": "string", "enum": ESCALATION_LEVELS},
                        "escalated_at": {"type": "string"},
                        "status": {"type": "string", "enum": EscalationStatus::ALL},
                        "acknowledged_at": {"type": "string"},
                        "resolved_at": {"type": "string"}
                    }
                }
            },
            "required": ["action", "escalation_data"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: HandleEscalationsInput = parse_args(args)?;
        match input.action.as_str() {
            "create" => create(store, ctx, input.escalation_data),
            "update" => {
                let escalation_id = input.escalation_id.ok_or_else(|| {
                    ToolError::malformed("escalation_id is required for update action")
                })?;
                update(store, ctx, &escalation_id, input.escalation_data)
            }
            other => Err(ToolError::malformed(format!(
                "Invalid action '{}'. Must be 'create' or 'update'",
                other
            ))),
        }
    }
}

fn create(store: &mut Store, ctx: &ToolContext, mut data: Record) -> Result<Value, ToolError> {
    reject_unknown(&data, CREATE_FIELDS, "creation")?;
    normalize_ids(&mut data);
    if let Some(incident_id) = data.get("incident_id").and_then(Value::as_str) {
        if let Some(incident) = store.get(INCIDENTS.name, incident_id) {
            let status = IncidentStatus::parse(incident.str_field("status").unwrap_or_default())?;
            if !status.is_active() {
                return Err(ToolError::rule(format!(
                    "Incident must be open or in_progress (incident '{}' is {})",
                    incident_id,
                    status.as_str()
                )));
            }
        }
    }

    let now = ctx.timestamp();
    if data.get("escalated_at").map_or(true, Value::is_null) {
        data.insert("escalated_at".into(), json!(now));
    }
    let code = next_code(store, &ESCALATIONS, "escalation_code", ESCALATION_CODE_PREFIX);
    data.insert("escalation_code".into(), json!(code));
    data.insert("status".into(), json!(EscalationStatus::Open.as_str()));
    data.insert("acknowledged_at".into(), Value::Null);
    data.insert("resolved_at".into(), Value::Null);

    let escalation = apply_mutation(store, ctx.clock(), &ESCALATIONS, None, data, &escalation_rules())?;
    let escalation_id = escalation.id_field("escalation_id").unwrap_or_default();
    info!(escalation = escalation_id.as_str(), code = code.as_str(), "escalation created");

    Ok(json!({
        "action": "create",
        "message": format!("Escalation {} created", code),
        "escalation_id": escalation_id,
        "escalation_code": code,
        "escalation": escalation,
    }))
}

fn update(
    store: &mut Store,
    ctx: &ToolContext,
    escalation_id: &str,
    mut data: Record,
) -> Result<Value, ToolError> {
    let current = store.require(&ESCALATIONS, escalation_id)?.clone();
    if data.is_empty() {
        return Err(ToolError::NoFieldsToUpdate);
    }
    reject_unknown(&data, UPDATE_FIELDS, "update")?;
    normalize_ids(&mut data);

    let previous = EscalationStatus::parse(current.str_field("status").unwrap_or("open"))?;
    let next = match data.get("status") {
        Some(Value::String(s)) => Some(EscalationStatus::parse(s)?),
        Some(Value::Null) | None => None,
        Some(_) => return Err(ToolError::malformed("status must be a string")),
    };
    if let Some(next) = next {
        if next < previous {
            return Err(ToolError::rule(format!(
                "Invalid escalation status transition from '{}' to '{}'",
                previous.as_str(),
                next.as_str()
            )));
        }
        if next != previous {
            if let Some(field) = next.stamp_field() {
                if !data.contains_key(field) {
                    data.insert(field.into(), json!(ctx.timestamp()));
                }
            }
        }
    }

    let escalation = apply_mutation(
        store,
        ctx.clock(),
        &ESCALATIONS,
        Some(escalation_id),
        data,
        &escalation_rules(),
    )?;
    let status = escalation.str_field("status").unwrap_or_default();
    info!(escalation = escalation_id, status, "escalation updated");

    Ok(json!({
        "action": "update",
        "message": format!("Escalation {} updated", escalation_id),
        "escalation_id": escalation_id,
        "escalation_code": escalation.get("escalation_code"),
        "escalation": escalation,
    }))
}
