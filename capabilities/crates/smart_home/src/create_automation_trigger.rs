// capabilities/crates/smart_home/src/create_automation_trigger.rs

use mock_store_core::validate::{check_choice, require_text};
use mock_store_core::{
    apply_mutation, de_id, parse_args, record_from, FieldRules, Record, RecordExt, Store, Tool,
    ToolContext, ToolError,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::attributes::validate_attribute;
use crate::lookup::{clean, home_by_name, require_in_home};
use crate::tables::{
    COMPARISON_OPERATORS, DEVICES, ROUTINES, ROUTINE_SCHEDULES, ROUTINE_TRIGGERS,
    ROUTINE_TRIGGER_ATTRIBUTES, SCHEDULE_DAYS, SOLAR_EVENTS, TRIGGER_TYPES,
};

#[derive(Deserialize)]
struct TriggerInput {
    home_name: Option<String>,
    #[serde(deserialize_with = "de_id")]
    automation_id: String,
    trigger_type: String,
    schedule_days: Option<Map<String, Value>>,
    onset_time: Option<String>,
    frequency: Option<String>,
    solar_event: Option<String>,
    accessory_name: Option<String>,
    attribute_name: Option<String>,
    #[serde(default)]
    attribute_value: Value,
    comparison_operator: Option<String>,
}

/// Everything a trigger writes, resolved before the first write.
enum TriggerPlan {
    Schedule(Record),
    Solar(String),
    DeviceState {
        device_id: String,
        attribute: Record,
    },
    Manual,
}

pub struct CreateAutomationTrigger;

fn schedule_plan(input: &TriggerInput) -> Result<TriggerPlan, ToolError> {
    let onset = require_text(input.onset_time.as_deref(), "onset_time")
        .map_err(|_| ToolError::malformed("onset_time must be provided for time_based triggers"))?;
    let days = input.schedule_days.as_ref().ok_or_else(|| {
        ToolError::malformed("schedule_days must be provided as an object for time_based triggers")
    })?;
    if let Some(key) = days.keys().find(|k| !SCHEDULE_DAYS.contains(&k.as_str())) {
        return Err(ToolError::malformed(format!(
            "Invalid day key '{}'. Allowed keys: {}",
            key,
            SCHEDULE_DAYS.join(", ")
        )));
    }
    let mut schedule = Record::new();
    for day in SCHEDULE_DAYS {
        let on = days.get(*day).and_then(Value::as_bool).unwrap_or(false);
        schedule.insert(day.to_string(), json!(on));
    }
    if !schedule.values().any(|v| v == &Value::Bool(true)) {
        return Err(ToolError::rule("At least one day must be set to true in schedule_days"));
    }
    schedule.insert("onset_time".into(), json!(onset));
    schedule.insert("frequency".into(), json!(clean(input.frequency.as_deref())));
    Ok(TriggerPlan::Schedule(schedule))
}

fn device_state_plan(
    store: &Store,
    input: &TriggerInput,
    home_id: &str,
) -> Result<TriggerPlan, ToolError> {
    let accessory = require_text(input.accessory_name.as_deref(), "accessory_name")?;
    let attribute_name = require_text(input.attribute_name.as_deref(), "attribute_name")?;
    let attribute_value = match &input.attribute_value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    if attribute_value.is_empty() {
        return Err(ToolError::malformed("attribute_value is required for device_state triggers"));
    }

    let matches: Vec<(&str, &Record)> = store
        .table(DEVICES.name)
        .into_iter()
        .flat_map(|t| t.iter())
        .filter(|(_, d)| {
            d.refers_to("home_id", home_id)
                && d.str_field("device_name")
                    .is_some_and(|n| n.trim().eq_ignore_ascii_case(accessory))
        })
        .collect();
    let (device_id, device) = match matches.as_slice() {
        [one] => *one,
        [] => {
            return Err(ToolError::missing(format!(
                "Accessory '{}' not found in this home",
                accessory
            )))
        }
        _ => {
            return Err(ToolError::rule(format!(
                "Multiple accessories named '{}' found in this home",
                accessory
            )))
        }
    };
    validate_attribute(
        device.str_field("device_type").unwrap_or_default(),
        attribute_name,
        &attribute_value,
        true,
    )?;

    let operator = match input.comparison_operator.as_deref() {
        Some(op) => {
            let op = op.trim().to_lowercase();
            check_choice(&op, "comparison_operator", COMPARISON_OPERATORS)?;
            Some(op)
        }
        None => None,
    };
    Ok(TriggerPlan::DeviceState {
        device_id: device_id.to_string(),
        attribute: record_from(json!({
            "attribute_name": attribute_name,
            "attribute_value": attribute_value,
            "comparison_operator": operator,
        })),
    })
}

impl Tool for CreateAutomationTrigger {
    fn name(&self) -> &'static str {
        "create_automation_trigger"
    }

    fn description(&self) -> &'static str {
        "Add a trigger to an automation. time_based needs onset_time and schedule_days \
         (on_monday..on_sunday, at least one true); solar_event needs sunrise or sunset; \
         device_state needs accessory_name, attribute_name and attribute_value (read-only \
         sensor attributes are allowed); manual needs nothing."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string"},
                "automation_id": {"type": "string"},
                "trigger_type": {"type": "string", "enum": TRIGGER_TYPES},
                "schedule_days": {"type": "object", "description": "e.g. {\"on_monday\": true}"},
                "onset_time": {"type": "string", "description": "HH:MM"},
                "frequency": {"type": "string"},
                "solar_event": {"type": "string", "enum": SOLAR_EVENTS},
                "accessory_name": {"type": "string"},
                "attribute_name": {"type": "string"},
                "attribute_value": {"type": ["string", "number"]},
                "comparison_operator": {"type": "string", "enum": COMPARISON_OPERATORS}
            },
            "required": ["home_name", "automation_id", "trigger_type"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: TriggerInput = parse_args(args)?;
        let (home_id, _) = home_by_name(store, input.home_name.as_deref())?;
        let home_name = input.home_name.as_deref().unwrap_or_default();
        require_in_home(store, &ROUTINES, &input.automation_id, &home_id, home_name)?;

        let trigger_type = input.trigger_type.trim().to_lowercase();
        check_choice(&trigger_type, "trigger_type", TRIGGER_TYPES)?;
        let plan = match trigger_type.as_str() {
            "time_based" => schedule_plan(&input)?,
            "solar_event" => {
                let event = require_text(input.solar_event.as_deref(), "solar_event")?.to_lowercase();
                check_choice(&event, "solar_event", SOLAR_EVENTS)?;
                TriggerPlan::Solar(event)
            }
            "device_state" => device_state_plan(store, &input, &home_id)?,
            _ => TriggerPlan::Manual,
        };

        let mut trigger = record_from(json!({
            "routine_id": &input.automation_id,
            "trigger_type": &trigger_type,
            "routine_schedule_id": null,
            "solar_event": null,
            "device_id": null,
        }));
        let mut schedule = Value::Null;
        let mut attribute = None;
        match plan {
            TriggerPlan::Schedule(mut days) => {
                days.insert("routine_id".into(), json!(&input.automation_id));
                let row = apply_mutation(
                    store,
                    ctx.clock(),
                    &ROUTINE_SCHEDULES,
                    None,
                    days,
                    &FieldRules::new(),
                )?;
                trigger.insert("routine_schedule_id".into(), json!(row.get("schedule_id")));
                schedule = Value::Object(row);
            }
            TriggerPlan::Solar(event) => {
                trigger.insert("solar_event".into(), json!(event));
            }
            TriggerPlan::DeviceState { device_id, attribute: attr } => {
                trigger.insert("device_id".into(), json!(device_id));
                attribute = Some(attr);
            }
            TriggerPlan::Manual => {}
        }

        let trigger = apply_mutation(
            store,
            ctx.clock(),
            &ROUTINE_TRIGGERS,
            None,
            trigger,
            &FieldRules::new(),
        )?;
        let attributes = match attribute {
            Some(mut attr) => {
                attr.insert("trigger_id".into(), json!(trigger.get("trigger_id")));
                let row = apply_mutation(
                    store,
                    ctx.clock(),
                    &ROUTINE_TRIGGER_ATTRIBUTES,
                    None,
                    attr,
                    &FieldRules::new(),
                )?;
                json!([row])
            }
            None => Value::Null,
        };

        Ok(json!({
            "message": format!(
                "{} trigger added to automation '{}'",
                trigger_type, input.automation_id
            ),
            "trigger": {
                "trigger_id": trigger.get("trigger_id"),
                "automation_id": trigger.get("routine_id"),
                "trigger_type": trigger.get("trigger_type"),
                "schedule_id": trigger.get("routine_schedule_id"),
                "solar_event": trigger.get("solar_event"),
                "accessory_id": trigger.get("device_id"),
                "created_at": trigger.get("created_at"),
                "updated_at": trigger.get("updated_at"),
            },
            "schedule": schedule,
            "attributes": attributes,
        }))
    }
}
