// capabilities/crates/incident_management/tests/integration.rs

use incident_management::fixtures::seed_store;
use incident_management::interface_1;
use mock_store_core::{Store, ToolContext};
use serde_json::{json, Value};

const NOW: &str = "2025-12-12T12:00:00";

fn call(store: &mut Store, tool: &str, args: Value) -> Value {
    interface_1().call(tool, store, &ToolContext::fixed(), args)
}

fn error_of(out: &Value) -> &str {
    assert_eq!(out["success"], false, "expected failure, got {}", out);
    out["error"].as_str().unwrap_or_default()
}

fn new_incident() -> Value {
    json!({
        "title": "Card declines at checkout",
        "reporter_id": 2,
        "client_id": "1",
        "component_id": "1",
        "category": "api_error",
        "impact": "high",
        "detection_source": "client_reported",
        "severity_factors": {"sla_at_risk": true}
    })
}

fn with(mut base: Value, key: &str, value: Value) -> Value {
    base[key] = value;
    base
}

#[test]
fn test_register_incident_follows_highest_code() {
    let mut store = seed_store();
    let out = call(&mut store, "register_incident", new_incident());
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["incident_id"], "5");
    assert_eq!(out["incident_code"], "INC-2025-00008");

    let incident = &out["incident"];
    assert_eq!(incident["severity"], "P2");
    assert_eq!(incident["status"], "open");
    assert_eq!(incident["urgency"], "high");
    assert_eq!(incident["reporter_id"], "2");
    assert_eq!(incident["detected_at"], NOW);
    assert_eq!(incident["created_at"], NOW);
    assert_eq!(incident["sla_breach"], false);
    assert!(incident["resolved_at"].is_null());
    assert_eq!(store.len("incidents"), 5);
}

#[test]
fn test_register_incident_explicit_severity_wins() {
    let mut store = seed_store();
    let args = with(new_incident(), "severity", json!("P4"));
    let args = with(args, "urgency", json!("low"));
    let out = call(&mut store, "register_incident", args);
    assert_eq!(out["incident"]["severity"], "P4", "{}", out);
    assert_eq!(out["incident"]["urgency"], "low");

    let args = with(new_incident(), "severity_factors", json!({}));
    let out = call(&mut store, "register_incident", args);
    assert_eq!(out["incident"]["severity"], "P4");
    assert_eq!(out["incident_code"], "INC-2025-00009");
}

#[test]
fn test_register_incident_rejections_leave_store_alone() {
    let mut store = seed_store();
    let before = store.clone();

    let out = call(&mut store, "register_incident", with(new_incident(), "client_id", json!("2")));
    assert_eq!(error_of(&out), "Component '1' does not belong to client '2'");

    let args = with(new_incident(), "component_id", Value::Null);
    let out = call(&mut store, "register_incident", with(args, "client_id", json!("2")));
    assert_eq!(error_of(&out), "Client '2' is not active");

    let out = call(&mut store, "register_incident", with(new_incident(), "reporter_id", json!("3")));
    assert_eq!(error_of(&out), "User '3' is not active");

    let out = call(&mut store, "register_incident", with(new_incident(), "reporter_id", json!("9")));
    assert_eq!(error_of(&out), "User with ID '9' not found");

    let out = call(&mut store, "register_incident", with(new_incident(), "impact", json!("severe")));
    assert_eq!(
        error_of(&out),
        "Invalid impact 'severe'. Must be one of: critical, high, medium, low"
    );

    let out = call(&mut store, "register_incident", with(new_incident(), "severity", json!("P9")));
    assert_eq!(
        error_of(&out),
        "Invalid severity 'P9'. Must be one of: P1, P2, P3, P4"
    );

    let out = call(&mut store, "register_incident", with(new_incident(), "title", Value::Null));
    assert_eq!(error_of(&out), "title is required");

    assert_eq!(store, before);
}

#[test]
fn test_process_incident_walks_the_lifecycle() {
    let mut store = seed_store();

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {"status": "in_progress"}}));
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["previous_status"], "open");
    assert!(out["incident"]["resolved_at"].is_null());
    assert_eq!(out["incident"]["updated_at"], NOW);

    let out = call(
        &mut store,
        "process_incident",
        json!({"incident_id": 1, "fields": {"status": "resolved", "downtime_minutes": 35}}),
    );
    assert_eq!(out["previous_status"], "in_progress", "{}", out);
    assert_eq!(out["incident"]["resolved_at"], NOW);
    assert_eq!(out["incident"]["downtime_minutes"], 35);

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {"status": "closed"}}));
    assert_eq!(out["incident"]["closed_at"], NOW, "{}", out);
    assert_eq!(out["incident"]["status"], "closed");

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {"status": "open"}}));
    assert_eq!(error_of(&out), "Cannot reopen a closed incident");
}

#[test]
fn test_process_incident_stamps_only_what_is_missing() {
    let mut store = seed_store();

    let out = call(
        &mut store,
        "process_incident",
        json!({"incident_id": "1", "fields": {"status": "resolved", "resolved_at": "2025-12-01T10:00:00"}}),
    );
    assert_eq!(out["incident"]["resolved_at"], "2025-12-01T10:00:00", "{}", out);

    let out = call(&mut store, "process_incident", json!({"incident_id": "2", "fields": {"status": "closed"}}));
    assert_eq!(out["incident"]["resolved_at"], NOW, "{}", out);
    assert_eq!(out["incident"]["closed_at"], NOW);

    let out = call(&mut store, "process_incident", json!({"incident_id": "3", "fields": {"status": "closed"}}));
    assert_eq!(out["incident"]["resolved_at"], "2025-09-28T06:30:00", "{}", out);
    assert_eq!(out["incident"]["closed_at"], NOW);
}

#[test]
fn test_process_incident_rejections_leave_store_alone() {
    let mut store = seed_store();
    let before = store.clone();

    let out = call(&mut store, "process_incident", json!({"incident_id": "3", "fields": {"status": "in_progress"}}));
    assert_eq!(
        error_of(&out),
        "Invalid status transition from 'resolved' to 'in_progress'"
    );

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {}}));
    assert!(error_of(&out).starts_with("No fields to update"));

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {"client_id": "2"}}));
    assert_eq!(
        error_of(&out),
        "Unsupported fields for incident update: client_id. reporter_id, client_id and \
         detected_at cannot be changed"
    );

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {"component_id": 3}}));
    assert_eq!(error_of(&out), "Component '3' does not belong to client '1'");

    let out = call(
        &mut store,
        "process_incident",
        json!({"incident_id": "1", "fields": {"incident_code": "inc-2025-00002"}}),
    );
    assert_eq!(
        error_of(&out),
        "Incident with incident_code 'inc-2025-00002' already exists (incident_id: '2')"
    );

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {"downtime_minutes": -5}}));
    assert_eq!(error_of(&out), "downtime_minutes must be non-negative");

    let out = call(&mut store, "process_incident", json!({"incident_id": "1", "fields": {"assigned_manager_id": 3}}));
    assert_eq!(error_of(&out), "User '3' is not active");

    let out = call(&mut store, "process_incident", json!({"incident_id": "99", "fields": {"status": "closed"}}));
    assert_eq!(error_of(&out), "Incident with ID '99' not found");

    assert_eq!(store, before);
}

#[test]
fn test_escalation_is_created_for_active_incident() {
    let mut store = seed_store();
    let out = call(
        &mut store,
        "handle_escalations",
        json!({"action": "create", "escalation_data": {
            "incident_id": 1, "escalated_by_id": "1", "escalated_to_id": "4",
            "escalation_reason": "client_demand", "escalation_level": "management"}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["escalation_id"], "2");
    assert_eq!(out["escalation_code"], "ESC-2025-00002");
    let escalation = &out["escalation"];
    assert_eq!(escalation["incident_id"], "1");
    assert_eq!(escalation["status"], "open");
    assert_eq!(escalation["escalated_at"], NOW);
    assert!(escalation["acknowledged_at"].is_null());
}

#[test]
fn test_escalation_create_rejections_leave_store_alone() {
    let mut store = seed_store();
    let before = store.clone();
    let data = json!({
        "incident_id": "2", "escalated_by_id": "1", "escalated_to_id": "4",
        "escalation_reason": "severity_increase", "escalation_level": "executive"
    });
    let create = |data: Value| json!({"action": "create", "escalation_data": data});

    let out = call(&mut store, "handle_escalations", create(with(data.clone(), "incident_id", json!("3"))));
    assert_eq!(
        error_of(&out),
        "Incident must be open or in_progress (incident '3' is resolved)"
    );

    let out = call(&mut store, "handle_escalations", create(with(data.clone(), "incident_id", json!("42"))));
    assert_eq!(error_of(&out), "Incident with ID '42' not found");

    let out = call(&mut store, "handle_escalations", create(with(data.clone(), "escalated_by_id", json!("3"))));
    assert_eq!(error_of(&out), "User '3' is not active");

    let out = call(&mut store, "handle_escalations", create(with(data.clone(), "escalation_level", json!("board"))));
    assert_eq!(
        error_of(&out),
        "Invalid escalation_level 'board'. Must be one of: technical, management, executive, vendor"
    );

    let out = call(&mut store, "handle_escalations", create(with(data.clone(), "priority", json!("high"))));
    assert_eq!(error_of(&out), "Invalid fields for escalation creation: priority");

    let out = call(&mut store, "handle_escalations", json!({"action": "delete", "escalation_data": data}));
    assert_eq!(error_of(&out), "Invalid action 'delete'. Must be 'create' or 'update'");

    assert_eq!(store, before);
}

#[test]
fn test_escalation_update_moves_forward_and_stamps() {
    let mut store = seed_store();
    let update = |data: Value| json!({"action": "update", "escalation_id": 1, "escalation_data": data});

    let out = call(&mut store, "handle_escalations", update(json!({"status": "acknowledged"})));
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["escalation_code"], "ESC-2025-00001");
    assert_eq!(out["escalation"]["acknowledged_at"], NOW);
    assert!(out["escalation"]["resolved_at"].is_null());

    let out = call(&mut store, "handle_escalations", update(json!({"status": "resolved"})));
    assert_eq!(out["escalation"]["resolved_at"], NOW, "{}", out);

    let out = call(&mut store, "handle_escalations", update(json!({"status": "open"})));
    assert_eq!(
        error_of(&out),
        "Invalid escalation status transition from 'resolved' to 'open'"
    );

    let out = call(&mut store, "handle_escalations", update(json!({})));
    assert!(error_of(&out).starts_with("No fields to update"));

    let out = call(
        &mut store,
        "handle_escalations",
        json!({"action": "update", "escalation_data": {"status": "resolved"}}),
    );
    assert_eq!(error_of(&out), "escalation_id is required for update action");
}

#[test]
fn test_get_incidents_filters() {
    let mut store = seed_store();
    let count = |store: &mut Store, filters: Value| {
        let out = call(store, "get_incidents", json!({"filters": filters}));
        assert_eq!(out["success"], true, "{}", out);
        out["count"].as_u64().unwrap_or_default()
    };

    assert_eq!(count(&mut store, Value::Null), 4);
    assert_eq!(count(&mut store, json!({"client_id": 1})), 3);
    assert_eq!(count(&mut store, json!({"severity": "P2"})), 2);
    assert_eq!(count(&mut store, json!({"is_recurring": true})), 1);
    assert_eq!(count(&mut store, json!({"status": "open", "client_id": "2"})), 0);

    let out = call(&mut store, "get_incidents", json!({"filters": "{\"status\": \"closed\"}"}));
    assert_eq!(out["count"], 1);
    assert_eq!(out["incidents"][0]["incident_code"], "INC-2025-00007");

    let out = call(&mut store, "get_incidents", json!({"filters": {"owner": "1"}}));
    assert!(error_of(&out).starts_with("Unsupported filter 'owner'"));

    let out = call(&mut store, "get_incidents", json!({"filters": {"status": "pending"}}));
    assert_eq!(
        error_of(&out),
        "Invalid status 'pending'. Must be one of: open, in_progress, resolved, closed"
    );
}

#[test]
fn test_registered_incident_can_be_escalated_and_found() {
    let mut store = seed_store();
    let out = call(&mut store, "register_incident", new_incident());
    let incident_id = out["incident_id"].as_str().unwrap_or_default().to_string();

    let out = call(
        &mut store,
        "handle_escalations",
        json!({"action": "create", "escalation_data": {
            "incident_id": &incident_id, "escalated_by_id": "2", "escalated_to_id": "3",
            "escalation_reason": "sla_breach", "escalation_level": "technical"}}),
    );
    assert_eq!(out["success"], true, "{}", out);

    let out = call(&mut store, "get_incidents", json!({"filters": {"incident_code": "INC-2025-00008"}}));
    assert_eq!(out["count"], 1);
    assert_eq!(out["incidents"][0]["incident_id"], incident_id.as_str());
}

#[test]
fn test_interface_lists_four_tools() {
    let iface = interface_1();
    assert_eq!(
        iface.names(),
        vec!["register_incident", "process_incident", "handle_escalations", "get_incidents"]
    );
    let defs = iface.tool_definitions();
    assert_eq!(defs.len(), 4);
    assert_eq!(defs[0]["function"]["name"], "register_incident");
}
