// capabilities/crates/smart_home/tests/integration.rs

use mock_store_core::{Interface, RecordExt, Store, ToolContext};
use serde_json::{json, Value};
use smart_home::fixtures::seed_store;
use smart_home::{interface_1, interface_2};

fn call(iface: &Interface, store: &mut Store, tool: &str, args: Value) -> Value {
    iface.call(tool, store, &ToolContext::fixed(), args)
}

fn error_of(out: &Value) -> &str {
    assert_eq!(out["success"], false, "expected failure, got {}", out);
    out["error"].as_str().unwrap_or_default()
}

fn references(store: &Store, table: &str, field: &str, id: &str) -> usize {
    store
        .table(table)
        .map_or(0, |t| t.values().filter(|r| r.refers_to(field, id)).count())
}

#[test]
fn test_new_home_gets_address_and_admin_membership() {
    let mut store = seed_store();
    let out = call(
        &interface_1(),
        &mut store,
        "add_new_home",
        json!({"home_name": "Pine Loft", "owner_email": "BEN@home.com",
               "street": "Pine Street", "city": "Salem", "house_number": 7}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["home"]["home_id"], "3");
    assert_eq!(out["address"]["house_number"], "7");
    assert_eq!(out["membership"]["role"], "admin");
    assert_eq!(out["membership"]["user_id"], "2");
    assert_eq!(store.get("homes", "3").unwrap()["address_id"], "3");
}

#[test]
fn test_new_home_rejects_taken_name_and_inactive_owner() {
    let mut store = seed_store();
    let before = store.clone();
    let out = call(
        &interface_1(),
        &mut store,
        "add_new_home",
        json!({"home_name": "maple house", "owner_email": "ben@home.com",
               "street": "Elm", "city": "Salem"}),
    );
    assert!(error_of(&out).contains("already exists"), "{}", out);

    let out = call(
        &interface_1(),
        &mut store,
        "add_new_home",
        json!({"home_name": "Cara's Place", "owner_email": "cara@home.com",
               "street": "Elm", "city": "Salem"}),
    );
    assert_eq!(error_of(&out), "User with email 'cara@home.com' is not active");
    assert_eq!(store, before);
}

#[test]
fn test_room_requires_existing_home_and_known_type() {
    let mut store = seed_store();
    let out = call(
        &interface_1(),
        &mut store,
        "create_room",
        json!({"home_id": "9", "room_name": "Den", "room_type": "office"}),
    );
    assert_eq!(error_of(&out), "Home with ID '9' not found");

    let out = call(
        &interface_1(),
        &mut store,
        "create_room",
        json!({"home_id": 1, "room_name": "Den", "room_type": "dungeon"}),
    );
    assert!(error_of(&out).starts_with("Invalid room_type 'dungeon'"), "{}", out);

    let out = call(
        &interface_1(),
        &mut store,
        "create_room",
        json!({"home_id": 1, "room_name": "Den", "room_type": "office"}),
    );
    assert_eq!(out["room"]["room_id"], "4");
    assert_eq!(out["room"]["home_id"], "1");
}

#[test]
fn test_device_gets_default_serial_and_room_must_match_home() {
    let mut store = seed_store();
    let out = call(
        &interface_1(),
        &mut store,
        "add_new_device",
        json!({"home_id": "1", "room_id": "3", "device_name": "Desk Lamp", "device_type": "bulb"}),
    );
    assert_eq!(error_of(&out), "Room '3' does not belong to home '1'");

    let out = call(
        &interface_1(),
        &mut store,
        "add_new_device",
        json!({"home_id": "1", "room_id": "2", "device_name": "Desk Lamp", "device_type": "bulb"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["device_id"], "5");
    assert_eq!(out["device"]["serial_number"], "SN-00000005");
    assert_eq!(out["device"]["last_seen"], "2025-12-12T12:00:00");
}

#[test]
fn test_device_installed_at_must_be_a_timestamp() {
    let mut store = seed_store();
    let out = call(
        &interface_1(),
        &mut store,
        "add_new_device",
        json!({"home_id": "1", "device_name": "Hall Sensor", "device_type": "motion_sensor",
               "installed_at": "last tuesday"}),
    );
    assert_eq!(
        error_of(&out),
        "Invalid installed_at 'last tuesday'. Expected format YYYY-MM-DDTHH:MM:SS"
    );
    assert_eq!(store.len("devices"), 4);

    let out = call(
        &interface_1(),
        &mut store,
        "add_new_device",
        json!({"home_id": "1", "device_name": "Hall Sensor", "device_type": "motion_sensor",
               "installed_at": "2025-11-02T09:15:00"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["device"]["installed_at"], "2025-11-02T09:15:00");
}

#[test]
fn test_accessories_filter_by_status_and_type() {
    let mut store = seed_store();
    let iface = interface_1();
    let out = call(&iface, &mut store, "list_accessories", json!({"home_name": "Maple House"}));
    assert_eq!(out["count"], 3);
    assert_eq!(out["accessories"][0]["accessory_name"], "Floor Lamp");

    let out = call(
        &iface,
        &mut store,
        "list_accessories",
        json!({"home_name": "maple house", "status": "offline"}),
    );
    assert_eq!(out["count"], 1);
    assert_eq!(out["accessories"][0]["accessory_id"], "3");

    let out = call(
        &iface,
        &mut store,
        "list_accessories",
        json!({"home_name": "Maple House", "accessory_type": "toaster"}),
    );
    assert_eq!(out["success"], false);
}

#[test]
fn test_remove_home_requires_admin() {
    let mut store = seed_store();
    let before = store.clone();
    let out = call(
        &interface_1(),
        &mut store,
        "remove_home",
        json!({"home_name": "Maple House", "requested_by_email": "ben@home.com"}),
    );
    assert!(error_of(&out).contains("must be an admin"), "{}", out);
    assert_eq!(store, before);
}

#[test]
fn test_remove_home_leaves_nothing_behind() {
    let mut store = seed_store();
    let out = call(
        &interface_1(),
        &mut store,
        "remove_home",
        json!({"home_name": "Maple House", "requested_by_email": "alice@home.com"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["address_removed"], true);
    assert_eq!(out["removed"]["devices"], 3);
    assert_eq!(out["removed"]["routine_actions"], 2);

    assert!(!store.contains("homes", "1"));
    assert!(!store.contains("addresses", "1"));
    for table in ["home_users", "rooms", "devices", "scenes", "routines"] {
        assert_eq!(references(&store, table, "home_id", "1"), 0, "{}", table);
    }
    for (table, field, id) in [
        ("scene_actions", "scene_id", "1"),
        ("scene_action_attributes", "scene_action_id", "1"),
        ("routine_triggers", "routine_id", "1"),
        ("routine_trigger_attributes", "trigger_id", "2"),
        ("routine_schedules", "routine_id", "1"),
        ("routine_actions", "routine_id", "1"),
        ("routine_action_attributes", "action_id", "1"),
    ] {
        assert_eq!(references(&store, table, field, id), 0, "{}", table);
    }

    // The other home is untouched.
    assert!(store.contains("homes", "2"));
    assert!(store.contains("rooms", "3"));
    assert!(store.contains("devices", "4"));
    assert!(store.contains("routines", "2"));
    assert!(store.contains("home_users", "3"));
    assert!(store.contains("addresses", "2"));
}

#[test]
fn test_scenes_are_admin_only_and_start_disabled() {
    let mut store = seed_store();
    let iface = interface_2();
    let out = call(
        &iface,
        &mut store,
        "create_home_scene",
        json!({"home_name": "Maple House", "created_by_user_email": "ben@home.com",
               "scene_name": "Wake Up"}),
    );
    assert!(error_of(&out).contains("must be an admin"), "{}", out);

    let out = call(
        &iface,
        &mut store,
        "create_home_scene",
        json!({"home_name": "Maple House", "created_by_user_email": "alice@home.com",
               "scene_name": "movie night"}),
    );
    assert_eq!(error_of(&out), "Scene 'movie night' already exists in this home");

    let out = call(
        &iface,
        &mut store,
        "create_home_scene",
        json!({"home_name": "Maple House", "created_by_user_email": "alice@home.com",
               "scene_name": "Wake Up", "description": "  "}),
    );
    assert_eq!(out["scene"]["scene_id"], "2");
    assert_eq!(out["scene"]["status"], "disabled");
    assert_eq!(out["scene"]["description"], Value::Null);
}

#[test]
fn test_scene_actions_follow_the_attribute_catalog() {
    let mut store = seed_store();
    let iface = interface_2();
    let add = |store: &mut Store, accessory: &str, command: &str, value: &str| {
        call(
            &iface,
            store,
            "add_action_to_scene",
            json!({"home_name": "Maple House", "scene_id": "1", "accessory_id": accessory,
                   "command": command, "value": value}),
        )
    };

    let out = add(&mut store, "1", "brightness", "150");
    assert_eq!(error_of(&out), "Invalid value '150' for bulb brightness");
    let out = add(&mut store, "2", "motion_state", "clear");
    assert_eq!(error_of(&out), "Attribute 'motion_state' is read-only for motion_sensor");
    let out = add(&mut store, "4", "power", "on");
    assert_eq!(error_of(&out), "Accessory '4' does not belong to home 'Maple House'");
    assert_eq!(store.len("scene_actions"), 1);

    let out = add(&mut store, "1", "color", "#00FF88");
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["scene_action"]["scene_action_id"], "2");
    assert_eq!(out["attributes"][0]["attribute_value"], "#00FF88");
}

#[test]
fn test_edit_scene_toggles_and_adds_state() {
    let mut store = seed_store();
    let iface = interface_2();

    let out = call(&iface, &mut store, "edit_scene", json!({"home_name": "Maple House", "scene_id": "1"}));
    assert_eq!(
        error_of(&out),
        "No fields to update. Please provide at least one field to update."
    );

    let out = call(
        &iface,
        &mut store,
        "edit_scene",
        json!({"home_name": "Maple House", "scene_id": "1", "accessory_id": "1"}),
    );
    assert_eq!(error_of(&out), "Provide both accessory_id and state, or neither");

    let out = call(
        &iface,
        &mut store,
        "edit_scene",
        json!({"home_name": "Maple House", "scene_id": "1", "accessory_id": "1",
               "state": {"power": "on", "brightness": "10"}}),
    );
    assert_eq!(out["success"], false);

    let out = call(
        &iface,
        &mut store,
        "edit_scene",
        json!({"home_name": "Maple House", "scene_id": "1", "status": "Disabled",
               "accessory_id": "1", "state": {"power": "off"}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["scene"]["status"], "disabled");
    assert_eq!(out["actions"].as_array().map(Vec::len), Some(2));
    assert_eq!(out["actions"][1]["attributes"][0]["attribute_name"], "power");
}

#[test]
fn test_deleting_a_scene_cascades_to_automation_actions() {
    let mut store = seed_store();
    let out = call(
        &interface_2(),
        &mut store,
        "delete_home_scene",
        json!({"home_name": "Maple House", "scene_id": "1"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["deleted_automation_actions"][0]["action_id"], "2");
    assert!(!store.contains("scenes", "1"));
    assert!(!store.contains("scene_actions", "1"));
    assert!(!store.contains("scene_action_attributes", "1"));
    assert!(!store.contains("routine_actions", "2"));
    assert!(store.contains("routine_actions", "1"));
}

#[test]
fn test_deleting_a_scene_can_keep_automation_actions() {
    let mut store = seed_store();
    let out = call(
        &interface_2(),
        &mut store,
        "delete_home_scene",
        json!({"home_name": "Maple House", "scene_id": 1, "delete_automation_actions": false}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert!(store.contains("routine_actions", "2"));
    assert_eq!(out["deleted_automation_actions"], json!([]));
}

#[test]
fn test_automations_need_active_members() {
    let mut store = seed_store();
    let iface = interface_2();
    let out = call(
        &iface,
        &mut store,
        "create_automation",
        json!({"home_name": "Lake Cabin", "automation_name": "Night", "created_by_user_email": "alice@home.com"}),
    );
    assert!(error_of(&out).contains("does not have access"), "{}", out);

    let out = call(
        &iface,
        &mut store,
        "create_automation",
        json!({"home_name": "Maple House", "automation_name": "evening lights",
               "created_by_user_email": "ben@home.com"}),
    );
    assert!(error_of(&out).contains("already exists"), "{}", out);

    let out = call(
        &iface,
        &mut store,
        "create_automation",
        json!({"home_name": "Maple House", "automation_name": "Morning",
               "created_by_user_email": "ben@home.com"}),
    );
    assert_eq!(out["automation"]["automation_id"], "3");
    assert_eq!(out["automation"]["status"], "enabled");
}

#[test]
fn test_triggers_validate_before_writing() {
    let mut store = seed_store();
    let iface = interface_2();
    let before = store.clone();

    let out = call(
        &iface,
        &mut store,
        "create_automation_trigger",
        json!({"home_name": "Maple House", "automation_id": "1", "trigger_type": "time_based",
               "onset_time": "07:00", "schedule_days": {"on_monday": false}}),
    );
    assert!(error_of(&out).contains("At least one day"), "{}", out);

    let out = call(
        &iface,
        &mut store,
        "create_automation_trigger",
        json!({"home_name": "Maple House", "automation_id": "1", "trigger_type": "solar_event",
               "solar_event": "noon"}),
    );
    assert_eq!(out["success"], false);
    assert_eq!(store, before);

    let out = call(
        &iface,
        &mut store,
        "create_automation_trigger",
        json!({"home_name": "Maple House", "automation_id": "1", "trigger_type": "time_based",
               "onset_time": "07:00", "schedule_days": {"on_saturday": true}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["trigger"]["schedule_id"], "2");
    assert_eq!(out["schedule"]["on_saturday"], true);
    assert_eq!(out["schedule"]["on_monday"], false);
}

#[test]
fn test_device_state_trigger_may_watch_sensors() {
    let mut store = seed_store();
    let out = call(
        &interface_2(),
        &mut store,
        "create_automation_trigger",
        json!({"home_name": "Maple House", "automation_id": "1", "trigger_type": "device_state",
               "accessory_name": "hall motion", "attribute_name": "motion_state",
               "attribute_value": "clear", "comparison_operator": "equals"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["trigger"]["accessory_id"], "2");
    assert_eq!(out["attributes"][0]["trigger_id"], "3");
    assert_eq!(out["attributes"][0]["comparison_operator"], "equals");
}

#[test]
fn test_manage_automation_updates_and_deletes() {
    let mut store = seed_store();
    let iface = interface_2();

    let out = call(
        &iface,
        &mut store,
        "manage_automation",
        json!({"home_name": "Maple House", "action": "update", "automation_id": "1",
               "automation_name": "Evening Lights"}),
    );
    assert_eq!(error_of(&out), "Provide exactly one of automation_id or automation_name");

    let out = call(
        &iface,
        &mut store,
        "manage_automation",
        json!({"home_name": "Maple House", "action": "update", "automation_id": "1"}),
    );
    assert_eq!(out["success"], false);

    let out = call(
        &iface,
        &mut store,
        "manage_automation",
        json!({"home_name": "Maple House", "action": "update",
               "automation_name": "EVENING LIGHTS", "status": "disabled"}),
    );
    assert_eq!(out["automation"]["status"], "disabled");

    let out = call(
        &iface,
        &mut store,
        "manage_automation",
        json!({"home_name": "Maple House", "action": "delete", "automation_id": "1"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["deleted_automation"]["automation_name"], "Evening Lights");
    assert!(!store.contains("routines", "1"));
    assert_eq!(store.len("routine_triggers"), 0);
    assert_eq!(store.len("routine_trigger_attributes"), 0);
    assert_eq!(store.len("routine_schedules"), 0);
    assert_eq!(store.len("routine_actions"), 0);
    assert_eq!(store.len("routine_action_attributes"), 0);
    assert!(store.contains("routines", "2"));
}

#[test]
fn test_automation_of_another_home_is_rejected() {
    let mut store = seed_store();
    let out = call(
        &interface_2(),
        &mut store,
        "manage_automation",
        json!({"home_name": "Maple House", "action": "delete", "automation_id": "2"}),
    );
    assert_eq!(error_of(&out), "Automation '2' does not belong to home 'Maple House'");
    assert!(store.contains("routines", "2"));
}
