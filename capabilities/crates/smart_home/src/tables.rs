// capabilities/crates/smart_home/src/tables.rs

//! Table schemas, enumerations and cascade maps for the smart-home domain.
//!
//! Automations are stored as `routines`; the tool surface calls them
//! automations and devices accessories.

use mock_store_core::{CascadeRule, TableSchema};

pub const USERS: TableSchema = TableSchema::new("users", "user_id", "User");
pub const ADDRESSES: TableSchema = TableSchema::new("addresses", "address_id", "Address");
pub const HOMES: TableSchema = TableSchema::new("homes", "home_id", "Home");
pub const HOME_USERS: TableSchema = TableSchema::new("home_users", "home_user_id", "Home membership");
pub const ROOMS: TableSchema = TableSchema::new("rooms", "room_id", "Room");
pub const DEVICES: TableSchema = TableSchema::new("devices", "device_id", "Accessory");
pub const SCENES: TableSchema = TableSchema::new("scenes", "scene_id", "Scene");
pub const SCENE_ACTIONS: TableSchema =
    TableSchema::new("scene_actions", "scene_action_id", "Scene action");
pub const SCENE_ACTION_ATTRIBUTES: TableSchema =
    TableSchema::new("scene_action_attributes", "attribute_id", "Scene action attribute");
pub const ROUTINES: TableSchema = TableSchema::new("routines", "routine_id", "Automation");
pub const ROUTINE_TRIGGERS: TableSchema = TableSchema::new("routine_triggers", "trigger_id", "Trigger");
pub const ROUTINE_SCHEDULES: TableSchema =
    TableSchema::new("routine_schedules", "schedule_id", "Schedule");
pub const ROUTINE_TRIGGER_ATTRIBUTES: TableSchema =
    TableSchema::new("routine_trigger_attributes", "attribute_id", "Trigger attribute");
pub const ROUTINE_ACTIONS: TableSchema =
    TableSchema::new("routine_actions", "action_id", "Automation action");
pub const ROUTINE_ACTION_ATTRIBUTES: TableSchema =
    TableSchema::new("routine_action_attributes", "attribute_id", "Automation action attribute");

pub const ROOM_TYPES: &[&str] = &[
    "kitchen",
    "office",
    "garage",
    "custom",
    "storage",
    "hallway",
    "living_room",
    "lounge",
    "dining_room",
    "bathroom",
    "bedroom",
];

/// Types a new device may be registered as.
pub const DEVICE_TYPES: &[&str] = &[
    "air_conditioner",
    "bulb",
    "camera",
    "door_lock",
    "door_sensor",
    "humidity_sensor",
    "motion_sensor",
    "power_outlet",
    "temperature_sensor",
    "water_leak_sensor",
];

/// Every type the attribute catalog knows, including legacy hardware.
pub const ACCESSORY_TYPES: &[&str] = &[
    "air_conditioner",
    "bulb",
    "camera",
    "door_lock",
    "door_sensor",
    "humidity_sensor",
    "light_sensor",
    "motion_sensor",
    "power_outlet",
    "smoke_detector_sensor",
    "speaker",
    "temperature_sensor",
    "thermostat",
    "water_leak_sensor",
];

pub const DEVICE_STATUSES: &[&str] = &["online", "offline"];
pub const TOGGLE_STATUSES: &[&str] = &["enabled", "disabled"];
pub const TRIGGER_TYPES: &[&str] = &["time_based", "solar_event", "device_state", "manual"];
pub const SOLAR_EVENTS: &[&str] = &["sunrise", "sunset"];
pub const COMPARISON_OPERATORS: &[&str] =
    &["equals", "greater_than", "less_than", "greater_equal", "less_equal"];
pub const SCHEDULE_DAYS: &[&str] = &[
    "on_monday",
    "on_tuesday",
    "on_wednesday",
    "on_thursday",
    "on_friday",
    "on_saturday",
    "on_sunday",
];

const SCENE_ACTION_CHILDREN: &[CascadeRule] =
    &[CascadeRule::new(SCENE_ACTION_ATTRIBUTES.name, "scene_action_id")];
const TRIGGER_CHILDREN: &[CascadeRule] =
    &[CascadeRule::new(ROUTINE_TRIGGER_ATTRIBUTES.name, "trigger_id")];
const ROUTINE_ACTION_CHILDREN: &[CascadeRule] =
    &[CascadeRule::new(ROUTINE_ACTION_ATTRIBUTES.name, "action_id")];

/// Dependents of a scene.
pub const SCENE_CASCADE: &[CascadeRule] =
    &[CascadeRule::new(SCENE_ACTIONS.name, "scene_id").with_children(SCENE_ACTION_CHILDREN)];

/// Dependents of a scene, plus automation actions that activate it.
pub const SCENE_CASCADE_WITH_AUTOMATIONS: &[CascadeRule] = &[
    CascadeRule::new(SCENE_ACTIONS.name, "scene_id").with_children(SCENE_ACTION_CHILDREN),
    CascadeRule::new(ROUTINE_ACTIONS.name, "target_scene_id").with_children(ROUTINE_ACTION_CHILDREN),
];

/// Dependents of an automation.
pub const ROUTINE_CASCADE: &[CascadeRule] = &[
    CascadeRule::new(ROUTINE_TRIGGERS.name, "routine_id").with_children(TRIGGER_CHILDREN),
    CascadeRule::new(ROUTINE_SCHEDULES.name, "routine_id"),
    CascadeRule::new(ROUTINE_ACTIONS.name, "routine_id").with_children(ROUTINE_ACTION_CHILDREN),
];

const DEVICE_CASCADE: &[CascadeRule] = &[
    CascadeRule::new(SCENE_ACTIONS.name, "device_id").with_children(SCENE_ACTION_CHILDREN),
    CascadeRule::new(ROUTINE_TRIGGERS.name, "device_id").with_children(TRIGGER_CHILDREN),
    CascadeRule::new(ROUTINE_ACTIONS.name, "device_id").with_children(ROUTINE_ACTION_CHILDREN),
];

/// Everything hanging off a home. The address is shared and handled by the
/// caller.
pub const HOME_CASCADE: &[CascadeRule] = &[
    CascadeRule::new(HOME_USERS.name, "home_id"),
    CascadeRule::new(ROOMS.name, "home_id"),
    CascadeRule::new(DEVICES.name, "home_id").with_children(DEVICE_CASCADE),
    CascadeRule::new(SCENES.name, "home_id").with_children(SCENE_CASCADE_WITH_AUTOMATIONS),
    CascadeRule::new(ROUTINES.name, "home_id").with_children(ROUTINE_CASCADE),
];
