// capabilities/crates/smart_home/src/fixtures.rs

use mock_store_core::Store;
use serde_json::json;

use crate::tables::*;

/// Two homes. "Maple House" is fully furnished with a scene and an
/// automation wired to its accessories; "Lake Cabin" is a bare second home
/// that cascades must leave alone.
pub fn seed_store() -> Store {
    let mut store = Store::new();
    let ts = "2025-11-20T08:00:00";

    store.seed_table(
        &USERS,
        json!({
            "1": {"full_name": "Alice Moreno", "email": "alice@home.com", "status": "active",
                  "created_at": ts, "updated_at": ts},
            "2": {"full_name": "Ben Ortiz", "email": "ben@home.com", "status": "active",
                  "created_at": ts, "updated_at": ts},
            "3": {"full_name": "Cara Lind", "email": "cara@home.com", "status": "inactive",
                  "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &ADDRESSES,
        json!({
            "1": {"house_number": "12", "street": "Maple Street", "city": "Portland",
                  "country": "United States", "created_at": ts, "updated_at": ts},
            "2": {"house_number": null, "street": "Shore Road", "city": "Bend",
                  "country": "United States", "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &HOMES,
        json!({
            "1": {"owner_id": "1", "home_name": "Maple House", "address_id": "1",
                  "guest_mode_enabled": false, "created_at": ts, "updated_at": ts},
            "2": {"owner_id": "2", "home_name": "Lake Cabin", "address_id": "2",
                  "guest_mode_enabled": true, "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &HOME_USERS,
        json!({
            "1": {"home_id": "1", "user_id": "1", "role": "admin", "access_expires_at": null,
                  "created_at": ts, "updated_at": ts},
            "2": {"home_id": "1", "user_id": "2", "role": "member", "access_expires_at": null,
                  "created_at": ts, "updated_at": ts},
            "3": {"home_id": "2", "user_id": "2", "role": "admin", "access_expires_at": null,
                  "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &ROOMS,
        json!({
            "1": {"home_id": "1", "room_name": "Living Room", "room_type": "living_room",
                  "created_at": ts, "updated_at": ts},
            "2": {"home_id": "1", "room_name": "Kitchen", "room_type": "kitchen",
                  "created_at": ts, "updated_at": ts},
            "3": {"home_id": "2", "room_name": "Porch", "room_type": "custom",
                  "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &DEVICES,
        json!({
            "1": {"home_id": "1", "room_id": "1", "device_name": "Floor Lamp", "device_type": "bulb",
                  "serial_number": "SN-00000001", "status": "online", "support_automation": true,
                  "installed_at": ts, "last_seen": ts, "created_at": ts, "updated_at": ts},
            "2": {"home_id": "1", "room_id": null, "device_name": "Hall Motion", "device_type": "motion_sensor",
                  "serial_number": "SN-00000002", "status": "online", "support_automation": true,
                  "installed_at": ts, "last_seen": ts, "created_at": ts, "updated_at": ts},
            "3": {"home_id": "1", "room_id": "2", "device_name": "Kitchen Thermometer",
                  "device_type": "temperature_sensor", "serial_number": "SN-00000003",
                  "status": "offline", "support_automation": false,
                  "installed_at": ts, "last_seen": null, "created_at": ts, "updated_at": ts},
            "4": {"home_id": "2", "room_id": "3", "device_name": "Porch Camera", "device_type": "camera",
                  "serial_number": "SN-00000004", "status": "online", "support_automation": true,
                  "installed_at": ts, "last_seen": ts, "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &SCENES,
        json!({
            "1": {"home_id": "1", "created_by_user_id": "1", "scene_name": "Movie Night",
                  "description": "Dim the lamp", "status": "enabled", "voice_control_phrase": null,
                  "created_at": ts, "updated_at": ts}
        }),
    );
    store.seed_table(
        &SCENE_ACTIONS,
        json!({
            "1": {"scene_id": "1", "device_id": "1", "created_at": ts}
        }),
    );
    store.seed_table(
        &SCENE_ACTION_ATTRIBUTES,
        json!({
            "1": {"scene_action_id": "1", "attribute_name": "brightness", "attribute_value": "20",
                  "created_at": ts}
        }),
    );

    store.seed_table(
        &ROUTINES,
        json!({
            "1": {"home_id": "1", "created_by_user_id": "1", "routine_name": "Evening Lights",
                  "status": "enabled", "description": null, "created_at": ts, "updated_at": ts},
            "2": {"home_id": "2", "created_by_user_id": "2", "routine_name": "Porch Watch",
                  "status": "disabled", "description": null, "created_at": ts, "updated_at": ts}
        }),
    );
    store.seed_table(
        &ROUTINE_SCHEDULES,
        json!({
            "1": {"routine_id": "1", "on_monday": true, "on_tuesday": true, "on_wednesday": true,
                  "on_thursday": true, "on_friday": true, "on_saturday": false, "on_sunday": false,
                  "onset_time": "18:30", "frequency": null}
        }),
    );
    store.seed_table(
        &ROUTINE_TRIGGERS,
        json!({
            "1": {"routine_id": "1", "trigger_type": "time_based", "routine_schedule_id": "1",
                  "solar_event": null, "device_id": null, "created_at": ts, "updated_at": ts},
            "2": {"routine_id": "1", "trigger_type": "device_state", "routine_schedule_id": null,
                  "solar_event": null, "device_id": "2", "created_at": ts, "updated_at": ts}
        }),
    );
    store.seed_table(
        &ROUTINE_TRIGGER_ATTRIBUTES,
        json!({
            "1": {"trigger_id": "2", "attribute_name": "motion_state",
                  "attribute_value": "motion_detected", "comparison_operator": "equals",
                  "created_at": ts}
        }),
    );
    store.seed_table(
        &ROUTINE_ACTIONS,
        json!({
            "1": {"routine_id": "1", "action_type": "accessory_control", "device_id": "1",
                  "target_scene_id": null, "created_at": ts, "updated_at": ts},
            "2": {"routine_id": "1", "action_type": "scene", "device_id": null,
                  "target_scene_id": "1", "created_at": ts, "updated_at": ts}
        }),
    );
    store.seed_table(
        &ROUTINE_ACTION_ATTRIBUTES,
        json!({
            "1": {"action_id": "1", "attribute_name": "power", "attribute_value": "on",
                  "created_at": ts}
        }),
    );

    store
}
