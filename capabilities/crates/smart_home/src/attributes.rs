// capabilities/crates/smart_home/src/attributes.rs

//! Controllable and observable attributes per accessory type.
//!
//! Scene and automation actions may only set writable attributes; automation
//! triggers may also watch read-only sensor attributes.

use mock_store_core::ToolError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeKind {
    Enum(&'static [&'static str]),
    Numeric { min: f64, max: f64 },
    /// `#RRGGBB` or a colour name.
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub readonly: bool,
}

const fn writable(name: &'static str, kind: AttributeKind) -> AttributeSpec {
    AttributeSpec { name, kind, readonly: false }
}

const fn readonly(name: &'static str, kind: AttributeKind) -> AttributeSpec {
    AttributeSpec { name, kind, readonly: true }
}

const ON_OFF: AttributeKind = AttributeKind::Enum(&["on", "off"]);

const CAMERA: &[AttributeSpec] = &[
    writable("power", ON_OFF),
    writable("recording", AttributeKind::Enum(&["recording", "paused", "stopped"])),
    writable("motion_detection", AttributeKind::Enum(&["motion_detected", "clear"])),
];
const BULB: &[AttributeSpec] = &[
    writable("power", ON_OFF),
    writable("brightness", AttributeKind::Numeric { min: 0.0, max: 100.0 }),
    writable("color", AttributeKind::Color),
];
const THERMOSTAT: &[AttributeSpec] = &[
    writable("power", ON_OFF),
    writable("mode", AttributeKind::Enum(&["heating", "cooling", "idle"])),
    writable("temperature", AttributeKind::Numeric { min: 32.0, max: 104.0 }),
    writable("target_temperature", AttributeKind::Numeric { min: 60.0, max: 90.0 }),
];
const SPEAKER: &[AttributeSpec] = &[
    writable("power", ON_OFF),
    writable("playback_state", AttributeKind::Enum(&["playing", "paused", "stopped"])),
    writable("volume", AttributeKind::Numeric { min: 0.0, max: 100.0 }),
    writable("mute", AttributeKind::Enum(&["muted", "unmuted"])),
];
const DOOR_LOCK: &[AttributeSpec] =
    &[writable("lock_state", AttributeKind::Enum(&["locked", "unlocked"]))];
const MOTION_SENSOR: &[AttributeSpec] =
    &[readonly("motion_state", AttributeKind::Enum(&["motion_detected", "clear"]))];
const TEMPERATURE_SENSOR: &[AttributeSpec] =
    &[readonly("temperature", AttributeKind::Numeric { min: 32.0, max: 104.0 })];
const HUMIDITY_SENSOR: &[AttributeSpec] =
    &[readonly("humidity", AttributeKind::Numeric { min: 0.0, max: 100.0 })];
const LIGHT_SENSOR: &[AttributeSpec] =
    &[readonly("brightness_level", AttributeKind::Numeric { min: 0.0, max: 65535.0 })];
const DOOR_SENSOR: &[AttributeSpec] =
    &[readonly("door_state", AttributeKind::Enum(&["open", "closed"]))];
const WATER_LEAK_SENSOR: &[AttributeSpec] =
    &[readonly("leak_state", AttributeKind::Enum(&["leak_detected", "no_leak"]))];
const SMOKE_DETECTOR_SENSOR: &[AttributeSpec] = &[readonly(
    "smoke_state",
    AttributeKind::Enum(&["smoke_detected", "no_smoke", "alarm_triggered"]),
)];
const POWER_OUTLET: &[AttributeSpec] = &[
    writable("power", ON_OFF),
    writable("power_consumption", AttributeKind::Numeric { min: 0.0, max: 3680.0 }),
];
const AIR_CONDITIONER: &[AttributeSpec] = &[
    writable("power", ON_OFF),
    writable("mode", AttributeKind::Enum(&["cooling", "idle"])),
    writable("temperature", AttributeKind::Numeric { min: 32.0, max: 104.0 }),
    writable("target_temperature", AttributeKind::Numeric { min: 60.0, max: 85.0 }),
];

pub fn catalog(device_type: &str) -> Option<&'static [AttributeSpec]> {
    let specs = match device_type {
        "camera" => CAMERA,
        "bulb" => BULB,
        "thermostat" => THERMOSTAT,
        "speaker" => SPEAKER,
        "door_lock" => DOOR_LOCK,
        "motion_sensor" => MOTION_SENSOR,
        "temperature_sensor" => TEMPERATURE_SENSOR,
        "humidity_sensor" => HUMIDITY_SENSOR,
        "light_sensor" => LIGHT_SENSOR,
        "door_sensor" => DOOR_SENSOR,
        "water_leak_sensor" => WATER_LEAK_SENSOR,
        "smoke_detector_sensor" => SMOKE_DETECTOR_SENSOR,
        "power_outlet" => POWER_OUTLET,
        "air_conditioner" => AIR_CONDITIONER,
        _ => return None,
    };
    Some(specs)
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7 && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Check that `device_type` accepts `name = value`.
pub fn validate_attribute(
    device_type: &str,
    name: &str,
    value: &str,
    allow_readonly: bool,
) -> Result<(), ToolError> {
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() {
        return Err(ToolError::malformed("command must be provided"));
    }
    if value.is_empty() {
        return Err(ToolError::malformed("value must be provided"));
    }

    let specs = catalog(device_type)
        .ok_or_else(|| ToolError::rule(format!("Invalid accessory type '{}'", device_type)))?;
    let spec = specs
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| ToolError::rule(format!("Invalid command '{}' for {}", name, device_type)))?;
    if spec.readonly && !allow_readonly {
        return Err(ToolError::rule(format!(
            "Attribute '{}' is read-only for {}",
            name, device_type
        )));
    }

    let valid = match spec.kind {
        AttributeKind::Enum(values) => values.contains(&value),
        AttributeKind::Numeric { min, max } => value
            .parse::<f64>()
            .map(|n| n >= min && n <= max)
            .unwrap_or(false),
        AttributeKind::Color => !value.starts_with('#') || is_hex_color(value),
    };
    if valid {
        Ok(())
    } else {
        Err(ToolError::rule(format!(
            "Invalid value '{}' for {} {}",
            value, device_type, name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_and_numeric_values() {
        assert!(validate_attribute("bulb", "power", "on", false).is_ok());
        assert!(validate_attribute("bulb", "brightness", "100", false).is_ok());
        assert!(validate_attribute("bulb", "brightness", "101", false).is_err());
        assert!(validate_attribute("bulb", "brightness", "dim", false).is_err());
        assert!(validate_attribute("door_lock", "lock_state", "ajar", false).is_err());
        assert!(validate_attribute("air_conditioner", "target_temperature", "88", false).is_err());
        assert!(validate_attribute("thermostat", "target_temperature", "88", false).is_ok());
    }

    #[test]
    fn test_colors() {
        assert!(validate_attribute("bulb", "color", "#FFaa00", false).is_ok());
        assert!(validate_attribute("bulb", "color", "warm white", false).is_ok());
        assert!(validate_attribute("bulb", "color", "#FFF", false).is_err());
        assert!(validate_attribute("bulb", "color", "#GGGGGG", false).is_err());
    }

    #[test]
    fn test_readonly_only_for_triggers() {
        let err = validate_attribute("motion_sensor", "motion_state", "clear", false).unwrap_err();
        assert_eq!(err.to_string(), "Attribute 'motion_state' is read-only for motion_sensor");
        assert!(validate_attribute("motion_sensor", "motion_state", "clear", true).is_ok());
    }

    #[test]
    fn test_unknown_type_or_command() {
        assert!(validate_attribute("toaster", "power", "on", true).is_err());
        let err = validate_attribute("camera", "zoom", "2", false).unwrap_err();
        assert_eq!(err.to_string(), "Invalid command 'zoom' for camera");
    }
}
