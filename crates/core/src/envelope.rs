// crates/core/src/envelope.rs

//! `{"success": ...}` result envelope.

use serde_json::{json, Map, Value};

use crate::error::ToolError;

/// Success envelope. Object payloads are merged into the envelope; anything
/// else is nested under `"result"`.
pub fn success(payload: Value) -> Value {
    let mut out = Map::new();
    out.insert("success".to_string(), Value::Bool(true));
    match payload {
        Value::Object(fields) => {
            for (k, v) in fields {
                if k != "success" {
                    out.insert(k, v);
                }
            }
        }
        Value::Null => {}
        other => {
            out.insert("result".to_string(), other);
        }
    }
    Value::Object(out)
}

pub fn failure(err: &ToolError) -> Value {
    json!({ "success": false, "error": err.to_string() })
}

pub fn wrap(outcome: Result<Value, ToolError>) -> Value {
    match outcome {
        Ok(payload) => success(payload),
        Err(err) => failure(&err),
    }
}

/// Serialize an outcome to the JSON string handed back to the harness.
pub fn render(outcome: Result<Value, ToolError>) -> String {
    wrap(outcome).to_string()
}
