// crates/core/src/tool.rs

//! Tool trait and invocation context.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::envelope;
use crate::error::ToolError;
use crate::store::Store;

/// Per-call context handed to every tool.
#[derive(Clone)]
pub struct ToolContext {
    clock: Arc<dyn Clock>,
}

impl ToolContext {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Context pinned to the fixture instant.
    pub fn fixed() -> Self {
        Self::new(Arc::new(FixedClock::fixture()))
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn timestamp(&self) -> String {
        self.clock.timestamp()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::fixed()
    }
}

/// A single emulated API operation over the shared store.
///
/// Implementors supply `invoke`; `call` wraps it in the result envelope so
/// every outcome, including validation failures, reaches the caller as JSON.
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON-Schema object describing the arguments.
    fn parameters_schema(&self) -> Value;

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError>;

    /// Function-calling definition: `{"type": "function", "function": {...}}`.
    fn get_info(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters_schema(),
            }
        })
    }

    /// Invoke and wrap the outcome in the `{"success": ...}` envelope.
    fn call(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Value {
        debug!(tool = self.name(), "invoking tool");
        let outcome = self.invoke(store, ctx, args);
        if let Err(err) = &outcome {
            warn!(tool = self.name(), kind = err.kind(), error = %err, "tool call rejected");
        }
        envelope::wrap(outcome)
    }

    /// String-in, string-out form used by harnesses that speak raw JSON.
    fn call_json(&self, store: &mut Store, ctx: &ToolContext, args: &str) -> String {
        let args = if args.trim().is_empty() {
            Ok(json!({}))
        } else {
            serde_json::from_str(args)
                .map_err(|e| ToolError::malformed(format!("Invalid JSON arguments: {}", e)))
        };
        match args {
            Ok(args) => self.call(store, ctx, args).to_string(),
            Err(err) => envelope::render(Err(err)),
        }
    }
}

/// Deserialize tool arguments into a typed struct.
///
/// `null` is treated as an empty argument object.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ToolError::malformed(format!("Invalid arguments: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    struct Echo;

    #[derive(Deserialize)]
    struct EchoArgs {
        message: String,
    }

    impl Tool for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo a message back"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"message": {"type": "string"}},
                "required": ["message"]
            })
        }

        fn invoke(&self, _store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
            let args: EchoArgs = parse_args(args)?;
            Ok(json!({"message": args.message, "at": ctx.timestamp()}))
        }
    }

    #[test]
    fn test_get_info_shape() {
        let info = Echo.get_info();
        assert_eq!(info["type"], "function");
        assert_eq!(info["function"]["name"], "echo");
        assert_eq!(info["function"]["parameters"]["required"][0], "message");
    }

    #[test]
    fn test_call_wraps_success() {
        let mut store = Store::new();
        let out = Echo.call(&mut store, &ToolContext::fixed(), json!({"message": "hi"}));
        assert_eq!(out["success"], true);
        assert_eq!(out["message"], "hi");
        assert_eq!(out["at"], "2025-12-12T12:00:00");
    }

    #[test]
    fn test_call_wraps_malformed() {
        let mut store = Store::new();
        let out = Echo.call(&mut store, &ToolContext::fixed(), json!({"message": 3}));
        assert_eq!(out["success"], false);
        assert!(out["error"].as_str().unwrap().starts_with("Invalid arguments"));
    }

    #[test]
    fn test_call_json_bad_input() {
        let mut store = Store::new();
        let s = Echo.call_json(&mut store, &ToolContext::fixed(), "{not json");
        let v: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(v["success"], false);
    }
}
