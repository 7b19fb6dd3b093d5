// crates/core/src/interface.rs

//! Named, ordered tool registration lists.

use serde_json::Value;

use crate::envelope;
use crate::error::ToolError;
use crate::store::Store;
use crate::tool::{Tool, ToolContext};

/// One "interface": the set of tools a harness scenario exposes.
pub struct Interface {
    pub name: &'static str,
    pub summary: &'static str,
    tools: Vec<Box<dyn Tool>>,
}

impl Interface {
    pub fn new(name: &'static str, summary: &'static str) -> Self {
        Self {
            name,
            summary,
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn tools(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// `get_info()` of every tool, in registration order.
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.get_info()).collect()
    }

    /// Dispatch by name. Unknown tools produce a failure envelope.
    pub fn call(&self, name: &str, store: &mut Store, ctx: &ToolContext, args: Value) -> Value {
        match self.get(name) {
            Some(tool) => tool.call(store, ctx, args),
            None => envelope::failure(&ToolError::malformed(format!(
                "Unknown tool '{}' in interface '{}'",
                name, self.name
            ))),
        }
    }
}

impl std::fmt::Debug for Interface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interface")
            .field("name", &self.name)
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Count;

    impl Tool for Count {
        fn name(&self) -> &'static str {
            "count_rows"
        }

        fn description(&self) -> &'static str {
            "Count rows of a table"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {"table": {"type": "string"}}})
        }

        fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
            let table = args["table"].as_str().unwrap_or_default();
            Ok(json!({"count": store.len(table)}))
        }
    }

    #[test]
    fn test_dispatch_and_unknown() {
        let iface = Interface::new("interface_1", "test").with_tool(Count);
        assert_eq!(iface.names(), vec!["count_rows"]);
        assert_eq!(iface.tool_definitions().len(), 1);

        let mut store = Store::new();
        let ctx = ToolContext::fixed();
        let ok = iface.call("count_rows", &mut store, &ctx, json!({"table": "x"}));
        assert_eq!(ok, json!({"success": true, "count": 0}));

        let bad = iface.call("nope", &mut store, &ctx, json!({}));
        assert_eq!(bad["success"], false);
        assert!(bad["error"].as_str().unwrap().contains("Unknown tool 'nope'"));
    }
}
