// crates/host/src/config.rs

//! Host settings taken from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use mock_store_core::{FixedClock, ToolContext};

pub const DEFAULT_DOMAIN: &str = "hr_admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// JSON store file. Loaded at start when it exists, and the default
    /// target of `save`. Without it the domain's fixtures are used.
    pub store_path: Option<PathBuf>,
    pub domain: String,
    /// Interface selected at start; the domain's first one otherwise.
    pub interface: Option<String>,
    /// Pins the clock, `YYYY-MM-DDTHH:MM:SS`.
    pub fixed_timestamp: Option<String>,
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            store_path: var("MOCK_STORE_PATH").map(PathBuf::from),
            domain: var("MOCK_DOMAIN").unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            interface: var("MOCK_INTERFACE"),
            fixed_timestamp: var("MOCK_FIXED_TIMESTAMP"),
        }
    }

    /// Tool context with the configured clock.
    pub fn tool_context(&self) -> Result<ToolContext> {
        match &self.fixed_timestamp {
            Some(ts) => {
                let clock = FixedClock::parse(ts).context("MOCK_FIXED_TIMESTAMP is invalid")?;
                Ok(ToolContext::new(Arc::new(clock)))
            }
            None => Ok(ToolContext::system()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> HostConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HostConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.domain, "hr_admin");
        assert_eq!(cfg.store_path, None);
        assert_eq!(cfg.interface, None);
        assert!(cfg.tool_context().is_ok());
    }

    #[test]
    fn test_reads_every_variable() {
        let cfg = config(&[
            ("MOCK_STORE_PATH", "/tmp/store.json"),
            ("MOCK_DOMAIN", "wiki_pages"),
            ("MOCK_INTERFACE", " interface_2 "),
            ("MOCK_FIXED_TIMESTAMP", "2025-01-02T03:04:05"),
        ]);
        assert_eq!(cfg.store_path, Some(PathBuf::from("/tmp/store.json")));
        assert_eq!(cfg.domain, "wiki_pages");
        assert_eq!(cfg.interface.as_deref(), Some("interface_2"));
        let ctx = cfg.tool_context().unwrap();
        assert_eq!(ctx.timestamp(), "2025-01-02T03:04:05");
    }

    #[test]
    fn test_blank_domain_falls_back() {
        assert_eq!(config(&[("MOCK_DOMAIN", "  ")]).domain, "hr_admin");
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let cfg = config(&[("MOCK_FIXED_TIMESTAMP", "tomorrow")]);
        assert!(cfg.tool_context().is_err());
    }
}
