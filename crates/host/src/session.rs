// crates/host/src/session.rs

//! Console commands over one domain's store and interfaces.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use mock_store_core::{Interface, Store, ToolContext};
use serde_json::{json, Value};
use tracing::info;

use crate::catalog::{self, Domain};
use crate::config::HostConfig;

pub const HELP: &str = "\
Commands:
  interfaces            list the domain's interfaces
  use <interface>       switch interface
  tools                 list tools of the current interface
  info <tool>           show a tool's definition
  tables                list tables with row counts
  show <table> [id]     print a table or one record
  save [path]           write the store as JSON
  <tool> <json-args>    call a tool, e.g. get_incidents {\"filters\": {}}
  quit | exit";

pub enum Reply {
    Text(String),
    ToolResult { tool: String, envelope: Value },
    Quit,
}

pub struct Session {
    domain: &'static Domain,
    interfaces: Vec<Interface>,
    active: usize,
    store: Store,
    ctx: ToolContext,
    store_path: Option<PathBuf>,
}

impl Session {
    /// Session for the configured domain, over the store file when it exists
    /// and the domain's fixtures otherwise.
    pub fn open(config: &HostConfig) -> Result<Self> {
        let domain = catalog::find(&config.domain)?;
        let store = match &config.store_path {
            Some(path) if path.exists() => Store::load_from_file(path)?,
            _ => (domain.seed)(),
        };
        Self::new(
            domain,
            store,
            config.tool_context()?,
            config.store_path.clone(),
            config.interface.as_deref(),
        )
    }

    pub fn new(
        domain: &'static Domain,
        store: Store,
        ctx: ToolContext,
        store_path: Option<PathBuf>,
        interface: Option<&str>,
    ) -> Result<Self> {
        let interfaces = (domain.interfaces)();
        if interfaces.is_empty() {
            bail!("domain '{}' has no interfaces", domain.name);
        }
        let mut session = Self {
            domain,
            interfaces,
            active: 0,
            store,
            ctx,
            store_path,
        };
        if let Some(name) = interface {
            session.select(name)?;
        }
        Ok(session)
    }

    pub fn domain(&self) -> &'static str {
        self.domain.name
    }

    pub fn interface(&self) -> &Interface {
        &self.interfaces[self.active]
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn select(&mut self, name: &str) -> Result<()> {
        match self.interfaces.iter().position(|i| i.name == name) {
            Some(index) => {
                self.active = index;
                Ok(())
            }
            None => {
                let known: Vec<&str> = self.interfaces.iter().map(|i| i.name).collect();
                bail!(
                    "unknown interface '{}' in domain '{}' (available: {})",
                    name,
                    self.domain.name,
                    known.join(", ")
                )
            }
        }
    }

    pub fn call_tool(&mut self, tool: &str, args: Value) -> Value {
        self.interfaces[self.active].call(tool, &mut self.store, &self.ctx, args)
    }

    /// Write the store to `path`, or to the configured store file.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let target = match (path, &self.store_path) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path.clone(),
            (None, None) => bail!("no path given and MOCK_STORE_PATH is not set"),
        };
        self.store.save_to_file(&target)?;
        info!(path = %target.display(), "store saved");
        Ok(target)
    }

    /// Save to the configured store file, if there is one.
    pub fn persist(&self) -> Result<Option<PathBuf>> {
        match self.store_path {
            Some(_) => self.save(None).map(Some),
            None => Ok(None),
        }
    }

    pub fn handle(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => Ok(Reply::Text(String::new())),
            c if c.eq_ignore_ascii_case("quit") || c.eq_ignore_ascii_case("exit") => Ok(Reply::Quit),
            "help" => Ok(Reply::Text(HELP.to_string())),
            "interfaces" => {
                let lines: Vec<String> = self
                    .interfaces
                    .iter()
                    .enumerate()
                    .map(|(i, iface)| {
                        let marker = if i == self.active { "*" } else { " " };
                        format!("{} {} ({} tools): {}", marker, iface.name, iface.len(), iface.summary)
                    })
                    .collect();
                Ok(Reply::Text(lines.join("\n")))
            }
            "use" => {
                self.select(rest)?;
                Ok(Reply::Text(format!("Using {}", self.interface().name)))
            }
            "tools" => {
                let lines: Vec<String> = self
                    .interface()
                    .tools()
                    .map(|t| format!("{:<32} {}", t.name(), first_sentence(t.description())))
                    .collect();
                Ok(Reply::Text(lines.join("\n")))
            }
            "info" => {
                let tool = self
                    .interface()
                    .get(rest)
                    .with_context(|| format!("no tool '{}' in {}", rest, self.interface().name))?;
                Ok(Reply::Text(serde_json::to_string_pretty(&tool.get_info())?))
            }
            "tables" => {
                let lines: Vec<String> = self
                    .store
                    .table_names()
                    .map(|name| format!("{:<28} {}", name, self.store.len(name)))
                    .collect();
                Ok(Reply::Text(lines.join("\n")))
            }
            "show" => self.show(rest).map(Reply::Text),
            "save" => {
                let path = (!rest.is_empty()).then(|| Path::new(rest));
                let saved = self.save(path)?;
                Ok(Reply::Text(format!("Saved store to {}", saved.display())))
            }
            tool => {
                let args = if rest.is_empty() {
                    json!({})
                } else {
                    serde_json::from_str(rest)
                        .with_context(|| format!("arguments for {} must be JSON", tool))?
                };
                let envelope = self.call_tool(tool, args);
                Ok(Reply::ToolResult {
                    tool: tool.to_string(),
                    envelope,
                })
            }
        }
    }

    fn show(&self, rest: &str) -> Result<String> {
        let mut parts = rest.split_whitespace();
        let Some(name) = parts.next() else {
            bail!("usage: show <table> [id]");
        };
        let table = self
            .store
            .table(name)
            .with_context(|| format!("no table '{}'", name))?;
        let value = match parts.next() {
            Some(id) => {
                let record = table
                    .get(id)
                    .with_context(|| format!("no record '{}' in {}", id, name))?;
                Value::Object(record.clone())
            }
            None => serde_json::to_value(table)?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

fn first_sentence(text: &str) -> &str {
    match text.find(". ") {
        Some(end) => &text[..=end],
        None => text,
    }
}
