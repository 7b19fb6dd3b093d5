// crates/host/src/main.rs

mod catalog;
mod config;
mod log;
mod session;

use std::io::{self, BufRead, Read, Write};

use anyhow::{Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use config::HostConfig;
use session::{Reply, Session};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = HostConfig::from_env();
    let mut session = Session::open(&config)?;

    match std::env::args().nth(1) {
        Some(tool) => run_once(&mut session, &tool),
        None => repl(&mut session),
    }
}

/// Call one tool with JSON arguments from stdin and print the envelope.
/// Changes are written back when MOCK_STORE_PATH is set.
fn run_once(session: &mut Session, tool: &str) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read tool arguments from stdin")?;
    let args = if input.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&input).context("stdin must contain the tool's JSON arguments")?
    };

    let envelope = session.call_tool(tool, args);
    println!("{}", envelope);
    if envelope["success"] == true {
        session.persist()?;
    }
    Ok(())
}

fn repl(session: &mut Session) -> Result<()> {
    log::banner(
        session.domain(),
        session.interface().name,
        session.store().table_names().count(),
    );
    println!("Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((tool, args)) = line.split_once(char::is_whitespace) {
            if session.interface().get(tool).is_some() {
                log::tool_call(tool, args);
            }
        }

        match session.handle(line) {
            Ok(Reply::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::ToolResult { tool, envelope }) => {
                log::tool_result(&tool, &envelope);
                println!("{}\n", serde_json::to_string_pretty(&envelope)?);
            }
            Err(e) => log::error(format!("{e:#}")),
        }
    }

    match session.persist() {
        Ok(Some(path)) => log::success(format!("store written to {}", path.display())),
        Ok(None) => log::warn("MOCK_STORE_PATH not set; changes were not saved"),
        Err(e) => log::error(format!("{e:#}")),
    }
    Ok(())
}
