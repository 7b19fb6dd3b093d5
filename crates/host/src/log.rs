// crates/host/src/log.rs

//! Colored console output for the interactive session.

use std::fmt::Display;

use serde_json::Value;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Session header: domain, active interface and store size.
pub fn banner(domain: &str, interface: &str, tables: usize) {
    eprintln!(
        "{BLUE}{BOLD}[{}]{RESET} {CYAN}{}{RESET} {DIM}({} tables){RESET}",
        domain, interface, tables
    );
}

/// Log a tool call.
pub fn tool_call(name: &str, args: &str) {
    eprintln!("{CYAN}→ {}{RESET} {DIM}{}{RESET}", name, truncate(args, 100));
}

/// Log a tool result from its envelope.
pub fn tool_result(name: &str, envelope: &Value) {
    if envelope["success"] == true {
        eprintln!("{GREEN}✓ {}{RESET}", name);
    } else {
        let reason = envelope["error"].as_str().unwrap_or("unknown error");
        eprintln!("{RED}✗ {}{RESET}: {}", name, truncate(reason, 150));
    }
}

pub fn error(message: impl Display) {
    eprintln!("{RED}{BOLD}✗ Error:{RESET} {}", message);
}

pub fn warn(message: impl Display) {
    eprintln!("{YELLOW}[warn]{RESET} {}", message);
}

pub fn success(message: impl Display) {
    eprintln!("{GREEN}[ok]{RESET} {}", message);
}

/// Single-line preview of at most `max` characters.
fn truncate(s: &str, max: usize) -> String {
    let clean: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = clean.trim();
    if trimmed.chars().count() > max {
        let head: String = trimmed.chars().take(max).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_flattens_lines() {
        assert_eq!(truncate("  {\n\"a\": 1\n}  ", 100), "{ \"a\": 1 }");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("ééééé", 3), "ééé...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
