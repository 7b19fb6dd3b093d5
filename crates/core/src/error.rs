// crates/core/src/error.rs

//! Error taxonomy shared by every tool.
//!
//! Nothing here is fatal: each variant is rendered into the
//! `{"success": false, "error": ...}` envelope and handed back to the caller.

use thiserror::Error;

/// Error type for tool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Wrong argument type, missing required argument, unparseable value.
    #[error("{0}")]
    MalformedInput(String),

    /// A referenced row does not exist in its table.
    #[error("{0}")]
    NotFound(String),

    /// The referenced row exists but is in the wrong state.
    #[error("{0}")]
    Referential(String),

    /// Enum, range, uniqueness or status-transition violation.
    #[error("{0}")]
    DomainRule(String),

    #[error("No fields to update. Please provide at least one field to update.")]
    NoFieldsToUpdate,
}

impl ToolError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// `<entity> with ID '<id>' not found`
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} with ID '{}' not found", entity, id))
    }

    pub fn missing(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn referential(msg: impl Into<String>) -> Self {
        Self::Referential(msg.into())
    }

    pub fn rule(msg: impl Into<String>) -> Self {
        Self::DomainRule(msg.into())
    }

    /// Enum membership failure with the allowed values spelled out.
    pub fn invalid_choice(field: &str, value: &str, allowed: &[&str]) -> Self {
        Self::DomainRule(format!(
            "Invalid {} '{}'. Must be one of: {}",
            field,
            value,
            allowed.join(", ")
        ))
    }

    /// Stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::MalformedInput(_) => "malformed_input",
            ToolError::NotFound(_) => "not_found",
            ToolError::Referential(_) => "referential",
            ToolError::DomainRule(_) => "domain_rule",
            ToolError::NoFieldsToUpdate => "no_op",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ToolError::not_found("Employee", "42");
        assert_eq!(err.to_string(), "Employee with ID '42' not found");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_invalid_choice_lists_values() {
        let err = ToolError::invalid_choice("status", "done", &["pending", "completed"]);
        assert_eq!(
            err.to_string(),
            "Invalid status 'done'. Must be one of: pending, completed"
        );
    }

    #[test]
    fn test_no_op_message() {
        assert!(ToolError::NoFieldsToUpdate
            .to_string()
            .starts_with("No fields to update"));
    }
}
