// capabilities/crates/wiki_pages/src/tables.rs

//! Table schemas and vocabularies for the wiki domain.
//!
//! Rows use the storage names (`spaces`, `pages`, `content_type = "page"`);
//! tools speak of workspaces and documents and translate at the edge.

use mock_store_core::{CascadeRule, TableSchema};

pub const USERS: TableSchema = TableSchema::new("users", "user_id", "User");
pub const SPACES: TableSchema = TableSchema::new("spaces", "space_id", "Workspace");
pub const PAGES: TableSchema = TableSchema::new("pages", "page_id", "Document");
pub const PAGE_VERSIONS: TableSchema =
    TableSchema::new("page_versions", "page_version_id", "Document version");
pub const PERMISSIONS: TableSchema = TableSchema::new("permissions", "permission_id", "Permission");
pub const ATTACHMENTS: TableSchema = TableSchema::new("attachments", "attachment_id", "Attachment");
pub const DATABASES: TableSchema = TableSchema::new("databases", "database_id", "Table");
pub const WHITEBOARDS: TableSchema = TableSchema::new("whiteboards", "whiteboard_id", "Whiteboard");
pub const SMART_LINKS: TableSchema = TableSchema::new("smart_links", "smart_link_id", "Pack card");

pub const DOCUMENT_STATUSES: &[&str] = &["current", "draft", "locked", "archived", "deleted"];
pub const OPERATIONS: &[&str] = &["view", "edit", "delete", "create", "admin", "restrict_other_users"];
pub const ATTACHMENT_STATUSES: &[&str] = &["current", "archived", "deleted"];

/// Permission targets: tool name and stored name.
pub const CONTENT_TYPES: &[(&str, &str)] = &[("workspace", "space"), ("document", "page")];

/// Attachment targets: tool name, stored name and backing table.
pub const ATTACHMENT_TARGETS: &[(&str, &str, TableSchema)] = &[
    ("document", "page", PAGES),
    ("table", "database", DATABASES),
    ("whiteboard", "whiteboard", WHITEBOARDS),
    ("pack_card", "smart_link", SMART_LINKS),
];

pub fn stored_content_type(surface: &str) -> Option<&'static str> {
    CONTENT_TYPES
        .iter()
        .find(|(s, _)| *s == surface)
        .map(|(_, stored)| *stored)
}

/// Tool name for a stored content type; unknown values pass through.
pub fn surface_content_type(stored: &str) -> &str {
    let permission_target = CONTENT_TYPES.iter().find(|(_, st)| *st == stored).map(|(s, _)| *s);
    let attachment_target = || {
        ATTACHMENT_TARGETS
            .iter()
            .find(|(_, st, _)| *st == stored)
            .map(|(s, _, _)| *s)
    };
    permission_target.or_else(attachment_target).unwrap_or(stored)
}

/// Everything a hard-deleted document takes with it. Child documents are
/// refused up front rather than cascaded.
pub const PAGE_CASCADE: &[CascadeRule] = &[
    CascadeRule::new(PAGE_VERSIONS.name, "page_id"),
    CascadeRule::new(ATTACHMENTS.name, "content_id").scoped("content_type", "page"),
    CascadeRule::new(ATTACHMENTS.name, "host_page_id"),
    CascadeRule::new(PERMISSIONS.name, "content_id").scoped("content_type", "page"),
];
