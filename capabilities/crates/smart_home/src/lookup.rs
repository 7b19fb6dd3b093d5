// capabilities/crates/smart_home/src/lookup.rs

//! Name and e-mail resolution shared by the smart-home tools.

use mock_store_core::validate::require_text;
use mock_store_core::{Record, RecordExt, Store, TableSchema, ToolError};

use crate::tables::{HOMES, HOME_USERS, USERS};

fn same_text(a: Option<&str>, b: &str) -> bool {
    a.is_some_and(|a| a.trim().eq_ignore_ascii_case(b.trim()))
}

/// Home by case-insensitive name.
pub fn home_by_name<'a>(store: &'a Store, home_name: Option<&str>) -> Result<(String, &'a Record), ToolError> {
    let name = require_text(home_name, "home_name")?;
    store
        .table(HOMES.name)
        .and_then(|t| t.iter().find(|(_, h)| same_text(h.str_field("home_name"), name)))
        .map(|(id, home)| (id.to_string(), home))
        .ok_or_else(|| ToolError::missing(format!("Home '{}' not found", name)))
}

/// User by case-insensitive e-mail.
pub fn user_by_email<'a>(
    store: &'a Store,
    email: Option<&str>,
    field: &str,
) -> Result<(String, &'a Record), ToolError> {
    let email = require_text(email, field)?;
    store
        .table(USERS.name)
        .and_then(|t| t.iter().find(|(_, u)| same_text(u.str_field("email"), email)))
        .map(|(id, user)| (id.to_string(), user))
        .ok_or_else(|| ToolError::missing(format!("User with email '{}' not found", email.to_lowercase())))
}

/// Role of `user_id` in `home_id`, if they belong to it.
pub fn membership_role<'a>(store: &'a Store, home_id: &str, user_id: &str) -> Option<&'a str> {
    store.table(HOME_USERS.name)?.values().find_map(|hu| {
        (hu.refers_to("home_id", home_id) && hu.refers_to("user_id", user_id))
            .then(|| hu.str_field("role"))
            .flatten()
    })
}

pub fn is_home_admin(store: &Store, home_id: &str, user_id: &str) -> bool {
    membership_role(store, home_id, user_id) == Some("admin")
}

/// Row of `schema` that must also belong to `home_id`.
pub fn require_in_home<'a>(
    store: &'a Store,
    schema: &TableSchema,
    id: &str,
    home_id: &str,
    home_name: &str,
) -> Result<&'a Record, ToolError> {
    let row = store
        .get(schema.name, id)
        .ok_or_else(|| ToolError::missing(format!("{} '{}' not found", schema.entity, id)))?;
    if !row.refers_to("home_id", home_id) {
        return Err(ToolError::referential(format!(
            "{} '{}' does not belong to home '{}'",
            schema.entity,
            id,
            home_name.trim()
        )));
    }
    Ok(row)
}

/// True when another row of `table` in the same home already uses `name`.
pub fn name_taken_in_home(
    store: &Store,
    table: &str,
    name_field: &str,
    home_id: &str,
    name: &str,
    except_id: Option<&str>,
) -> bool {
    store.table(table).is_some_and(|t| {
        t.iter().any(|(id, row)| {
            Some(id) != except_id
                && row.refers_to("home_id", home_id)
                && same_text(row.str_field(name_field), name)
        })
    })
}

/// Strip blank optional text to `None`.
pub fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
