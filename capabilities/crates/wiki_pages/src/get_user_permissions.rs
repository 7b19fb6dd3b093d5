// capabilities/crates/wiki_pages/src/get_user_permissions.rs

use mock_store_core::validate::require_text;
use mock_store_core::{de_opt_id, parse_args, Record, RecordExt, Store, Tool, ToolContext, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::documents::ancestors;
use crate::grant_access_permission::present_permission;
use crate::tables::{PAGES, PERMISSIONS, SPACES, USERS};

#[derive(Deserialize)]
struct PermissionFilter {
    email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    document_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    workspace_id: Option<String>,
}

#[derive(Deserialize)]
struct GetUserPermissionsInput {
    filter: PermissionFilter,
}

pub struct GetUserPermissions;

fn held_on<'a>(
    store: &'a Store,
    user_id: &'a str,
    content_type: &'a str,
    content_id: &'a str,
) -> impl Iterator<Item = &'a Record> + 'a {
    store
        .table(PERMISSIONS.name)
        .into_iter()
        .flat_map(|t| t.values())
        .filter(move |p| {
            p.refers_to("user_id", user_id)
                && p.str_field("content_type") == Some(content_type)
                && p.refers_to("content_id", content_id)
        })
}

fn annotated(permission: &Record, source: &str, via: Option<&str>) -> Value {
    let mut out = present_permission(permission);
    if let Value::Object(map) = &mut out {
        map.insert("source".into(), json!(source));
        map.insert("inherited_from".into(), json!(via));
    }
    out
}

impl Tool for GetUserPermissions {
    fn name(&self) -> &'static str {
        "get_user_permissions"
    }

    fn description(&self) -> &'static str {
        "Permissions of the user with filter.email. With filter.document_id the result also \
         includes permissions inherited from parent documents and the workspace; with \
         filter.workspace_id only direct workspace permissions are returned; otherwise every \
         permission the user holds."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filter": {
                    "type": "object",
                    "properties": {
                        "email": {"type": "string"},
                        "document_id": {"type": "string"},
                        "workspace_id": {"type": "string"}
                    },
                    "required": ["email"]
                }
            },
            "required": ["filter"]
        })
    }

    fn invoke(&self, store: &mut Store, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let GetUserPermissionsInput { filter } = parse_args(args)?;
        let email = require_text(filter.email.as_deref(), "email")?;
        let user_id = store
            .table(USERS.name)
            .and_then(|t| {
                t.iter().find(|(_, u)| {
                    u.str_field("email").is_some_and(|e| e.eq_ignore_ascii_case(email))
                })
            })
            .map(|(id, _)| id.to_string())
            .ok_or_else(|| ToolError::missing(format!("User with email '{}' not found", email)))?;
        if let Some(doc) = filter.document_id.as_deref() {
            store.require(&PAGES, doc)?;
        }
        if let Some(space) = filter.workspace_id.as_deref() {
            store.require(&SPACES, space)?;
        }

        let scope = (filter.document_id.as_deref(), filter.workspace_id.as_deref());
        let permissions: Vec<Value> = match scope {
            (Some(doc), _) => {
                let mut out: Vec<Value> = held_on(store, &user_id, "page", doc)
                    .map(|p| annotated(p, "direct", None))
                    .collect();
                for (kind, id) in ancestors(store, doc) {
                    let label = if kind == "space" { "workspace" } else { "document" };
                    let via = format!("{}:{}", label, id);
                    out.extend(
                        held_on(store, &user_id, kind, &id)
                            .map(|p| annotated(p, "inherited", Some(via.as_str()))),
                    );
                }
                out
            }
            (None, Some(space)) => held_on(store, &user_id, "space", space)
                .map(|p| annotated(p, "direct", None))
                .collect(),
            (None, None) => store
                .table(PERMISSIONS.name)
                .into_iter()
                .flat_map(|t| t.values())
                .filter(|p| p.refers_to("user_id", &user_id))
                .map(|p| annotated(p, "direct", None))
                .collect(),
        };

        Ok(json!({
            "user_id": user_id,
            "count": permissions.len(),
            "permissions": permissions,
        }))
    }
}
