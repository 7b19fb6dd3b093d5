// capabilities/crates/wiki_pages/tests/integration.rs

use mock_store_core::{Interface, Store, ToolContext};
use serde_json::{json, Value};
use wiki_pages::fixtures::seed_store;
use wiki_pages::{interface_1, interface_2};

fn call(iface: &Interface, store: &mut Store, tool: &str, args: Value) -> Value {
    iface.call(tool, store, &ToolContext::fixed(), args)
}

fn error_of(out: &Value) -> &str {
    assert_eq!(out["success"], false, "expected failure, got {}", out);
    out["error"].as_str().unwrap_or_default()
}

#[test]
fn test_insert_document_records_first_version() {
    let mut store = seed_store();
    let out = call(
        &interface_1(),
        &mut store,
        "insert_document",
        json!({"title": "Deploy Guide", "workspace_id": 1, "created_by": "2",
               "parent_document_id": "2", "body_storage": "<p>steps</p>"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["document_id"], "6");
    assert_eq!(out["document"]["status"], "current");
    assert_eq!(out["document"]["parent_document_id"], "2");
    assert_eq!(out["document"]["created_at"], "2025-12-12T12:00:00");
    assert_eq!(out["version"]["version_id"], "7");
    assert_eq!(out["version"]["version_number"], 1);
    assert_eq!(store.get("pages", "6").unwrap()["space_id"], "1");
}

#[test]
fn test_insert_document_rejections_leave_store_alone() {
    let mut store = seed_store();
    let before = store.clone();
    let iface = interface_1();

    let out = call(
        &iface,
        &mut store,
        "insert_document",
        json!({"title": "architecture", "workspace_id": "1", "created_by": "1", "parent_document_id": "1"}),
    );
    assert_eq!(
        error_of(&out),
        "Document with title 'architecture' already exists at this hierarchy level"
    );

    let out = call(
        &iface,
        &mut store,
        "insert_document",
        json!({"title": "Notes", "workspace_id": "1", "created_by": "1", "parent_document_id": "3"}),
    );
    assert_eq!(error_of(&out), "Parent document must be in the same workspace");

    let out = call(
        &iface,
        &mut store,
        "insert_document",
        json!({"title": "Notes", "workspace_id": "1", "created_by": "3"}),
    );
    assert_eq!(error_of(&out), "User with ID '3' is not active");

    let out = call(
        &iface,
        &mut store,
        "insert_document",
        json!({"title": "Notes", "workspace_id": "9", "created_by": "1"}),
    );
    assert_eq!(error_of(&out), "Workspace with ID '9' not found");
    assert_eq!(store, before);
}

#[test]
fn test_alter_document_snapshots_content_changes() {
    let mut store = seed_store();
    let iface = interface_1();
    let out = call(
        &iface,
        &mut store,
        "alter_document",
        json!({"fields": {"document_id": "2", "updated_by": 2, "body_storage": "<p>Services v3</p>"}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["document"]["body_storage"], "<p>Services v3</p>");
    assert_eq!(out["document"]["updated_by"], "2");
    assert_eq!(out["document"]["updated_at"], "2025-12-12T12:00:00");
    assert_eq!(out["version"]["version_id"], "7");
    assert_eq!(out["version"]["version_number"], 3);

    let out = call(
        &iface,
        &mut store,
        "alter_document",
        json!({"fields": {"document_id": "4", "updated_by": "2", "status": "current"}}),
    );
    assert_eq!(out["document"]["status"], "current");
    assert_eq!(out["version"], Value::Null);
    assert_eq!(store.len("page_versions"), 7);
}

#[test]
fn test_alter_document_guards_the_hierarchy() {
    let mut store = seed_store();
    let iface = interface_1();
    let out = call(
        &iface,
        &mut store,
        "alter_document",
        json!({"fields": {"document_id": "1", "updated_by": "1", "parent_document_id": "5"}}),
    );
    assert_eq!(error_of(&out), "Document '1' cannot be moved under its own descendant '5'");

    let out = call(
        &iface,
        &mut store,
        "alter_document",
        json!({"fields": {"document_id": "4", "updated_by": "1", "title": "Architecture"}}),
    );
    assert!(error_of(&out).contains("already exists at this hierarchy level"), "{}", out);

    let out = call(
        &iface,
        &mut store,
        "alter_document",
        json!({"fields": {"document_id": "4", "updated_by": "1"}}),
    );
    assert_eq!(
        error_of(&out),
        "No fields to update. Please provide at least one field to update."
    );

    let out = call(
        &iface,
        &mut store,
        "alter_document",
        json!({"fields": {"document_id": "4", "updated_by": "1", "parent_document_id": ""}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["document"]["parent_document_id"], Value::Null);
}

#[test]
fn test_retrieve_document_filters() {
    let mut store = seed_store();
    let iface = interface_1();
    let out = call(
        &iface,
        &mut store,
        "retrieve_document",
        json!({"filters": {"workspace_id": 1, "parent_document_id": "1"}}),
    );
    assert_eq!(out["count"], 2);
    assert_eq!(out["results"][0]["title"], "Architecture");
    assert_eq!(out["results"][1]["title"], "Onboarding");

    let out = call(
        &iface,
        &mut store,
        "retrieve_document",
        json!({"filters": {"workspace_id": "1", "parent_document_id": null}}),
    );
    assert_eq!(out["count"], 1);
    assert_eq!(out["results"][0]["document_id"], "1");

    let out = call(
        &iface,
        &mut store,
        "retrieve_document",
        json!({"filters": "{\"status\": \"draft\"}"}),
    );
    assert_eq!(out["results"][0]["document_id"], "4");

    let out = call(&iface, &mut store, "retrieve_document", json!({}));
    assert_eq!(out["count"], 5);

    let out = call(&iface, &mut store, "retrieve_document", json!({"filters": {"colour": "red"}}));
    assert!(error_of(&out).starts_with("Unsupported filter 'colour'"), "{}", out);
}

#[test]
fn test_versions_are_listed_newest_first() {
    let mut store = seed_store();
    let iface = interface_1();
    let out = call(
        &iface,
        &mut store,
        "collect_document_versions",
        json!({"filters": {"document_id": "2"}}),
    );
    assert_eq!(out["count"], 2);
    assert_eq!(out["results"][0]["version_number"], 2);
    assert_eq!(out["results"][1]["version_number"], 1);

    let out = call(
        &iface,
        &mut store,
        "collect_document_versions",
        json!({"filters": {"version_number": 1}}),
    );
    assert_eq!(out["count"], 5);
}

#[test]
fn test_soft_delete_keeps_the_row() {
    let mut store = seed_store();
    let out = call(
        &interface_1(),
        &mut store,
        "delete_document",
        json!({"document_id": "4", "options": {"updated_by": "2"}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["hard_deleted"], false);
    assert_eq!(out["document"]["status"], "deleted");
    assert_eq!(store.get("pages", "4").unwrap()["status"], "deleted");
    assert!(store.contains("attachments", "1"));
}

#[test]
fn test_hard_delete_refuses_parents() {
    let mut store = seed_store();
    let before = store.clone();
    let out = call(
        &interface_1(),
        &mut store,
        "delete_document",
        json!({"document_id": "2", "options": {"updated_by": "1", "hard_delete": true}}),
    );
    assert!(error_of(&out).contains("has child documents"), "{}", out);
    assert_eq!(store, before);
}

#[test]
fn test_hard_delete_cascades_versions_attachments_and_permissions() {
    let mut store = seed_store();
    let iface = interface_1();
    let out = call(
        &iface,
        &mut store,
        "delete_document",
        json!({"document_id": 5, "options": {"updated_by": "1", "hard_delete": true}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["removed"]["page_versions"], 1);
    assert_eq!(out["removed"]["permissions"], 1);
    assert!(!store.contains("pages", "5"));
    assert!(!store.contains("permissions", "5"));

    let out = call(
        &iface,
        &mut store,
        "delete_document",
        json!({"document_id": "2", "options": {"updated_by": "1", "hard_delete": true}}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert!(!store.contains("page_versions", "2"));
    assert!(!store.contains("page_versions", "3"));
    assert!(!store.contains("attachments", "2"));
    assert!(!store.contains("permissions", "3"));
    assert!(store.contains("attachments", "1"));
    assert!(store.contains("permissions", "2"));

    let out = call(
        &iface,
        &mut store,
        "delete_document",
        json!({"document_id": "4", "options": {"updated_by": "2", "hard_delete": true}}),
    );
    assert_eq!(out["removed"]["attachments"], 1);
    assert_eq!(store.len("attachments"), 0);
}

#[test]
fn test_grant_maps_content_types_and_rejects_duplicates() {
    let mut store = seed_store();
    let iface = interface_2();
    let grant = |store: &mut Store, args: Value| call(&iface, store, "grant_access_permission", args);

    let out = grant(
        &mut store,
        json!({"content": {"content_id": "1", "content_type": "workspace"}, "operation": "view", "user_id": "2"}),
    );
    assert!(error_of(&out).contains("permission_id: '1'"), "{}", out);

    let out = grant(
        &mut store,
        json!({"content": {"content_id": "1", "content_type": "folder"}, "operation": "view", "user_id": "2"}),
    );
    assert_eq!(error_of(&out), "Invalid content_type. Allowed values: 'workspace', 'document'");

    let out = grant(
        &mut store,
        json!({"content": {"content_id": "1", "content_type": "document"}, "operation": "view", "user_id": "3"}),
    );
    assert_eq!(error_of(&out), "User with ID '3' is not active");

    let out = grant(
        &mut store,
        json!({"content": {"content_id": "1", "content_type": "document"}, "operation": "own", "user_id": "1"}),
    );
    assert!(error_of(&out).starts_with("Invalid operation 'own'"), "{}", out);

    let out = grant(
        &mut store,
        json!({"content": {"content_id": 3, "content_type": "document"}, "operation": "view",
               "user_id": "1", "granted_by": "2"}),
    );
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["permission"]["permission_id"], "6");
    assert_eq!(out["permission"]["content_type"], "document");
    assert_eq!(out["permission"]["granted_at"], "2025-12-12T12:00:00");
    assert_eq!(store.get("permissions", "6").unwrap()["content_type"], "page");
}

#[test]
fn test_modify_changes_or_revokes() {
    let mut store = seed_store();
    let iface = interface_2();

    let out = call(
        &iface,
        &mut store,
        "modify_access_permission",
        json!({"permission_id": "1", "operation": "edit"}),
    );
    assert_eq!(out["permission"]["operation"], "edit");
    assert_eq!(out["permission"]["content_type"], "workspace");
    assert_eq!(out["permission"]["granted_at"], "2025-12-12T12:00:00");

    let out = call(&iface, &mut store, "modify_access_permission", json!({"permission_id": "1"}));
    assert_eq!(
        error_of(&out),
        "No fields to update. Please provide at least one field to update."
    );

    let out = call(
        &iface,
        &mut store,
        "modify_access_permission",
        json!({"permission_id": "2", "revoke": true, "operation": "view"}),
    );
    assert_eq!(out["success"], false);

    let out = call(
        &iface,
        &mut store,
        "modify_access_permission",
        json!({"permission_id": 2, "revoke": true}),
    );
    assert_eq!(out["revoked"], true);
    assert_eq!(out["permission"]["content_type"], "document");
    assert!(!store.contains("permissions", "2"));
}

#[test]
fn test_modify_refuses_to_create_a_duplicate() {
    let mut store = seed_store();
    let iface = interface_2();
    let out = call(
        &iface,
        &mut store,
        "grant_access_permission",
        json!({"content": {"content_id": "1", "content_type": "document"}, "operation": "view", "user_id": "2"}),
    );
    assert_eq!(out["permission"]["permission_id"], "6");

    let out = call(
        &iface,
        &mut store,
        "modify_access_permission",
        json!({"permission_id": "6", "operation": "edit"}),
    );
    assert!(error_of(&out).contains("permission_id: '2'"), "{}", out);
    assert_eq!(store.get("permissions", "6").unwrap()["operation"], "view");
}

#[test]
fn test_user_permissions_include_inherited_grants() {
    let mut store = seed_store();
    let iface = interface_2();
    let lookup = |store: &mut Store, filter: Value| {
        call(&iface, store, "get_user_permissions", json!({"filter": filter}))
    };

    let out = lookup(&mut store, json!({"email": "RAJ@wiki.io"}));
    assert_eq!(out["count"], 4);

    let out = lookup(&mut store, json!({"email": "raj@wiki.io", "document_id": "5"}));
    assert_eq!(out["count"], 3);
    assert_eq!(out["permissions"][0]["permission_id"], "3");
    assert_eq!(out["permissions"][0]["source"], "inherited");
    assert_eq!(out["permissions"][0]["inherited_from"], "document:2");
    assert_eq!(out["permissions"][2]["inherited_from"], "workspace:1");

    let out = lookup(&mut store, json!({"email": "ana@wiki.io", "document_id": 5}));
    assert_eq!(out["count"], 1);
    assert_eq!(out["permissions"][0]["source"], "direct");

    let out = lookup(&mut store, json!({"email": "raj@wiki.io", "workspace_id": "2"}));
    assert_eq!(out["count"], 0);

    let out = lookup(&mut store, json!({"email": "nobody@wiki.io"}));
    assert_eq!(error_of(&out), "User with email 'nobody@wiki.io' not found");

    let out = lookup(&mut store, json!({"email": "raj@wiki.io", "document_id": "9"}));
    assert_eq!(error_of(&out), "Document with ID '9' not found");
}

#[test]
fn test_attachments_resolve_their_target_table() {
    let mut store = seed_store();
    let iface = interface_2();
    let attach = |store: &mut Store, fields: Value| {
        call(&iface, store, "add_attachment_entity", json!({"fields": fields}))
    };
    let base = json!({"content_id": "1", "content_type": "pack_card", "file_name": "status.csv",
                      "file_url": "https://files.wiki.io/status.csv", "uploaded_by": "2"});
    let with = |extra: Value| {
        let mut fields = base.clone();
        if let (Some(f), Some(e)) = (fields.as_object_mut(), extra.as_object()) {
            for (k, v) in e {
                f.insert(k.clone(), v.clone());
            }
        }
        fields
    };

    let out = attach(&mut store, with(json!({"content_type": "table", "content_id": "9"})));
    assert_eq!(error_of(&out), "Table with ID '9' not found");
    let out = attach(&mut store, with(json!({"content_type": "folder"})));
    assert_eq!(error_of(&out), "Unsupported content_type 'folder'");
    let out = attach(&mut store, with(json!({"status": "hidden"})));
    assert_eq!(out["success"], false);
    let out = attach(&mut store, with(json!({"host_page_id": "99"})));
    assert_eq!(error_of(&out), "Host page '99' not found");
    assert_eq!(store.len("attachments"), 2);

    let out = attach(&mut store, with(json!({"host_page_id": "1"})));
    assert_eq!(out["success"], true, "{}", out);
    assert_eq!(out["attachment"]["attachment_id"], "3");
    assert_eq!(out["attachment"]["content_type"], "pack_card");
    assert_eq!(out["attachment"]["status"], "current");
    assert_eq!(store.get("attachments", "3").unwrap()["content_type"], "smart_link");
}

#[test]
fn test_interfaces_expose_expected_tools() {
    assert_eq!(interface_1().len(), 5);
    assert_eq!(interface_2().len(), 4);
    let info = interface_2()
        .get("get_user_permissions")
        .map(|t| t.get_info())
        .unwrap();
    assert_eq!(info["function"]["name"], "get_user_permissions");
}
