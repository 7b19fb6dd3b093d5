// capabilities/crates/wiki_pages/src/fixtures.rs

use mock_store_core::Store;
use serde_json::json;

use crate::tables::*;

/// Two workspaces. Engineering holds a three-level page tree
/// (Engineering Home > Architecture > Service Map, plus a draft Onboarding
/// page); Operations holds a single root page.
pub fn seed_store() -> Store {
    let mut store = Store::new();
    let ts = "2025-11-28T09:30:00";

    store.seed_table(
        &USERS,
        json!({
            "1": {"full_name": "Ana Pereira", "email": "ana@wiki.io", "status": "active",
                  "created_at": ts, "updated_at": ts},
            "2": {"full_name": "Raj Mehta", "email": "raj@wiki.io", "status": "active",
                  "created_at": ts, "updated_at": ts},
            "3": {"full_name": "Old Account", "email": "old@wiki.io", "status": "inactive",
                  "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &SPACES,
        json!({
            "1": {"space_key": "ENG", "space_name": "Engineering", "created_by": "1",
                  "created_at": ts, "updated_at": ts},
            "2": {"space_key": "OPS", "space_name": "Operations", "created_by": "2",
                  "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &PAGES,
        json!({
            "1": {"title": "Engineering Home", "space_id": "1", "parent_page_id": null,
                  "body_storage": "<p>Welcome</p>", "status": "current", "created_by": "1",
                  "created_at": ts, "updated_by": "1", "updated_at": ts},
            "2": {"title": "Architecture", "space_id": "1", "parent_page_id": "1",
                  "body_storage": "<p>Services v2</p>", "status": "current", "created_by": "1",
                  "created_at": ts, "updated_by": "2", "updated_at": ts},
            "3": {"title": "Runbooks", "space_id": "2", "parent_page_id": null,
                  "body_storage": null, "status": "current", "created_by": "2",
                  "created_at": ts, "updated_by": "2", "updated_at": ts},
            "4": {"title": "Onboarding", "space_id": "1", "parent_page_id": "1",
                  "body_storage": "<p>TBD</p>", "status": "draft", "created_by": "2",
                  "created_at": ts, "updated_by": "2", "updated_at": ts},
            "5": {"title": "Service Map", "space_id": "1", "parent_page_id": "2",
                  "body_storage": "<p>api -> db</p>", "status": "current", "created_by": "1",
                  "created_at": ts, "updated_by": "1", "updated_at": ts}
        }),
    );

    store.seed_table(
        &PAGE_VERSIONS,
        json!({
            "1": {"page_id": "1", "version_number": 1, "title": "Engineering Home",
                  "body_storage": "<p>Welcome</p>", "created_by": "1", "created_at": ts},
            "2": {"page_id": "2", "version_number": 1, "title": "Architecture",
                  "body_storage": "<p>Services</p>", "created_by": "1", "created_at": ts},
            "3": {"page_id": "2", "version_number": 2, "title": "Architecture",
                  "body_storage": "<p>Services v2</p>", "created_by": "2", "created_at": ts},
            "4": {"page_id": "3", "version_number": 1, "title": "Runbooks",
                  "body_storage": null, "created_by": "2", "created_at": ts},
            "5": {"page_id": "4", "version_number": 1, "title": "Onboarding",
                  "body_storage": "<p>TBD</p>", "created_by": "2", "created_at": ts},
            "6": {"page_id": "5", "version_number": 1, "title": "Service Map",
                  "body_storage": "<p>api -> db</p>", "created_by": "1", "created_at": ts}
        }),
    );

    store.seed_table(
        &PERMISSIONS,
        json!({
            "1": {"content_id": "1", "content_type": "space", "user_id": "2", "operation": "view",
                  "granted_by": "1", "granted_at": ts},
            "2": {"content_id": "1", "content_type": "page", "user_id": "2", "operation": "edit",
                  "granted_by": "1", "granted_at": ts},
            "3": {"content_id": "2", "content_type": "page", "user_id": "2", "operation": "admin",
                  "granted_by": "1", "granted_at": ts},
            "4": {"content_id": "3", "content_type": "page", "user_id": "2", "operation": "view",
                  "granted_by": null, "granted_at": ts},
            "5": {"content_id": "5", "content_type": "page", "user_id": "1", "operation": "edit",
                  "granted_by": "1", "granted_at": ts}
        }),
    );

    store.seed_table(
        &ATTACHMENTS,
        json!({
            "1": {"content_id": "4", "content_type": "page", "host_page_id": "4",
                  "file_name": "checklist.pdf", "file_url": "https://files.wiki.io/checklist.pdf",
                  "status": "current", "uploaded_by": "2", "uploaded_at": ts, "updated_at": ts},
            "2": {"content_id": "1", "content_type": "whiteboard", "host_page_id": "2",
                  "file_name": "sketch.png", "file_url": "https://files.wiki.io/sketch.png",
                  "status": "current", "uploaded_by": "1", "uploaded_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &DATABASES,
        json!({
            "1": {"title": "Service Catalog", "host_page_id": "2", "created_by": "1",
                  "created_at": ts, "updated_at": ts}
        }),
    );
    store.seed_table(
        &WHITEBOARDS,
        json!({
            "1": {"title": "System Sketch", "host_page_id": "2", "created_by": "1",
                  "created_at": ts, "updated_at": ts}
        }),
    );
    store.seed_table(
        &SMART_LINKS,
        json!({
            "1": {"title": "Status Dashboard", "url": "https://status.wiki.io",
                  "host_page_id": "1", "created_by": "2", "created_at": ts, "updated_at": ts}
        }),
    );

    store
}
