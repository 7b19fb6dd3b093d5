// capabilities/crates/incident_management/src/fixtures.rs

//! Deterministic demo data for incident tracking.

use mock_store_core::Store;
use serde_json::json;

use crate::tables::*;

/// Two clients, four responders and one incident in each lifecycle state.
/// The closed incident carries a hand-entered code, so the next generated
/// code skips ahead of it.
pub fn seed_store() -> Store {
    let mut store = Store::new();
    let ts = "2025-10-01T08:00:00";

    store.seed_table(
        &USERS,
        json!({
            "1": {"first_name": "Priya", "last_name": "Nair", "email": "priya.nair@ops.io",
                  "role": "incident_manager", "status": "active", "created_at": ts, "updated_at": ts},
            "2": {"first_name": "Tom", "last_name": "Becker", "email": "tom.becker@ops.io",
                  "role": "technical_support", "status": "active", "created_at": ts, "updated_at": ts},
            "3": {"first_name": "Lena", "last_name": "Ortiz", "email": "lena.ortiz@ops.io",
                  "role": "executive", "status": "inactive", "created_at": ts, "updated_at": ts},
            "4": {"first_name": "Omar", "last_name": "Haddad", "email": "omar.haddad@ops.io",
                  "role": "system_administrator", "status": "active", "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &CLIENTS,
        json!({
            "1": {"client_name": "Northwind Traders", "client_type": "enterprise",
                  "status": "active", "created_at": ts, "updated_at": ts},
            "2": {"client_name": "Globex", "client_type": "mid_market",
                  "status": "inactive", "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &COMPONENTS,
        json!({
            "1": {"client_id": "1", "component_name": "Payments API", "component_type": "api",
                  "environment": "production", "created_at": ts, "updated_at": ts},
            "2": {"client_id": "1", "component_name": "Auth Service", "component_type": "service",
                  "environment": "production", "created_at": ts, "updated_at": ts},
            "3": {"client_id": "2", "component_name": "Globex Ledger DB", "component_type": "database",
                  "environment": "production", "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &INCIDENTS,
        json!({
            "1": {"incident_code": "INC-2025-00001", "title": "Checkout latency spike",
                  "reporter_id": "2", "assigned_manager_id": "1", "client_id": "1",
                  "component_id": "1", "severity": "P2", "status": "open", "impact": "high",
                  "urgency": "high", "category": "performance_degradation",
                  "detection_source": "monitoring_alert", "detected_at": "2025-09-30T21:10:00",
                  "resolved_at": null, "closed_at": null, "rto_breach": false, "sla_breach": false,
                  "is_recurring": false, "downtime_minutes": null, "created_at": ts, "updated_at": ts},
            "2": {"incident_code": "INC-2025-00002", "title": "Login failures for SSO users",
                  "reporter_id": "4", "assigned_manager_id": "1", "client_id": "1",
                  "component_id": "2", "severity": "P1", "status": "in_progress", "impact": "critical",
                  "urgency": "critical", "category": "authentication_failure",
                  "detection_source": "client_reported", "detected_at": "2025-09-30T23:45:00",
                  "resolved_at": null, "closed_at": null, "rto_breach": false, "sla_breach": true,
                  "is_recurring": false, "downtime_minutes": null, "created_at": ts, "updated_at": ts},
            "3": {"incident_code": "INC-2025-00003", "title": "Nightly export failed",
                  "reporter_id": "2", "assigned_manager_id": null, "client_id": "1",
                  "component_id": "1", "severity": "P3", "status": "resolved", "impact": "medium",
                  "urgency": "low", "category": "backup_failure",
                  "detection_source": "internally_detected", "detected_at": "2025-09-28T02:00:00",
                  "resolved_at": "2025-09-28T06:30:00", "closed_at": null, "rto_breach": false,
                  "sla_breach": false, "is_recurring": true, "downtime_minutes": 0,
                  "created_at": ts, "updated_at": ts},
            "4": {"incident_code": "INC-2025-00007", "title": "Ledger replication lag",
                  "reporter_id": "4", "assigned_manager_id": "1", "client_id": "2",
                  "component_id": "3", "severity": "P2", "status": "closed", "impact": "high",
                  "urgency": "medium", "category": "database_issue",
                  "detection_source": "monitoring_alert", "detected_at": "2025-09-20T10:00:00",
                  "resolved_at": "2025-09-20T14:00:00", "closed_at": "2025-09-21T09:00:00",
                  "rto_breach": false, "sla_breach": false, "is_recurring": false,
                  "downtime_minutes": 240, "created_at": ts, "updated_at": ts}
        }),
    );

    store.seed_table(
        &ESCALATIONS,
        json!({
            "1": {"escalation_code": "ESC-2025-00001", "incident_id": "2", "escalated_by_id": "1",
                  "escalated_to_id": "4", "escalation_reason": "sla_breach",
                  "escalation_level": "technical", "escalated_at": "2025-10-01T00:15:00",
                  "acknowledged_at": null, "resolved_at": null, "status": "open",
                  "created_at": ts, "updated_at": ts}
        }),
    );

    store
}
