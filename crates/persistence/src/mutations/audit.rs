// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_audit::AuditEvent;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
/// * `application_id` - The application the event concerns, if any
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    application_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;
    let before_json: String = serde_json::to_string(&event.before)?;
    let after_json: String = serde_json::to_string(&event.after)?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::employee_id.eq(event.employee_id.value()),
            audit_events::leave_type.eq(event.leave_type.value()),
            audit_events::leave_type_key.eq(event.leave_type.normalized()),
            audit_events::application_id.eq(application_id),
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot_json.eq(&before_json),
            audit_events::after_snapshot_json.eq(&after_json),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
