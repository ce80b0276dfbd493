// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_audit::AuditEvent;
use leave_ledger_domain::{EmployeeId, LeaveTypeName};

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieves an employee's audit trail in the order events were written.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee whose trail to read
/// * `leave_type` - Restricts the trail to one ledger when present
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be decoded.
pub fn get_audit_events(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    leave_type: Option<&LeaveTypeName>,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let mut query = audit_events::table
        .filter(audit_events::employee_id.eq(employee_id.value()))
        .into_boxed();
    if let Some(leave_type) = leave_type {
        query = query.filter(audit_events::leave_type_key.eq(leave_type.normalized()));
    }

    let rows: Vec<AuditEventRow> = query
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AuditEvent::try_from).collect()
}
