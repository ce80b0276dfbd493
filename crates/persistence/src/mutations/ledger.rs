// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave application and ledger sequence mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{EmployeeId, LeaveApplication, LeaveStatus, LeaveTypeName};
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::format_timestamp;
use crate::diesel_schema::{leave_applications, ledger_sequences};
use crate::error::PersistenceError;

/// Inserts a new leave application.
///
/// # Returns
///
/// The ID assigned to the application.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_application(
    conn: &mut SqliteConnection,
    application: &LeaveApplication,
) -> Result<i64, PersistenceError> {
    let snapshot_json: Option<String> = application
        .policy_snapshot
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    diesel::insert_into(leave_applications::table)
        .values((
            leave_applications::employee_id.eq(application.employee_id.value()),
            leave_applications::leave_type.eq(application.leave_type.value()),
            leave_applications::leave_type_key.eq(application.leave_type.normalized()),
            leave_applications::from_date.eq(application.range.from_date().to_string()),
            leave_applications::to_date.eq(application.range.to_date().to_string()),
            leave_applications::half_day.eq(i32::from(application.half_day)),
            leave_applications::reason.eq(&application.reason),
            leave_applications::status.eq(application.status.as_str()),
            leave_applications::attachment.eq(application.attachment.as_deref()),
            leave_applications::policy_snapshot_json.eq(snapshot_json),
            leave_applications::created_by.eq(&application.created_by),
            leave_applications::created_at.eq(format_timestamp(application.created_at)?),
            leave_applications::updated_at.eq(format_timestamp(application.updated_at)?),
        ))
        .execute(conn)?;

    let application_id: i64 = get_last_insert_rowid(conn)?;
    debug!(application_id, "Inserted leave application");
    Ok(application_id)
}

/// Moves an application from one status to another.
///
/// The update only matches while the application still has the `from`
/// status, so a decision raced by another writer cannot be overwritten.
///
/// # Errors
///
/// Returns `PersistenceError::ApplicationNotFound` if the application does
/// not exist, or `PersistenceError::StaleApplicationStatus` if it no longer
/// has the expected status.
pub fn update_application_status(
    conn: &mut SqliteConnection,
    application_id: i64,
    from: LeaveStatus,
    to: LeaveStatus,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(leave_applications::table)
        .filter(leave_applications::application_id.eq(application_id))
        .filter(leave_applications::status.eq(from.as_str()))
        .set((
            leave_applications::status.eq(to.as_str()),
            leave_applications::updated_at.eq(format_timestamp(updated_at)?),
        ))
        .execute(conn)?;

    if updated == 1 {
        debug!(application_id, from = %from, to = %to, "Updated application status");
        return Ok(());
    }

    let exists: bool = diesel::select(diesel::dsl::exists(
        leave_applications::table.filter(leave_applications::application_id.eq(application_id)),
    ))
    .get_result(conn)?;

    if exists {
        Err(PersistenceError::StaleApplicationStatus {
            application_id,
            expected: from.as_str().to_string(),
        })
    } else {
        Err(PersistenceError::ApplicationNotFound(application_id))
    }
}

/// Reads the current transition count of a ledger.
///
/// A ledger with no recorded transitions has sequence zero.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn read_sequence(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    leave_type: &LeaveTypeName,
) -> Result<i64, PersistenceError> {
    let sequence: Option<i64> = ledger_sequences::table
        .filter(ledger_sequences::employee_id.eq(employee_id.value()))
        .filter(ledger_sequences::leave_type_key.eq(leave_type.normalized()))
        .select(ledger_sequences::sequence)
        .first::<i64>(conn)
        .optional()?;

    Ok(sequence.unwrap_or(0))
}

/// Records the ledger's new transition count.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_sequence(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    leave_type: &LeaveTypeName,
    sequence: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(ledger_sequences::table)
        .values((
            ledger_sequences::employee_id.eq(employee_id.value()),
            ledger_sequences::leave_type_key.eq(leave_type.normalized()),
            ledger_sequences::sequence.eq(sequence),
        ))
        .on_conflict((ledger_sequences::employee_id, ledger_sequences::leave_type_key))
        .do_update()
        .set(ledger_sequences::sequence.eq(sequence))
        .execute(conn)?;

    Ok(())
}
