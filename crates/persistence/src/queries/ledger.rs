// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger reconstruction and leave application queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger::LedgerState;
use leave_ledger_domain::{EmployeeId, LeaveApplication, LeaveTypeName};
use tracing::debug;

use crate::data_models::LeaveApplicationRow;
use crate::diesel_schema::leave_applications;
use crate::error::PersistenceError;
use crate::mutations::ledger::read_sequence;

/// Rebuilds an employee's ledger for one leave type.
///
/// Applications are returned in submission order together with the ledger's
/// current sequence. An employee with no applications gets an empty ledger
/// at sequence zero.
///
/// Both reads run in one transaction and the sequence is read first, so a
/// writer committing in between can only leave the ledger looking older than
/// its rows. A transition computed from such a ledger is refused on persist.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn load_ledger(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    leave_type: &LeaveTypeName,
) -> Result<LedgerState, PersistenceError> {
    let (sequence, rows): (i64, Vec<LeaveApplicationRow>) =
        conn.transaction::<_, PersistenceError, _>(|conn| {
            let sequence: i64 = read_sequence(conn, employee_id, leave_type)?;
            let rows: Vec<LeaveApplicationRow> = leave_applications::table
                .filter(leave_applications::employee_id.eq(employee_id.value()))
                .filter(leave_applications::leave_type_key.eq(leave_type.normalized()))
                .order(leave_applications::application_id.asc())
                .select(LeaveApplicationRow::as_select())
                .load(conn)?;
            Ok((sequence, rows))
        })?;

    let mut state: LedgerState = LedgerState::new(employee_id.clone(), leave_type.clone());
    state.applications = rows
        .into_iter()
        .map(LeaveApplication::try_from)
        .collect::<Result<_, _>>()?;
    state.sequence = sequence;

    debug!(
        employee_id = %employee_id,
        leave_type = %leave_type,
        applications = state.applications.len(),
        sequence = state.sequence,
        "Loaded ledger"
    );
    Ok(state)
}

/// Loads a single leave application.
///
/// # Errors
///
/// Returns `PersistenceError::ApplicationNotFound` if no application has
/// the given ID.
pub fn get_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<LeaveApplication, PersistenceError> {
    let row: LeaveApplicationRow = leave_applications::table
        .filter(leave_applications::application_id.eq(application_id))
        .select(LeaveApplicationRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::ApplicationNotFound(application_id))?;

    LeaveApplication::try_from(row)
}

/// Lists an employee's applications, optionally for one leave type only.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_applications(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    leave_type: Option<&LeaveTypeName>,
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    let mut query = leave_applications::table
        .filter(leave_applications::employee_id.eq(employee_id.value()))
        .into_boxed();
    if let Some(leave_type) = leave_type {
        query = query.filter(leave_applications::leave_type_key.eq(leave_type.normalized()));
    }

    let rows: Vec<LeaveApplicationRow> = query
        .order(leave_applications::application_id.asc())
        .select(LeaveApplicationRow::as_select())
        .load(conn)?;

    rows.into_iter().map(LeaveApplication::try_from).collect()
}
