// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{Employee, EmployeeId};
use tracing::info;

use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Inserts an employee, or updates the profile of an existing one.
///
/// # Errors
///
/// Returns an error if the referenced policy group does not exist or the
/// write fails.
pub fn upsert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    info!(
        employee_id = %employee.employee_id,
        policy_group_id = ?employee.policy_group_id,
        "Registering employee"
    );

    diesel::insert_into(employees::table)
        .values((
            employees::employee_id.eq(employee.employee_id.value()),
            employees::employee_code.eq(&employee.employee_code),
            employees::display_name.eq(&employee.display_name),
            employees::policy_group_id.eq(employee.policy_group_id),
        ))
        .on_conflict(employees::employee_id)
        .do_update()
        .set((
            employees::employee_code.eq(&employee.employee_code),
            employees::display_name.eq(&employee.display_name),
            employees::policy_group_id.eq(employee.policy_group_id),
        ))
        .execute(conn)?;

    Ok(())
}

/// Assigns an employee to a policy group, or clears the assignment.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee is not
/// registered.
pub fn assign_policy_group(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    policy_group_id: Option<i64>,
) -> Result<(), PersistenceError> {
    info!(employee_id = %employee_id, ?policy_group_id, "Assigning policy group");

    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id.value()))
        .set(employees::policy_group_id.eq(policy_group_id))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(
            employee_id.value().to_string(),
        ));
    }
    Ok(())
}
