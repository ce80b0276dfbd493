// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{Employee, EmployeeId};

use crate::data_models::EmployeeRow;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Loads a registered employee.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee is not
/// registered.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
) -> Result<Employee, PersistenceError> {
    employees::table
        .filter(employees::employee_id.eq(employee_id.value()))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .map(Employee::from)
        .ok_or_else(|| PersistenceError::EmployeeNotFound(employee_id.value().to_string()))
}

/// Lists employees assigned to a policy group.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_employees_in_group(
    conn: &mut SqliteConnection,
    policy_group_id: i64,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::policy_group_id.eq(policy_group_id))
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Employee::from).collect())
}
