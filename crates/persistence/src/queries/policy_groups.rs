// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Policy group queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{PolicyGroup, PolicyRecord};

use crate::data_models::{PolicyGroupRow, PolicyRecordRow};
use crate::diesel_schema::{policy_groups, policy_records};
use crate::error::PersistenceError;

/// Loads a policy group with its records in their original order.
///
/// # Errors
///
/// Returns `PersistenceError::PolicyGroupNotFound` if the group does not
/// exist, or another error if a stored record cannot be decoded.
pub fn get_policy_group(
    conn: &mut SqliteConnection,
    policy_group_id: i64,
) -> Result<PolicyGroup, PersistenceError> {
    let row: PolicyGroupRow = policy_groups::table
        .filter(policy_groups::policy_group_id.eq(policy_group_id))
        .select(PolicyGroupRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::PolicyGroupNotFound(policy_group_id))?;

    let records: Vec<PolicyRecordRow> = policy_records::table
        .filter(policy_records::policy_group_id.eq(policy_group_id))
        .order(policy_records::position.asc())
        .select(PolicyRecordRow::as_select())
        .load(conn)?;

    assemble_group(row, records)
}

/// Lists every policy group, active or not, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record cannot be decoded.
pub fn list_policy_groups(conn: &mut SqliteConnection) -> Result<Vec<PolicyGroup>, PersistenceError> {
    let rows: Vec<PolicyGroupRow> = policy_groups::table
        .order(policy_groups::policy_group_id.asc())
        .select(PolicyGroupRow::as_select())
        .load(conn)?;

    let mut records: Vec<PolicyRecordRow> = policy_records::table
        .order((policy_records::policy_group_id.asc(), policy_records::position.asc()))
        .select(PolicyRecordRow::as_select())
        .load(conn)?;

    let mut groups: Vec<PolicyGroup> = Vec::with_capacity(rows.len());
    for row in rows {
        let (own, rest): (Vec<PolicyRecordRow>, Vec<PolicyRecordRow>) = records
            .into_iter()
            .partition(|record| record.policy_group_id == row.policy_group_id);
        records = rest;
        groups.push(assemble_group(row, own)?);
    }
    Ok(groups)
}

fn assemble_group(
    row: PolicyGroupRow,
    records: Vec<PolicyRecordRow>,
) -> Result<PolicyGroup, PersistenceError> {
    let policies: Vec<PolicyRecord> = records
        .into_iter()
        .map(PolicyRecordRow::into_policy)
        .collect::<Result<_, _>>()?;

    Ok(PolicyGroup {
        policy_group_id: Some(row.policy_group_id),
        group_name: row.group_name,
        description: row.description,
        is_active: row.is_active != 0,
        policies,
    })
}
