// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Policy group mutations.
//!
//! A group and its records are always written together. Edits replace the
//! record set in place; applications that need the old rules carry their
//! own snapshot.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use leave_ledger_domain::{PolicyGroup, PolicyRecord};
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::{policy_groups, policy_records};
use crate::error::PersistenceError;

/// Inserts a new policy group with its records.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `group` - The validated policy group
///
/// # Returns
///
/// The ID assigned to the group.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if a group with the same
/// name exists, or another error if the insert fails.
pub fn insert_policy_group(
    conn: &mut SqliteConnection,
    group: &PolicyGroup,
) -> Result<i64, PersistenceError> {
    info!(
        group_name = %group.group_name,
        policies = group.policies.len(),
        "Creating policy group"
    );

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(policy_groups::table)
            .values((
                policy_groups::group_name.eq(&group.group_name),
                policy_groups::description.eq(&group.description),
                policy_groups::is_active.eq(i32::from(group.is_active)),
            ))
            .execute(conn)?;

        let policy_group_id: i64 = get_last_insert_rowid(conn)?;
        insert_policy_records(conn, policy_group_id, &group.policies)?;

        info!(policy_group_id, "Policy group created");
        Ok(policy_group_id)
    })
}

/// Replaces a policy group's name, description, status and records.
///
/// # Errors
///
/// Returns `PersistenceError::PolicyGroupNotFound` if the group does not
/// exist, or another error if the update fails.
pub fn replace_policy_group(
    conn: &mut SqliteConnection,
    policy_group_id: i64,
    group: &PolicyGroup,
) -> Result<(), PersistenceError> {
    info!(policy_group_id, group_name = %group.group_name, "Updating policy group");

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(policy_groups::table)
            .filter(policy_groups::policy_group_id.eq(policy_group_id))
            .set((
                policy_groups::group_name.eq(&group.group_name),
                policy_groups::description.eq(&group.description),
                policy_groups::is_active.eq(i32::from(group.is_active)),
                policy_groups::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::PolicyGroupNotFound(policy_group_id));
        }

        let removed: usize = diesel::delete(
            policy_records::table.filter(policy_records::policy_group_id.eq(policy_group_id)),
        )
        .execute(conn)?;
        debug!(policy_group_id, removed, "Removed previous policy records");

        insert_policy_records(conn, policy_group_id, &group.policies)
    })
}

/// Activates or deactivates a policy group.
///
/// # Errors
///
/// Returns `PersistenceError::PolicyGroupNotFound` if the group does not
/// exist.
pub fn set_policy_group_active(
    conn: &mut SqliteConnection,
    policy_group_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    info!(policy_group_id, is_active, "Setting policy group status");

    let updated: usize = diesel::update(policy_groups::table)
        .filter(policy_groups::policy_group_id.eq(policy_group_id))
        .set((
            policy_groups::is_active.eq(i32::from(is_active)),
            policy_groups::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::PolicyGroupNotFound(policy_group_id));
    }
    Ok(())
}

fn insert_policy_records(
    conn: &mut SqliteConnection,
    policy_group_id: i64,
    policies: &[PolicyRecord],
) -> Result<(), PersistenceError> {
    for (index, policy) in policies.iter().enumerate() {
        let position: i32 = i32::try_from(index)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let policy_json: String = serde_json::to_string(policy)?;

        diesel::insert_into(policy_records::table)
            .values((
                policy_records::policy_group_id.eq(policy_group_id),
                policy_records::position.eq(position),
                policy_records::leave_type_id.eq(policy.leave_type_id.value()),
                policy_records::leave_type_name.eq(policy.leave_type_name.value()),
                policy_records::policy_json.eq(&policy_json),
            ))
            .execute(conn)?;
    }

    debug!(policy_group_id, count = policies.len(), "Inserted policy records");
    Ok(())
}
