// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes read from the database and their conversion into domain
//! values.

use diesel::prelude::*;
use leave_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use leave_ledger_domain::{
    Employee, EmployeeId, LeaveApplication, LeaveRange, LeaveStatus, LeaveTypeName,
    PolicyRecord, PolicySnapshot, parse_iso_date,
};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::diesel_schema::{audit_events, employees, leave_applications, policy_groups, policy_records};
use crate::error::PersistenceError;

/// A `policy_groups` row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = policy_groups)]
pub struct PolicyGroupRow {
    pub policy_group_id: i64,
    pub group_name: String,
    pub description: String,
    pub is_active: i32,
}

/// A `policy_records` row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = policy_records)]
pub struct PolicyRecordRow {
    pub policy_group_id: i64,
    pub policy_json: String,
}

impl PolicyRecordRow {
    /// Decodes the stored policy record.
    pub fn into_policy(self) -> Result<PolicyRecord, PersistenceError> {
        Ok(serde_json::from_str(&self.policy_json)?)
    }
}

/// An `employees` row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: String,
    pub employee_code: String,
    pub display_name: String,
    pub policy_group_id: Option<i64>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self::new(
            EmployeeId::new(&row.employee_id),
            row.employee_code,
            row.display_name,
        )
        .with_policy_group(row.policy_group_id)
    }
}

/// A `leave_applications` row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = leave_applications)]
pub struct LeaveApplicationRow {
    pub application_id: i64,
    pub employee_id: String,
    pub leave_type: String,
    pub from_date: String,
    pub to_date: String,
    pub half_day: i32,
    pub reason: String,
    pub status: String,
    pub attachment: Option<String>,
    pub policy_snapshot_json: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<LeaveApplicationRow> for LeaveApplication {
    type Error = PersistenceError;

    fn try_from(row: LeaveApplicationRow) -> Result<Self, Self::Error> {
        let from_date: Date = parse_date(&row.from_date)?;
        let to_date: Date = parse_date(&row.to_date)?;
        let range: LeaveRange = LeaveRange::new(from_date, to_date)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let status: LeaveStatus = row
            .status
            .parse()
            .map_err(|e: leave_ledger_domain::DomainError| {
                PersistenceError::ReconstructionError(e.to_string())
            })?;
        let policy_snapshot: Option<PolicySnapshot> = row
            .policy_snapshot_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Self {
            application_id: Some(row.application_id),
            employee_id: EmployeeId::new(&row.employee_id),
            leave_type: LeaveTypeName::new(&row.leave_type),
            range,
            half_day: row.half_day != 0,
            reason: row.reason,
            status,
            attachment: row.attachment,
            policy_snapshot,
            created_by: row.created_by,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// An `audit_events` row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub employee_id: String,
    pub leave_type: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: Actor = serde_json::from_str(&row.actor_json)?;
        let cause: Cause = serde_json::from_str(&row.cause_json)?;
        let action: Action = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self::new(
            EmployeeId::new(&row.employee_id),
            LeaveTypeName::new(&row.leave_type),
            actor,
            cause,
            action,
            before,
            after,
        )
        .with_id(row.event_id))
    }
}

/// Formats a timestamp for storage.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp '{value}': {e}")))
}

fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    parse_iso_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}
