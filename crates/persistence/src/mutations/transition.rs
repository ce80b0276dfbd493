// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic persistence of ledger transitions.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger::{LedgerChange, LedgerState, TransitionResult};
use leave_ledger_domain::LeaveApplication;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::ledger::{
    insert_application, read_sequence, update_application_status, write_sequence,
};

/// Result of persisting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// The application created or decided by the transition.
    pub application_id: i64,
}

/// Persists a transition: the application write, the new ledger sequence
/// and the audit event, in one immediate transaction.
///
/// The ledger must still be at the sequence the transition was computed
/// from. Otherwise nothing is written and the caller must reload the ledger
/// and apply the command again.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if another writer
/// advanced the ledger first, or another error if any write fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let state: &LedgerState = &result.new_state;
    let expected: i64 = state.sequence - 1;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let actual: i64 = read_sequence(conn, &state.employee_id, &state.leave_type)?;
        if actual != expected {
            warn!(
                employee_id = %state.employee_id,
                leave_type = %state.leave_type,
                expected,
                actual,
                "Ledger changed since it was read"
            );
            return Err(PersistenceError::ConcurrentModification {
                employee_id: state.employee_id.value().to_string(),
                leave_type: state.leave_type.value().to_string(),
                expected,
                actual,
            });
        }

        let application_id: i64 = match &result.change {
            LedgerChange::Submitted(application) => insert_application(conn, application)?,
            LedgerChange::StatusChanged {
                application_id,
                from,
                to,
            } => {
                let updated_at: OffsetDateTime = state
                    .find_application(*application_id)
                    .map_or_else(OffsetDateTime::now_utc, |application: &LeaveApplication| {
                        application.updated_at
                    });
                update_application_status(conn, *application_id, *from, *to, updated_at)?;
                *application_id
            }
        };

        write_sequence(conn, &state.employee_id, &state.leave_type, state.sequence)?;
        let event_id: i64 = persist_audit_event(conn, &result.audit_event, Some(application_id))?;

        info!(
            event_id,
            application_id,
            sequence = state.sequence,
            action = %result.audit_event.action.name,
            "Persisted transition"
        );

        Ok(PersistTransitionResult {
            event_id,
            application_id,
        })
    })
}
