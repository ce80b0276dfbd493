// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::policy::PolicyResolution;
use crate::state::{LedgerChange, LedgerState, TransitionResult};
use leave_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use leave_ledger_domain::{
    Acceptance, Balance, DomainError, HolidayCalendar, LeaveApplication, LeaveRequest,
    LeaveStatus, PolicyRecord, PolicySnapshot, ValidationContext, validate_approval,
    validate_leave_request, validate_ungoverned_request,
};
use time::{Date, OffsetDateTime};

/// Inputs to a transition that come from outside the ledger.
#[derive(Debug, Clone, Copy)]
pub struct ApplyContext<'a> {
    /// The calendar date used by the backdating and lead-time rules.
    pub today: Date,
    /// Timestamp recorded on created or updated applications.
    pub now: OffsetDateTime,
    /// Holidays used by the adjacency rules.
    pub holidays: &'a HolidayCalendar,
    /// Whether submitted applications carry a copy of their policy.
    pub capture_snapshot: bool,
}

/// Applies a command to a ledger, producing a new ledger and audit event.
///
/// # Arguments
///
/// * `state` - The current ledger (immutable)
/// * `policy` - The resolved policy for the ledger's leave type
/// * `command` - The command to apply
/// * `context` - Clock, holidays and snapshot settings
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new ledger, the write to perform
///   and the audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The request is for another employee or leave type
/// - The request or approval is refused by policy
/// - The application does not exist
/// - The application has already been decided
pub fn apply(
    state: &LedgerState,
    policy: &PolicyResolution,
    command: Command,
    context: &ApplyContext<'_>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let action_name: String = command.action_name().to_string();

    match command {
        Command::SubmitLeave { request } => {
            submit(state, policy, &request, context, actor, cause)
        }
        Command::ApproveLeave { application_id } => {
            let application: &LeaveApplication = find_application(state, application_id)?;
            application
                .status
                .validate_transition(LeaveStatus::Approved)?;

            let projected: Vec<Balance> = match governing_policy(application, policy) {
                Some(governing) => validate_approval(application, governing, &state.applications)?,
                None => Vec::new(),
            };

            let details: String = format!(
                "Approved application {application_id} ({} day(s), {})",
                application.requested_days(),
                application.range
            );
            decide(
                state,
                application_id,
                LeaveStatus::Approved,
                context.now,
                Action::new(action_name, Some(details)),
                actor,
                cause,
                projected,
            )
        }
        Command::RejectLeave {
            application_id,
            note,
        } => {
            let application: &LeaveApplication = find_application(state, application_id)?;
            application
                .status
                .validate_transition(LeaveStatus::Rejected)?;

            let details: String = note.map_or_else(
                || format!("Rejected application {application_id}"),
                |note| format!("Rejected application {application_id}: {note}"),
            );
            decide(
                state,
                application_id,
                LeaveStatus::Rejected,
                context.now,
                Action::new(action_name, Some(details)),
                actor,
                cause,
                Vec::new(),
            )
        }
    }
}

fn submit(
    state: &LedgerState,
    policy: &PolicyResolution,
    request: &LeaveRequest,
    context: &ApplyContext<'_>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if request.employee_id != state.employee_id || request.leave_type != state.leave_type {
        return Err(CoreError::DomainViolation(DomainError::InvalidEmployee(
            format!(
                "request for employee '{}' and leave type '{}' does not belong to this ledger",
                request.employee_id, request.leave_type
            ),
        )));
    }

    let acceptance: Acceptance = match policy {
        PolicyResolution::Governed(record) => {
            let validation: ValidationContext<'_> =
                ValidationContext::new(context.today, &state.applications, context.holidays);
            validate_leave_request(request, record, &validation)?
        }
        PolicyResolution::Ungoverned(_) => validate_ungoverned_request(request)?,
    };

    let mut application: LeaveApplication =
        LeaveApplication::submit(request, acceptance.range, &actor.id, context.now);
    if context.capture_snapshot {
        application.policy_snapshot = policy.policy().map(PolicySnapshot::capture);
    }

    let before: StateSnapshot = state.to_snapshot();
    let mut new_state: LedgerState = state.clone();
    new_state.applications.push(application.clone());
    new_state.sequence += 1;
    let after: StateSnapshot = new_state.to_snapshot();

    let action: Action = Action::new(
        String::from("SubmitLeave"),
        Some(format!(
            "Submitted {} day(s) of {} for {}",
            acceptance.requested_days, state.leave_type, acceptance.range
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        state.employee_id.clone(),
        state.leave_type.clone(),
        actor,
        cause,
        action,
        before,
        after,
    );

    Ok(TransitionResult {
        new_state,
        change: LedgerChange::Submitted(application),
        audit_event,
        projected: acceptance.projected,
    })
}

fn find_application(state: &LedgerState, application_id: i64) -> Result<&LeaveApplication, CoreError> {
    state
        .find_application(application_id)
        .ok_or(CoreError::ApplicationNotFound(application_id))
}

/// The policy an approval is checked against.
///
/// A snapshot taken at submission wins over the live record, so that edits
/// made while the application waited do not change its outcome.
fn governing_policy<'a>(
    application: &'a LeaveApplication,
    policy: &'a PolicyResolution,
) -> Option<&'a PolicyRecord> {
    application
        .policy_snapshot
        .as_ref()
        .map(PolicySnapshot::policy)
        .or_else(|| policy.policy())
}

#[allow(clippy::too_many_arguments)]
fn decide(
    state: &LedgerState,
    application_id: i64,
    to: LeaveStatus,
    now: OffsetDateTime,
    action: Action,
    actor: Actor,
    cause: Cause,
    projected: Vec<Balance>,
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: LedgerState = state.clone();
    let application: &mut LeaveApplication = new_state
        .applications
        .iter_mut()
        .find(|application| application.application_id == Some(application_id))
        .ok_or(CoreError::ApplicationNotFound(application_id))?;
    let from: LeaveStatus = application.status;
    application.status = to;
    application.updated_at = now;
    new_state.sequence += 1;

    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(
        state.employee_id.clone(),
        state.leave_type.clone(),
        actor,
        cause,
        action,
        before,
        after,
    );

    Ok(TransitionResult {
        new_state,
        change: LedgerChange::StatusChanged {
            application_id,
            from,
            to,
        },
        audit_event,
        projected,
    })
}
