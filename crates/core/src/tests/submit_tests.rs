// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    EMPLOYEE, LEAVE_TYPE, NOW, create_test_ledger, create_test_policy, create_test_request,
    submit, submit_stored,
};
use crate::{
    ConfigurationIssue, CoreError, LedgerChange, LedgerState, PolicyResolution, TransitionResult,
};
use leave_ledger_domain::{
    DayCount, DomainError, EmployeeId, LeaveApplication, LeaveRequest, LeaveStatus,
    LeaveTypeName, PolicyRecord, PolicySnapshot, RejectionReason,
};
use leave_ledger_audit::AuditEvent;
use time::macros::date;

#[test]
fn test_submission_appends_pending_application() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Governed(create_test_policy(12));

    let transition: TransitionResult = submit(
        &state,
        &policy,
        create_test_request(date!(2026 - 03 - 10), date!(2026 - 03 - 12)),
    )
    .unwrap();

    assert_eq!(transition.new_state.applications.len(), 1);
    assert_eq!(transition.new_state.sequence, 1);

    let LedgerChange::Submitted(application) = transition.change else {
        panic!("expected a submission");
    };
    assert_eq!(application.status, LeaveStatus::Pending);
    assert_eq!(application.application_id, None);
    assert_eq!(application.created_by, EMPLOYEE);
    assert_eq!(application.created_at, NOW);
    assert_eq!(application.requested_days(), DayCount::from_days(3));
}

#[test]
fn test_submission_emits_exactly_one_audit_event() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Governed(create_test_policy(12));

    let transition: TransitionResult = submit(
        &state,
        &policy,
        create_test_request(date!(2026 - 03 - 10), date!(2026 - 03 - 12)),
    )
    .unwrap();

    let event: &AuditEvent = &transition.audit_event;
    assert_eq!(event.action.name, "SubmitLeave");
    assert_eq!(event.actor.id, EMPLOYEE);
    assert_eq!(event.cause.id, "req-456");
    assert_eq!(event.employee_id, EmployeeId::new(EMPLOYEE));
    assert!(event.before.data.contains("pending=0"));
    assert!(event.after.data.contains("pending=1"));
    assert!(event.action.details.as_ref().unwrap().contains("3 day(s)"));
}

#[test]
fn test_submission_returns_projected_balance() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Governed(create_test_policy(12));

    let transition: TransitionResult = submit(
        &state,
        &policy,
        create_test_request(date!(2026 - 03 - 10), date!(2026 - 03 - 12)),
    )
    .unwrap();

    assert_eq!(transition.projected.len(), 1);
    assert_eq!(transition.projected[0].remaining, DayCount::from_days(9));
}

#[test]
fn test_governed_submission_captures_policy_snapshot() {
    let state: LedgerState = create_test_ledger();
    let record: PolicyRecord = create_test_policy(12);
    let policy: PolicyResolution = PolicyResolution::Governed(record.clone());

    let new_state: LedgerState = submit_stored(
        &state,
        &policy,
        create_test_request(date!(2026 - 03 - 10), date!(2026 - 03 - 10)),
        1,
    );

    let snapshot: &PolicySnapshot = new_state.applications[0].policy_snapshot.as_ref().unwrap();
    assert_eq!(snapshot.policy(), &record);
}

#[test]
fn test_rejected_submission_leaves_ledger_untouched() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Governed(create_test_policy(2));

    let result: Result<TransitionResult, CoreError> = submit(
        &state,
        &policy,
        create_test_request(date!(2026 - 03 - 10), date!(2026 - 03 - 12)),
    );

    assert_eq!(
        result,
        Err(CoreError::Rejected(RejectionReason::InsufficientBalance))
    );
    assert!(state.applications.is_empty());
    assert_eq!(state.sequence, 0);
}

#[test]
fn test_pending_applications_do_not_consume_balance() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Governed(create_test_policy(3));

    let first: LedgerState = submit_stored(
        &state,
        &policy,
        create_test_request(date!(2026 - 03 - 10), date!(2026 - 03 - 12)),
        1,
    );

    // The first application is still pending, so the whole entitlement remains.
    let second: Result<TransitionResult, CoreError> = submit(
        &first,
        &policy,
        create_test_request(date!(2026 - 04 - 06), date!(2026 - 04 - 08)),
    );
    assert!(second.is_ok());
}

#[test]
fn test_ungoverned_submission_skips_policy_checks() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Ungoverned(ConfigurationIssue::NoPolicyGroup);

    let transition: TransitionResult = submit(
        &state,
        &policy,
        create_test_request(date!(2020 - 01 - 01), date!(2020 - 12 - 31)),
    )
    .unwrap();

    assert!(transition.projected.is_empty());
    let LedgerChange::Submitted(application) = transition.change else {
        panic!("expected a submission");
    };
    assert_eq!(application.policy_snapshot, None);
}

#[test]
fn test_ungoverned_submission_still_checks_range() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Ungoverned(ConfigurationIssue::NoPolicyGroup);

    let result: Result<TransitionResult, CoreError> = submit(
        &state,
        &policy,
        create_test_request(date!(2026 - 03 - 12), date!(2026 - 03 - 10)),
    );
    assert_eq!(result, Err(CoreError::Rejected(RejectionReason::InvalidRange)));
}

#[test]
fn test_request_for_another_ledger_is_refused() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Governed(create_test_policy(12));

    let request: LeaveRequest = LeaveRequest::new(
        EmployeeId::new("E-999"),
        LeaveTypeName::new(LEAVE_TYPE),
        date!(2026 - 03 - 10),
        date!(2026 - 03 - 10),
    );
    let result: Result<TransitionResult, CoreError> = submit(&state, &policy, request);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidEmployee(_)))
    ));
}

#[test]
fn test_leave_type_match_is_case_insensitive() {
    let state: LedgerState = create_test_ledger();
    let policy: PolicyResolution = PolicyResolution::Governed(create_test_policy(12));

    let request: LeaveRequest = LeaveRequest::new(
        EmployeeId::new(EMPLOYEE),
        LeaveTypeName::new("CASUAL LEAVE"),
        date!(2026 - 03 - 10),
        date!(2026 - 03 - 10),
    );
    let transition: TransitionResult = submit(&state, &policy, request).unwrap();
    let applications: &[LeaveApplication] = &transition.new_state.applications;
    assert_eq!(applications.len(), 1);
}
