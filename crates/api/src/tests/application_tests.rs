// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_ledger_domain::{DayCount, RejectionReason};
use leave_ledger_persistence::Persistence;

use super::helpers::{
    APPROVER, CASUAL, EMPLOYEE, SICK, create_decide_request, create_employee_request,
    create_submit_request, create_test_cause, create_test_context, setup_store, submit,
};
use crate::{
    ApiError, AuditTrailResponse, DecideLeaveApplicationRequest, DecideLeaveApplicationResponse,
    ListLeaveApplicationsResponse, SetPolicyGroupActiveRequest, SubmitLeaveApplicationRequest,
    SubmitLeaveApplicationResponse, approve_leave_application, get_audit_trail,
    list_leave_applications, register_employee, reject_leave_application,
    set_policy_group_active, submit_leave_application,
};

fn submit_request(
    persistence: &mut Persistence,
    request: SubmitLeaveApplicationRequest,
) -> Result<SubmitLeaveApplicationResponse, ApiError> {
    submit_leave_application(
        persistence,
        request,
        &create_test_context(),
        create_test_cause(),
    )
}

fn approve(
    persistence: &mut Persistence,
    application_id: i64,
) -> Result<DecideLeaveApplicationResponse, ApiError> {
    approve_leave_application(
        persistence,
        create_decide_request(application_id),
        &create_test_context(),
        create_test_cause(),
    )
}

fn reject(
    persistence: &mut Persistence,
    request: DecideLeaveApplicationRequest,
) -> Result<DecideLeaveApplicationResponse, ApiError> {
    reject_leave_application(
        persistence,
        request,
        &create_test_context(),
        create_test_cause(),
    )
}

fn expect_rejection(result: Result<SubmitLeaveApplicationResponse, ApiError>) -> RejectionReason {
    match result {
        Err(ApiError::Rejected { reason }) => reason,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_accepts_request_within_balance() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let response: SubmitLeaveApplicationResponse = submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-03-09", "2026-03-11"),
    )
    .unwrap();

    assert_eq!(response.status, "pending");
    assert_eq!(response.requested_days, DayCount::from_days(3));
    assert!(response.governed);
    assert_eq!(response.configuration_warning, None);
    assert_eq!(response.projected.len(), 1);
    assert_eq!(response.projected[0].year, 2026);
    assert_eq!(response.projected[0].remaining, DayCount::from_days(7));
}

#[test]
fn test_submit_half_day_counts_half_of_last_day() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let mut request: SubmitLeaveApplicationRequest =
        create_submit_request(CASUAL, "2026-03-09", "2026-03-10");
    request.half_day = true;

    let response: SubmitLeaveApplicationResponse =
        submit_request(&mut persistence, request).unwrap();

    assert_eq!(response.requested_days, DayCount::from_half_days(3));
}

#[test]
fn test_rejection_reason_is_surfaced_verbatim() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let mut request: SubmitLeaveApplicationRequest =
        create_submit_request(SICK, "2026-03-09", "2026-03-10");
    request.half_day = true;

    let result: Result<SubmitLeaveApplicationResponse, ApiError> =
        submit_request(&mut persistence, request);

    let err: ApiError = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "half-day requests not permitted for this leave type"
    );
    assert!(matches!(
        err,
        ApiError::Rejected {
            reason: RejectionReason::HalfDayNotPermitted
        }
    ));
}

#[test]
fn test_submit_rejects_backdated_request() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let reason: RejectionReason = expect_rejection(submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-02-20", "2026-02-20"),
    ));

    assert_eq!(reason, RejectionReason::BackdatingExceeded);
}

#[test]
fn test_submit_rejects_request_beyond_balance() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let reason: RejectionReason = expect_rejection(submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-03-09", "2026-03-20"),
    ));

    assert_eq!(reason, RejectionReason::InsufficientBalance);
}

#[test]
fn test_submit_rejects_inverted_range() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let reason: RejectionReason = expect_rejection(submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-03-11", "2026-03-09"),
    ));

    assert_eq!(reason, RejectionReason::InvalidRange);
}

#[test]
fn test_submit_rejects_unparseable_date() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let result: Result<SubmitLeaveApplicationResponse, ApiError> = submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-13-01", "2026-03-09"),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "from_date"),
        other => panic!("expected invalid from_date, got {other:?}"),
    }
}

#[test]
fn test_submit_for_unknown_employee_is_not_found() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let mut request: SubmitLeaveApplicationRequest =
        create_submit_request(CASUAL, "2026-03-09", "2026-03-09");
    request.employee_id = String::from("E-404");

    let result: Result<SubmitLeaveApplicationResponse, ApiError> =
        submit_request(&mut persistence, request);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_refused_submission_stores_nothing() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let _ = submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-03-09", "2026-03-20"),
    );

    let listed: ListLeaveApplicationsResponse =
        list_leave_applications(&mut persistence, EMPLOYEE, None).unwrap();
    let trail: AuditTrailResponse = get_audit_trail(&mut persistence, EMPLOYEE, None).unwrap();

    assert!(listed.applications.is_empty());
    assert!(trail.events.is_empty());
}

// ============================================================================
// Ungoverned ledgers
// ============================================================================

#[test]
fn test_employee_without_group_is_not_balance_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    register_employee(&mut persistence, create_employee_request(EMPLOYEE, None)).unwrap();

    let response: SubmitLeaveApplicationResponse = submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-03-09", "2026-04-30"),
    )
    .unwrap();

    assert!(!response.governed);
    assert!(response.configuration_warning.is_some());
    assert!(response.projected.is_empty());
}

#[test]
fn test_inactive_group_degrades_to_ungoverned() {
    let (mut persistence, group_id): (Persistence, i64) = setup_store();
    set_policy_group_active(
        &mut persistence,
        SetPolicyGroupActiveRequest {
            policy_group_id: group_id,
            is_active: false,
        },
    )
    .unwrap();

    let response: SubmitLeaveApplicationResponse = submit_request(
        &mut persistence,
        create_submit_request(CASUAL, "2026-03-09", "2026-03-20"),
    )
    .unwrap();

    assert!(!response.governed);
}

#[test]
fn test_leave_type_outside_group_degrades_to_ungoverned() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let response: SubmitLeaveApplicationResponse = submit_request(
        &mut persistence,
        create_submit_request("Study Leave", "2026-03-09", "2026-03-09"),
    )
    .unwrap();

    assert!(!response.governed);
    assert!(response.configuration_warning.is_some());
}

// ============================================================================
// Decisions
// ============================================================================

#[test]
fn test_approve_returns_resulting_balance() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let application_id: i64 = submit(&mut persistence, CASUAL, "2026-03-09", "2026-03-11");

    let response: DecideLeaveApplicationResponse =
        approve(&mut persistence, application_id).unwrap();

    assert_eq!(response.status, "approved");
    assert_eq!(response.balances.len(), 1);
    assert_eq!(response.balances[0].used, DayCount::from_days(3));
    assert_eq!(response.balances[0].remaining, DayCount::from_days(7));
}

#[test]
fn test_approval_rechecks_balance() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let first: i64 = submit(&mut persistence, CASUAL, "2026-03-09", "2026-03-14");
    let second: i64 = submit(&mut persistence, CASUAL, "2026-04-06", "2026-04-11");

    approve(&mut persistence, first).unwrap();
    let result: Result<DecideLeaveApplicationResponse, ApiError> =
        approve(&mut persistence, second);

    assert!(matches!(
        result,
        Err(ApiError::Rejected {
            reason: RejectionReason::InsufficientBalance
        })
    ));

    let listed: ListLeaveApplicationsResponse =
        list_leave_applications(&mut persistence, EMPLOYEE, Some(CASUAL)).unwrap();
    assert_eq!(listed.applications[1].status, "pending");
}

#[test]
fn test_rejected_application_cannot_be_approved() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let application_id: i64 = submit(&mut persistence, CASUAL, "2026-03-09", "2026-03-09");
    let mut request: DecideLeaveApplicationRequest = create_decide_request(application_id);
    request.note = Some(String::from("Team offsite"));

    let rejected: DecideLeaveApplicationResponse = reject(&mut persistence, request).unwrap();
    assert_eq!(rejected.status, "rejected");

    let result: Result<DecideLeaveApplicationResponse, ApiError> =
        approve(&mut persistence, application_id);
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "leave_status_transition");
        }
        other => panic!("expected a status transition violation, got {other:?}"),
    }
}

#[test]
fn test_approve_unknown_application_is_not_found() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let result: Result<DecideLeaveApplicationResponse, ApiError> = approve(&mut persistence, 42);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_decision_requires_approver() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let application_id: i64 = submit(&mut persistence, CASUAL, "2026-03-09", "2026-03-09");
    let mut request: DecideLeaveApplicationRequest = create_decide_request(application_id);
    request.approver_id = String::new();

    let result: Result<DecideLeaveApplicationResponse, ApiError> =
        reject(&mut persistence, request);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

// ============================================================================
// Listing and audit
// ============================================================================

#[test]
fn test_list_applications_filters_by_leave_type() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    submit(&mut persistence, CASUAL, "2026-03-09", "2026-03-09");
    submit(&mut persistence, SICK, "2026-03-10", "2026-03-11");

    let all: ListLeaveApplicationsResponse =
        list_leave_applications(&mut persistence, EMPLOYEE, None).unwrap();
    let sick: ListLeaveApplicationsResponse =
        list_leave_applications(&mut persistence, EMPLOYEE, Some("sick leave")).unwrap();

    assert_eq!(all.applications.len(), 2);
    assert_eq!(sick.applications.len(), 1);
    assert_eq!(sick.applications[0].days, DayCount::from_days(2));
    assert!(sick.applications[0].has_policy_snapshot);
}

#[test]
fn test_audit_trail_records_every_transition() {
    let (mut persistence, _): (Persistence, i64) = setup_store();
    let application_id: i64 = submit(&mut persistence, CASUAL, "2026-03-09", "2026-03-10");
    approve(&mut persistence, application_id).unwrap();

    let trail: AuditTrailResponse = get_audit_trail(&mut persistence, EMPLOYEE, None).unwrap();

    let actions: Vec<&str> = trail
        .events
        .iter()
        .map(|event| event.action.name.as_str())
        .collect();
    assert_eq!(actions, vec!["SubmitLeave", "ApproveLeave"]);
    assert_eq!(trail.events[0].actor.actor_type, "employee");
    assert_eq!(trail.events[1].actor.id, APPROVER);
    assert!(trail.events.iter().all(|event| event.event_id.is_some()));
}

#[test]
fn test_audit_trail_for_unknown_employee_is_not_found() {
    let (mut persistence, _): (Persistence, i64) = setup_store();

    let result: Result<AuditTrailResponse, ApiError> =
        get_audit_trail(&mut persistence, "E-404", None);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
