// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApplyContext, Command, CoreError, LedgerChange, LedgerState, PolicyResolution,
    TransitionResult, apply,
};
use leave_ledger_audit::{Actor, Cause};
use leave_ledger_domain::{
    EmployeeId, HolidayCalendar, LeaveApplication, LeaveRequest, LeaveTypeName, PolicyRecord,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const TODAY: Date = date!(2026 - 03 - 02);
pub const NOW: OffsetDateTime = datetime!(2026-03-02 10:30 UTC);
pub const EMPLOYEE: &str = "E-100";
pub const LEAVE_TYPE: &str = "Casual Leave";

pub static NO_HOLIDAYS: HolidayCalendar = HolidayCalendar::new();

pub fn create_test_actor() -> Actor {
    Actor::employee(EMPLOYEE)
}

pub fn create_test_approver() -> Actor {
    Actor::approver("M-1")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Leave request"))
}

pub fn create_test_context() -> ApplyContext<'static> {
    ApplyContext {
        today: TODAY,
        now: NOW,
        holidays: &NO_HOLIDAYS,
        capture_snapshot: true,
    }
}

pub fn create_test_policy(allowed_balance: u32) -> PolicyRecord {
    PolicyRecord::new("CL", LEAVE_TYPE, allowed_balance)
}

pub fn create_test_ledger() -> LedgerState {
    LedgerState::new(EmployeeId::new(EMPLOYEE), LeaveTypeName::new(LEAVE_TYPE))
}

pub fn create_test_request(from: Date, to: Date) -> LeaveRequest {
    LeaveRequest::new(
        EmployeeId::new(EMPLOYEE),
        LeaveTypeName::new(LEAVE_TYPE),
        from,
        to,
    )
}

pub fn submit(
    state: &LedgerState,
    policy: &PolicyResolution,
    request: LeaveRequest,
) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        policy,
        Command::SubmitLeave { request },
        &create_test_context(),
        create_test_actor(),
        create_test_cause(),
    )
}

/// Submits a request and assigns the stored ID, the way the store would.
pub fn submit_stored(
    state: &LedgerState,
    policy: &PolicyResolution,
    request: LeaveRequest,
    application_id: i64,
) -> LedgerState {
    let transition: TransitionResult = submit(state, policy, request).unwrap();
    let mut new_state: LedgerState = transition.new_state;
    let stored: &mut LeaveApplication = new_state
        .applications
        .last_mut()
        .expect("submission appends an application");
    stored.application_id = Some(application_id);
    assert!(matches!(transition.change, LedgerChange::Submitted(_)));
    new_state
}
