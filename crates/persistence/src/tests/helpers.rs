// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_ledger::{
    ApplyContext, Command, LedgerState, PolicyResolution, TransitionResult, apply,
    resolve_policy,
};
use leave_ledger_audit::{Actor, Cause};
use leave_ledger_domain::{
    Employee, EmployeeId, HolidayCalendar, LeaveRequest, LeaveTypeName, PolicyGroup,
    PolicyRecord,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{PersistTransitionResult, Persistence};

pub const TODAY: Date = date!(2026 - 03 - 02);
pub const NOW: OffsetDateTime = datetime!(2026-03-02 10:30 UTC);
pub const EMPLOYEE: &str = "E-100";
pub const CASUAL: &str = "Casual Leave";
pub const SICK: &str = "Sick Leave";

pub static NO_HOLIDAYS: HolidayCalendar = HolidayCalendar::new();

pub fn create_test_group() -> PolicyGroup {
    let mut casual: PolicyRecord = PolicyRecord::new("CL", CASUAL, 10);
    casual.half_day = true;
    let sick: PolicyRecord = PolicyRecord::new("SL", SICK, 14);
    PolicyGroup::new("Staff", "Default staff policies", vec![casual, sick])
        .expect("valid test group")
}

pub fn create_test_employee(employee_id: &str) -> Employee {
    Employee::new(
        EmployeeId::new(employee_id),
        format!("CODE-{employee_id}"),
        format!("Employee {employee_id}"),
    )
}

/// Creates a store with the test group and one employee assigned to it.
pub fn setup_store() -> (Persistence, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let group_id: i64 = persistence.create_policy_group(&create_test_group()).unwrap();
    let employee: Employee = create_test_employee(EMPLOYEE).with_policy_group(Some(group_id));
    persistence.upsert_employee(&employee).unwrap();
    (persistence, group_id)
}

pub fn create_test_context() -> ApplyContext<'static> {
    ApplyContext {
        today: TODAY,
        now: NOW,
        holidays: &NO_HOLIDAYS,
        capture_snapshot: true,
    }
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Leave request"))
}

pub fn create_test_request(leave_type: &str, from: Date, to: Date) -> LeaveRequest {
    LeaveRequest::new(
        EmployeeId::new(EMPLOYEE),
        LeaveTypeName::new(leave_type),
        from,
        to,
    )
}

/// Loads the ledger and resolves its policy the way the service does.
pub fn load(persistence: &mut Persistence, leave_type: &str) -> (LedgerState, PolicyResolution) {
    let employee_id: EmployeeId = EmployeeId::new(EMPLOYEE);
    let leave_type: LeaveTypeName = LeaveTypeName::new(leave_type);
    let state: LedgerState = persistence.load_ledger(&employee_id, &leave_type).unwrap();
    let employee: Employee = persistence.get_employee(&employee_id).unwrap();
    let group: Option<PolicyGroup> = employee
        .policy_group_id
        .map(|id| persistence.get_policy_group(id).unwrap());
    let policy: PolicyResolution = resolve_policy(group.as_ref(), &leave_type);
    (state, policy)
}

pub fn compute(state: &LedgerState, policy: &PolicyResolution, command: Command) -> TransitionResult {
    let actor: Actor = match &command {
        Command::SubmitLeave { .. } => Actor::employee(EMPLOYEE),
        _ => Actor::approver("M-1"),
    };
    apply(
        state,
        policy,
        command,
        &create_test_context(),
        actor,
        create_test_cause(),
    )
    .unwrap()
}

/// Loads, applies and persists one command.
pub fn run(persistence: &mut Persistence, leave_type: &str, command: Command) -> PersistTransitionResult {
    let (state, policy): (LedgerState, PolicyResolution) = load(persistence, leave_type);
    let transition: TransitionResult = compute(&state, &policy, command);
    persistence.persist_transition(&transition).unwrap()
}

pub fn submit(persistence: &mut Persistence, leave_type: &str, from: Date, to: Date) -> i64 {
    let request: LeaveRequest = create_test_request(leave_type, from, to);
    run(persistence, leave_type, Command::SubmitLeave { request }).application_id
}
