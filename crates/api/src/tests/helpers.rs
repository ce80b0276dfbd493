// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use leave_ledger::ApplyContext;
use leave_ledger_audit::Cause;
use leave_ledger_domain::{HolidayCalendar, PolicyRecord};
use leave_ledger_persistence::Persistence;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{
    CreatePolicyGroupResponse, DecideLeaveApplicationRequest, PolicyGroupRequest,
    RegisterEmployeeRequest, SubmitLeaveApplicationRequest, create_policy_group,
    register_employee, submit_leave_application,
};

pub const TODAY: Date = date!(2026 - 03 - 02);
pub const NOW: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);
pub const EMPLOYEE: &str = "E-200";
pub const APPROVER: &str = "M-1";
pub const CASUAL: &str = "Casual Leave";
pub const SICK: &str = "Sick Leave";

pub static NO_HOLIDAYS: HolidayCalendar = HolidayCalendar::new();

/// Casual leave: 10 days, half days allowed, up to 4 days encashable.
/// Sick leave: 14 days.
pub fn create_test_policies() -> Vec<PolicyRecord> {
    let mut casual: PolicyRecord = PolicyRecord::new("CL", CASUAL, 10);
    casual.half_day = true;
    casual.max_encashable_balance = 4;
    let sick: PolicyRecord = PolicyRecord::new("SL", SICK, 14);
    vec![casual, sick]
}

pub fn create_group_request(group_name: &str) -> PolicyGroupRequest {
    PolicyGroupRequest {
        group_name: group_name.to_string(),
        description: String::from("Test policies"),
        is_active: true,
        policies: create_test_policies(),
    }
}

pub fn create_employee_request(
    employee_id: &str,
    policy_group_id: Option<i64>,
) -> RegisterEmployeeRequest {
    RegisterEmployeeRequest {
        employee_id: employee_id.to_string(),
        employee_code: format!("CODE-{employee_id}"),
        display_name: format!("Employee {employee_id}"),
        policy_group_id,
    }
}

/// Creates a store with one policy group and one employee assigned to it.
pub fn setup_store() -> (Persistence, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let created: CreatePolicyGroupResponse =
        create_policy_group(&mut persistence, create_group_request("Staff")).unwrap();
    register_employee(
        &mut persistence,
        create_employee_request(EMPLOYEE, Some(created.policy_group_id)),
    )
    .unwrap();
    (persistence, created.policy_group_id)
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
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

pub fn create_submit_request(
    leave_type: &str,
    from_date: &str,
    to_date: &str,
) -> SubmitLeaveApplicationRequest {
    SubmitLeaveApplicationRequest {
        employee_id: EMPLOYEE.to_string(),
        leave_type: leave_type.to_string(),
        from_date: from_date.to_string(),
        to_date: to_date.to_string(),
        half_day: false,
        reason: String::from("Personal"),
        attachment: None,
    }
}

pub fn create_decide_request(application_id: i64) -> DecideLeaveApplicationRequest {
    DecideLeaveApplicationRequest {
        application_id,
        approver_id: APPROVER.to_string(),
        note: None,
    }
}

/// Submits a request and returns the new application id.
pub fn submit(persistence: &mut Persistence, leave_type: &str, from: &str, to: &str) -> i64 {
    submit_leave_application(
        persistence,
        create_submit_request(leave_type, from, to),
        &create_test_context(),
        create_test_cause(),
    )
    .unwrap()
    .application_id
}
