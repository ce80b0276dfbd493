// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    EmployeeId, HolidayCalendar, LeaveApplication, LeaveRange, LeaveRequest, LeaveStatus,
    LeaveTypeName, PolicyRecord,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

/// The date every validation test is evaluated on.
pub const TODAY: Date = date!(2026 - 03 - 02);

pub const LEAVE_TYPE: &str = "Casual Leave";

pub fn create_test_policy(allowed_balance: u32) -> PolicyRecord {
    let mut policy: PolicyRecord = PolicyRecord::new("CL", LEAVE_TYPE, allowed_balance);
    policy.max_limit_for_past_leave = 30;
    policy
}

pub fn create_test_request(from: Date, to: Date) -> LeaveRequest {
    LeaveRequest::new(
        EmployeeId::new("E-100"),
        LeaveTypeName::new(LEAVE_TYPE),
        from,
        to,
    )
}

/// Builds a stored application with the given status.
///
/// Applications are numbered by creation order through `id`.
pub fn create_test_application(
    id: i64,
    from: Date,
    to: Date,
    status: LeaveStatus,
) -> LeaveApplication {
    let request: LeaveRequest = create_test_request(from, to);
    let created_at: OffsetDateTime = datetime!(2025-01-01 8:00 UTC) + time::Duration::days(id);
    let mut application: LeaveApplication = LeaveApplication::submit(
        &request,
        LeaveRange::new(from, to).expect("test ranges are ordered"),
        "E-100",
        created_at,
    );
    application.application_id = Some(id);
    application.status = status;
    application
}

pub fn no_holidays() -> HolidayCalendar {
    HolidayCalendar::new()
}
