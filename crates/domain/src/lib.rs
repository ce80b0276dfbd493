// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application;
mod balance;
mod date_range;
mod day_count;
mod error;
mod holiday;
mod leave_status;
mod policy;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use application::{LeaveApplication, LeaveRequest, requested_days, requested_days_in_year};
pub use balance::{
    Balance, compute_balance, encashable_days, policy_for_year, used_in_year, used_over_service,
};
pub use date_range::{LeaveRange, days_between, iso_date, parse_iso_date, year_bounds};
pub use day_count::DayCount;
pub use error::DomainError;
pub use holiday::HolidayCalendar;
pub use leave_status::LeaveStatus;
pub use policy::{PolicyGroup, PolicyRecord, PolicySnapshot};
pub use types::{Employee, EmployeeId, LeaveTypeId, LeaveTypeName};
pub use validation::{
    Acceptance, RejectionReason, ValidationContext, validate_approval, validate_leave_request,
    validate_ungoverned_request,
};
