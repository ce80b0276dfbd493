// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave requests and submitted leave applications.

use crate::date_range::{LeaveRange, iso_date};
use crate::day_count::DayCount;
use crate::leave_status::LeaveStatus;
use crate::policy::PolicySnapshot;
use crate::types::{EmployeeId, LeaveTypeName};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// An inbound request for leave, before it has been validated.
///
/// The dates are raw: an inverted range is representable here and is
/// rejected by validation rather than by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The employee taking leave.
    pub employee_id: EmployeeId,
    /// The leave type, by display name.
    pub leave_type: LeaveTypeName,
    /// First day of leave.
    #[serde(with = "iso_date")]
    pub from_date: Date,
    /// Last day of leave, inclusive.
    #[serde(with = "iso_date")]
    pub to_date: Date,
    /// Whether the last day is only half taken.
    #[serde(default)]
    pub half_day: bool,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
    /// Reference to supporting evidence, if any.
    #[serde(default)]
    pub attachment: Option<String>,
}

impl LeaveRequest {
    /// Creates a full-day request with no reason or attachment.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee taking leave
    /// * `leave_type` - The leave type, by display name
    /// * `from_date` - First day of leave
    /// * `to_date` - Last day of leave, inclusive
    #[must_use]
    pub const fn new(
        employee_id: EmployeeId,
        leave_type: LeaveTypeName,
        from_date: Date,
        to_date: Date,
    ) -> Self {
        Self {
            employee_id,
            leave_type,
            from_date,
            to_date,
            half_day: false,
            reason: String::new(),
            attachment: None,
        }
    }

    /// Marks the last day as a half day.
    #[must_use]
    pub const fn with_half_day(mut self) -> Self {
        self.half_day = true;
        self
    }

    /// Sets the free-text reason.
    #[must_use]
    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = reason.to_string();
        self
    }

    /// Attaches a reference to supporting evidence.
    #[must_use]
    pub fn with_attachment(mut self, attachment: &str) -> Self {
        self.attachment = Some(attachment.to_string());
        self
    }

    /// Returns true if a non-blank attachment reference is present.
    #[must_use]
    pub fn has_attachment(&self) -> bool {
        self.attachment
            .as_deref()
            .is_some_and(|reference| !reference.trim().is_empty())
    }
}

/// A submitted leave application.
///
/// Created `Pending` and mutated only by a single status decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Identifier assigned by the store. `None` until persisted.
    pub application_id: Option<i64>,
    /// The employee taking leave.
    pub employee_id: EmployeeId,
    /// Denormalized leave type display name.
    pub leave_type: LeaveTypeName,
    /// The days requested.
    pub range: LeaveRange,
    /// Whether the last day is only half taken.
    pub half_day: bool,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: LeaveStatus,
    /// Reference to supporting evidence, if any.
    pub attachment: Option<String>,
    /// The policy in force at submission, when captured.
    pub policy_snapshot: Option<PolicySnapshot>,
    /// Who submitted the application.
    pub created_by: String,
    /// Submission time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Time of the last status change.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl LeaveApplication {
    /// Creates a new `Pending` application from a validated range.
    ///
    /// # Arguments
    ///
    /// * `request` - The inbound request
    /// * `range` - The validated range of the request
    /// * `created_by` - Who submitted the application
    /// * `now` - Submission time
    #[must_use]
    pub fn submit(
        request: &LeaveRequest,
        range: LeaveRange,
        created_by: &str,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            application_id: None,
            employee_id: request.employee_id.clone(),
            leave_type: request.leave_type.clone(),
            range,
            half_day: request.half_day,
            reason: request.reason.clone(),
            status: LeaveStatus::Pending,
            attachment: request.attachment.clone(),
            policy_snapshot: None,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the length of the application in days.
    #[must_use]
    pub fn requested_days(&self) -> DayCount {
        requested_days(&self.range, self.half_day)
    }

    /// Returns the part of the application falling in the given year.
    #[must_use]
    pub fn days_in_year(&self, year: i32) -> DayCount {
        requested_days_in_year(&self.range, self.half_day, year)
    }

    /// Returns true if the application consumes balance.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.status.counts_toward_usage()
    }
}

/// Returns the length of a request in days.
///
/// A half-day request counts its final day as half a day.
#[must_use]
pub fn requested_days(range: &LeaveRange, half_day: bool) -> DayCount {
    let whole: DayCount = DayCount::from_days(range.day_count());
    if half_day { whole - DayCount::HALF } else { whole }
}

/// Returns the part of a request falling in the given calendar year.
///
/// The half-day reduction belongs to the year containing the final day.
#[must_use]
pub fn requested_days_in_year(range: &LeaveRange, half_day: bool, year: i32) -> DayCount {
    let whole: DayCount = DayCount::from_days(range.overlap_days_in_year(year));
    if half_day && range.to_date().year() == year {
        whole - DayCount::HALF
    } else {
        whole
    }
}
