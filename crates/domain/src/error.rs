// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
///
/// These describe malformed input or configuration. Policy outcomes for an
/// otherwise well-formed leave request are reported as
/// [`RejectionReason`](crate::RejectionReason) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The end of a date range precedes its start.
    InvalidDateRange {
        /// The first day of the range.
        from_date: Date,
        /// The last day of the range.
        to_date: Date,
    },
    /// A day count is not a finite multiple of half a day.
    InvalidDayCount {
        /// The rejected value, as given.
        value: String,
    },
    /// The policy group name is empty or invalid.
    InvalidPolicyGroupName(String),
    /// A policy record is malformed.
    InvalidPolicyRecord {
        /// The leave type identifier of the offending record.
        leave_type_id: String,
        /// Description of the problem.
        reason: String,
    },
    /// A policy group contains two records for the same leave type.
    DuplicateLeaveType {
        /// The policy group name.
        group_name: String,
        /// The duplicated leave type identifier.
        leave_type_id: String,
    },
    /// The leave type does not exist in the policy group.
    LeaveTypeNotFound {
        /// The policy group name.
        group_name: String,
        /// The leave type that was looked up.
        leave_type: String,
    },
    /// Employee fields are empty or invalid.
    InvalidEmployee(String),
    /// A leave status string could not be parsed.
    InvalidLeaveStatus {
        /// The unrecognized status.
        status: String,
    },
    /// A leave status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange { from_date, to_date } => {
                write!(
                    f,
                    "Invalid date range: {to_date} is before {from_date}"
                )
            }
            Self::InvalidDayCount { value } => {
                write!(
                    f,
                    "Invalid day count: {value}. Must be a finite multiple of 0.5"
                )
            }
            Self::InvalidPolicyGroupName(msg) => write!(f, "Invalid policy group name: {msg}"),
            Self::InvalidPolicyRecord {
                leave_type_id,
                reason,
            } => {
                write!(f, "Invalid policy record '{leave_type_id}': {reason}")
            }
            Self::DuplicateLeaveType {
                group_name,
                leave_type_id,
            } => {
                write!(
                    f,
                    "Leave type '{leave_type_id}' appears more than once in policy group '{group_name}'"
                )
            }
            Self::LeaveTypeNotFound {
                group_name,
                leave_type,
            } => {
                write!(
                    f,
                    "Leave type '{leave_type}' not found in policy group '{group_name}'"
                )
            }
            Self::InvalidEmployee(msg) => write!(f, "Invalid employee: {msg}"),
            Self::InvalidLeaveStatus { status } => {
                write!(f, "Invalid leave status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(
                    f,
                    "Cannot transition leave application from {from} to {to}: {reason}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
