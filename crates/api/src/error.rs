// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leave_ledger::CoreError;
use leave_ledger_domain::{DomainError, RejectionReason};
use leave_ledger_persistence::PersistenceError;

/// Message returned when the store could not be consulted in time.
pub const BALANCE_UNVERIFIABLE: &str = "balance could not be verified";

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request was refused by a leave policy rule.
    ///
    /// The reason's message is shown to the submitter verbatim.
    Rejected {
        /// The rule that refused the request.
        reason: RejectionReason,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The ledger changed while the request was being processed.
    ///
    /// Retrying against a fresh read may succeed.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The store could not be consulted, so the request was refused.
    BalanceUnverifiable {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Creates the fail-closed error for an unreachable store.
    #[must_use]
    pub fn balance_unverifiable() -> Self {
        Self::BalanceUnverifiable {
            message: BALANCE_UNVERIFIABLE.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected { reason } => write!(f, "{reason}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::BalanceUnverifiable { message } => write!(f, "{message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RejectionReason> for ApiError {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected { reason }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDateRange { from_date, to_date } => ApiError::InvalidInput {
            field: String::from("to_date"),
            message: format!("{to_date} is before {from_date}"),
        },
        DomainError::InvalidDayCount { value } => ApiError::InvalidInput {
            field: String::from("days"),
            message: format!("Invalid day count: {value}"),
        },
        DomainError::InvalidPolicyGroupName(msg) => ApiError::InvalidInput {
            field: String::from("group_name"),
            message: msg,
        },
        DomainError::InvalidPolicyRecord {
            leave_type_id,
            reason,
        } => ApiError::InvalidInput {
            field: String::from("policies"),
            message: format!("Policy record '{leave_type_id}': {reason}"),
        },
        DomainError::DuplicateLeaveType {
            group_name,
            leave_type_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unique_leave_type"),
            message: format!(
                "Leave type '{leave_type_id}' appears more than once in policy group '{group_name}'"
            ),
        },
        DomainError::LeaveTypeNotFound {
            group_name,
            leave_type,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Leave type"),
            message: format!("Leave type '{leave_type}' is not part of policy group '{group_name}'"),
        },
        DomainError::InvalidEmployee(msg) => ApiError::InvalidInput {
            field: String::from("employee_id"),
            message: msg,
        },
        DomainError::InvalidLeaveStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid leave status: '{status}'"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("leave_status_transition"),
                message: format!("Cannot move application from {from} to {to}: {reason}"),
            }
        }
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Rejected(reason) => ApiError::Rejected { reason },
        CoreError::ApplicationNotFound(application_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Leave application"),
            message: format!("Leave application {application_id} does not exist"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Store failures surface as `Internal`; missing records and concurrent
/// writes keep their meaning.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::PolicyGroupNotFound(policy_group_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Policy group"),
            message: format!("Policy group {policy_group_id} does not exist"),
        },
        PersistenceError::EmployeeNotFound(employee_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee '{employee_id}' is not registered"),
        },
        PersistenceError::ApplicationNotFound(application_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Leave application"),
            message: format!("Leave application {application_id} does not exist"),
        },
        PersistenceError::UniqueViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("unique_name"),
            message: msg,
        },
        err @ (PersistenceError::ConcurrentModification { .. }
        | PersistenceError::StaleApplicationStatus { .. }) => ApiError::Conflict {
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
