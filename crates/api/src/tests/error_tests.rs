// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_ledger::CoreError;
use leave_ledger_domain::{DomainError, RejectionReason};
use leave_ledger_persistence::PersistenceError;

use crate::{
    ApiError, BALANCE_UNVERIFIABLE, translate_core_error, translate_domain_error,
    translate_persistence_error,
};

#[test]
fn test_rejection_displays_reason_only() {
    let err: ApiError = ApiError::from(RejectionReason::InsufficientBalance);
    assert_eq!(err.to_string(), "insufficient balance");
}

#[test]
fn test_balance_unverifiable_message() {
    assert_eq!(
        ApiError::balance_unverifiable().to_string(),
        BALANCE_UNVERIFIABLE
    );
}

#[test]
fn test_concurrent_modification_becomes_conflict() {
    let err: ApiError = translate_persistence_error(PersistenceError::ConcurrentModification {
        employee_id: String::from("E-1"),
        leave_type: String::from("Casual Leave"),
        expected: 3,
        actual: 4,
    });
    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[test]
fn test_stale_status_becomes_conflict() {
    let err: ApiError = translate_persistence_error(PersistenceError::StaleApplicationStatus {
        application_id: 7,
        expected: String::from("pending"),
    });
    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[test]
fn test_store_failure_becomes_internal() {
    let err: ApiError =
        translate_persistence_error(PersistenceError::DatabaseError(String::from("disk I/O")));
    assert!(matches!(err, ApiError::Internal { .. }));
}

#[test]
fn test_core_rejection_keeps_reason() {
    let err: ApiError = translate_core_error(CoreError::Rejected(RejectionReason::AttachmentRequired));
    assert!(matches!(
        err,
        ApiError::Rejected {
            reason: RejectionReason::AttachmentRequired
        }
    ));
}

#[test]
fn test_date_parse_error_is_invalid_input() {
    let err: ApiError = translate_domain_error(DomainError::DateParseError {
        date_string: String::from("soon"),
        error: String::from("invalid"),
    });
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}
