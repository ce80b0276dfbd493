// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_ledger_domain::{DomainError, RejectionReason};

/// Errors that can occur during ledger transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The request or approval was refused by policy.
    Rejected(RejectionReason),
    /// No application with this ID exists in the ledger.
    ApplicationNotFound(i64),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Rejected(reason) => write!(f, "Rejected: {reason}"),
            Self::ApplicationNotFound(id) => write!(f, "Leave application {id} not found"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<RejectionReason> for CoreError {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected(reason)
    }
}
