// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_ledger_audit::{AuditEvent, StateSnapshot};
use leave_ledger_domain::{
    Balance, EmployeeId, LeaveApplication, LeaveStatus, LeaveTypeName,
};

/// One employee's applications for one leave type.
///
/// The ledger is the unit of consistency: every write is checked against
/// `sequence`, which the store increments on each accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    /// The employee this ledger belongs to.
    pub employee_id: EmployeeId,
    /// The leave type this ledger tracks.
    pub leave_type: LeaveTypeName,
    /// Every application of this type, in submission order.
    pub applications: Vec<LeaveApplication>,
    /// Number of transitions applied so far.
    pub sequence: i64,
}

impl LedgerState {
    /// Creates a new empty ledger.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee this ledger belongs to
    /// * `leave_type` - The leave type this ledger tracks
    #[must_use]
    pub const fn new(employee_id: EmployeeId, leave_type: LeaveTypeName) -> Self {
        Self {
            employee_id,
            leave_type,
            applications: Vec::new(),
            sequence: 0,
        }
    }

    /// Finds an application by its persisted ID.
    #[must_use]
    pub fn find_application(&self, application_id: i64) -> Option<&LeaveApplication> {
        self.applications
            .iter()
            .find(|application| application.application_id == Some(application_id))
    }

    /// Counts applications with the given status.
    #[must_use]
    pub fn count_with_status(&self, status: LeaveStatus) -> usize {
        self.applications
            .iter()
            .filter(|application| application.status == status)
            .count()
    }

    /// Converts the ledger to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "employee={},leave_type={},sequence={},pending={},approved={},rejected={}",
            self.employee_id,
            self.leave_type,
            self.sequence,
            self.count_with_status(LeaveStatus::Pending),
            self.count_with_status(LeaveStatus::Approved),
            self.count_with_status(LeaveStatus::Rejected),
        ))
    }
}

/// The write a transition asks the store to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    /// Insert a new pending application.
    Submitted(LeaveApplication),
    /// Move a pending application to a terminal status.
    StatusChanged {
        /// The application being decided.
        application_id: i64,
        /// The status the application must still have.
        from: LeaveStatus,
        /// The new status.
        to: LeaveStatus,
    },
}

/// The result of a successful ledger transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The ledger after the transition.
    pub new_state: LedgerState,
    /// The write to perform.
    pub change: LedgerChange,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Projected balances per touched year, when a policy governs the ledger.
    pub projected: Vec<Balance>,
}
