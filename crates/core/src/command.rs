// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_ledger_domain::LeaveRequest;

/// A command represents user or approver intent as data only.
///
/// Commands are the only way to change a leave ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new leave application.
    SubmitLeave {
        /// The request to validate and record.
        request: LeaveRequest,
    },
    /// Approve a pending application.
    ApproveLeave {
        /// The application to approve.
        application_id: i64,
    },
    /// Reject a pending application.
    RejectLeave {
        /// The application to reject.
        application_id: i64,
        /// Optional note from the approver.
        note: Option<String>,
    },
}

impl Command {
    /// Returns the audit action name for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::SubmitLeave { .. } => "SubmitLeave",
            Self::ApproveLeave { .. } => "ApproveLeave",
            Self::RejectLeave { .. } => "RejectLeave",
        }
    }
}
