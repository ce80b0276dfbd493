// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the leave ledger.
//!
//! Requests arrive as plain DTOs, are translated into core commands, applied
//! to a freshly loaded ledger and persisted atomically. Errors from the
//! lower layers are translated explicitly into [`ApiError`].
//!
//! The synchronous [`handlers`] are the contract; [`LeaveLedgerService`]
//! adds shared async access with a bounded wait on the store.

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

mod config;
mod error;
pub mod handlers;
mod request_response;
mod service;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_STORE_TIMEOUT_MS, LedgerConfig};
pub use error::{
    ApiError, BALANCE_UNVERIFIABLE, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    approve_leave_application, assign_policy_group, create_policy_group, get_audit_trail,
    get_leave_balance, get_policy_group, list_leave_applications, list_policy_groups,
    register_employee, reject_leave_application, set_policy_group_active,
    submit_leave_application, update_policy_group,
};
pub use request_response::{
    AssignPolicyGroupRequest, AssignPolicyGroupResponse, AuditTrailResponse, BalanceInfo,
    CreatePolicyGroupResponse, DecideLeaveApplicationRequest, DecideLeaveApplicationResponse,
    GetLeaveBalanceRequest, GetLeaveBalanceResponse, LeaveApplicationInfo,
    ListLeaveApplicationsResponse, ListPolicyGroupsResponse, PolicyGroupInfo,
    PolicyGroupRequest, RegisterEmployeeRequest, RegisterEmployeeResponse,
    SetPolicyGroupActiveRequest, SetPolicyGroupActiveResponse, SubmitLeaveApplicationRequest,
    SubmitLeaveApplicationResponse, UpdatePolicyGroupResponse,
};
pub use service::{BroadcastNotifier, LeaveLedgerService, SubmissionNotice, SubmissionNotifier};
