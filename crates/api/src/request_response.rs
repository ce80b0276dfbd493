// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use leave_ledger_audit::AuditEvent;
use leave_ledger_domain::{Balance, DayCount, LeaveApplication, PolicyGroup, PolicyRecord};

/// API request to register an employee or update an existing profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterEmployeeRequest {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee code.
    pub employee_code: String,
    /// The display name.
    pub display_name: String,
    /// The policy group to assign, if any.
    pub policy_group_id: Option<i64>,
}

/// API response for a successful employee registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterEmployeeResponse {
    /// The employee identifier.
    pub employee_id: String,
    /// The assigned policy group, if any.
    pub policy_group_id: Option<i64>,
    /// A success message.
    pub message: String,
}

/// API request to create a policy group, or to replace one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyGroupRequest {
    /// The group name, unique ignoring case.
    pub group_name: String,
    /// Free-text description.
    pub description: String,
    /// Whether the group governs its employees.
    pub is_active: bool,
    /// One policy record per leave type.
    pub policies: Vec<PolicyRecord>,
}

/// API response for a successful policy group creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatePolicyGroupResponse {
    /// The canonical policy group identifier.
    pub policy_group_id: i64,
    /// The group name.
    pub group_name: String,
    /// Number of leave types the group governs.
    pub policy_count: usize,
    /// A success message.
    pub message: String,
}

/// API response for a successful in-place policy group update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdatePolicyGroupResponse {
    /// The canonical policy group identifier.
    pub policy_group_id: i64,
    /// The group name after the update.
    pub group_name: String,
    /// Employees whose balances are now computed with the new records.
    pub affected_employees: usize,
    /// A success message.
    pub message: String,
}

/// API request to activate or deactivate a policy group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPolicyGroupActiveRequest {
    /// The policy group.
    pub policy_group_id: i64,
    /// The new status.
    pub is_active: bool,
}

/// API response for a policy group status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetPolicyGroupActiveResponse {
    /// The policy group.
    pub policy_group_id: i64,
    /// The new status.
    pub is_active: bool,
    /// A success message.
    pub message: String,
}

/// API request to assign an employee to a policy group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignPolicyGroupRequest {
    /// The employee identifier.
    pub employee_id: String,
    /// The policy group, or `None` to clear the assignment.
    pub policy_group_id: Option<i64>,
}

/// API response for a policy group assignment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignPolicyGroupResponse {
    /// The employee identifier.
    pub employee_id: String,
    /// The assigned policy group, if any.
    pub policy_group_id: Option<i64>,
    /// A success message.
    pub message: String,
}

/// Policy group information for API responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PolicyGroupInfo {
    /// The canonical policy group identifier.
    pub policy_group_id: i64,
    /// The group name.
    pub group_name: String,
    /// Free-text description.
    pub description: String,
    /// Whether the group governs its employees.
    pub is_active: bool,
    /// One policy record per leave type.
    pub policies: Vec<PolicyRecord>,
}

impl PolicyGroupInfo {
    /// Builds the response view of a stored group.
    #[must_use]
    pub fn from_group(policy_group_id: i64, group: PolicyGroup) -> Self {
        Self {
            policy_group_id,
            group_name: group.group_name,
            description: group.description,
            is_active: group.is_active,
            policies: group.policies,
        }
    }
}

/// API response listing policy groups.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListPolicyGroupsResponse {
    /// Every stored group, ordered by identifier.
    pub groups: Vec<PolicyGroupInfo>,
}

/// API request to submit a leave application.
///
/// Dates are ISO 8601 calendar dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitLeaveApplicationRequest {
    /// The employee taking leave.
    pub employee_id: String,
    /// The leave type, by display name.
    pub leave_type: String,
    /// First day of leave.
    pub from_date: String,
    /// Last day of leave, inclusive.
    pub to_date: String,
    /// Whether the last day is only half taken.
    pub half_day: bool,
    /// Free-text reason.
    pub reason: String,
    /// Reference to supporting evidence, if any.
    pub attachment: Option<String>,
}

/// Balance information for API responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BalanceInfo {
    /// The reference calendar year.
    pub year: i32,
    /// Entitlement including forwarded days.
    pub allowed: DayCount,
    /// Days carried from the previous year.
    pub forwarded: DayCount,
    /// Approved days in the year.
    pub used: DayCount,
    /// `allowed - used`.
    pub remaining: DayCount,
}

impl From<&Balance> for BalanceInfo {
    fn from(balance: &Balance) -> Self {
        Self {
            year: balance.year,
            allowed: balance.allowed,
            forwarded: balance.forwarded,
            used: balance.used,
            remaining: balance.remaining,
        }
    }
}

/// API response for an accepted leave application.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitLeaveApplicationResponse {
    /// The canonical application identifier.
    pub application_id: i64,
    /// The audit event recording the submission.
    pub event_id: i64,
    /// Length of the application in days.
    pub requested_days: DayCount,
    /// The application status, always `pending`.
    pub status: String,
    /// Whether a policy record governed the submission.
    pub governed: bool,
    /// Why no policy governed the submission, if none did.
    pub configuration_warning: Option<String>,
    /// Projected balance per touched year once approved.
    pub projected: Vec<BalanceInfo>,
    /// A success message.
    pub message: String,
}

/// API request to approve or reject a pending application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecideLeaveApplicationRequest {
    /// The application to decide.
    pub application_id: i64,
    /// The approver making the decision.
    pub approver_id: String,
    /// Optional note recorded with a rejection.
    pub note: Option<String>,
}

/// API response for an approval or rejection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecideLeaveApplicationResponse {
    /// The decided application.
    pub application_id: i64,
    /// The audit event recording the decision.
    pub event_id: i64,
    /// The new status.
    pub status: String,
    /// Balance per touched year after an approval.
    pub balances: Vec<BalanceInfo>,
    /// A success message.
    pub message: String,
}

/// API request for an employee's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLeaveBalanceRequest {
    /// The employee.
    pub employee_id: String,
    /// The leave type, by display name.
    pub leave_type: String,
    /// The reference calendar year.
    pub year: i32,
}

/// API response for a balance query.
///
/// Entitlement fields are absent when no policy governs the leave type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetLeaveBalanceResponse {
    /// The employee.
    pub employee_id: String,
    /// The leave type.
    pub leave_type: String,
    /// The reference calendar year.
    pub year: i32,
    /// Approved days in the year.
    pub used: DayCount,
    /// Entitlement and remaining days, when governed.
    pub balance: Option<BalanceInfo>,
    /// Days that may be encashed, when governed.
    pub encashable: Option<DayCount>,
    /// Why no policy governs the leave type, if none does.
    pub configuration_warning: Option<String>,
}

/// Leave application information for API responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeaveApplicationInfo {
    /// The canonical application identifier.
    pub application_id: Option<i64>,
    /// The leave type.
    pub leave_type: String,
    /// First day of leave.
    pub from_date: String,
    /// Last day of leave, inclusive.
    pub to_date: String,
    /// Whether the last day is only half taken.
    pub half_day: bool,
    /// Length in days.
    pub days: DayCount,
    /// Current status.
    pub status: String,
    /// Free-text reason.
    pub reason: String,
    /// Whether a policy snapshot was captured at submission.
    pub has_policy_snapshot: bool,
}

impl From<&LeaveApplication> for LeaveApplicationInfo {
    fn from(application: &LeaveApplication) -> Self {
        Self {
            application_id: application.application_id,
            leave_type: application.leave_type.value().to_string(),
            from_date: application.range.from_date().to_string(),
            to_date: application.range.to_date().to_string(),
            half_day: application.half_day,
            days: application.requested_days(),
            status: application.status.as_str().to_string(),
            reason: application.reason.clone(),
            has_policy_snapshot: application.policy_snapshot.is_some(),
        }
    }
}

/// API response listing an employee's applications.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListLeaveApplicationsResponse {
    /// The employee.
    pub employee_id: String,
    /// Applications in submission order.
    pub applications: Vec<LeaveApplicationInfo>,
}

/// API response carrying an employee's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTrailResponse {
    /// The employee.
    pub employee_id: String,
    /// Events in the order they were written.
    pub events: Vec<AuditEvent>,
}
