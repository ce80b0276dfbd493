// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers are synchronous and take the store by mutable reference. Clock
//! and holiday inputs arrive through [`ApplyContext`] so that callers decide
//! what "today" is.

use leave_ledger::{
    ApplyContext, Command, LedgerState, PolicyResolution, TransitionResult, apply,
    resolve_policy,
};
use leave_ledger_audit::{Actor, AuditEvent, Cause};
use leave_ledger_domain::{
    Balance, DayCount, Employee, EmployeeId, LeaveApplication, LeaveRequest, LeaveTypeName,
    PolicyGroup, PolicyRecord, compute_balance, encashable_days, parse_iso_date,
    policy_for_year, used_in_year,
};
use leave_ledger_persistence::{PersistTransitionResult, Persistence, PersistenceError};
use time::Date;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AssignPolicyGroupRequest, AssignPolicyGroupResponse, AuditTrailResponse, BalanceInfo,
    CreatePolicyGroupResponse, DecideLeaveApplicationRequest, DecideLeaveApplicationResponse,
    GetLeaveBalanceRequest, GetLeaveBalanceResponse, LeaveApplicationInfo,
    ListLeaveApplicationsResponse, ListPolicyGroupsResponse, PolicyGroupInfo,
    PolicyGroupRequest, RegisterEmployeeRequest, RegisterEmployeeResponse,
    SetPolicyGroupActiveRequest, SetPolicyGroupActiveResponse, SubmitLeaveApplicationRequest,
    SubmitLeaveApplicationResponse, UpdatePolicyGroupResponse,
};

/// Translates a store error, logging failures of the store itself.
fn store_error(err: PersistenceError) -> ApiError {
    let translated: ApiError = translate_persistence_error(err);
    if let ApiError::Internal { message } = &translated {
        error!(%message, "Store operation failed");
    }
    translated
}

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} cannot be empty"),
        });
    }
    Ok(())
}

fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Resolves the policy governing an employee's ledger for a leave type.
///
/// A missing or inactive group, or a leave type the group does not cover,
/// degrades to no balance enforcement. The degradation is logged.
fn resolve_for(
    persistence: &mut Persistence,
    employee: &Employee,
    leave_type: &LeaveTypeName,
) -> Result<PolicyResolution, ApiError> {
    let group: Option<PolicyGroup> = employee
        .policy_group_id
        .map(|policy_group_id| persistence.get_policy_group(policy_group_id))
        .transpose()
        .map_err(store_error)?;

    let resolution: PolicyResolution = resolve_policy(group.as_ref(), leave_type);
    if let Some(issue) = resolution.issue() {
        warn!(
            employee_id = %employee.employee_id,
            leave_type = %leave_type,
            %issue,
            "No policy governs this leave type; balance is not enforced"
        );
    }
    Ok(resolution)
}

fn load_employee(
    persistence: &mut Persistence,
    employee_id: &EmployeeId,
) -> Result<Employee, ApiError> {
    persistence.get_employee(employee_id).map_err(store_error)
}

/// Applies a command to a freshly loaded ledger and persists the result.
fn apply_and_persist(
    persistence: &mut Persistence,
    state: &LedgerState,
    resolution: &PolicyResolution,
    command: Command,
    context: &ApplyContext<'_>,
    actor: Actor,
    cause: Cause,
) -> Result<(TransitionResult, PersistTransitionResult), ApiError> {
    let transition: TransitionResult =
        apply(state, resolution, command, context, actor, cause).map_err(translate_core_error)?;
    let persisted: PersistTransitionResult = persistence
        .persist_transition(&transition)
        .map_err(store_error)?;
    Ok((transition, persisted))
}

// ============================================================================
// Employees and policy groups
// ============================================================================

/// Registers an employee, or updates an existing profile.
///
/// # Errors
///
/// Returns an error if:
/// - The employee ID or display name is empty
/// - The policy group does not exist
/// - The store write fails
pub fn register_employee(
    persistence: &mut Persistence,
    request: RegisterEmployeeRequest,
) -> Result<RegisterEmployeeResponse, ApiError> {
    let employee: Employee = Employee::new(
        EmployeeId::new(&request.employee_id),
        request.employee_code,
        request.display_name,
    )
    .with_policy_group(request.policy_group_id);
    employee.validate().map_err(translate_domain_error)?;

    if let Some(policy_group_id) = request.policy_group_id {
        persistence
            .get_policy_group(policy_group_id)
            .map_err(store_error)?;
    }

    persistence.upsert_employee(&employee).map_err(store_error)?;
    info!(employee_id = %employee.employee_id, "Registered employee");

    Ok(RegisterEmployeeResponse {
        employee_id: employee.employee_id.value().to_string(),
        policy_group_id: employee.policy_group_id,
        message: format!("Registered employee '{}'", employee.employee_id),
    })
}

fn build_group(request: PolicyGroupRequest) -> Result<PolicyGroup, ApiError> {
    let mut group: PolicyGroup =
        PolicyGroup::new(&request.group_name, &request.description, request.policies)
            .map_err(translate_domain_error)?;
    group.is_active = request.is_active;
    Ok(group)
}

/// Creates a policy group.
///
/// # Errors
///
/// Returns an error if:
/// - The group name is empty or already used
/// - A policy record is invalid or a leave type appears twice
pub fn create_policy_group(
    persistence: &mut Persistence,
    request: PolicyGroupRequest,
) -> Result<CreatePolicyGroupResponse, ApiError> {
    let group: PolicyGroup = build_group(request)?;
    let policy_group_id: i64 = persistence
        .create_policy_group(&group)
        .map_err(store_error)?;

    Ok(CreatePolicyGroupResponse {
        policy_group_id,
        group_name: group.group_name.clone(),
        policy_count: group.policies.len(),
        message: format!("Created policy group '{}'", group.group_name),
    })
}

/// Replaces a policy group in place.
///
/// Balances of assigned employees are computed with the new records from
/// now on, except for years governed by a captured snapshot.
///
/// # Errors
///
/// Returns an error if the group does not exist or the replacement is
/// invalid.
pub fn update_policy_group(
    persistence: &mut Persistence,
    policy_group_id: i64,
    request: PolicyGroupRequest,
) -> Result<UpdatePolicyGroupResponse, ApiError> {
    let group: PolicyGroup = build_group(request)?;
    persistence
        .update_policy_group(policy_group_id, &group)
        .map_err(store_error)?;

    let affected_employees: usize = persistence
        .list_employees_in_group(policy_group_id)
        .map_err(store_error)?
        .len();
    info!(
        policy_group_id,
        affected_employees, "Policy group replaced in place"
    );

    Ok(UpdatePolicyGroupResponse {
        policy_group_id,
        group_name: group.group_name.clone(),
        affected_employees,
        message: format!(
            "Updated policy group '{}' ({affected_employees} employee(s) affected)",
            group.group_name
        ),
    })
}

/// Activates or deactivates a policy group.
///
/// Employees of an inactive group are not balance-enforced.
///
/// # Errors
///
/// Returns an error if the group does not exist.
pub fn set_policy_group_active(
    persistence: &mut Persistence,
    request: SetPolicyGroupActiveRequest,
) -> Result<SetPolicyGroupActiveResponse, ApiError> {
    persistence
        .set_policy_group_active(request.policy_group_id, request.is_active)
        .map_err(store_error)?;

    if !request.is_active {
        warn!(
            policy_group_id = request.policy_group_id,
            "Policy group deactivated; its employees are no longer balance-enforced"
        );
    }

    let state: &str = if request.is_active {
        "activated"
    } else {
        "deactivated"
    };
    Ok(SetPolicyGroupActiveResponse {
        policy_group_id: request.policy_group_id,
        is_active: request.is_active,
        message: format!("Policy group {} {state}", request.policy_group_id),
    })
}

/// Assigns an employee to a policy group, or clears the assignment.
///
/// # Errors
///
/// Returns an error if the employee or the group does not exist.
pub fn assign_policy_group(
    persistence: &mut Persistence,
    request: AssignPolicyGroupRequest,
) -> Result<AssignPolicyGroupResponse, ApiError> {
    require_text("employee_id", &request.employee_id)?;
    let employee_id: EmployeeId = EmployeeId::new(&request.employee_id);

    if let Some(policy_group_id) = request.policy_group_id {
        persistence
            .get_policy_group(policy_group_id)
            .map_err(store_error)?;
    }

    persistence
        .assign_policy_group(&employee_id, request.policy_group_id)
        .map_err(store_error)?;

    let message: String = request.policy_group_id.map_or_else(
        || format!("Cleared policy group of employee '{employee_id}'"),
        |id| format!("Assigned employee '{employee_id}' to policy group {id}"),
    );
    Ok(AssignPolicyGroupResponse {
        employee_id: employee_id.value().to_string(),
        policy_group_id: request.policy_group_id,
        message,
    })
}

/// Retrieves a policy group.
///
/// # Errors
///
/// Returns an error if the group does not exist.
pub fn get_policy_group(
    persistence: &mut Persistence,
    policy_group_id: i64,
) -> Result<PolicyGroupInfo, ApiError> {
    let group: PolicyGroup = persistence
        .get_policy_group(policy_group_id)
        .map_err(store_error)?;
    Ok(PolicyGroupInfo::from_group(policy_group_id, group))
}

/// Lists every policy group.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_policy_groups(
    persistence: &mut Persistence,
) -> Result<ListPolicyGroupsResponse, ApiError> {
    let groups: Vec<PolicyGroupInfo> = persistence
        .list_policy_groups()
        .map_err(store_error)?
        .into_iter()
        .filter_map(|group| {
            group
                .policy_group_id
                .map(|policy_group_id| PolicyGroupInfo::from_group(policy_group_id, group))
        })
        .collect();

    debug!(count = groups.len(), "Listed policy groups");
    Ok(ListPolicyGroupsResponse { groups })
}

// ============================================================================
// Leave applications
// ============================================================================

/// Submits a leave application.
///
/// The request is validated against the employee's policy for the leave
/// type and, if admitted, stored as `Pending` together with its audit event.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `request` - The API request
/// * `context` - Today's date, the current time, holidays and snapshot setting
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - A field is empty or a date cannot be parsed
/// - The employee is not registered
/// - A policy rule refuses the request (`ApiError::Rejected`)
/// - The ledger changed concurrently (`ApiError::Conflict`)
pub fn submit_leave_application(
    persistence: &mut Persistence,
    request: SubmitLeaveApplicationRequest,
    context: &ApplyContext<'_>,
    cause: Cause,
) -> Result<SubmitLeaveApplicationResponse, ApiError> {
    require_text("employee_id", &request.employee_id)?;
    require_text("leave_type", &request.leave_type)?;
    let from_date: Date = parse_date_field("from_date", &request.from_date)?;
    let to_date: Date = parse_date_field("to_date", &request.to_date)?;

    let employee_id: EmployeeId = EmployeeId::new(&request.employee_id);
    let leave_type: LeaveTypeName = LeaveTypeName::new(&request.leave_type);
    let employee: Employee = load_employee(persistence, &employee_id)?;

    let mut leave_request: LeaveRequest =
        LeaveRequest::new(employee_id.clone(), leave_type.clone(), from_date, to_date)
            .with_reason(&request.reason);
    leave_request.half_day = request.half_day;
    leave_request.attachment = request.attachment;

    let state: LedgerState = persistence
        .load_ledger(&employee_id, &leave_type)
        .map_err(store_error)?;
    let resolution: PolicyResolution = resolve_for(persistence, &employee, &leave_type)?;

    let (transition, persisted): (TransitionResult, PersistTransitionResult) = apply_and_persist(
        persistence,
        &state,
        &resolution,
        Command::SubmitLeave {
            request: leave_request,
        },
        context,
        Actor::employee(employee_id.value()),
        cause,
    )?;

    let requested_days: DayCount = transition
        .new_state
        .applications
        .last()
        .map_or(DayCount::ZERO, LeaveApplication::requested_days);

    info!(
        application_id = persisted.application_id,
        employee_id = %employee_id,
        leave_type = %leave_type,
        %requested_days,
        "Leave application submitted"
    );

    Ok(SubmitLeaveApplicationResponse {
        application_id: persisted.application_id,
        event_id: persisted.event_id,
        requested_days,
        status: String::from("pending"),
        governed: resolution.policy().is_some(),
        configuration_warning: resolution.issue().map(ToString::to_string),
        projected: transition.projected.iter().map(BalanceInfo::from).collect(),
        message: format!(
            "Submitted {requested_days} day(s) of {leave_type} for {from_date}..={to_date}"
        ),
    })
}

/// Loads the ledger holding an application, with its employee and policy.
fn load_application_ledger(
    persistence: &mut Persistence,
    application_id: i64,
) -> Result<(LedgerState, PolicyResolution), ApiError> {
    let application: LeaveApplication = persistence
        .get_application(application_id)
        .map_err(store_error)?;
    let employee: Employee = load_employee(persistence, &application.employee_id)?;
    let state: LedgerState = persistence
        .load_ledger(&application.employee_id, &application.leave_type)
        .map_err(store_error)?;
    let resolution: PolicyResolution =
        resolve_for(persistence, &employee, &application.leave_type)?;
    Ok((state, resolution))
}

/// Approves a pending application.
///
/// The balance rules are re-checked against the current history before the
/// status changes. A refused approval leaves the application `Pending`.
///
/// # Errors
///
/// Returns an error if:
/// - The application does not exist or was already decided
/// - The approval would breach the balance, yearly or service caps
/// - The ledger changed concurrently
pub fn approve_leave_application(
    persistence: &mut Persistence,
    request: DecideLeaveApplicationRequest,
    context: &ApplyContext<'_>,
    cause: Cause,
) -> Result<DecideLeaveApplicationResponse, ApiError> {
    require_text("approver_id", &request.approver_id)?;
    let (state, resolution): (LedgerState, PolicyResolution) =
        load_application_ledger(persistence, request.application_id)?;

    let (transition, persisted): (TransitionResult, PersistTransitionResult) = apply_and_persist(
        persistence,
        &state,
        &resolution,
        Command::ApproveLeave {
            application_id: request.application_id,
        },
        context,
        Actor::approver(&request.approver_id),
        cause,
    )?;

    info!(
        application_id = request.application_id,
        approver_id = %request.approver_id,
        "Leave application approved"
    );

    Ok(DecideLeaveApplicationResponse {
        application_id: request.application_id,
        event_id: persisted.event_id,
        status: String::from("approved"),
        balances: transition.projected.iter().map(BalanceInfo::from).collect(),
        message: format!("Approved leave application {}", request.application_id),
    })
}

/// Rejects a pending application.
///
/// # Errors
///
/// Returns an error if the application does not exist, was already
/// decided, or the ledger changed concurrently.
pub fn reject_leave_application(
    persistence: &mut Persistence,
    request: DecideLeaveApplicationRequest,
    context: &ApplyContext<'_>,
    cause: Cause,
) -> Result<DecideLeaveApplicationResponse, ApiError> {
    require_text("approver_id", &request.approver_id)?;
    let (state, resolution): (LedgerState, PolicyResolution) =
        load_application_ledger(persistence, request.application_id)?;

    let (_, persisted): (TransitionResult, PersistTransitionResult) = apply_and_persist(
        persistence,
        &state,
        &resolution,
        Command::RejectLeave {
            application_id: request.application_id,
            note: request.note,
        },
        context,
        Actor::approver(&request.approver_id),
        cause,
    )?;

    info!(
        application_id = request.application_id,
        approver_id = %request.approver_id,
        "Leave application rejected"
    );

    Ok(DecideLeaveApplicationResponse {
        application_id: request.application_id,
        event_id: persisted.event_id,
        status: String::from("rejected"),
        balances: Vec::new(),
        message: format!("Rejected leave application {}", request.application_id),
    })
}

// ============================================================================
// Read-only queries
// ============================================================================

/// Computes an employee's balance for a leave type and year.
///
/// Includes the days forwarded from the previous year and the days that may
/// be encashed. Without a governing policy only usage is reported.
///
/// # Errors
///
/// Returns an error if the employee is not registered or the store cannot
/// be read.
pub fn get_leave_balance(
    persistence: &mut Persistence,
    request: &GetLeaveBalanceRequest,
) -> Result<GetLeaveBalanceResponse, ApiError> {
    require_text("leave_type", &request.leave_type)?;
    let employee_id: EmployeeId = EmployeeId::new(&request.employee_id);
    let leave_type: LeaveTypeName = LeaveTypeName::new(&request.leave_type);
    let employee: Employee = load_employee(persistence, &employee_id)?;

    let state: LedgerState = persistence
        .load_ledger(&employee_id, &leave_type)
        .map_err(store_error)?;
    let resolution: PolicyResolution = resolve_for(persistence, &employee, &leave_type)?;

    let used: DayCount = used_in_year(&leave_type, request.year, &state.applications);
    let (balance, encashable): (Option<BalanceInfo>, Option<DayCount>) =
        resolution.policy().map_or((None, None), |live: &PolicyRecord| {
            let balance: Balance = compute_balance(live, request.year, &state.applications);
            let governing: &PolicyRecord =
                policy_for_year(live, request.year, &state.applications);
            (
                Some(BalanceInfo::from(&balance)),
                Some(encashable_days(&balance, governing)),
            )
        });

    debug!(
        employee_id = %employee_id,
        leave_type = %leave_type,
        year = request.year,
        %used,
        "Computed leave balance"
    );

    Ok(GetLeaveBalanceResponse {
        employee_id: employee_id.value().to_string(),
        leave_type: leave_type.value().to_string(),
        year: request.year,
        used,
        balance,
        encashable,
        configuration_warning: resolution.issue().map(ToString::to_string),
    })
}

/// Lists an employee's applications, optionally for one leave type.
///
/// # Errors
///
/// Returns an error if the employee is not registered or the store cannot
/// be read.
pub fn list_leave_applications(
    persistence: &mut Persistence,
    employee_id: &str,
    leave_type: Option<&str>,
) -> Result<ListLeaveApplicationsResponse, ApiError> {
    let employee_id: EmployeeId = EmployeeId::new(employee_id);
    load_employee(persistence, &employee_id)?;
    let leave_type: Option<LeaveTypeName> = leave_type.map(LeaveTypeName::new);

    let applications: Vec<LeaveApplication> = persistence
        .list_applications(&employee_id, leave_type.as_ref())
        .map_err(store_error)?;

    Ok(ListLeaveApplicationsResponse {
        employee_id: employee_id.value().to_string(),
        applications: applications.iter().map(LeaveApplicationInfo::from).collect(),
    })
}

/// Retrieves an employee's audit trail, optionally for one leave type.
///
/// # Errors
///
/// Returns an error if the employee is not registered or the store cannot
/// be read.
pub fn get_audit_trail(
    persistence: &mut Persistence,
    employee_id: &str,
    leave_type: Option<&str>,
) -> Result<AuditTrailResponse, ApiError> {
    let employee_id: EmployeeId = EmployeeId::new(employee_id);
    load_employee(persistence, &employee_id)?;
    let leave_type: Option<LeaveTypeName> = leave_type.map(LeaveTypeName::new);

    let events: Vec<AuditEvent> = persistence
        .get_audit_events(&employee_id, leave_type.as_ref())
        .map_err(store_error)?;

    Ok(AuditTrailResponse {
        employee_id: employee_id.value().to_string(),
        events,
    })
}
