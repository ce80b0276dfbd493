// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application validation.
//!
//! A leave request is checked against its policy record in a fixed order and
//! the first failing rule is reported. The order is part of the contract:
//! callers surface the reason verbatim so the submitter knows what to fix.
//!
//! 1. The range is well formed
//! 2. Half days are permitted
//! 3. Cross-year ranges are permitted
//! 4. The continuous-day cap
//! 5. Backdating
//! 6. Lead time for future leave
//! 7. Spacing between same-type requests
//! 8. Remaining balance for every touched year
//! 9. The yearly maximum
//! 10. The service-life maximum
//! 11. Holiday adjacency
//! 12. Supporting evidence

use crate::application::{LeaveApplication, LeaveRequest, requested_days, requested_days_in_year};
use crate::balance::{Balance, compute_balance, used_over_service};
use crate::date_range::{LeaveRange, days_between};
use crate::day_count::DayCount;
use crate::holiday::HolidayCalendar;
use crate::leave_status::LeaveStatus;
use crate::policy::PolicyRecord;
use crate::types::LeaveTypeName;
use serde::{Deserialize, Serialize};
use time::Date;

/// Why a leave request was not admitted.
///
/// The display text of each variant is the message shown to the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("invalid range")]
    InvalidRange,
    #[error("half-day requests not permitted for this leave type")]
    HalfDayNotPermitted,
    #[error("cross-year not permitted for this leave type")]
    CrossYearNotPermitted,
    #[error("exceeds continuous-day cap")]
    ExceedsContinuousDayCap,
    #[error("past-dated request exceeds allowed backdating")]
    BackdatingExceeded,
    #[error("too early for future leave")]
    TooEarlyForFutureLeave,
    #[error("insufficient spacing between same-type requests")]
    InsufficientSpacing,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("exceeds maximum leave allowed in a year")]
    ExceedsYearlyMaximum,
    #[error("exceeds maximum sanction over service")]
    ExceedsServiceMaximum,
    #[error("leave may not immediately precede a holiday")]
    PrecedesHoliday,
    #[error("leave may not immediately follow a holiday")]
    FollowsHoliday,
    #[error("attachment required")]
    AttachmentRequired,
}

/// Everything the validator needs besides the request and its policy.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The calendar date the request is evaluated on.
    pub today: Date,
    /// The employee's applications of the requested leave type.
    pub history: &'a [LeaveApplication],
    /// Holidays used by the adjacency rules.
    pub holidays: &'a HolidayCalendar,
}

impl<'a> ValidationContext<'a> {
    /// Creates a new validation context.
    #[must_use]
    pub const fn new(
        today: Date,
        history: &'a [LeaveApplication],
        holidays: &'a HolidayCalendar,
    ) -> Self {
        Self {
            today,
            history,
            holidays,
        }
    }
}

/// The outcome of an admitted request.
///
/// `projected` holds, for each calendar year the request touches, the balance
/// as it would be once the request is approved. It is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    /// The validated range.
    pub range: LeaveRange,
    /// Length of the request in days.
    pub requested_days: DayCount,
    /// Projected balance per touched year, in year order.
    pub projected: Vec<Balance>,
}

/// Validates a leave request against its policy record.
///
/// # Arguments
///
/// * `request` - The inbound request
/// * `policy` - The policy record for the requested leave type
/// * `context` - Today's date, the employee's history and holidays
///
/// # Errors
///
/// Returns the [`RejectionReason`] of the first failing rule.
pub fn validate_leave_request(
    request: &LeaveRequest,
    policy: &PolicyRecord,
    context: &ValidationContext<'_>,
) -> Result<Acceptance, RejectionReason> {
    let range: LeaveRange = validate_range(request)?;

    if request.half_day && !policy.half_day {
        return Err(RejectionReason::HalfDayNotPermitted);
    }

    if range.spans_years() && !policy.leave_allow_between_multiple_years {
        return Err(RejectionReason::CrossYearNotPermitted);
    }

    let requested: DayCount = requested_days(&range, request.half_day);

    if policy.continuous_days_allow && requested > DayCount::from_days(policy.continuous_sanction)
    {
        return Err(RejectionReason::ExceedsContinuousDayCap);
    }

    check_lead_time(&range, policy, context.today)?;
    check_spacing(&request.leave_type, &range, policy, context.history)?;

    let projected: Vec<Balance> =
        check_balance(&range, request.half_day, policy, context.history)?;
    check_service_cap(requested, policy, context.history)?;
    check_holiday_adjacency(&range, policy, context.holidays)?;

    if policy.does_requires_leave_attachment
        && requested >= DayCount::from_days(policy.min_day_count_for_requiring_attachment)
        && !request.has_attachment()
    {
        return Err(RejectionReason::AttachmentRequired);
    }

    Ok(Acceptance {
        range,
        requested_days: requested,
        projected,
    })
}

/// Validates a request for a leave type no policy governs.
///
/// Only the range is checked; there is no balance enforcement.
///
/// # Errors
///
/// Returns `RejectionReason::InvalidRange` if the range is inverted.
pub fn validate_ungoverned_request(request: &LeaveRequest) -> Result<Acceptance, RejectionReason> {
    let range: LeaveRange = validate_range(request)?;
    Ok(Acceptance {
        range,
        requested_days: requested_days(&range, request.half_day),
        projected: Vec::new(),
    })
}

/// Re-checks the balance rules for a pending application about to be
/// approved.
///
/// The history may change between submission and approval, so the balance,
/// yearly and service caps are evaluated again as if the application were
/// a new request.
///
/// # Arguments
///
/// * `application` - The pending application
/// * `policy` - The policy record governing the application
/// * `history` - The employee's applications of the same leave type
///
/// # Errors
///
/// Returns the [`RejectionReason`] of the first failing balance rule.
pub fn validate_approval(
    application: &LeaveApplication,
    policy: &PolicyRecord,
    history: &[LeaveApplication],
) -> Result<Vec<Balance>, RejectionReason> {
    let others: Vec<LeaveApplication> = history
        .iter()
        .filter(|other| {
            other.application_id.is_none() || other.application_id != application.application_id
        })
        .cloned()
        .collect();

    let projected: Vec<Balance> =
        check_balance(&application.range, application.half_day, policy, &others)?;
    check_service_cap(application.requested_days(), policy, &others)?;
    Ok(projected)
}

fn validate_range(request: &LeaveRequest) -> Result<LeaveRange, RejectionReason> {
    LeaveRange::new(request.from_date, request.to_date).map_err(|_| RejectionReason::InvalidRange)
}

fn check_lead_time(
    range: &LeaveRange,
    policy: &PolicyRecord,
    today: Date,
) -> Result<(), RejectionReason> {
    let days_in_past: i64 = days_between(range.from_date(), today);
    if days_in_past > i64::from(policy.max_limit_for_past_leave) {
        return Err(RejectionReason::BackdatingExceeded);
    }

    if range.from_date() > today && policy.allow_earn_leave {
        let lead_days: i64 = days_between(today, range.from_date());
        if lead_days < i64::from(policy.apply_future_leave_after_days) {
            return Err(RejectionReason::TooEarlyForFutureLeave);
        }
    }

    Ok(())
}

/// Rejects a request starting fewer than the interval days after the end of
/// an earlier, undecided or approved request of the same type.
fn check_spacing(
    leave_type: &LeaveTypeName,
    range: &LeaveRange,
    policy: &PolicyRecord,
    history: &[LeaveApplication],
) -> Result<(), RejectionReason> {
    if policy.interval_days_in_same_leave == 0 {
        return Ok(());
    }
    let interval: i64 = i64::from(policy.interval_days_in_same_leave);

    let too_close: bool = history
        .iter()
        .filter(|other| other.status != LeaveStatus::Rejected && &other.leave_type == leave_type)
        .filter(|other| other.range.from_date() <= range.from_date())
        .any(|other| days_between(other.range.to_date(), range.from_date()) < interval);

    if too_close {
        return Err(RejectionReason::InsufficientSpacing);
    }
    Ok(())
}

/// Checks remaining balance and the yearly maximum for every touched year.
///
/// Returns the projected balances on success.
fn check_balance(
    range: &LeaveRange,
    half_day: bool,
    policy: &PolicyRecord,
    history: &[LeaveApplication],
) -> Result<Vec<Balance>, RejectionReason> {
    let mut projected: Vec<Balance> = Vec::new();

    for year in range.years() {
        let balance: Balance = compute_balance(policy, year, history);
        let in_year: DayCount = requested_days_in_year(range, half_day, year);
        if !policy.negative_balance && in_year > balance.remaining {
            return Err(RejectionReason::InsufficientBalance);
        }
        projected.push(balance.after_consuming(in_year));
    }

    if let Some(yearly_cap) = policy.max_balance_in_year {
        let cap: DayCount = DayCount::from_days(yearly_cap);
        if projected.iter().any(|balance| balance.used > cap) {
            return Err(RejectionReason::ExceedsYearlyMaximum);
        }
    }

    Ok(projected)
}

fn check_service_cap(
    requested: DayCount,
    policy: &PolicyRecord,
    history: &[LeaveApplication],
) -> Result<(), RejectionReason> {
    let Some(service_cap) = policy.max_sanction_over_service else {
        return Ok(());
    };
    let used: DayCount = used_over_service(&policy.leave_type_name, history);
    if used + requested > DayCount::from_days(service_cap) {
        return Err(RejectionReason::ExceedsServiceMaximum);
    }
    Ok(())
}

fn check_holiday_adjacency(
    range: &LeaveRange,
    policy: &PolicyRecord,
    holidays: &HolidayCalendar,
) -> Result<(), RejectionReason> {
    if holidays.is_empty() {
        return Ok(());
    }

    let day_after: Option<Date> = range.to_date().next_day();
    if !policy.prefix_allowed && day_after.is_some_and(|day| holidays.is_holiday(day)) {
        return Err(RejectionReason::PrecedesHoliday);
    }

    let day_before: Option<Date> = range.from_date().previous_day();
    if !policy.suffix_allowed && day_before.is_some_and(|day| holidays.is_holiday(day)) {
        return Err(RejectionReason::FollowsHoliday);
    }

    Ok(())
}
